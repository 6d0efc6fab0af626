//! Prompt generation: choosing the next letter fragment.
//!
//! All entry points are generic over [`rand::Rng`] so the same seed
//! always produces the same prompt; production callers pass
//! `rand::rng()`, tests pass a seeded `StdRng`.

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use wordfuse_protocol::{Difficulty, GameConfig, Seat, VariantMode};

use crate::dictionary;

/// Curated high-frequency fragments for easy mode.
pub const EASY_PROMPTS: [&str; 8] =
    ["ING", "ER", "ED", "LY", "ION", "AL", "EN", "RE"];

/// Curated medium-frequency fragments.
pub const MEDIUM_PROMPTS: [&str; 8] =
    ["ENT", "TION", "CON", "PRE", "BLE", "NESS", "MENT", "IST"];

/// Fallback list when the random search comes up empty.
pub const COMMON_PROMPTS: [&str; 10] =
    ["ING", "TION", "ENT", "ER", "ED", "LY", "RE", "UN", "ION", "AL"];

/// Seat 1's fixed fragment walk in the sequence variant, in play order.
pub const SEQUENCE_PROMPTS: [&str; 5] = ["IL", "OU", "BE", "MY", "AL"];

/// Seat 2's finale fragment, dealt once seat 1 finishes the walk.
pub const SEQUENCE_FINALE: &str = "YE";

/// Attempts before the random search gives up.
const MAX_SEARCH_ATTEMPTS: usize = 10;

/// A fragment must appear in at least this many corpus words.
const MIN_MATCHING_WORDS: usize = 10;

/// Fragments nobody wants to solve: `X` against a non-vowel, `Q` without
/// `U`, or three consecutive consonants.
static AWKWARD_FRAGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"X[^AEIOU]|[^AEIOU]X|Q[^U]|[BCDFGHJKLMNPQRSTVWXYZ]{3}")
        .expect("awkward-fragment pattern is valid")
});

fn pick<R: Rng + ?Sized>(list: &[&str], rng: &mut R) -> String {
    list[rng.random_range(0..list.len())].to_string()
}

/// The prompt dealt when a round starts (turn owner is seat 1).
pub fn initial_prompt<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> String {
    match config.variant_mode {
        VariantMode::Sequence => SEQUENCE_PROMPTS[0].to_string(),
        VariantMode::None => by_difficulty(config.difficulty, rng),
    }
}

/// The prompt for the next turn.
///
/// `round_counter` must already reflect the upcoming turn (the room
/// advances it when the cycle returns to seat 1), `current_prompt` is
/// the fragment the outgoing turn owner just faced.
pub fn next_prompt<R: Rng + ?Sized>(
    config: &GameConfig,
    round_counter: u32,
    next_owner: Seat,
    current_prompt: &str,
    rng: &mut R,
) -> String {
    if config.variant_mode != VariantMode::Sequence {
        return by_difficulty(config.difficulty, rng);
    }

    match next_owner {
        // Seat 1 walks the fixed list, one fragment per cycle.
        Seat::One => {
            let index = round_counter as usize % SEQUENCE_PROMPTS.len();
            SEQUENCE_PROMPTS[index].to_string()
        }
        // Seat 2 gets the finale right after seat 1 cleared the last
        // fragment of the walk; ordinary prompts until then.
        Seat::Two => {
            let last = SEQUENCE_PROMPTS[SEQUENCE_PROMPTS.len() - 1];
            if current_prompt == last {
                SEQUENCE_FINALE.to_string()
            } else {
                by_difficulty(config.difficulty, rng)
            }
        }
    }
}

/// Difficulty-driven selection.
pub fn by_difficulty<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> String {
    match difficulty {
        Difficulty::Easy => pick(&EASY_PROMPTS, rng),
        // Half curated, half searched.
        Difficulty::Medium => {
            if rng.random_bool(0.5) {
                pick(&MEDIUM_PROMPTS, rng)
            } else {
                random_search(rng)
            }
        }
        Difficulty::Hard => random_search(rng),
    }
}

/// Random fragment search: slice a fragment out of a random playable
/// word and keep it only if enough other words contain it.
fn random_search<R: Rng + ?Sized>(rng: &mut R) -> String {
    let corpus = dictionary::playable_words();

    for _ in 0..MAX_SEARCH_ATTEMPTS {
        let word = &corpus[rng.random_range(0..corpus.len())];
        if word.len() < 5 {
            continue;
        }

        // Two-letter fragments 80% of the time.
        let frag_len = if rng.random_bool(0.8) { 2 } else { 3 };

        // Favor offsets past the first letter so the fragment is rarely
        // a pure prefix.
        let max_start = word.len() - frag_len;
        let min_start = max_start.min(1);
        let start = rng.random_range(min_start..=max_start);
        let fragment = &word[start..start + frag_len];

        if dictionary::count_containing(fragment) >= MIN_MATCHING_WORDS
            && !AWKWARD_FRAGMENT.is_match(fragment)
        {
            return fragment.to_string();
        }
    }

    pick(&COMMON_PROMPTS, rng)
}
