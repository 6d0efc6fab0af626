//! Embedded dictionary and playable-word corpus.
//!
//! The full word list is compiled into the binary and split into two
//! views: the dictionary set used to validate submissions, and the
//! playable corpus the prompt generator samples from. The corpus drops
//! words that are too short or long to be fun and words carrying rare
//! letter clusters that would produce unanswerable fragments.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Embedded word list: lowercase, alphabetic, one word per line.
static WORDS_DATA: &str = include_str!("../data/words.txt");

/// Words excluded from the playable corpus: four-plus consecutive
/// consonants or a handful of rare clusters.
static RARE_CLUSTERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[BCDFGHJKLMNPQRSTVWXYZ]{4,}|ELY|XQ|QZ|XZ|BPM|XIM")
        .expect("rare-cluster pattern is valid")
});

/// Full dictionary for O(1) submission lookup.
static DICTIONARY: Lazy<HashSet<&'static str>> =
    Lazy::new(|| WORDS_DATA.lines().filter(|w| !w.is_empty()).collect());

/// Uppercased corpus the prompt generator draws fragments from.
static PLAYABLE: Lazy<Vec<String>> = Lazy::new(|| {
    WORDS_DATA
        .lines()
        .map(str::to_uppercase)
        .filter(|w| (4..=15).contains(&w.len()) && !RARE_CLUSTERS.is_match(w))
        .collect()
});

/// Scanning for fragment popularity stops counting past this bound.
const COUNT_SCAN_CAP: usize = 50;

/// Whether a word is in the dictionary. Case-insensitive.
pub fn contains(word: &str) -> bool {
    let lower = word.to_lowercase();
    DICTIONARY.contains(lower.as_str())
}

/// Total dictionary size.
pub fn word_count() -> usize {
    DICTIONARY.len()
}

/// The playable corpus (uppercase).
pub fn playable_words() -> &'static [String] {
    &PLAYABLE
}

/// Counts playable words containing `fragment`, early-exiting once the
/// count clears [`COUNT_SCAN_CAP`] — past that the fragment is popular
/// enough and the exact number doesn't matter.
pub fn count_containing(fragment: &str) -> usize {
    let mut count = 0;
    for word in PLAYABLE.iter() {
        if word.contains(fragment) {
            count += 1;
            if count > COUNT_SCAN_CAP {
                break;
            }
        }
    }
    count
}
