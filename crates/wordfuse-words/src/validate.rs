//! Word validation against the active prompt and round history.
//!
//! Pure and synchronous — this runs inside the room actor's serialized
//! command handling, so it must never block or touch I/O.

use crate::dictionary;

/// Submissions of two characters or fewer are rejected outright.
pub const MIN_WORD_LENGTH: usize = 3;

/// Why a submission was accepted or rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Word is acceptable.
    Valid,
    /// Shorter than [`MIN_WORD_LENGTH`] after normalization.
    TooShort,
    /// Does not contain the active prompt fragment.
    MissingPrompt,
    /// Not in the dictionary.
    NotInDictionary,
    /// Already played this round.
    AlreadyUsed,
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    /// Short feedback line for the submitting player.
    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Valid => "accepted",
            Verdict::TooShort => "too short",
            Verdict::MissingPrompt => "must contain the prompt",
            Verdict::NotInDictionary => "not in dictionary",
            Verdict::AlreadyUsed => "already played",
        }
    }
}

/// Canonical form used for history and comparisons: trimmed, uppercase.
pub fn normalize(word: &str) -> String {
    word.trim().to_uppercase()
}

/// Checks a submission against the prompt and the words already played.
///
/// `used` is expected to hold normalized words.
pub fn check(word: &str, prompt: &str, used: &[String]) -> Verdict {
    let word = normalize(word);
    let prompt = normalize(prompt);

    if word.len() < MIN_WORD_LENGTH {
        return Verdict::TooShort;
    }
    if !word.contains(&prompt) {
        return Verdict::MissingPrompt;
    }
    if !dictionary::contains(&word) {
        return Verdict::NotInDictionary;
    }
    if used.iter().any(|u| *u == word) {
        return Verdict::AlreadyUsed;
    }
    Verdict::Valid
}
