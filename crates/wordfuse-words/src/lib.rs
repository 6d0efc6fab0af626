//! Word knowledge for Wordfuse: the embedded dictionary, submission
//! validation, and prompt generation.
//!
//! Everything here is pure (modulo the caller-supplied RNG) so the room
//! state machine can call into it synchronously.

pub mod dictionary;
pub mod prompt;
pub mod validate;

pub use validate::{MIN_WORD_LENGTH, Verdict, check, normalize};
