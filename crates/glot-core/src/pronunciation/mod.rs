//! Pronunciation engine: ordered rewrite rules, optional lookaround-driven
//! recursion, and a fail-closed syllabification pass.
//!
//! ```text
//! word ─▶ rules (regex or literal) ─▶ [rescan while lookaround rules fire]
//!      ─▶ [syllabify, joined by the configured separator] ─▶ pronunciation
//! ```

mod engine;
mod romanization;
mod rule;
mod syllable;


use std::fmt;

pub use engine::PronunciationEngine;
pub use romanization::Romanizer;
pub use rule::PronunciationRule;
pub use syllable::{SyllableError, SyllableGrammar};

use crate::pattern::PatternError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pronunciation {
    /// Empty when a word could not be syllabified.
    pub value: String,
    pub diagnostics: Vec<PronunciationDiagnostic>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PronunciationDiagnostic {
    /// The rule at `position` was skipped.
    IllegalPattern { position: usize, error: PatternError },
    /// Recursive rescanning of `word` stopped after `passes` passes.
    RecursionLimit { word: String, passes: usize },
    Unsyllabifiable { word: String, transformed: String },
}

impl fmt::Display for PronunciationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllegalPattern { position, error } => {
                write!(f, "rule {} skipped: {}", position + 1, error)
            }
            Self::RecursionLimit { word, passes } => {
                write!(f, "\"{word}\": rules still changing after {passes} recursive passes")
            }
            Self::Unsyllabifiable { word, transformed } => {
                write!(f, "\"{word}\" (as \"{transformed}\") cannot be split into syllables")
            }
        }
    }
}
