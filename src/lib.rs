//! Conlang grammar engine: declension rules, pronunciation rules and
//! syllabification over a TOML language definition.
//!
//! The engines live in `glot_core`; this crate binds them into a
//! [`Language`] and provides opt-in structured logging.

pub mod language;
pub mod trace_init;

pub use glot_core::{conjugation, grammar, lexicon, pattern, pronunciation, settings};
pub use language::{DeclinedForm, Language, LanguageError};
