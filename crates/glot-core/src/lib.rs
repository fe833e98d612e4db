pub mod conjugation;
pub mod grammar;
pub mod lexicon;
pub mod pattern;
pub mod pronunciation;
pub mod settings;
