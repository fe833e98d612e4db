//! Subcommand bodies. Each returns the text to print so the binary only
//! loads files, prints, and maps errors to an exit code.

pub mod config_ops;
pub mod form_ops;
pub mod sound_ops;

use glot_engine::conjugation::{CombinationParseError, DeclineError};

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Combination(#[from] CombinationParseError),
    #[error(transparent)]
    Decline(#[from] DeclineError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
