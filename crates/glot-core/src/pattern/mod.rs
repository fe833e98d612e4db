//! User-authored patterns shared by the declension and pronunciation engines.
//!
//! Patterns are compiled with `fancy_regex`, which adds lookahead,
//! lookbehind and backreferences on top of the linear-time `regex` engine.
//! Compilation is lazy and cached on the owning [`CompiledPattern`].

mod compiled;
mod lookaround;
mod replace;
mod template;

#[cfg(test)]
mod tests;

use fancy_regex::{Regex, RegexBuilder};

use crate::settings::settings;

pub use compiled::CompiledPattern;
pub use lookaround::is_regex_lookahead_behind;
pub use replace::{advanced_replace, ReplaceScope};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("illegal pattern \"{pattern}\": {reason}")]
    Illegal { pattern: String, reason: String },
    #[error("pattern \"{pattern}\" failed while matching: {reason}")]
    Runtime { pattern: String, reason: String },
    #[error("pattern \"{0}\" uses lookahead/lookbehind and can only replace every instance")]
    LookaroundScope(String),
    #[error("replacement \"{template}\": {reason}")]
    Replacement { template: String, reason: String },
}

/// Returns true when `pattern` compiles.
pub fn is_legal(pattern: &str) -> bool {
    compile(pattern).is_ok()
}

pub(crate) fn compile(pattern: &str) -> Result<Regex, PatternError> {
    let limits = &settings().patterns;
    RegexBuilder::new(pattern)
        .backtrack_limit(limits.backtrack_limit)
        .delegate_size_limit(limits.size_limit)
        .build()
        .map_err(|e| PatternError::Illegal {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })
}

pub(crate) fn runtime_error(pattern: &str, err: fancy_regex::Error) -> PatternError {
    PatternError::Runtime {
        pattern: pattern.to_string(),
        reason: err.to_string(),
    }
}
