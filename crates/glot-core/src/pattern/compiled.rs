use std::fmt;
use std::sync::OnceLock;

use fancy_regex::Regex;

use super::template::expansion_template;
use super::{compile, is_regex_lookahead_behind, runtime_error, PatternError};

/// A pattern source plus its lazily compiled form.
///
/// The compiled regex is cached after the first use and dropped whenever the
/// source is replaced. Clones start with an empty cache. Equality compares
/// the source text only.
pub struct CompiledPattern {
    source: String,
    anchored: bool,
    compiled: OnceLock<Result<Regex, PatternError>>,
}

impl CompiledPattern {
    /// Unanchored pattern: matches anywhere in the text.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            anchored: false,
            compiled: OnceLock::new(),
        }
    }

    /// Whole-value pattern: `is_match` succeeds only if the entire text matches.
    pub fn anchored(source: impl Into<String>) -> Self {
        Self {
            anchored: true,
            ..Self::new(source)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    /// Replace the source. The cached compilation is discarded.
    pub fn set(&mut self, source: impl Into<String>) {
        self.source = source.into();
        self.compiled = OnceLock::new();
    }

    pub fn regex(&self) -> Result<&Regex, PatternError> {
        self.compiled
            .get_or_init(|| {
                // Legality is judged on the raw source; wrapping could mask
                // an unbalanced group such as "a)(b".
                let raw = compile(&self.source)?;
                if self.anchored {
                    compile(&format!("^(?:{})$", self.source))
                } else {
                    Ok(raw)
                }
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn is_legal(&self) -> bool {
        self.regex().is_ok()
    }

    pub fn has_lookaround(&self) -> bool {
        is_regex_lookahead_behind(&self.source)
    }

    pub fn is_match(&self, text: &str) -> Result<bool, PatternError> {
        self.regex()?
            .is_match(text)
            .map_err(|e| runtime_error(&self.source, e))
    }

    /// Replace every match. `$1` / `${name}` in `replacement` expand to groups;
    /// `\$` is a literal dollar sign.
    pub fn replace_all(&self, text: &str, replacement: &str) -> Result<String, PatternError> {
        let regex = self.regex()?;
        let template = expansion_template(replacement, regex)?;
        regex
            .try_replacen(text, 0, template.as_str())
            .map(|out| out.into_owned())
            .map_err(|e| runtime_error(&self.source, e))
    }
}

impl Clone for CompiledPattern {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            anchored: self.anchored,
            compiled: OnceLock::new(),
        }
    }
}

impl PartialEq for CompiledPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for CompiledPattern {}

impl fmt::Debug for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CompiledPattern").field(&self.source).finish()
    }
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl Default for CompiledPattern {
    fn default() -> Self {
        Self::new("")
    }
}
