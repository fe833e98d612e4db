use crate::pattern::{CompiledPattern, PatternError};

/// One pattern/replacement step of a conjugation rule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RewriteTransform {
    pattern: CompiledPattern,
    replacement: String,
}

impl RewriteTransform {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: CompiledPattern::new(pattern),
            replacement: replacement.into(),
        }
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn compiled(&self) -> &CompiledPattern {
        &self.pattern
    }

    pub fn set_pattern(&mut self, pattern: impl Into<String>) {
        self.pattern.set(pattern);
    }

    pub fn set_replacement(&mut self, replacement: impl Into<String>) {
        self.replacement = replacement.into();
    }

    /// Replace every match of the pattern in `value`. An empty pattern is a no-op.
    pub fn apply(&self, value: &str) -> Result<String, PatternError> {
        if self.pattern.is_empty() {
            return Ok(value.to_string());
        }
        self.pattern.replace_all(value, &self.replacement)
    }
}
