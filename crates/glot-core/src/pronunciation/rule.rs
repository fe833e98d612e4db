use crate::pattern::CompiledPattern;

/// One pattern/replacement pair. Priority is the rule's position in the engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PronunciationRule {
    pattern: CompiledPattern,
    replacement: String,
}

impl PronunciationRule {
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

    pub fn has_lookaround(&self) -> bool {
        self.pattern.has_lookaround()
    }
}
