use super::{Pronunciation, PronunciationEngine};

/// A pronunciation engine run as a romanizer, switched on and off as a whole.
#[derive(Debug, Clone, Default)]
pub struct Romanizer {
    engine: PronunciationEngine,
    enabled: bool,
}

impl Romanizer {
    pub fn new(engine: PronunciationEngine, enabled: bool) -> Self {
        Self { engine, enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn engine(&self) -> &PronunciationEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut PronunciationEngine {
        &mut self.engine
    }

    /// Romanized `text`; the input unchanged while disabled.
    pub fn romanize(&self, text: &str) -> Pronunciation {
        if !self.enabled {
            return Pronunciation {
                value: text.to_string(),
                diagnostics: Vec::new(),
            };
        }
        self.engine.pronounce(text)
    }
}
