//! One loaded language: lexicon, conjugation rules, pronunciation and
//! romanization, kept together so cascading edits stay consistent.

#[cfg(test)]
mod tests;

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use glot_core::conjugation::explain::{explain, ExplainResult};
use glot_core::conjugation::{
    CombinationId, ConjugationRuleSet, DeclineError, Declension, RuleDiagnostic,
    SuppressionParseError,
};
use glot_core::grammar::{Grammar, GrammarError};
use glot_core::lexicon::{ClassId, Lexicon, MemoryLexicon, TypeId, WordId};
use glot_core::pronunciation::{Pronunciation, PronunciationEngine, Romanizer};

#[derive(Debug, thiserror::Error)]
pub enum LanguageError {
    #[error("IO error: {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error(transparent)]
    Grammar(#[from] GrammarError),
}

/// One declined form of a word.
#[derive(Debug, Clone, Serialize)]
pub struct DeclinedForm {
    pub combination: CombinationId,
    pub label: String,
    pub value: String,
    #[serde(skip)]
    pub diagnostics: Vec<RuleDiagnostic>,
}

#[derive(Debug, Clone, Default)]
pub struct Language {
    grammar: Grammar,
}

impl Language {
    pub fn from_grammar(grammar: Grammar) -> Self {
        Self { grammar }
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, LanguageError> {
        Ok(Self::from_grammar(Grammar::from_toml(toml_str)?))
    }

    pub fn load(path: &Path) -> Result<Self, LanguageError> {
        let content = fs::read_to_string(path).map_err(|source| LanguageError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let language = Self::from_toml(&content)?;
        debug!(path = %path.display(), "language loaded");
        Ok(language)
    }

    pub fn lexicon(&self) -> &MemoryLexicon {
        &self.grammar.lexicon
    }

    pub fn lexicon_mut(&mut self) -> &mut MemoryLexicon {
        &mut self.grammar.lexicon
    }

    pub fn conjugations(&self) -> &ConjugationRuleSet {
        &self.grammar.conjugations
    }

    pub fn conjugations_mut(&mut self) -> &mut ConjugationRuleSet {
        &mut self.grammar.conjugations
    }

    pub fn pronunciation(&self) -> &PronunciationEngine {
        &self.grammar.pronunciation
    }

    pub fn pronunciation_mut(&mut self) -> &mut PronunciationEngine {
        &mut self.grammar.pronunciation
    }

    pub fn romanization(&self) -> &Romanizer {
        &self.grammar.romanization
    }

    pub fn romanization_mut(&mut self) -> &mut Romanizer {
        &mut self.grammar.romanization
    }

    /// Suppression entries skipped while loading.
    pub fn suppression_errors(&self) -> &[SuppressionParseError] {
        &self.grammar.suppression_errors
    }

    // ------------------------------------------------------------------
    // Forms
    // ------------------------------------------------------------------

    pub fn decline(&self, word_id: WordId, combination: &CombinationId) -> Result<Declension, DeclineError> {
        self.grammar
            .conjugations
            .decline_word(&self.grammar.lexicon, word_id, combination)
    }

    /// Every non-suppressed form of a word, in template order.
    pub fn forms(&self, word_id: WordId) -> Result<Vec<DeclinedForm>, DeclineError> {
        let word = self
            .grammar
            .lexicon
            .word(word_id)
            .ok_or(DeclineError::MissingWord(word_id))?;
        self.grammar
            .conjugations
            .all_combined_ids(word.type_id)
            .into_iter()
            .map(|form| -> Result<DeclinedForm, DeclineError> {
                let declension = self.decline(word_id, &form.id)?;
                Ok(DeclinedForm {
                    combination: form.id,
                    label: form.label,
                    value: declension.value,
                    diagnostics: declension.diagnostics,
                })
            })
            .collect()
    }

    pub fn explain(&self, word_id: WordId, combination: &CombinationId) -> Result<ExplainResult, DeclineError> {
        explain(
            &self.grammar.conjugations,
            &self.grammar.lexicon,
            word_id,
            combination,
        )
    }

    // ------------------------------------------------------------------
    // Sound
    // ------------------------------------------------------------------

    pub fn pronunciation_of(&self, word_id: WordId) -> Result<Pronunciation, DeclineError> {
        let word = self
            .grammar
            .lexicon
            .word(word_id)
            .ok_or(DeclineError::MissingWord(word_id))?;
        Ok(self.grammar.pronunciation.pronounce(&word.value))
    }

    pub fn romanization_of(&self, word_id: WordId) -> Result<Pronunciation, DeclineError> {
        let word = self
            .grammar
            .lexicon
            .word(word_id)
            .ok_or(DeclineError::MissingWord(word_id))?;
        Ok(self.grammar.romanization.romanize(&word.value))
    }

    // ------------------------------------------------------------------
    // Cascading edits
    // ------------------------------------------------------------------

    /// Remove a part of speech with its rules, template and suppression
    /// entries. Words of that type remain but no longer decline. Returns
    /// the number of rules deleted.
    pub fn delete_part_of_speech(&mut self, type_id: TypeId) -> usize {
        self.grammar.lexicon.remove_part_of_speech(type_id);
        let removed = self.grammar.conjugations.delete_part_of_speech(type_id);
        debug!(type_id, removed, "part of speech deleted");
        removed
    }

    /// Remove a word class and every rule condition that referred to it.
    /// Returns the number of conditions removed.
    pub fn delete_class(&mut self, class_id: ClassId) -> usize {
        self.grammar.lexicon.remove_class(class_id);
        let purged = self
            .grammar
            .conjugations
            .purge_stale_class_filters(&self.grammar.lexicon);
        debug!(class_id, purged, "class deleted");
        purged
    }
}
