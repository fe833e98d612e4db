//! Declension/conjugation engine.
//!
//! A [`ConjugationRuleSet`] holds, per part of speech, a [`FormTemplate`]
//! (dimensions, their values and extra forms) and an ordered list of
//! [`ConjugationRule`]s per form. Declining a word folds the matching rules'
//! transforms over its base value:
//!
//! ```text
//! base value ─▶ rule 1 (gate? ─▶ t1 ─▶ t2) ─▶ rule 2 (gate? ─▶ t1) ─▶ form
//! ```
//!
//! Illegal user patterns are skipped and reported, never fatal.

mod combination;
mod editing;
pub mod explain;
mod rule;
mod rule_set;
mod suppression;
mod template;
mod trace;
mod transform;


pub use combination::{CombinationId, CombinationParseError, CombinedForm};
pub use editing::EvolutionRecord;
pub use rule::{ClassCondition, ConjugationRule, RuleId};
pub use rule_set::ConjugationRuleSet;
pub use suppression::{SuppressionParseError, SuppressionSet};
pub use template::{
    Dimension, DimensionId, DimensionValue, ExtraForm, FormId, FormTemplate, ValueId,
};
pub use trace::{
    DeclineTrace, PatternLocation, RuleDiagnostic, RuleOutcome, RuleTrace, TransformEffect,
    TransformTrace,
};
pub use transform::RewriteTransform;

use crate::lexicon::{TypeId, WordId};

/// Result of declining one word into one form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declension {
    pub value: String,
    /// Patterns skipped while producing `value`.
    pub diagnostics: Vec<RuleDiagnostic>,
}

/// Broken cross-references: the caller asked about something the lexicon
/// cannot resolve.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeclineError {
    #[error("word {0} is not in the lexicon; declension needs its part of speech and classes")]
    MissingWord(WordId),
    #[error("word {word} has part of speech {type_id}, which the lexicon does not declare")]
    UnknownPartOfSpeech { word: WordId, type_id: TypeId },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("part of speech {0} has no form template")]
    NoTemplate(TypeId),
    #[error("part of speech {type_id} has no dimension {dimension}")]
    UnknownDimension { type_id: TypeId, dimension: DimensionId },
    #[error("dimension {dimension} has no value {value}")]
    UnknownValue { dimension: DimensionId, value: ValueId },
    #[error("part of speech {type_id} has no extra form {form}")]
    UnknownExtraForm { type_id: TypeId, form: FormId },
    #[error("template id {0} is already in use")]
    DuplicateId(u32),
    #[error("rule {0} does not exist")]
    UnknownRule(RuleId),
}
