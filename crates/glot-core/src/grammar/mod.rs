//! TOML language definitions.
//!
//! A definition declares parts of speech, word classes, words, form
//! templates, conjugation rules, suppressed forms, and the pronunciation
//! and romanization rule lists. Loading validates cross-references and
//! assembles the in-memory engines.
//!
//! ```toml
//! suppressed = "1,,2,1,"
//!
//! [[parts_of_speech]]
//! id = 1
//! name = "noun"
//!
//! [[dimensions]]
//! type = 1
//! id = 1
//! label = "number"
//! values = [{ id = 1, label = "singular" }, { id = 2, label = "plural" }]
//!
//! [[rules]]
//! type = 1
//! combination = ",2,"
//! name = "plural"
//! transforms = [{ pattern = "$", replacement = "s" }]
//!
//! [pronunciation]
//! recursion = true
//! rules = [{ pattern = "c(?=[ei])", replacement = "s" }]
//! ```

#[cfg(test)]
mod tests;

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;
use tracing::debug;

use crate::conjugation::{
    ClassCondition, CombinationId, CombinationParseError, ConjugationRule, ConjugationRuleSet,
    Dimension, DimensionValue, ExtraForm, RewriteTransform, SuppressionParseError, TemplateError,
};
use crate::lexicon::{
    ClassId, ClassValueId, Lexicon, MemoryLexicon, TypeId, Word, WordClass, WordId,
};
use crate::pronunciation::{
    PronunciationEngine, PronunciationRule, Romanizer, SyllableError, SyllableGrammar,
};

#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: u32 },
    #[error("{context} refers to unknown part of speech {type_id}")]
    UnknownPartOfSpeech { context: String, type_id: TypeId },
    #[error("{context} refers to unknown class value {class_id}:{value_id}")]
    UnknownClassValue {
        context: String,
        class_id: ClassId,
        value_id: ClassValueId,
    },
    #[error("{context}: {source}")]
    Combination {
        context: String,
        source: CombinationParseError,
    },
    #[error("part of speech {type_id}: {source}")]
    Template { type_id: TypeId, source: TemplateError },
    #[error("syllable category \"{0}\" must be a single character")]
    CategoryLetter(String),
    #[error(transparent)]
    Syllable(#[from] SyllableError),
}

/// A loaded language: lexicon plus every rule engine.
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    pub lexicon: MemoryLexicon,
    pub conjugations: ConjugationRuleSet,
    pub pronunciation: PronunciationEngine,
    pub romanization: Romanizer,
    /// Suppression entries that were skipped.
    pub suppression_errors: Vec<SuppressionParseError>,
}

impl Grammar {
    pub fn from_toml(toml_str: &str) -> Result<Self, GrammarError> {
        parse_grammar_toml(toml_str)
    }
}

// ---------------------------------------------------------------------------
// Definition file shape
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct LanguageDef {
    #[serde(default)]
    parts_of_speech: Vec<PartOfSpeechDef>,
    #[serde(default)]
    classes: Vec<WordClass>,
    #[serde(default)]
    words: Vec<WordDef>,
    #[serde(default)]
    dimensions: Vec<DimensionDef>,
    #[serde(default)]
    extra_forms: Vec<ExtraFormDef>,
    #[serde(default)]
    rules: Vec<RuleDef>,
    #[serde(default)]
    suppressed: String,
    #[serde(default)]
    pronunciation: EngineDef,
    #[serde(default)]
    romanization: RomanizationDef,
    #[serde(default)]
    syllables: SyllablesDef,
}

#[derive(Debug, Deserialize)]
struct PartOfSpeechDef {
    id: TypeId,
    name: String,
}

#[derive(Debug, Deserialize)]
struct WordDef {
    id: WordId,
    value: String,
    #[serde(rename = "type")]
    type_id: TypeId,
    #[serde(default)]
    classes: Vec<ClassValueDef>,
}

#[derive(Debug, Deserialize)]
struct ClassValueDef {
    class: ClassId,
    value: ClassValueId,
    #[serde(default)]
    negated: bool,
}

#[derive(Debug, Deserialize)]
struct DimensionDef {
    #[serde(rename = "type")]
    type_id: TypeId,
    id: u32,
    label: String,
    #[serde(default)]
    values: Vec<DimensionValue>,
}

#[derive(Debug, Deserialize)]
struct ExtraFormDef {
    #[serde(rename = "type")]
    type_id: TypeId,
    id: u32,
    label: String,
}

#[derive(Debug, Deserialize)]
struct RuleDef {
    #[serde(rename = "type")]
    type_id: TypeId,
    combination: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    gate: String,
    #[serde(default)]
    classes: Vec<ClassValueDef>,
    #[serde(default)]
    transforms: Vec<PatternDef>,
}

#[derive(Debug, Deserialize)]
struct PatternDef {
    pattern: String,
    #[serde(default)]
    replacement: String,
}

#[derive(Debug, Default, Deserialize)]
struct EngineDef {
    #[serde(default)]
    regex_disabled: bool,
    #[serde(default)]
    recursion: bool,
    #[serde(default)]
    syllable_composition: bool,
    #[serde(default)]
    ignore_case: bool,
    #[serde(default)]
    rules: Vec<PatternDef>,
}

#[derive(Debug, Default, Deserialize)]
struct RomanizationDef {
    #[serde(default)]
    enabled: bool,
    #[serde(flatten)]
    engine: EngineDef,
}

#[derive(Debug, Default, Deserialize)]
struct SyllablesDef {
    #[serde(default)]
    categories: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    templates: Vec<String>,
    #[serde(default)]
    illegal_clusters: Vec<String>,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

pub fn parse_grammar_toml(toml_str: &str) -> Result<Grammar, GrammarError> {
    let def: LanguageDef =
        toml::from_str(toml_str).map_err(|e| GrammarError::Parse(e.to_string()))?;

    let lexicon = build_lexicon(&def)?;
    let (conjugations, suppression_errors) = build_conjugations(&def, &lexicon)?;

    let mut pronunciation = build_engine(&def.pronunciation);
    pronunciation.set_syllables(build_syllables(&def.syllables)?);
    let romanization = Romanizer::new(
        build_engine(&def.romanization.engine),
        def.romanization.enabled,
    );

    debug!(
        words = def.words.len(),
        rules = def.rules.len(),
        pronunciation_rules = pronunciation.rules().len(),
        "grammar loaded"
    );
    Ok(Grammar {
        lexicon,
        conjugations,
        pronunciation,
        romanization,
        suppression_errors,
    })
}

fn check_unique<I>(kind: &'static str, ids: I) -> Result<(), GrammarError>
where
    I: IntoIterator<Item = u32>,
{
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(GrammarError::DuplicateId { kind, id });
        }
    }
    Ok(())
}

fn require_part_of_speech(
    lexicon: &MemoryLexicon,
    type_id: TypeId,
    context: impl FnOnce() -> String,
) -> Result<(), GrammarError> {
    if lexicon.part_of_speech_exists(type_id) {
        Ok(())
    } else {
        Err(GrammarError::UnknownPartOfSpeech {
            context: context(),
            type_id,
        })
    }
}

fn require_class_value(
    lexicon: &MemoryLexicon,
    class: &ClassValueDef,
    context: impl FnOnce() -> String,
) -> Result<(), GrammarError> {
    if lexicon.class_value_exists(class.class, class.value) {
        Ok(())
    } else {
        Err(GrammarError::UnknownClassValue {
            context: context(),
            class_id: class.class,
            value_id: class.value,
        })
    }
}

fn build_lexicon(def: &LanguageDef) -> Result<MemoryLexicon, GrammarError> {
    let mut lexicon = MemoryLexicon::new();

    check_unique("part of speech", def.parts_of_speech.iter().map(|p| p.id))?;
    for pos in &def.parts_of_speech {
        lexicon.add_part_of_speech(pos.id, pos.name.clone());
    }

    check_unique("class", def.classes.iter().map(|c| c.id))?;
    for class in &def.classes {
        check_unique("class value", class.values.iter().map(|v| v.id))?;
        for type_id in &class.applies_to {
            require_part_of_speech(&lexicon, *type_id, || format!("class \"{}\"", class.name))?;
        }
        lexicon.add_class(class.clone());
    }

    check_unique("word", def.words.iter().map(|w| w.id))?;
    for word in &def.words {
        let context = || format!("word \"{}\"", word.value);
        require_part_of_speech(&lexicon, word.type_id, context)?;
        let mut entry = Word::new(word.id, word.value.clone(), word.type_id);
        for class in &word.classes {
            require_class_value(&lexicon, class, context)?;
            entry = entry.with_class_value(class.class, class.value);
        }
        lexicon.add_word(entry);
    }

    Ok(lexicon)
}

fn build_conjugations(
    def: &LanguageDef,
    lexicon: &MemoryLexicon,
) -> Result<(ConjugationRuleSet, Vec<SuppressionParseError>), GrammarError> {
    let mut set = ConjugationRuleSet::new();

    for dim in &def.dimensions {
        require_part_of_speech(lexicon, dim.type_id, || format!("dimension \"{}\"", dim.label))?;
        let dimension = Dimension {
            id: dim.id,
            label: dim.label.clone(),
            values: dim.values.clone(),
        };
        set.insert_dimension(dim.type_id, dimension)
            .map_err(|source| GrammarError::Template {
                type_id: dim.type_id,
                source,
            })?;
    }

    for form in &def.extra_forms {
        require_part_of_speech(lexicon, form.type_id, || format!("extra form \"{}\"", form.label))?;
        set.insert_extra_form(
            form.type_id,
            ExtraForm {
                id: form.id,
                label: form.label.clone(),
            },
        )
        .map_err(|source| GrammarError::Template {
            type_id: form.type_id,
            source,
        })?;
    }

    for rule_def in &def.rules {
        let context = || format!("rule \"{}\"", rule_def.name);
        require_part_of_speech(lexicon, rule_def.type_id, context)?;
        let combination = CombinationId::parse(&rule_def.combination)
            .map_err(|source| GrammarError::Combination {
                context: context(),
                source,
            })?;

        let mut rule = ConjugationRule::new(rule_def.type_id, combination)
            .named(rule_def.name.clone())
            .gated_by(rule_def.gate.clone());
        for class in &rule_def.classes {
            require_class_value(lexicon, class, context)?;
            rule.add_class_condition(if class.negated {
                ClassCondition::is_not(class.class, class.value)
            } else {
                ClassCondition::is(class.class, class.value)
            });
        }
        for t in &rule_def.transforms {
            rule.add_transform(RewriteTransform::new(t.pattern.clone(), t.replacement.clone()));
        }
        set.add_rule(rule);
    }

    let suppression_errors = set.load_suppressed_raw(&def.suppressed);
    Ok((set, suppression_errors))
}

fn build_engine(def: &EngineDef) -> PronunciationEngine {
    let mut engine = PronunciationEngine::new();
    engine.set_regex_disabled(def.regex_disabled);
    engine.set_recursion_enabled(def.recursion);
    engine.set_syllable_composition_enabled(def.syllable_composition);
    engine.set_ignore_case(def.ignore_case);
    for rule in &def.rules {
        engine.add_rule(PronunciationRule::new(rule.pattern.clone(), rule.replacement.clone()));
    }
    engine
}

fn build_syllables(def: &SyllablesDef) -> Result<SyllableGrammar, GrammarError> {
    let mut grammar = SyllableGrammar::new();
    for (key, members) in &def.categories {
        let mut chars = key.chars();
        let (Some(letter), None) = (chars.next(), chars.next()) else {
            return Err(GrammarError::CategoryLetter(key.clone()));
        };
        grammar.add_category(letter, members.iter().cloned());
    }
    for template in &def.templates {
        grammar.add_template(template)?;
    }
    for cluster in &def.illegal_clusters {
        grammar.add_illegal_cluster(cluster.clone());
    }
    Ok(grammar)
}
