use std::fmt;

use serde::{Deserialize, Serialize};

use super::combination::CombinationId;
use super::transform::RewriteTransform;
use crate::lexicon::{ClassId, ClassValueId, TypeId, Word};
use crate::pattern::CompiledPattern;

/// Stable identity of a rule inside a [`super::ConjugationRuleSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(pub(crate) u64);

impl RuleId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Requires (or, negated, forbids) a class value on the declined word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCondition {
    pub class_id: ClassId,
    pub value_id: ClassValueId,
    #[serde(default)]
    pub negated: bool,
}

impl ClassCondition {
    pub fn is(class_id: ClassId, value_id: ClassValueId) -> Self {
        Self {
            class_id,
            value_id,
            negated: false,
        }
    }

    pub fn is_not(class_id: ClassId, value_id: ClassValueId) -> Self {
        Self {
            class_id,
            value_id,
            negated: true,
        }
    }

    pub fn holds_for(&self, word: &Word) -> bool {
        word.has_class_value(self.class_id, self.value_id) != self.negated
    }
}

/// A named, gated, ordered list of transforms producing one inflected form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConjugationRule {
    pub(crate) id: RuleId,
    pub(crate) index: u32,
    pub(crate) type_id: TypeId,
    pub(crate) combination: CombinationId,
    name: String,
    gate: CompiledPattern,
    class_conditions: Vec<ClassCondition>,
    transforms: Vec<RewriteTransform>,
}

impl ConjugationRule {
    pub fn new(type_id: TypeId, combination: CombinationId) -> Self {
        Self {
            id: RuleId(0),
            index: 0,
            type_id,
            combination,
            name: String::new(),
            gate: CompiledPattern::anchored(""),
            class_conditions: Vec::new(),
            transforms: Vec::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn gated_by(mut self, regex: impl Into<String>) -> Self {
        self.gate.set(regex);
        self
    }

    pub fn with_transform(mut self, pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.transforms.push(RewriteTransform::new(pattern, replacement));
        self
    }

    pub fn with_class_condition(mut self, condition: ClassCondition) -> Self {
        self.add_class_condition(condition);
        self
    }

    pub fn id(&self) -> RuleId {
        self.id
    }

    /// 1-based position within the rule's (type, combination) bucket.
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn combination(&self) -> &CombinationId {
        &self.combination
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Whole-value gate tested against the working value. Empty matches everything.
    pub fn gating_regex(&self) -> &str {
        self.gate.as_str()
    }

    pub fn gate(&self) -> &CompiledPattern {
        &self.gate
    }

    pub fn set_gating_regex(&mut self, regex: impl Into<String>) {
        self.gate.set(regex);
    }

    pub fn class_conditions(&self) -> &[ClassCondition] {
        &self.class_conditions
    }

    /// Adds a condition, replacing any existing one on the same class.
    pub fn add_class_condition(&mut self, condition: ClassCondition) {
        self.class_conditions
            .retain(|c| c.class_id != condition.class_id);
        self.class_conditions.push(condition);
    }

    pub fn remove_class_condition(&mut self, class_id: ClassId) {
        self.class_conditions.retain(|c| c.class_id != class_id);
    }

    pub fn clear_class_conditions(&mut self) {
        self.class_conditions.clear();
    }

    pub(crate) fn retain_class_conditions(&mut self, keep: impl FnMut(&ClassCondition) -> bool) {
        self.class_conditions.retain(keep);
    }

    pub fn transforms(&self) -> &[RewriteTransform] {
        &self.transforms
    }

    pub fn transforms_mut(&mut self) -> &mut Vec<RewriteTransform> {
        &mut self.transforms
    }

    pub fn add_transform(&mut self, transform: RewriteTransform) {
        self.transforms.push(transform);
    }

    /// True if every class condition holds for `word`.
    pub fn matches_classes(&self, word: &Word) -> bool {
        self.class_conditions.iter().all(|c| c.holds_for(word))
    }

    /// Content equality across combinations: type, name, gate and
    /// transforms. Identity, index, combination and class conditions are
    /// ignored.
    pub fn values_equal(&self, other: &ConjugationRule) -> bool {
        self.type_id == other.type_id
            && self.name == other.name
            && self.gate == other.gate
            && self.transforms == other.transforms
    }

    /// Copy name, gate, transforms and class conditions from `other`.
    pub(crate) fn copy_content_from(&mut self, other: &ConjugationRule) {
        self.name = other.name.clone();
        self.gate = other.gate.clone();
        self.transforms = other.transforms.clone();
        self.class_conditions = other.class_conditions.clone();
    }
}
