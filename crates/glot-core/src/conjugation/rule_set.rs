use std::collections::BTreeMap;

use tracing::{debug, debug_span, warn};

use super::combination::{CombinationId, CombinedForm};
use super::rule::{ConjugationRule, RuleId};
use super::suppression::{SuppressionParseError, SuppressionSet};
use super::template::{
    Dimension, DimensionId, DimensionValue, ExtraForm, FormId, FormTemplate, ValueId,
};
use super::trace::{
    DeclineTrace, PatternLocation, RuleDiagnostic, RuleOutcome, RuleTrace, TransformEffect,
    TransformTrace,
};
use super::{DeclineError, Declension, TemplateError};
use crate::lexicon::{Lexicon, TypeId, Word, WordId};
use crate::pattern::PatternError;

/// Owns every conjugation rule, form template and suppression flag of a language.
#[derive(Debug, Clone, Default)]
pub struct ConjugationRuleSet {
    pub(crate) rules: BTreeMap<TypeId, Vec<ConjugationRule>>,
    templates: BTreeMap<TypeId, FormTemplate>,
    suppressed: SuppressionSet,
    next_rule_id: u64,
    next_template_id: u32,
}

impl ConjugationRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.values().all(Vec::is_empty)
    }

    // ------------------------------------------------------------------
    // Rules
    // ------------------------------------------------------------------

    /// Append a rule to the end of its (type, combination) bucket.
    pub fn add_rule(&mut self, mut rule: ConjugationRule) -> RuleId {
        self.next_rule_id += 1;
        let id = RuleId(self.next_rule_id);
        rule.id = id;

        let bucket = self.rules.entry(rule.type_id).or_default();
        rule.index = bucket
            .iter()
            .filter(|r| r.combination == rule.combination)
            .map(|r| r.index)
            .max()
            .unwrap_or(0)
            + 1;
        debug!(rule = id.get(), type_id = rule.type_id, combination = %rule.combination, "rule added");
        bucket.push(rule);
        id
    }

    pub fn rule(&self, id: RuleId) -> Option<&ConjugationRule> {
        self.rules.values().flatten().find(|r| r.id == id)
    }

    /// Mutable access for editing name, gate, transforms and class conditions.
    pub fn rule_mut(&mut self, id: RuleId) -> Option<&mut ConjugationRule> {
        self.rules.values_mut().flatten().find(|r| r.id == id)
    }

    pub fn rules_for_type(&self, type_id: TypeId) -> &[ConjugationRule] {
        self.rules.get(&type_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Rules producing one form, in application order.
    pub fn rules_for(&self, type_id: TypeId, combination: &CombinationId) -> Vec<&ConjugationRule> {
        let mut out: Vec<&ConjugationRule> = self
            .rules_for_type(type_id)
            .iter()
            .filter(|r| &r.combination == combination)
            .collect();
        out.sort_by_key(|r| r.index);
        out
    }

    pub fn delete_rule(&mut self, id: RuleId) -> Option<ConjugationRule> {
        let (type_id, pos) = self.locate(id)?;
        let removed = self.rules.get_mut(&type_id)?.remove(pos);
        self.smooth(type_id);
        debug!(rule = id.get(), "rule deleted");
        Some(removed)
    }

    /// Delete several rules at once. Returns how many existed.
    pub fn delete_rules(&mut self, ids: &[RuleId]) -> usize {
        let mut removed = 0;
        let mut touched = Vec::new();
        for (type_id, rules) in self.rules.iter_mut() {
            let before = rules.len();
            rules.retain(|r| !ids.contains(&r.id));
            if rules.len() != before {
                removed += before - rules.len();
                touched.push(*type_id);
            }
        }
        for type_id in touched {
            self.smooth(type_id);
        }
        removed
    }

    /// Delete every rule producing one form.
    pub fn delete_rules_for(&mut self, type_id: TypeId, combination: &CombinationId) -> usize {
        self.delete_rules_where(type_id, |r| &r.combination == combination)
    }

    /// Move the selected rules one slot earlier within their bucket.
    ///
    /// Rules already at the top stay put, and so does any selected rule
    /// directly below another blocked one. Relative order among the
    /// selection is preserved.
    pub fn move_rules_up(&mut self, type_id: TypeId, combination: &CombinationId, ids: &[RuleId]) {
        self.shift_rules(type_id, combination, ids, Direction::Up);
    }

    /// Move the selected rules one slot later within their bucket.
    pub fn move_rules_down(&mut self, type_id: TypeId, combination: &CombinationId, ids: &[RuleId]) {
        self.shift_rules(type_id, combination, ids, Direction::Down);
    }

    fn shift_rules(
        &mut self,
        type_id: TypeId,
        combination: &CombinationId,
        ids: &[RuleId],
        direction: Direction,
    ) {
        if ids.is_empty() {
            return;
        }
        let Some(rules) = self.rules.get_mut(&type_id) else {
            return;
        };

        let mut bucket: Vec<&mut ConjugationRule> = rules
            .iter_mut()
            .filter(|r| &r.combination == combination)
            .collect();
        bucket.sort_by_key(|r| r.index);

        let mut order: Vec<(RuleId, bool)> =
            bucket.iter().map(|r| (r.id, ids.contains(&r.id))).collect();
        match direction {
            Direction::Up => {
                for i in 1..order.len() {
                    if order[i].1 && !order[i - 1].1 {
                        order.swap(i - 1, i);
                    }
                }
            }
            Direction::Down => {
                for i in (0..order.len().saturating_sub(1)).rev() {
                    if order[i].1 && !order[i + 1].1 {
                        order.swap(i, i + 1);
                    }
                }
            }
        }

        for rule in bucket.iter_mut() {
            if let Some(pos) = order.iter().position(|(id, _)| *id == rule.id) {
                rule.index = pos as u32 + 1;
            }
        }
        self.smooth(type_id);
    }

    /// Sort a type's rules by (combination, index) and renumber every bucket from 1.
    fn smooth(&mut self, type_id: TypeId) {
        let Some(rules) = self.rules.get_mut(&type_id) else {
            return;
        };
        rules.sort_by(|a, b| {
            a.combination
                .cmp(&b.combination)
                .then(a.index.cmp(&b.index))
        });
        let mut current: Option<CombinationId> = None;
        let mut next = 0;
        for rule in rules.iter_mut() {
            if current.as_ref() != Some(&rule.combination) {
                current = Some(rule.combination.clone());
                next = 0;
            }
            next += 1;
            rule.index = next;
        }
    }

    fn locate(&self, id: RuleId) -> Option<(TypeId, usize)> {
        self.rules.iter().find_map(|(type_id, rules)| {
            rules.iter().position(|r| r.id == id).map(|pos| (*type_id, pos))
        })
    }

    pub(crate) fn delete_rules_where(
        &mut self,
        type_id: TypeId,
        mut doomed: impl FnMut(&ConjugationRule) -> bool,
    ) -> usize {
        let Some(rules) = self.rules.get_mut(&type_id) else {
            return 0;
        };
        let before = rules.len();
        rules.retain(|r| !doomed(r));
        let removed = before - rules.len();
        if removed > 0 {
            self.smooth(type_id);
            debug!(type_id, removed, "rules deleted");
        }
        removed
    }

    /// Rules whose combination the current template no longer declares.
    pub fn deprecated_rules(&self, type_id: TypeId) -> Vec<&ConjugationRule> {
        let template = self.templates.get(&type_id);
        self.rules_for_type(type_id)
            .iter()
            .filter(|r| match template {
                Some(t) => !t.contains(&r.combination),
                None => r.combination.as_str() != ",",
            })
            .collect()
    }

    /// Drop class conditions that reference classes or values the lexicon
    /// no longer declares. Returns how many conditions were removed.
    pub fn purge_stale_class_filters(&mut self, lexicon: &dyn Lexicon) -> usize {
        let mut removed = 0;
        for rule in self.rules.values_mut().flatten() {
            let before = rule.class_conditions().len();
            rule.retain_class_conditions(|c| lexicon.class_value_exists(c.class_id, c.value_id));
            removed += before - rule.class_conditions().len();
        }
        if removed > 0 {
            debug!(removed, "stale class conditions purged");
        }
        removed
    }

    // ------------------------------------------------------------------
    // Templates
    // ------------------------------------------------------------------

    pub fn template(&self, type_id: TypeId) -> Option<&FormTemplate> {
        self.templates.get(&type_id)
    }

    /// Add a dimension with a fresh id. Existing dimensional rules of the
    /// type become deprecated (see [`Self::deprecated_rules`]).
    pub fn add_dimension(&mut self, type_id: TypeId, label: impl Into<String>) -> DimensionId {
        let id = self.allocate_template_id();
        self.templates
            .entry(type_id)
            .or_default()
            .dimensions
            .push(Dimension::new(id, label));
        id
    }

    /// Add a fully specified dimension, keeping its ids.
    pub fn insert_dimension(&mut self, type_id: TypeId, dimension: Dimension) -> Result<(), TemplateError> {
        let template = self.templates.entry(type_id).or_default();
        if template.dimension(dimension.id).is_some() || template.extra(dimension.id).is_some() {
            return Err(TemplateError::DuplicateId(dimension.id));
        }
        for (i, value) in dimension.values.iter().enumerate() {
            if dimension.values[..i].iter().any(|v| v.id == value.id) {
                return Err(TemplateError::DuplicateId(value.id));
            }
        }
        self.next_template_id = self.next_template_id.max(dimension.id);
        template.dimensions.push(dimension);
        Ok(())
    }

    pub fn add_dimension_value(
        &mut self,
        type_id: TypeId,
        dimension_id: DimensionId,
        label: impl Into<String>,
    ) -> Result<ValueId, TemplateError> {
        let dimension = self.dimension_mut(type_id, dimension_id)?;
        let id = dimension.next_value_id();
        dimension.values.push(DimensionValue {
            id,
            label: label.into(),
        });
        Ok(id)
    }

    pub fn add_extra_form(&mut self, type_id: TypeId, label: impl Into<String>) -> FormId {
        let id = self.allocate_template_id();
        self.templates.entry(type_id).or_default().extras.push(ExtraForm {
            id,
            label: label.into(),
        });
        id
    }

    pub fn insert_extra_form(&mut self, type_id: TypeId, form: ExtraForm) -> Result<(), TemplateError> {
        let template = self.templates.entry(type_id).or_default();
        if template.dimension(form.id).is_some() || template.extra(form.id).is_some() {
            return Err(TemplateError::DuplicateId(form.id));
        }
        self.next_template_id = self.next_template_id.max(form.id);
        template.extras.push(form);
        Ok(())
    }

    /// Remove a dimension. Every dimensional rule and suppression entry of
    /// the type is deleted, since all combination ids change width.
    /// Returns the number of rules deleted.
    pub fn delete_dimension(&mut self, type_id: TypeId, dimension_id: DimensionId) -> Result<usize, TemplateError> {
        let template = self
            .templates
            .get_mut(&type_id)
            .ok_or(TemplateError::NoTemplate(type_id))?;
        let slot = template
            .dimension_slot(dimension_id)
            .ok_or(TemplateError::UnknownDimension {
                type_id,
                dimension: dimension_id,
            })?;
        template.dimensions.remove(slot);

        self.suppressed
            .retain(|t, c| t != type_id || !c.is_dimensional());
        Ok(self.delete_rules_where(type_id, |r| r.combination.is_dimensional()))
    }

    /// Remove one value of a dimension, cascading to the rules and
    /// suppression entries of every combination that selected it.
    pub fn delete_dimension_value(
        &mut self,
        type_id: TypeId,
        dimension_id: DimensionId,
        value_id: ValueId,
    ) -> Result<usize, TemplateError> {
        let template = self
            .templates
            .get(&type_id)
            .ok_or(TemplateError::NoTemplate(type_id))?;
        let slot = template
            .dimension_slot(dimension_id)
            .ok_or(TemplateError::UnknownDimension {
                type_id,
                dimension: dimension_id,
            })?;

        let dimension = self.dimension_mut(type_id, dimension_id)?;
        let before = dimension.values.len();
        dimension.values.retain(|v| v.id != value_id);
        if dimension.values.len() == before {
            return Err(TemplateError::UnknownValue {
                dimension: dimension_id,
                value: value_id,
            });
        }

        let selects = |c: &CombinationId| c.is_dimensional() && c.value_at(slot) == Some(value_id);
        self.suppressed.retain(|t, c| t != type_id || !selects(c));
        Ok(self.delete_rules_where(type_id, |r| selects(&r.combination)))
    }

    /// Remove an extra form and the rules producing it.
    pub fn delete_extra_form(&mut self, type_id: TypeId, form_id: FormId) -> Result<usize, TemplateError> {
        let template = self
            .templates
            .get_mut(&type_id)
            .ok_or(TemplateError::NoTemplate(type_id))?;
        let before = template.extras.len();
        template.extras.retain(|e| e.id != form_id);
        if template.extras.len() == before {
            return Err(TemplateError::UnknownExtraForm {
                type_id,
                form: form_id,
            });
        }
        let combination = CombinationId::singleton(form_id);
        self.suppressed.set(type_id, &combination, false);
        Ok(self.delete_rules_for(type_id, &combination))
    }

    /// Forget everything about a part of speech: rules, template and
    /// suppression entries. Returns the number of rules deleted.
    pub fn delete_part_of_speech(&mut self, type_id: TypeId) -> usize {
        let removed = self.rules.remove(&type_id).map_or(0, |r| r.len());
        self.templates.remove(&type_id);
        self.suppressed.retain(|t, _| t != type_id);
        debug!(type_id, removed, "part of speech cleared");
        removed
    }

    fn dimension_mut(&mut self, type_id: TypeId, dimension_id: DimensionId) -> Result<&mut Dimension, TemplateError> {
        self.templates
            .get_mut(&type_id)
            .ok_or(TemplateError::NoTemplate(type_id))?
            .dimensions
            .iter_mut()
            .find(|d| d.id == dimension_id)
            .ok_or(TemplateError::UnknownDimension {
                type_id,
                dimension: dimension_id,
            })
    }

    fn allocate_template_id(&mut self) -> u32 {
        let highest = self
            .templates
            .values()
            .map(FormTemplate::max_id)
            .max()
            .unwrap_or(0);
        self.next_template_id = self.next_template_id.max(highest) + 1;
        self.next_template_id
    }

    // ------------------------------------------------------------------
    // Enumeration and suppression
    // ------------------------------------------------------------------

    /// Every non-suppressed form of a part of speech.
    pub fn all_combined_ids(&self, type_id: TypeId) -> Vec<CombinedForm> {
        self.all_combined_ids_with_suppressed(type_id)
            .into_iter()
            .filter(|form| !self.suppressed.is_suppressed(type_id, &form.id))
            .collect()
    }

    /// Every form of a part of speech, suppressed ones included.
    pub fn all_combined_ids_with_suppressed(&self, type_id: TypeId) -> Vec<CombinedForm> {
        match self.templates.get(&type_id) {
            Some(template) => template.combined_forms(),
            None => FormTemplate::default().combined_forms(),
        }
    }

    pub fn combination_label(&self, type_id: TypeId, combination: &CombinationId) -> Option<String> {
        match self.templates.get(&type_id) {
            Some(template) => template.label_of(combination),
            None => FormTemplate::default().label_of(combination),
        }
    }

    pub fn is_combination_suppressed(&self, type_id: TypeId, combination: &CombinationId) -> bool {
        self.suppressed.is_suppressed(type_id, combination)
    }

    pub fn set_combination_suppressed(&mut self, type_id: TypeId, combination: &CombinationId, suppressed: bool) {
        self.suppressed.set(type_id, combination, suppressed);
    }

    pub fn suppression(&self) -> &SuppressionSet {
        &self.suppressed
    }

    /// Persisted form of the suppression set.
    pub fn suppressed_raw(&self) -> String {
        self.suppressed.encode()
    }

    /// Replace the suppression set from its persisted form, returning the
    /// entries that were skipped as malformed.
    pub fn load_suppressed_raw(&mut self, raw: &str) -> Vec<SuppressionParseError> {
        let (set, errors) = SuppressionSet::parse(raw);
        self.suppressed = set;
        errors
    }

    // ------------------------------------------------------------------
    // Declension
    // ------------------------------------------------------------------

    /// Produce one inflected form of a word.
    ///
    /// A combination with no rules yields the base value. Illegal patterns
    /// are skipped and reported in [`Declension::diagnostics`]. Fails only
    /// when the word or its part of speech cannot be resolved.
    pub fn decline_word(
        &self,
        lexicon: &dyn Lexicon,
        word_id: WordId,
        combination: &CombinationId,
    ) -> Result<Declension, DeclineError> {
        self.decline(lexicon, word_id, combination, None)
    }

    /// Like [`Self::decline_word`], also recording one trace entry per rule.
    pub fn decline_word_traced(
        &self,
        lexicon: &dyn Lexicon,
        word_id: WordId,
        combination: &CombinationId,
        trace: &mut DeclineTrace,
    ) -> Result<Declension, DeclineError> {
        self.decline(lexicon, word_id, combination, Some(trace))
    }

    fn decline(
        &self,
        lexicon: &dyn Lexicon,
        word_id: WordId,
        combination: &CombinationId,
        mut trace: Option<&mut DeclineTrace>,
    ) -> Result<Declension, DeclineError> {
        let word = lexicon.word(word_id).ok_or(DeclineError::MissingWord(word_id))?;
        if !lexicon.part_of_speech_exists(word.type_id) {
            return Err(DeclineError::UnknownPartOfSpeech {
                word: word_id,
                type_id: word.type_id,
            });
        }

        let _span = debug_span!("decline", word = word_id, combination = %combination).entered();
        let class_filters_active = !lexicon.classes_for_type(word.type_id).is_empty();
        let mut value = word.value.clone();
        let mut diagnostics = Vec::new();

        for rule in self.rules_for(word.type_id, combination) {
            let (outcome, gate_error) = gate_outcome(rule, word, &value, class_filters_active);
            if let Some(error) = gate_error {
                warn!(rule = rule.id().get(), %error, "skipping rule with illegal gating regex");
                diagnostics.push(RuleDiagnostic {
                    rule_id: rule.id(),
                    rule_name: rule.name().to_string(),
                    location: PatternLocation::Gate,
                    error,
                });
            }

            let mut entry = RuleTrace::new(rule, outcome);
            if entry.outcome.applied() {
                for (position, transform) in rule.transforms().iter().enumerate() {
                    let effect = match transform.apply(&value) {
                        Ok(after) => {
                            let before = std::mem::replace(&mut value, after);
                            TransformEffect::Applied {
                                before,
                                after: value.clone(),
                            }
                        }
                        Err(error) => {
                            warn!(rule = rule.id().get(), position, %error, "skipping illegal transform");
                            let reason = error.to_string();
                            diagnostics.push(RuleDiagnostic {
                                rule_id: rule.id(),
                                rule_name: rule.name().to_string(),
                                location: PatternLocation::Transform(position),
                                error,
                            });
                            TransformEffect::Skipped { reason }
                        }
                    };
                    entry.transforms.push(TransformTrace {
                        regex: transform.pattern().to_string(),
                        replacement: transform.replacement().to_string(),
                        effect,
                    });
                }
            }

            if let Some(trace) = trace.as_deref_mut() {
                trace.rules.push(entry);
            }
        }

        debug!(result = %value, skipped = diagnostics.len(), "declined");
        Ok(Declension { value, diagnostics })
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Up,
    Down,
}

fn gate_outcome(
    rule: &ConjugationRule,
    word: &Word,
    value: &str,
    class_filters_active: bool,
) -> (RuleOutcome, Option<PatternError>) {
    if class_filters_active && !rule.matches_classes(word) {
        return (RuleOutcome::ClassMismatch, None);
    }
    let regex = rule.gating_regex().to_string();
    let value = value.to_string();
    let matched = if rule.gate().is_empty() {
        Ok(true)
    } else {
        rule.gate().is_match(&value)
    };
    match matched {
        Ok(true) => (RuleOutcome::GateMatched { value, regex }, None),
        Ok(false) => (RuleOutcome::GateMismatch { value, regex }, None),
        Err(error) => (
            RuleOutcome::IllegalGate {
                regex,
                reason: error.to_string(),
            },
            Some(error),
        ),
    }
}
