//! Bulk rule edits: copying across forms that share a dimension value,
//! value-equal updates and deletes, and rule evolution.

use serde::Serialize;
use tracing::debug;

use super::combination::CombinationId;
use super::rule::{ConjugationRule, RuleId};
use super::rule_set::ConjugationRuleSet;
use super::template::{DimensionId, ValueId};
use super::TemplateError;
use crate::lexicon::TypeId;
use crate::pattern::is_legal;

/// One transform touched by [`ConjugationRuleSet::evolve_rules`].
///
/// `before` and `after` render as `pattern->replacement`. When `error` is
/// set the transform was reverted and `after` shows the rejected value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvolutionRecord {
    pub rule_id: RuleId,
    pub rule_name: String,
    pub before: String,
    pub after: String,
    pub error: Option<String>,
}

impl ConjugationRuleSet {
    /// Copy rules to the end of every other dimensional form of `type_id`
    /// whose `dimension_id` slot holds `value_id`. Suppressed forms are
    /// included; `source` itself is skipped. Returns the number of copies.
    pub fn copy_rules_to_forms_sharing_value(
        &mut self,
        type_id: TypeId,
        dimension_id: DimensionId,
        value_id: ValueId,
        rule_ids: &[RuleId],
        source: &CombinationId,
    ) -> Result<usize, TemplateError> {
        let slot = self.dimension_slot(type_id, dimension_id)?;
        let originals = self.resolve_rules(rule_ids)?;
        let targets: Vec<CombinationId> = self
            .all_combined_ids_with_suppressed(type_id)
            .into_iter()
            .map(|form| form.id)
            .filter(|id| id.is_dimensional() && id != source && id.value_at(slot) == Some(value_id))
            .collect();

        let mut copied = 0;
        for target in &targets {
            for original in &originals {
                let mut copy = ConjugationRule::new(type_id, target.clone());
                copy.copy_content_from(original);
                self.add_rule(copy);
                copied += 1;
            }
        }
        debug!(type_id, copied, "rules copied across forms");
        Ok(copied)
    }

    /// Delete, from every dimensional form whose `dimension_id` slot holds
    /// `value_id`, the rules value-equal to any of `rule_ids`.
    pub fn delete_rules_from_forms_sharing_value(
        &mut self,
        type_id: TypeId,
        dimension_id: DimensionId,
        value_id: ValueId,
        rule_ids: &[RuleId],
    ) -> Result<usize, TemplateError> {
        let slot = self.dimension_slot(type_id, dimension_id)?;
        let originals = self.resolve_rules(rule_ids)?;
        Ok(self.delete_rules_where(type_id, |rule| {
            rule.combination.is_dimensional()
                && rule.combination.value_at(slot) == Some(value_id)
                && originals.iter().any(|o| rule.values_equal(o))
        }))
    }

    /// Give every rule of `type_id` value-equal to `original` the content
    /// of `updated`. Pass a snapshot of a rule taken before editing it.
    pub fn bulk_update_rules(
        &mut self,
        type_id: TypeId,
        original: &ConjugationRule,
        updated: &ConjugationRule,
    ) -> usize {
        let Some(rules) = self.rules.get_mut(&type_id) else {
            return 0;
        };
        let mut count = 0;
        for rule in rules.iter_mut() {
            if rule.id() != updated.id() && rule.values_equal(original) {
                rule.copy_content_from(updated);
                count += 1;
            }
        }
        debug!(type_id, count, "rules bulk-updated");
        count
    }

    /// Delete every rule of `type_id` value-equal to any of `rule_ids`,
    /// wherever it sits.
    pub fn bulk_delete_rules(&mut self, type_id: TypeId, rule_ids: &[RuleId]) -> Result<usize, TemplateError> {
        let originals = self.resolve_rules(rule_ids)?;
        Ok(self.delete_rules_where(type_id, |rule| {
            originals.iter().any(|o| rule.values_equal(o))
        }))
    }

    /// Literal find/replace over every transform's pattern and replacement
    /// text, optionally limited to one part of speech.
    ///
    /// A transform whose pattern would become blank or illegal is left as
    /// it was and reported with an error.
    pub fn evolve_rules(
        &mut self,
        type_filter: Option<TypeId>,
        find: &str,
        replace: &str,
    ) -> Vec<EvolutionRecord> {
        let mut records = Vec::new();
        if find.is_empty() {
            return records;
        }

        for (type_id, rules) in self.rules.iter_mut() {
            if type_filter.is_some_and(|t| t != *type_id) {
                continue;
            }
            for rule in rules.iter_mut() {
                let rule_id = rule.id();
                let rule_name = rule.name().to_string();
                for transform in rule.transforms_mut().iter_mut() {
                    let pattern = transform.pattern().replace(find, replace);
                    let replacement = transform.replacement().replace(find, replace);
                    if pattern == transform.pattern() && replacement == transform.replacement() {
                        continue;
                    }

                    let before = format!("{}->{}", transform.pattern(), transform.replacement());
                    let after = format!("{pattern}->{replacement}");
                    let error = if pattern.trim().is_empty() {
                        Some("pattern blanked; value reverted".to_string())
                    } else if !is_legal(&pattern) {
                        Some("pattern became illegal; value reverted".to_string())
                    } else {
                        transform.set_pattern(pattern);
                        transform.set_replacement(replacement);
                        None
                    };
                    records.push(EvolutionRecord {
                        rule_id,
                        rule_name: rule_name.clone(),
                        before,
                        after,
                        error,
                    });
                }
            }
        }
        debug!(changed = records.len(), "rules evolved");
        records
    }

    fn dimension_slot(&self, type_id: TypeId, dimension_id: DimensionId) -> Result<usize, TemplateError> {
        self.template(type_id)
            .ok_or(TemplateError::NoTemplate(type_id))?
            .dimension_slot(dimension_id)
            .ok_or(TemplateError::UnknownDimension {
                type_id,
                dimension: dimension_id,
            })
    }

    fn resolve_rules(&self, rule_ids: &[RuleId]) -> Result<Vec<ConjugationRule>, TemplateError> {
        rule_ids
            .iter()
            .map(|id| self.rule(*id).cloned().ok_or(TemplateError::UnknownRule(*id)))
            .collect()
    }
}
