use serde::Serialize;

use crate::lexicon::{Lexicon, WordId};

use super::combination::CombinationId;
use super::rule_set::ConjugationRuleSet;
use super::trace::{DeclineTrace, PatternLocation, RuleOutcome};
use super::{DeclineError, RuleId};

/// Full diagnostic result for declining one word into one form.
#[derive(Debug, Serialize)]
pub struct ExplainResult {
    pub word_id: WordId,
    pub base: String,
    pub combination: CombinationId,
    /// Display label of the form, if the template declares it.
    pub label: Option<String>,
    pub suppressed: bool,
    pub result: String,
    pub trace: DeclineTrace,
    pub diagnostics: Vec<ExplainDiagnostic>,
}

/// A skipped pattern, flattened for display and JSON output.
#[derive(Debug, Serialize)]
pub struct ExplainDiagnostic {
    pub rule_id: RuleId,
    pub rule_name: String,
    pub location: PatternLocation,
    pub message: String,
}

/// Decline a word and capture the per-rule trace.
pub fn explain(
    rule_set: &ConjugationRuleSet,
    lexicon: &dyn Lexicon,
    word_id: WordId,
    combination: &CombinationId,
) -> Result<ExplainResult, DeclineError> {
    let mut trace = DeclineTrace::new();
    let declension = rule_set.decline_word_traced(lexicon, word_id, combination, &mut trace)?;
    let word = lexicon.word(word_id).ok_or(DeclineError::MissingWord(word_id))?;

    Ok(ExplainResult {
        word_id,
        base: word.value.clone(),
        combination: combination.clone(),
        label: rule_set.combination_label(word.type_id, combination),
        suppressed: rule_set.is_combination_suppressed(word.type_id, combination),
        result: declension.value,
        trace,
        diagnostics: declension
            .diagnostics
            .into_iter()
            .map(|d| ExplainDiagnostic {
                rule_id: d.rule_id,
                rule_name: d.rule_name,
                location: d.location,
                message: d.error.to_string(),
            })
            .collect(),
    })
}

/// Format an ExplainResult as human-readable text.
pub fn format_text(result: &ExplainResult) -> String {
    use unicode_width::UnicodeWidthStr;
    let mut out = String::new();

    let label = result.label.as_deref().unwrap_or("(undeclared form)");
    out.push_str(&format!(
        "=== {} -> {}  [{} {}{}] ===\n",
        result.base,
        result.result,
        result.combination,
        label,
        if result.suppressed { ", suppressed" } else { "" },
    ));

    if result.trace.rules.is_empty() {
        out.push_str("No rules for this form; base value kept.\n");
        return out;
    }

    out.push_str(&result.trace.to_string());

    out.push_str(&format!("\n=== Summary ({} rules) ===\n", result.trace.rules.len()));
    let pad_width = result
        .trace
        .rules
        .iter()
        .map(|r| UnicodeWidthStr::width(r.name.as_str()))
        .max()
        .unwrap_or(0)
        .max(8);
    for rule in &result.trace.rules {
        let display_width = UnicodeWidthStr::width(rule.name.as_str());
        let padded = format!("{}{}", rule.name, " ".repeat(pad_width - display_width));
        let status = match &rule.outcome {
            RuleOutcome::GateMatched { .. } => "applied",
            RuleOutcome::GateMismatch { .. } => "skipped (regex)",
            RuleOutcome::ClassMismatch => "skipped (class)",
            RuleOutcome::IllegalGate { .. } => "skipped (illegal regex)",
        };
        out.push_str(&format!("  {} {:<5} {}\n", padded, rule.rule_id.to_string(), status));
    }

    if !result.diagnostics.is_empty() {
        out.push_str(&format!("\n=== Skipped patterns ({}) ===\n", result.diagnostics.len()));
        for d in &result.diagnostics {
            out.push_str(&format!("  {} ({}), {}: {}\n", d.rule_name, d.rule_id, d.location, d.message));
        }
    }

    out
}
