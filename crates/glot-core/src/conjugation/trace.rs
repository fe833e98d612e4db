//! Structured record of one declension, rendered as the classic
//! "APPLIED RULES BREAKDOWN" text for rule authors.

use std::fmt;

use serde::Serialize;

use super::rule::{ConjugationRule, RuleId};
use crate::pattern::PatternError;

const RULE_BANNER: &str = "--------------------------------------";
const TRANSFORM_BANNER: &str = "    -------------------------";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeclineTrace {
    pub rules: Vec<RuleTrace>,
}

impl DeclineTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    pub fn applied_rules(&self) -> impl Iterator<Item = &RuleTrace> {
        self.rules.iter().filter(|r| r.outcome.applied())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleTrace {
    pub rule_id: RuleId,
    pub name: String,
    pub outcome: RuleOutcome,
    pub transforms: Vec<TransformTrace>,
}

impl RuleTrace {
    pub(crate) fn new(rule: &ConjugationRule, outcome: RuleOutcome) -> Self {
        Self {
            rule_id: rule.id(),
            name: rule.name().to_string(),
            outcome,
            transforms: Vec::new(),
        }
    }
}

/// Why a rule was or was not applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleOutcome {
    ClassMismatch,
    GateMatched { value: String, regex: String },
    GateMismatch { value: String, regex: String },
    IllegalGate { regex: String, reason: String },
}

impl RuleOutcome {
    pub fn applied(&self) -> bool {
        matches!(self, RuleOutcome::GateMatched { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformTrace {
    pub regex: String,
    pub replacement: String,
    pub effect: TransformEffect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransformEffect {
    Applied { before: String, after: String },
    Skipped { reason: String },
}

impl fmt::Display for DeclineTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "APPLIED RULES BREAKDOWN:")?;
        for rule in &self.rules {
            write!(f, "{rule}")?;
        }
        Ok(())
    }
}

impl fmt::Display for RuleTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE_BANNER}")?;
        writeln!(f, "Rule: {}", self.name)?;
        match &self.outcome {
            RuleOutcome::ClassMismatch => writeln!(
                f,
                "    Word's class does not match filter values for rule. Rule will not be applied."
            )?,
            RuleOutcome::GateMatched { value, regex } => writeln!(
                f,
                "    value: {value} matches regex: \"{regex}\". Rule will be applied."
            )?,
            RuleOutcome::GateMismatch { value, regex } => writeln!(
                f,
                "    value: {value} does not match regex: \"{regex}\". Rule will not be applied."
            )?,
            RuleOutcome::IllegalGate { regex, reason } => writeln!(
                f,
                "    regex: \"{regex}\" is illegal ({reason}). Rule will not be applied."
            )?,
        }
        for transform in &self.transforms {
            writeln!(f, "{TRANSFORM_BANNER}")?;
            writeln!(f, "    Transformation:")?;
            writeln!(f, "        Regex: \"{}\"", transform.regex)?;
            writeln!(f, "        Text: \"{}\"", transform.replacement)?;
            match &transform.effect {
                TransformEffect::Applied { before, after } => {
                    writeln!(f, "        Effect: {before} -> {after}")?
                }
                TransformEffect::Skipped { reason } => {
                    writeln!(f, "        Skipped: {reason}")?
                }
            }
        }
        Ok(())
    }
}

/// Where in a rule an illegal pattern was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "position", rename_all = "snake_case")]
pub enum PatternLocation {
    Gate,
    Transform(usize),
}

impl fmt::Display for PatternLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternLocation::Gate => f.write_str("gating regex"),
            PatternLocation::Transform(i) => write!(f, "transform {}", i + 1),
        }
    }
}

/// An illegal or failing pattern that was skipped during declension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDiagnostic {
    pub rule_id: RuleId,
    pub rule_name: String,
    pub location: PatternLocation,
    pub error: PatternError,
}

impl fmt::Display for RuleDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rule \"{}\" ({}), {}: {}",
            self.rule_name, self.rule_id, self.location, self.error
        )
    }
}
