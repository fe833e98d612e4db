use std::collections::BTreeSet;

use tracing::{debug, debug_span, warn};

use super::rule::PronunciationRule;
use super::syllable::SyllableGrammar;
use super::{Pronunciation, PronunciationDiagnostic};
use crate::settings::settings;

/// Ordered pronunciation rules plus the flags controlling how they apply.
///
/// Rule priority is list position: the first rule runs first.
#[derive(Debug, Clone, Default)]
pub struct PronunciationEngine {
    rules: Vec<PronunciationRule>,
    regex_disabled: bool,
    recursion_enabled: bool,
    syllable_composition_enabled: bool,
    ignore_case: bool,
    syllables: SyllableGrammar,
}

impl PronunciationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Rule list
    // ------------------------------------------------------------------

    pub fn rules(&self) -> &[PronunciationRule] {
        &self.rules
    }

    pub fn rule_mut(&mut self, position: usize) -> Option<&mut PronunciationRule> {
        self.rules.get_mut(position)
    }

    pub fn add_rule(&mut self, rule: PronunciationRule) {
        self.rules.push(rule);
    }

    /// Insert at `position`, or append when `position` is past the end.
    pub fn insert_rule(&mut self, position: usize, rule: PronunciationRule) {
        let position = position.min(self.rules.len());
        self.rules.insert(position, rule);
    }

    /// Swap with the rule above. Returns false at the top or out of range.
    pub fn move_rule_up(&mut self, position: usize) -> bool {
        if position == 0 || position >= self.rules.len() {
            return false;
        }
        self.rules.swap(position - 1, position);
        true
    }

    /// Swap with the rule below. Returns false at the bottom or out of range.
    pub fn move_rule_down(&mut self, position: usize) -> bool {
        if position >= self.rules.len().saturating_sub(1) {
            return false;
        }
        self.rules.swap(position, position + 1);
        true
    }

    pub fn delete_rule(&mut self, position: usize) -> Option<PronunciationRule> {
        (position < self.rules.len()).then(|| self.rules.remove(position))
    }

    pub fn clear_rules(&mut self) {
        self.rules.clear();
    }

    pub fn uses_lookaround(&self) -> bool {
        self.rules.iter().any(PronunciationRule::has_lookaround)
    }

    // ------------------------------------------------------------------
    // Flags
    // ------------------------------------------------------------------

    pub fn is_regex_disabled(&self) -> bool {
        self.regex_disabled
    }

    pub fn set_regex_disabled(&mut self, disabled: bool) {
        self.regex_disabled = disabled;
    }

    pub fn is_recursion_enabled(&self) -> bool {
        self.recursion_enabled
    }

    pub fn set_recursion_enabled(&mut self, enabled: bool) {
        self.recursion_enabled = enabled;
    }

    pub fn is_syllable_composition_enabled(&self) -> bool {
        self.syllable_composition_enabled
    }

    pub fn set_syllable_composition_enabled(&mut self, enabled: bool) {
        self.syllable_composition_enabled = enabled;
    }

    /// Only affects the regex-disabled path.
    pub fn is_ignore_case(&self) -> bool {
        self.ignore_case
    }

    pub fn set_ignore_case(&mut self, ignore_case: bool) {
        self.ignore_case = ignore_case;
    }

    pub fn syllables(&self) -> &SyllableGrammar {
        &self.syllables
    }

    pub fn syllables_mut(&mut self) -> &mut SyllableGrammar {
        &mut self.syllables
    }

    pub fn set_syllables(&mut self, grammar: SyllableGrammar) {
        self.syllables = grammar;
    }

    // ------------------------------------------------------------------
    // Pronouncing
    // ------------------------------------------------------------------

    /// Pronunciation of `text`, or the empty string when none exists.
    pub fn get_pronunciation(&self, text: &str) -> String {
        self.pronounce(text).value
    }

    /// Pronounce every whitespace-separated word of `text`, keeping the
    /// whitespace between them as written.
    ///
    /// With syllable composition on, a single word that cannot be
    /// syllabified empties the whole result.
    pub fn pronounce(&self, text: &str) -> Pronunciation {
        let _span = debug_span!("pronounce", len = text.len(), rules = self.rules.len()).entered();
        let separator = settings().pronunciation.syllable_separator.as_str();
        let mut diagnostics = Vec::new();
        let mut value = String::with_capacity(text.len());

        for (is_space, run) in split_runs(text) {
            if is_space {
                value.push_str(run);
                continue;
            }
            let transformed = self.transform_word(run, &mut diagnostics);
            if !self.syllable_composition_enabled {
                value.push_str(&transformed);
                continue;
            }
            match self.syllables.split_syllables(&transformed, separator) {
                Some(split) => value.push_str(&split),
                None => {
                    debug!(word = run, transformed = %transformed, "word has no syllable decomposition");
                    diagnostics.push(PronunciationDiagnostic::Unsyllabifiable {
                        word: run.to_string(),
                        transformed,
                    });
                    return Pronunciation {
                        value: String::new(),
                        diagnostics,
                    };
                }
            }
        }

        Pronunciation { value, diagnostics }
    }

    fn transform_word(&self, word: &str, diagnostics: &mut Vec<PronunciationDiagnostic>) -> String {
        if self.regex_disabled {
            return self.rules.iter().fold(word.to_string(), |acc, rule| {
                replace_literal(&acc, rule.pattern(), rule.replacement(), self.ignore_case)
            });
        }

        let mut reported = BTreeSet::new();
        let mut value = word.to_string();
        for (position, rule) in self.rules.iter().enumerate() {
            let Some(next) = apply_rule(position, rule, &value, &mut reported, diagnostics) else {
                continue;
            };
            if next == value {
                continue;
            }
            value = next;
            if self.recursion_enabled && rule.has_lookaround() {
                value = self.rescan(word, value, &mut reported, diagnostics);
            }
        }
        value
    }

    /// Full passes over the rule list until one changes nothing, at most
    /// `max_recursion_passes` of them.
    fn rescan(
        &self,
        word: &str,
        mut value: String,
        reported: &mut BTreeSet<usize>,
        diagnostics: &mut Vec<PronunciationDiagnostic>,
    ) -> String {
        let cap = settings().pronunciation.max_recursion_passes;
        for _ in 0..cap {
            let before = value.clone();
            for (position, rule) in self.rules.iter().enumerate() {
                if let Some(next) = apply_rule(position, rule, &value, reported, diagnostics) {
                    value = next;
                }
            }
            if value == before {
                return value;
            }
        }
        warn!(word, passes = cap, "pronunciation recursion cap reached");
        diagnostics.push(PronunciationDiagnostic::RecursionLimit {
            word: word.to_string(),
            passes: cap,
        });
        value
    }
}

/// `None` when the rule is blank or its pattern cannot run; the first
/// failure per position is reported.
fn apply_rule(
    position: usize,
    rule: &PronunciationRule,
    value: &str,
    reported: &mut BTreeSet<usize>,
    diagnostics: &mut Vec<PronunciationDiagnostic>,
) -> Option<String> {
    if rule.compiled().is_empty() {
        return None;
    }
    match rule.compiled().replace_all(value, rule.replacement()) {
        Ok(out) => Some(out),
        Err(error) => {
            if reported.insert(position) {
                warn!(position, pattern = rule.pattern(), %error, "pronunciation pattern skipped");
                diagnostics.push(PronunciationDiagnostic::IllegalPattern { position, error });
            }
            None
        }
    }
}

fn replace_literal(haystack: &str, needle: &str, replacement: &str, ignore_case: bool) -> String {
    if needle.is_empty() {
        return haystack.to_string();
    }
    if !ignore_case {
        return haystack.replace(needle, replacement);
    }

    let needle: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();
    let chars: Vec<char> = haystack.chars().collect();
    let mut out = String::with_capacity(haystack.len());
    let mut i = 0;
    while i < chars.len() {
        match caseless_prefix_len(&chars[i..], &needle) {
            Some(len) => {
                out.push_str(replacement);
                i += len;
            }
            None => {
                out.push(chars[i]);
                i += 1;
            }
        }
    }
    out
}

/// Number of chars of `chars` whose lowercase form spells `needle`.
fn caseless_prefix_len(chars: &[char], needle: &[char]) -> Option<usize> {
    let mut matched = 0;
    let mut consumed = 0;
    while matched < needle.len() {
        let c = chars.get(consumed)?;
        for lower in c.to_lowercase() {
            if needle.get(matched) != Some(&lower) {
                return None;
            }
            matched += 1;
        }
        consumed += 1;
    }
    Some(consumed)
}

/// Alternating runs of whitespace and non-whitespace, flagged `true` for
/// whitespace.
fn split_runs(text: &str) -> Vec<(bool, &str)> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;
    for (i, c) in text.char_indices() {
        let space = c.is_whitespace();
        if let Some(prev) = current {
            if prev != space {
                runs.push((prev, &text[start..i]));
                start = i;
            }
        }
        current = Some(space);
    }
    if let Some(space) = current {
        runs.push((space, &text[start..]));
    }
    runs
}
