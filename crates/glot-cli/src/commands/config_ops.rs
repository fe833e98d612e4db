use std::fmt::Write as _;

use glot_engine::settings::{self, SettingsError};
use glot_engine::Language;

pub fn settings_export() -> &'static str {
    settings::default_toml()
}

pub fn settings_validate(content: &str) -> Result<String, SettingsError> {
    let s = settings::parse_settings_toml(content)?;
    Ok(format!(
        "OK: patterns.backtrack_limit={}, pronunciation.max_recursion_passes={}, pronunciation.syllable_separator={:?}\n",
        s.patterns.backtrack_limit, s.pronunciation.max_recursion_passes, s.pronunciation.syllable_separator
    ))
}

/// Summary of a loaded definition plus every problem that would be
/// skipped silently at use time.
pub fn validate_cmd(lang: &Language) -> String {
    let lexicon = lang.lexicon();
    let conjugations = lang.conjugations();
    let mut problems = Vec::new();

    for e in lang.suppression_errors() {
        problems.push(e.to_string());
    }

    let mut rule_count = 0;
    for pos in lexicon.parts_of_speech() {
        let rules = conjugations.rules_for_type(pos.id);
        rule_count += rules.len();
        for rule in rules {
            if let Err(e) = rule.gate().regex() {
                problems.push(format!("{} rule {} gate: {e}", pos.name, rule.name()));
            }
            for (i, t) in rule.transforms().iter().enumerate() {
                if let Err(e) = t.compiled().regex() {
                    problems.push(format!("{} rule {} transform {}: {e}", pos.name, rule.name(), i + 1));
                }
            }
        }
        for rule in conjugations.deprecated_rules(pos.id) {
            problems.push(format!(
                "{} rule {} targets {}, which the template no longer declares",
                pos.name,
                rule.name(),
                rule.combination()
            ));
        }
    }

    let engines = [
        ("pronunciation", lang.pronunciation()),
        ("romanization", lang.romanization().engine()),
    ];
    for (label, engine) in engines {
        for (i, rule) in engine.rules().iter().enumerate() {
            if let Err(e) = rule.compiled().regex() {
                problems.push(format!("{label} rule {}: {e}", i + 1));
            }
        }
    }

    let mut out = format!(
        "{} parts of speech, {} words, {} conjugation rules, {} pronunciation rules\n",
        lexicon.parts_of_speech().count(),
        lexicon.words().count(),
        rule_count,
        lang.pronunciation().rules().len(),
    );
    if problems.is_empty() {
        out.push_str("OK\n");
    } else {
        for p in &problems {
            let _ = writeln!(out, "  ! {p}");
        }
        let _ = writeln!(out, "{} problems", problems.len());
    }
    out
}
