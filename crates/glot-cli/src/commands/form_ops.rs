use std::fmt::Write as _;

use unicode_width::UnicodeWidthStr;

use glot_engine::conjugation::explain::format_text;
use glot_engine::conjugation::{CombinationId, RuleDiagnostic};
use glot_engine::lexicon::WordId;
use glot_engine::Language;

use super::CommandError;

fn push_diagnostics(out: &mut String, diagnostics: &[RuleDiagnostic]) {
    for d in diagnostics {
        let _ = writeln!(out, "  ! {d}");
    }
}

pub fn decline_cmd(lang: &Language, word_id: WordId, combination: &str) -> Result<String, CommandError> {
    let combination = CombinationId::parse(combination)?;
    let declension = lang.decline(word_id, &combination)?;
    let mut out = format!("{}\n", declension.value);
    push_diagnostics(&mut out, &declension.diagnostics);
    Ok(out)
}

/// Table of every non-suppressed form, labels padded to display width.
pub fn forms_cmd(lang: &Language, word_id: WordId) -> Result<String, CommandError> {
    let forms = lang.forms(word_id)?;
    let labels: Vec<&str> = forms
        .iter()
        .map(|f| if f.label.is_empty() { "(base)" } else { f.label.as_str() })
        .collect();
    let id_width = forms.iter().map(|f| f.combination.as_str().len()).max().unwrap_or(0);
    let label_width = labels.iter().map(|l| UnicodeWidthStr::width(*l)).max().unwrap_or(0);

    let mut out = String::new();
    for (form, label) in forms.iter().zip(&labels) {
        let pad = label_width - UnicodeWidthStr::width(*label);
        let _ = writeln!(
            out,
            "{:<id_width$}  {}{}  {}",
            form.combination.as_str(),
            label,
            " ".repeat(pad),
            form.value,
        );
        push_diagnostics(&mut out, &form.diagnostics);
    }
    Ok(out)
}

pub fn explain_cmd(
    lang: &Language,
    word_id: WordId,
    combination: &str,
    json: bool,
) -> Result<String, CommandError> {
    let combination = CombinationId::parse(combination)?;
    let result = lang.explain(word_id, &combination)?;
    if json {
        let mut out = serde_json::to_string_pretty(&result)?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(format_text(&result))
    }
}
