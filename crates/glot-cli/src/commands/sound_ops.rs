use std::fmt::Write as _;

use glot_engine::pronunciation::Pronunciation;
use glot_engine::settings::settings;
use glot_engine::Language;

fn render(p: &Pronunciation) -> String {
    let mut out = if p.value.is_empty() {
        "(no pronunciation)\n".to_string()
    } else {
        format!("{}\n", p.value)
    };
    for d in &p.diagnostics {
        let _ = writeln!(out, "  ! {d}");
    }
    out
}

pub fn pronounce_cmd(lang: &Language, text: &str) -> String {
    render(&lang.pronunciation().pronounce(text))
}

pub fn romanize_cmd(lang: &Language, text: &str) -> String {
    let romanizer = lang.romanization();
    let mut out = render(&romanizer.romanize(text));
    if !romanizer.is_enabled() {
        out.push_str("  (romanization disabled; input shown unchanged)\n");
    }
    out
}

/// Syllable split of each word, without applying pronunciation rules.
pub fn syllables_cmd(lang: &Language, text: &str) -> String {
    let separator = settings().pronunciation.syllable_separator.as_str();
    let grammar = lang.pronunciation().syllables();
    let mut out = String::new();
    for word in text.split_whitespace() {
        match grammar.split_syllables(word, separator) {
            Some(split) => {
                let _ = writeln!(out, "{word}: {split}");
            }
            None => {
                let _ = writeln!(out, "{word}: (no decomposition)");
            }
        }
    }
    out
}
