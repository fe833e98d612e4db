use super::*;

const SAMPLE: &str = r#"
suppressed = "1,,2,2,;1,bogus"

[[parts_of_speech]]
id = 1
name = "noun"

[[parts_of_speech]]
id = 2
name = "verb"

[[classes]]
id = 10
name = "animate"
applies_to = [1]
values = [{ id = 1, name = "yes" }, { id = 2, name = "no" }]

[[words]]
id = 1
value = "kat"
type = 1
classes = [{ class = 10, value = 1 }]

[[words]]
id = 2
value = "dom"
type = 1

[[dimensions]]
type = 1
id = 1
label = "number"
values = [{ id = 1, label = "singular" }, { id = 2, label = "plural" }]

[[dimensions]]
type = 1
id = 2
label = "case"
values = [{ id = 1, label = "nominative" }, { id = 2, label = "accusative" }]

[[extra_forms]]
type = 1
id = 3
label = "vocative"

[[rules]]
type = 1
combination = ",2,1,"
name = "plural"
transforms = [{ pattern = "$", replacement = "s" }]

[[rules]]
type = 1
combination = ",1,2,"
name = "animate accusative"
gate = ".*t"
classes = [{ class = 10, value = 1 }]
transforms = [{ pattern = "$", replacement = "a" }]

[[rules]]
type = 1
combination = "3"
name = "vocative"
transforms = [{ pattern = "^(.)", replacement = "$1$1" }]

[pronunciation]
recursion = true
syllable_composition = true
rules = [{ pattern = "k(?=a)", replacement = "q" }]

[romanization]
enabled = true
rules = [{ pattern = "q", replacement = "k" }]

[syllables]
categories = { C = ["k", "q", "t", "d", "m", "s"], V = ["a", "o"] }
templates = ["CV", "CVC"]
illegal_clusters = ["qq"]
"#;

fn load(toml: &str) -> Grammar {
    Grammar::from_toml(toml).unwrap()
}

fn comb(raw: &str) -> CombinationId {
    CombinationId::parse(raw).unwrap()
}

#[test]
fn loads_lexicon() {
    let g = load(SAMPLE);
    assert_eq!(g.lexicon.part_of_speech_by_name("verb").map(|p| p.id), Some(2));
    let kat = g.lexicon.word(1).unwrap();
    assert!(kat.has_class_value(10, 1));
    assert_eq!(g.lexicon.word_by_value("dom").map(|w| w.id), Some(2));
}

#[test]
fn loads_templates_and_rules() {
    let g = load(SAMPLE);
    let ids: Vec<String> = g
        .conjugations
        .all_combined_ids(1)
        .into_iter()
        .map(|f| f.id.to_string())
        .collect();
    // ",2,2," is suppressed.
    assert_eq!(ids, [",1,1,", ",1,2,", ",2,1,", "3"]);

    let decline = |word, raw| {
        g.conjugations
            .decline_word(&g.lexicon, word, &comb(raw))
            .unwrap()
            .value
    };
    assert_eq!(decline(1, ",2,1,"), "kats");
    assert_eq!(decline(1, ",1,2,"), "kata");
    assert_eq!(decline(2, ",1,2,"), "dom");
    assert_eq!(decline(2, "3"), "ddom");
}

#[test]
fn bad_suppression_entries_are_collected() {
    let g = load(SAMPLE);
    assert_eq!(g.suppression_errors.len(), 1);
    assert_eq!(g.suppression_errors[0].entry, "1,bogus");
    assert!(g.conjugations.is_combination_suppressed(1, &comb(",2,2,")));
}

#[test]
fn loads_pronunciation_and_romanization() {
    let g = load(SAMPLE);
    assert!(g.pronunciation.is_recursion_enabled());
    assert_eq!(g.pronunciation.get_pronunciation("katom"), "qa˙tom");
    assert_eq!(g.romanization.romanize("qa").value, "ka");
    assert!(g.romanization.is_enabled());
}

#[test]
fn empty_definition_loads() {
    let g = load("");
    assert!(g.conjugations.is_empty());
    assert!(g.pronunciation.rules().is_empty());
    assert!(!g.romanization.is_enabled());
}

#[test]
fn invalid_toml_is_parse_error() {
    assert!(matches!(
        Grammar::from_toml("[[words]\nid = 1"),
        Err(GrammarError::Parse(_))
    ));
    // Missing required field.
    assert!(matches!(
        Grammar::from_toml("[[words]]\nid = 1\ntype = 1"),
        Err(GrammarError::Parse(_))
    ));
}

#[test]
fn duplicate_ids_rejected() {
    let toml = r#"
[[parts_of_speech]]
id = 1
name = "noun"

[[parts_of_speech]]
id = 1
name = "verb"
"#;
    assert!(matches!(
        Grammar::from_toml(toml),
        Err(GrammarError::DuplicateId { kind: "part of speech", id: 1 })
    ));
}

#[test]
fn dimension_and_extra_form_share_ids() {
    let toml = r#"
[[parts_of_speech]]
id = 1
name = "noun"

[[dimensions]]
type = 1
id = 4
label = "number"

[[extra_forms]]
type = 1
id = 4
label = "vocative"
"#;
    assert!(matches!(
        Grammar::from_toml(toml),
        Err(GrammarError::Template {
            type_id: 1,
            source: TemplateError::DuplicateId(4)
        })
    ));
}

#[test]
fn unknown_part_of_speech_rejected() {
    let toml = r#"
[[words]]
id = 1
value = "kat"
type = 7
"#;
    let err = Grammar::from_toml(toml).unwrap_err();
    assert!(matches!(err, GrammarError::UnknownPartOfSpeech { type_id: 7, .. }));
    assert_eq!(err.to_string(), "word \"kat\" refers to unknown part of speech 7");
}

#[test]
fn unknown_class_value_rejected() {
    let toml = r#"
[[parts_of_speech]]
id = 1
name = "noun"

[[rules]]
type = 1
combination = ","
name = "r"
classes = [{ class = 10, value = 1, negated = true }]
"#;
    assert!(matches!(
        Grammar::from_toml(toml),
        Err(GrammarError::UnknownClassValue {
            class_id: 10,
            value_id: 1,
            ..
        })
    ));
}

#[test]
fn negated_class_condition_loads() {
    let toml = r#"
[[parts_of_speech]]
id = 1
name = "noun"

[[classes]]
id = 10
name = "animate"
values = [{ id = 1, name = "yes" }]

[[words]]
id = 1
value = "dom"
type = 1

[[rules]]
type = 1
combination = ","
name = "inanimate"
classes = [{ class = 10, value = 1, negated = true }]
transforms = [{ pattern = "$", replacement = "e" }]
"#;
    let g = load(toml);
    let value = g
        .conjugations
        .decline_word(&g.lexicon, 1, &comb(","))
        .unwrap()
        .value;
    assert_eq!(value, "dome");
}

#[test]
fn malformed_combination_rejected() {
    let toml = r#"
[[parts_of_speech]]
id = 1
name = "noun"

[[rules]]
type = 1
combination = ",1,x,"
name = "broken"
"#;
    let err = Grammar::from_toml(toml).unwrap_err();
    assert!(matches!(err, GrammarError::Combination { .. }));
    assert!(err.to_string().starts_with("rule \"broken\""));
}

#[test]
fn illegal_patterns_load_and_are_skipped_later() {
    let toml = r#"
[pronunciation]
rules = [{ pattern = "(", replacement = "x" }, { pattern = "a", replacement = "o" }]
"#;
    let g = load(toml);
    let p = g.pronunciation.pronounce("ka");
    assert_eq!(p.value, "ko");
    assert_eq!(p.diagnostics.len(), 1);
}

#[test]
fn syllable_definition_errors() {
    let long_key = "[syllables]\ncategories = { CV = [\"k\"] }";
    assert!(matches!(
        Grammar::from_toml(long_key),
        Err(GrammarError::CategoryLetter(k)) if k == "CV"
    ));

    let unbalanced = "[syllables]\ntemplates = [\"(CV\"]";
    assert!(matches!(
        Grammar::from_toml(unbalanced),
        Err(GrammarError::Syllable(SyllableError::UnbalancedGroup(_)))
    ));
}
