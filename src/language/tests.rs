use std::io::Write;

use super::*;

const DEFINITION: &str = r#"
suppressed = "1,,2,"

[[parts_of_speech]]
id = 1
name = "noun"

[[parts_of_speech]]
id = 2
name = "verb"

[[classes]]
id = 10
name = "gender"
applies_to = [1]
values = [{ id = 1, name = "feminine" }, { id = 2, name = "masculine" }]

[[words]]
id = 1
value = "casa"
type = 1
classes = [{ class = 10, value = 1 }]

[[words]]
id = 2
value = "libro"
type = 1
classes = [{ class = 10, value = 2 }]

[[words]]
id = 3
value = "ver"
type = 2

[[dimensions]]
type = 1
id = 1
label = "number"
values = [{ id = 1, label = "singular" }, { id = 2, label = "plural" }, { id = 3, label = "dual" }]

[[rules]]
type = 1
combination = ",2,"
name = "plural"
transforms = [{ pattern = "$", replacement = "s" }]

[[rules]]
type = 1
combination = ",3,"
name = "feminine dual"
classes = [{ class = 10, value = 1 }]
transforms = [{ pattern = "a$", replacement = "ai" }]

[[rules]]
type = 2
combination = ","
name = "infinitive"
transforms = [{ pattern = "$", replacement = "e" }]

[pronunciation]
rules = [{ pattern = "c", replacement = "k" }, { pattern = "(?<=[aeiou])s(?=[aeiou])", replacement = "z" }]

[romanization]
enabled = false
rules = [{ pattern = "k", replacement = "c" }]
"#;

fn language() -> Language {
    Language::from_toml(DEFINITION).unwrap()
}

fn comb(raw: &str) -> CombinationId {
    CombinationId::parse(raw).unwrap()
}

#[test]
fn decline_and_forms() {
    let lang = language();
    assert_eq!(lang.decline(1, &comb(",1,")).unwrap().value, "casa");

    let forms = lang.forms(1).unwrap();
    let rendered: Vec<(String, String)> = forms
        .iter()
        .map(|f| (f.label.clone(), f.value.clone()))
        .collect();
    // Plural is suppressed.
    assert_eq!(
        rendered,
        [
            ("singular".to_string(), "casa".to_string()),
            ("dual".to_string(), "casai".to_string()),
        ]
    );

    let libro = lang.forms(2).unwrap();
    assert_eq!(libro[1].value, "libro");
}

#[test]
fn forms_of_undimensioned_type() {
    let lang = language();
    let forms = lang.forms(3).unwrap();
    assert_eq!(forms.len(), 1);
    assert_eq!(forms[0].combination.as_str(), ",");
    assert_eq!(forms[0].value, "vere");
}

#[test]
fn missing_word() {
    let lang = language();
    assert_eq!(lang.forms(99).unwrap_err(), DeclineError::MissingWord(99));
    assert_eq!(
        lang.pronunciation_of(99).unwrap_err(),
        DeclineError::MissingWord(99)
    );
}

#[test]
fn explain_reports_trace() {
    let lang = language();
    let result = lang.explain(1, &comb(",2,")).unwrap();
    assert_eq!(result.result, "casas");
    assert!(result.suppressed);
    assert_eq!(result.trace.applied_rules().count(), 1);
}

#[test]
fn pronunciation_and_romanization() {
    let mut lang = language();
    assert_eq!(lang.pronunciation_of(1).unwrap().value, "kaza");
    assert_eq!(lang.romanization_of(1).unwrap().value, "casa");

    lang.romanization_mut().set_enabled(true);
    assert_eq!(lang.romanization().romanize("kasa").value, "casa");
}

#[test]
fn delete_part_of_speech_cascades() {
    let mut lang = language();
    assert_eq!(lang.delete_part_of_speech(1), 2);
    assert!(lang.lexicon().part_of_speech(1).is_none());
    assert!(lang.conjugations().template(1).is_none());
    assert!(lang.conjugations().suppression().is_empty());
    assert_eq!(
        lang.decline(1, &comb(",2,")).unwrap_err(),
        DeclineError::UnknownPartOfSpeech { word: 1, type_id: 1 }
    );
    // Other parts of speech untouched.
    assert_eq!(lang.decline(3, &comb(",")).unwrap().value, "vere");
}

#[test]
fn delete_class_purges_conditions() {
    let mut lang = language();
    assert_eq!(lang.delete_class(10), 1);
    assert!(lang.lexicon().class(10).is_none());
    // The dual rule now applies to every noun; "libro" has no final "a".
    assert_eq!(lang.decline(1, &comb(",3,")).unwrap().value, "casai");
    assert_eq!(lang.decline(2, &comb(",3,")).unwrap().value, "libro");
}

#[test]
fn load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(DEFINITION.as_bytes()).unwrap();
    let lang = Language::load(file.path()).unwrap();
    assert_eq!(lang.lexicon().words().count(), 3);
    assert!(lang.suppression_errors().is_empty());
}

#[test]
fn load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Language::load(&dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, LanguageError::Io { .. }));
}

#[test]
fn load_invalid_definition_is_grammar_error() {
    assert!(matches!(
        Language::from_toml("[[words]]\nid = 1\nvalue = \"x\"\ntype = 5"),
        Err(LanguageError::Grammar(GrammarError::UnknownPartOfSpeech { type_id: 5, .. }))
    ));
}
