//! Word, part-of-speech and class lookups consumed by the declension engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub type WordId = u32;
pub type TypeId = u32;
pub type ClassId = u32;
pub type ClassValueId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: WordId,
    pub value: String,
    pub type_id: TypeId,
    #[serde(default)]
    pub class_values: BTreeMap<ClassId, ClassValueId>,
}

impl Word {
    pub fn new(id: WordId, value: impl Into<String>, type_id: TypeId) -> Self {
        Self {
            id,
            value: value.into(),
            type_id,
            class_values: BTreeMap::new(),
        }
    }

    pub fn with_class_value(mut self, class_id: ClassId, value_id: ClassValueId) -> Self {
        self.class_values.insert(class_id, value_id);
        self
    }

    pub fn has_class_value(&self, class_id: ClassId, value_id: ClassValueId) -> bool {
        self.class_values.get(&class_id) == Some(&value_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartOfSpeech {
    pub id: TypeId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassValue {
    pub id: ClassValueId,
    pub name: String,
}

/// A word class such as gender or animacy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordClass {
    pub id: ClassId,
    pub name: String,
    /// Parts of speech the class applies to. Empty means every part of speech.
    #[serde(default)]
    pub applies_to: Vec<TypeId>,
    #[serde(default)]
    pub values: Vec<ClassValue>,
}

impl WordClass {
    pub fn applies_to_type(&self, type_id: TypeId) -> bool {
        self.applies_to.is_empty() || self.applies_to.contains(&type_id)
    }
}

/// Read access the declension engine needs from a lexicon.
pub trait Lexicon {
    fn word(&self, id: WordId) -> Option<&Word>;
    fn part_of_speech_exists(&self, type_id: TypeId) -> bool;
    fn class_value_exists(&self, class_id: ClassId, value_id: ClassValueId) -> bool;
    /// Classes that apply to words of `type_id`.
    fn classes_for_type(&self, type_id: TypeId) -> Vec<ClassId>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryLexicon {
    parts_of_speech: BTreeMap<TypeId, PartOfSpeech>,
    classes: BTreeMap<ClassId, WordClass>,
    words: BTreeMap<WordId, Word>,
}

impl MemoryLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_part_of_speech(&mut self, id: TypeId, name: impl Into<String>) {
        self.parts_of_speech.insert(
            id,
            PartOfSpeech {
                id,
                name: name.into(),
            },
        );
    }

    pub fn add_class(&mut self, class: WordClass) {
        self.classes.insert(class.id, class);
    }

    pub fn add_word(&mut self, word: Word) {
        self.words.insert(word.id, word);
    }

    pub fn remove_word(&mut self, id: WordId) -> Option<Word> {
        self.words.remove(&id)
    }

    /// Removes a part of speech. Words of that type stay but no longer resolve.
    pub fn remove_part_of_speech(&mut self, id: TypeId) -> Option<PartOfSpeech> {
        self.parts_of_speech.remove(&id)
    }

    /// Removes a class and clears its value from every word.
    pub fn remove_class(&mut self, id: ClassId) -> Option<WordClass> {
        for word in self.words.values_mut() {
            word.class_values.remove(&id);
        }
        self.classes.remove(&id)
    }

    pub fn part_of_speech(&self, id: TypeId) -> Option<&PartOfSpeech> {
        self.parts_of_speech.get(&id)
    }

    pub fn part_of_speech_by_name(&self, name: &str) -> Option<&PartOfSpeech> {
        self.parts_of_speech.values().find(|p| p.name == name)
    }

    pub fn parts_of_speech(&self) -> impl Iterator<Item = &PartOfSpeech> {
        self.parts_of_speech.values()
    }

    pub fn class(&self, id: ClassId) -> Option<&WordClass> {
        self.classes.get(&id)
    }

    pub fn classes(&self) -> impl Iterator<Item = &WordClass> {
        self.classes.values()
    }

    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.words.values()
    }

    /// First word whose written value equals `value`.
    pub fn word_by_value(&self, value: &str) -> Option<&Word> {
        self.words.values().find(|w| w.value == value)
    }
}

impl Lexicon for MemoryLexicon {
    fn word(&self, id: WordId) -> Option<&Word> {
        self.words.get(&id)
    }

    fn part_of_speech_exists(&self, type_id: TypeId) -> bool {
        self.parts_of_speech.contains_key(&type_id)
    }

    fn class_value_exists(&self, class_id: ClassId, value_id: ClassValueId) -> bool {
        self.classes
            .get(&class_id)
            .is_some_and(|c| c.values.iter().any(|v| v.id == value_id))
    }

    fn classes_for_type(&self, type_id: TypeId) -> Vec<ClassId> {
        self.classes
            .values()
            .filter(|c| c.applies_to_type(type_id))
            .map(|c| c.id)
            .collect()
    }
}
