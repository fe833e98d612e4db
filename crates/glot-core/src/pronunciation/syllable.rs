//! Syllable segmentation from category definitions and syllable templates.
//!
//! A template such as `"(C)V(C)"` is a sequence of slots. A slot letter
//! that names a declared category matches any one member of that category;
//! any other character matches itself. Parenthesised groups are optional.

use std::collections::{BTreeMap, BTreeSet, HashSet};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyllableError {
    #[error("syllable template \"{0}\" has an unbalanced or nested parenthesis")]
    UnbalancedGroup(String),
    #[error("syllable template \"{0}\" has no slots")]
    EmptyTemplate(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Element {
    slots: Vec<char>,
    optional: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Template {
    source: String,
    elements: Vec<Element>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyllableGrammar {
    categories: BTreeMap<char, Vec<String>>,
    templates: Vec<Template>,
    illegal_clusters: BTreeSet<String>,
}

impl SyllableGrammar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare (or extend) a category. Members may be multi-character.
    pub fn add_category<I>(&mut self, letter: char, members: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let entry = self.categories.entry(letter).or_default();
        for member in members {
            let member = member.into();
            if !member.is_empty() && !entry.contains(&member) {
                entry.push(member);
            }
        }
    }

    pub fn add_template(&mut self, source: &str) -> Result<(), SyllableError> {
        let elements = parse_template(source)?;
        self.templates.push(Template {
            source: source.to_string(),
            elements,
        });
        Ok(())
    }

    pub fn add_illegal_cluster(&mut self, cluster: impl Into<String>) {
        let cluster = cluster.into();
        if !cluster.is_empty() {
            self.illegal_clusters.insert(cluster);
        }
    }

    pub fn categories(&self) -> &BTreeMap<char, Vec<String>> {
        &self.categories
    }

    pub fn templates(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|t| t.source.as_str())
    }

    pub fn illegal_clusters(&self) -> &BTreeSet<String> {
        &self.illegal_clusters
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Split `word` into syllables, or `None` if no decomposition exists.
    ///
    /// Longer syllables are tried first at each position, backtracking when
    /// the remainder cannot be decomposed. A syllable containing an illegal
    /// cluster is never produced.
    pub fn syllabify(&self, word: &str) -> Option<Vec<String>> {
        if word.is_empty() {
            return Some(Vec::new());
        }
        let mut dead_ends = HashSet::new();
        let mut out = Vec::new();
        self.split_from(word, 0, &mut dead_ends, &mut out)
            .then_some(out)
    }

    /// [`Self::syllabify`] joined with `separator`.
    pub fn split_syllables(&self, word: &str, separator: &str) -> Option<String> {
        self.syllabify(word).map(|s| s.join(separator))
    }

    fn split_from(
        &self,
        word: &str,
        pos: usize,
        dead_ends: &mut HashSet<usize>,
        out: &mut Vec<String>,
    ) -> bool {
        if pos == word.len() {
            return true;
        }
        if dead_ends.contains(&pos) {
            return false;
        }

        let mut ends = Vec::new();
        for template in &self.templates {
            self.element_ends(&template.elements, word, pos, &mut ends);
        }
        ends.retain(|&end| end > pos);
        ends.sort_unstable_by(|a, b| b.cmp(a));
        ends.dedup();

        for end in ends {
            let syllable = &word[pos..end];
            if self.has_illegal_cluster(syllable) {
                continue;
            }
            out.push(syllable.to_string());
            if self.split_from(word, end, dead_ends, out) {
                return true;
            }
            out.pop();
        }
        dead_ends.insert(pos);
        false
    }

    fn element_ends(&self, elements: &[Element], word: &str, pos: usize, out: &mut Vec<usize>) {
        let Some((first, rest)) = elements.split_first() else {
            out.push(pos);
            return;
        };
        if first.optional {
            self.element_ends(rest, word, pos, out);
        }
        let mut mids = Vec::new();
        self.slot_ends(&first.slots, word, pos, &mut mids);
        for mid in mids {
            self.element_ends(rest, word, mid, out);
        }
    }

    fn slot_ends(&self, slots: &[char], word: &str, pos: usize, out: &mut Vec<usize>) {
        let Some((&slot, rest)) = slots.split_first() else {
            out.push(pos);
            return;
        };
        let tail = &word[pos..];
        match self.categories.get(&slot) {
            Some(members) => {
                for member in members.iter().filter(|m| tail.starts_with(m.as_str())) {
                    self.slot_ends(rest, word, pos + member.len(), out);
                }
            }
            None => {
                if tail.starts_with(slot) {
                    self.slot_ends(rest, word, pos + slot.len_utf8(), out);
                }
            }
        }
    }

    fn has_illegal_cluster(&self, syllable: &str) -> bool {
        self.illegal_clusters.iter().any(|c| syllable.contains(c.as_str()))
    }
}

fn parse_template(source: &str) -> Result<Vec<Element>, SyllableError> {
    let unbalanced = || SyllableError::UnbalancedGroup(source.to_string());
    let mut elements = Vec::new();
    let mut group: Option<Vec<char>> = None;

    for c in source.chars() {
        if let Some(slots) = group.as_mut() {
            match c {
                '(' => return Err(unbalanced()),
                ')' => {
                    let slots = std::mem::take(slots);
                    group = None;
                    if !slots.is_empty() {
                        elements.push(Element {
                            slots,
                            optional: true,
                        });
                    }
                }
                _ => slots.push(c),
            }
        } else {
            match c {
                '(' => group = Some(Vec::new()),
                ')' => return Err(unbalanced()),
                _ => elements.push(Element {
                    slots: vec![c],
                    optional: false,
                }),
            }
        }
    }

    if group.is_some() {
        return Err(unbalanced());
    }
    if elements.is_empty() {
        return Err(SyllableError::EmptyTemplate(source.to_string()));
    }
    Ok(elements)
}
