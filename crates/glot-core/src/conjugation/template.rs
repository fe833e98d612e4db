use serde::{Deserialize, Serialize};

use super::combination::{CombinationId, CombinedForm};

pub type DimensionId = u32;
pub type ValueId = u32;
pub type FormId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionValue {
    pub id: ValueId,
    pub label: String,
}

/// A grammatical category (tense, case, number) with its ordered values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    pub id: DimensionId,
    pub label: String,
    #[serde(default)]
    pub values: Vec<DimensionValue>,
}

impl Dimension {
    pub fn new(id: DimensionId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            values: Vec::new(),
        }
    }

    pub fn with_value(mut self, id: ValueId, label: impl Into<String>) -> Self {
        self.values.push(DimensionValue {
            id,
            label: label.into(),
        });
        self
    }

    pub fn value(&self, id: ValueId) -> Option<&DimensionValue> {
        self.values.iter().find(|v| v.id == id)
    }

    pub(crate) fn next_value_id(&self) -> ValueId {
        self.values.iter().map(|v| v.id).max().map_or(1, |m| m + 1)
    }
}

/// A standalone form outside the dimensional grid (an infinitive, say).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraForm {
    pub id: FormId,
    pub label: String,
}

/// Declared dimensions and extra forms of one part of speech.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormTemplate {
    pub(crate) dimensions: Vec<Dimension>,
    pub(crate) extras: Vec<ExtraForm>,
}

impl FormTemplate {
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn extras(&self) -> &[ExtraForm] {
        &self.extras
    }

    pub fn dimension(&self, id: DimensionId) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.id == id)
    }

    /// Position of a dimension within combination ids.
    pub fn dimension_slot(&self, id: DimensionId) -> Option<usize> {
        self.dimensions.iter().position(|d| d.id == id)
    }

    pub fn extra(&self, id: FormId) -> Option<&ExtraForm> {
        self.extras.iter().find(|e| e.id == id)
    }

    /// Every form of the template: the dimensional cross-product in
    /// declaration order (or the single unlabeled `","` form when no
    /// dimensions exist), followed by the extra forms.
    pub fn combined_forms(&self) -> Vec<CombinedForm> {
        let mut out = Vec::new();
        let mut ids = Vec::with_capacity(self.dimensions.len());
        let mut labels = Vec::with_capacity(self.dimensions.len());
        expand(&self.dimensions, &mut ids, &mut labels, &mut out);
        out.extend(self.extras.iter().map(|e| CombinedForm {
            id: CombinationId::singleton(e.id),
            label: e.label.clone(),
        }));
        out
    }

    /// True if `combination` names a form this template currently declares.
    pub fn contains(&self, combination: &CombinationId) -> bool {
        match combination.singleton_id() {
            Some(form) => self.extra(form).is_some(),
            None => {
                let ids = combination.value_ids();
                ids.len() == self.dimensions.len()
                    && ids
                        .iter()
                        .zip(&self.dimensions)
                        .all(|(id, dim)| dim.value(*id).is_some())
            }
        }
    }

    pub fn label_of(&self, combination: &CombinationId) -> Option<String> {
        if !self.contains(combination) {
            return None;
        }
        match combination.singleton_id() {
            Some(form) => self.extra(form).map(|e| e.label.clone()),
            None => {
                let labels: Vec<&str> = combination
                    .value_ids()
                    .iter()
                    .zip(&self.dimensions)
                    .filter_map(|(id, dim)| dim.value(*id).map(|v| v.label.as_str()))
                    .collect();
                Some(labels.join(" "))
            }
        }
    }

    pub(crate) fn max_id(&self) -> u32 {
        let dims = self.dimensions.iter().map(|d| d.id);
        let extras = self.extras.iter().map(|e| e.id);
        dims.chain(extras).max().unwrap_or(0)
    }
}

fn expand<'a>(
    dims: &'a [Dimension],
    ids: &mut Vec<ValueId>,
    labels: &mut Vec<&'a str>,
    out: &mut Vec<CombinedForm>,
) {
    match dims.split_first() {
        None => out.push(CombinedForm {
            id: CombinationId::dimensional(ids),
            label: labels.join(" "),
        }),
        Some((dim, rest)) => {
            for value in &dim.values {
                ids.push(value.id);
                labels.push(&value.label);
                expand(rest, ids, labels, out);
                ids.pop();
                labels.pop();
            }
        }
    }
}
