use std::fmt;
use std::fmt::Write as _;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::template::{FormId, ValueId};

/// Identifies one inflected form of a part of speech.
///
/// Dimensional forms encode one value id per dimension slot, wrapped in
/// commas: `",2,3,"`. With no dimensions declared the single form is `","`.
/// Extra (non-dimensional) forms are the bare form id: `"7"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CombinationId(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed combination id \"{0}\"")]
pub struct CombinationParseError(pub String);

impl CombinationId {
    pub fn dimensional(value_ids: &[ValueId]) -> Self {
        let mut raw = String::from(",");
        for id in value_ids {
            let _ = write!(raw, "{id},");
        }
        Self(raw)
    }

    pub fn singleton(form_id: FormId) -> Self {
        Self(form_id.to_string())
    }

    pub fn parse(raw: &str) -> Result<Self, CombinationParseError> {
        let malformed = || CombinationParseError(raw.to_string());
        if let Some(inner) = raw.strip_prefix(',') {
            if inner.is_empty() {
                return Ok(Self(raw.to_string()));
            }
            let inner = inner.strip_suffix(',').ok_or_else(malformed)?;
            for part in inner.split(',') {
                part.parse::<ValueId>().map_err(|_| malformed())?;
            }
            Ok(Self(raw.to_string()))
        } else {
            raw.parse::<FormId>().map_err(|_| malformed())?;
            Ok(Self(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_dimensional(&self) -> bool {
        self.0.starts_with(',')
    }

    /// Value ids in slot order. Empty for singleton forms.
    pub fn value_ids(&self) -> Vec<ValueId> {
        if !self.is_dimensional() {
            return Vec::new();
        }
        self.0
            .split(',')
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse().ok())
            .collect()
    }

    pub fn value_at(&self, slot: usize) -> Option<ValueId> {
        self.value_ids().get(slot).copied()
    }

    pub fn singleton_id(&self) -> Option<FormId> {
        if self.is_dimensional() {
            None
        } else {
            self.0.parse().ok()
        }
    }
}

impl fmt::Display for CombinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CombinationId {
    type Err = CombinationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CombinationId {
    type Error = CombinationParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CombinationId> for String {
    fn from(value: CombinationId) -> Self {
        value.0
    }
}

/// One enumerable form: its id and display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombinedForm {
    pub id: CombinationId,
    pub label: String,
}
