use std::collections::BTreeSet;

use tracing::warn;

use super::combination::CombinationId;
use crate::lexicon::TypeId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed suppression entry \"{entry}\": {reason}")]
pub struct SuppressionParseError {
    pub entry: String,
    pub reason: String,
}

/// Combinations hidden from form enumeration, keyed by part of speech.
///
/// Persisted as `typeId,combinationId;typeId,combinationId;...`. The type id
/// ends at the first comma, so dimensional ids such as `3,,1,2,` round-trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuppressionSet {
    entries: BTreeSet<(TypeId, CombinationId)>,
}

impl SuppressionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the persisted form. Malformed entries are skipped and returned
    /// as errors; the rest still load.
    pub fn parse(raw: &str) -> (Self, Vec<SuppressionParseError>) {
        let mut set = Self::new();
        let mut errors = Vec::new();

        for entry in raw.split(';').map(str::trim).filter(|e| !e.is_empty()) {
            match parse_entry(entry) {
                Ok(key) => {
                    set.entries.insert(key);
                }
                Err(reason) => {
                    warn!(entry, %reason, "skipping malformed suppression entry");
                    errors.push(SuppressionParseError {
                        entry: entry.to_string(),
                        reason,
                    });
                }
            }
        }
        (set, errors)
    }

    pub fn encode(&self) -> String {
        self.entries
            .iter()
            .map(|(type_id, combination)| format!("{type_id},{combination}"))
            .collect::<Vec<_>>()
            .join(";")
    }

    pub fn is_suppressed(&self, type_id: TypeId, combination: &CombinationId) -> bool {
        self.entries.contains(&(type_id, combination.clone()))
    }

    pub fn set(&mut self, type_id: TypeId, combination: &CombinationId, suppressed: bool) {
        let key = (type_id, combination.clone());
        if suppressed {
            self.entries.insert(key);
        } else {
            self.entries.remove(&key);
        }
    }

    pub(crate) fn retain(&mut self, mut keep: impl FnMut(TypeId, &CombinationId) -> bool) {
        self.entries.retain(|(t, c)| keep(*t, c));
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &CombinationId)> {
        self.entries.iter().map(|(t, c)| (*t, c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_entry(entry: &str) -> Result<(TypeId, CombinationId), String> {
    let (type_part, comb_part) = entry
        .split_once(',')
        .ok_or_else(|| "missing ',' between type id and combination".to_string())?;
    let type_id = type_part
        .trim()
        .parse::<TypeId>()
        .map_err(|e| format!("bad type id: {e}"))?;
    let combination = CombinationId::parse(comb_part).map_err(|e| e.to_string())?;
    Ok((type_id, combination))
}
