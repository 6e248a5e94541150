use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::record::RawObservation;

/// Lowercase and drop every non-alphanumeric character, so that
/// `"Modal Price (Rs./Quintal)"`, `"modal_price_rs_quintal"` and a BOM-prefixed header agree.
pub fn canonicalize_key(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Canonical field name → ordered source column names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldAliases {
    entries: BTreeMap<String, Vec<String>>,
}

impl FieldAliases {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, canonical: &str, aliases: &[&str]) -> Self {
        self.insert(canonical, aliases.iter().map(|a| a.to_string()).collect());
        self
    }

    pub fn insert(&mut self, canonical: impl Into<String>, aliases: Vec<String>) {
        self.entries.insert(canonical.into(), aliases);
    }

    /// Merge `other` into `self`. Aliases from `other` are tried first; duplicates are dropped.
    pub fn merge_preferred(&mut self, other: &FieldAliases) {
        for (canonical, preferred) in &other.entries {
            let existing = self.entries.remove(canonical).unwrap_or_default();
            let mut merged: Vec<String> = preferred.clone();
            for alias in existing {
                if !merged
                    .iter()
                    .any(|m| canonicalize_key(m) == canonicalize_key(&alias))
                {
                    merged.push(alias);
                }
            }
            self.entries.insert(canonical.clone(), merged);
        }
    }

    /// Source names tried for `canonical`, in order. Unknown fields are looked up by their own name.
    pub fn aliases_for<'a>(&'a self, canonical: &'a str) -> Vec<&'a str> {
        match self.entries.get(canonical) {
            Some(aliases) if !aliases.is_empty() => aliases.iter().map(String::as_str).collect(),
            _ => vec![canonical],
        }
    }

    /// First present value for `canonical`: not null and not an empty string.
    pub fn lookup<'r>(&self, row: &RowIndex<'r>, canonical: &str) -> Option<&'r Value> {
        self.aliases_for(canonical)
            .into_iter()
            .find_map(|alias| row.present(alias))
    }
}

/// Raw row keyed by canonicalized column name. When two columns canonicalize to the same key,
/// the first in row order wins.
pub struct RowIndex<'r> {
    keys: HashMap<String, &'r Value>,
}

impl<'r> RowIndex<'r> {
    pub fn new(row: &'r RawObservation) -> Self {
        let mut keys = HashMap::with_capacity(row.len());
        for (name, value) in row {
            keys.entry(canonicalize_key(name)).or_insert(value);
        }
        Self { keys }
    }

    pub fn present(&self, alias: &str) -> Option<&'r Value> {
        let value = *self.keys.get(&canonicalize_key(alias))?;
        match value {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            _ => Some(value),
        }
    }
}
