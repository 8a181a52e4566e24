use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Read-only lookup from raw character identifiers to display names.
///
/// When a table is supplied, every character referenced by an episode must be listed; a miss is
/// reported as [`Error::UnknownCharacter`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterMap(IndexMap<String, String>);

impl CharacterMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        // A comment-only document parses as `null`.
        let table: Option<IndexMap<String, String>> =
            serde_yaml::from_str(text).map_err(|e| Error::InvalidCharacterTable {
                message: e.to_string(),
            })?;
        Ok(Self(table.unwrap_or_default()))
    }

    pub fn insert(&mut self, raw: impl Into<String>, display: impl Into<String>) {
        self.0.insert(raw.into(), display.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn display_name(&self, raw: &str) -> Result<&str> {
        self.0
            .get(raw)
            .map(String::as_str)
            .ok_or_else(|| Error::UnknownCharacter {
                name: raw.to_string(),
            })
    }
}

impl FromIterator<(String, String)> for CharacterMap {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Resolves the name shown for a character, falling back to the raw name when no table is set.
pub fn resolve_display_name<'a>(table: Option<&'a CharacterMap>, raw: &'a str) -> Result<&'a str> {
    match table {
        Some(table) => table.display_name(raw),
        None => Ok(raw),
    }
}
