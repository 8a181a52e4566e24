use crate::sanitize::keyify;
use crate::{Error, Result};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub title: String,
    #[serde(default)]
    pub scenes: Vec<Epoch>,
}

impl Episode {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| Error::InvalidEpisode {
            message: e.to_string(),
        })
    }

    /// Iterates `(epoch_key, scenes)` pairs in document order, flattening epochs that carry more
    /// than one name.
    pub fn epochs(&self) -> impl Iterator<Item = (String, &[Scene])> + '_ {
        self.scenes.iter().flat_map(Epoch::keyed)
    }
}

/// A single `- <name>: [scenes]` entry of the `scenes` list.
///
/// Insertion order of the names is significant: it is the timeline order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Epoch(pub IndexMap<String, Vec<Scene>>);

impl Epoch {
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }

    pub fn keyed(&self) -> impl Iterator<Item = (String, &[Scene])> + '_ {
        self.0
            .iter()
            .map(|(name, scenes)| (keyify(name), scenes.as_slice()))
    }

    /// Key used to chain this epoch on the timeline: the last name wins.
    pub fn chain_key(&self) -> Option<String> {
        self.0.last().map(|(name, _)| keyify(name))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub location: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters: Option<IndexSet<String>>,
}

impl Scene {
    pub fn characters(&self) -> impl Iterator<Item = &str> + '_ {
        self.characters.iter().flatten().map(String::as_str)
    }

    pub fn heading(&self) -> String {
        format!("{}: {}", self.location, self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epochs_flatten_multiple_names_in_order() {
        let episode = Episode::from_yaml_str(
            r#"
title: Pilot
scenes:
  - Day 1.:
      - location: Dock
        title: Arrival
    Day 2:
      - location: Dock
        title: Departure
  - Night:
      - location: Bar
        title: Drinks
"#,
        )
        .unwrap();

        let keys: Vec<String> = episode.epochs().map(|(k, _)| k).collect();
        assert_eq!(keys, ["Day_1", "Day_2", "Night"]);
        assert_eq!(episode.scenes[0].chain_key().as_deref(), Some("Day_2"));
        assert_eq!(Epoch::default().chain_key(), None);
    }

    #[test]
    fn duplicate_characters_in_a_scene_collapse() {
        let episode = Episode::from_yaml_str(
            r#"
title: Pilot
scenes:
  - Morning:
      - location: Kitchen
        title: Breakfast
        characters: [Bob, Alice, Bob]
"#,
        )
        .unwrap();
        let scene = &episode.scenes[0].0["Morning"][0];
        assert_eq!(scene.characters().collect::<Vec<_>>(), ["Bob", "Alice"]);
    }

    #[test]
    fn null_or_missing_characters_are_empty() {
        let episode = Episode::from_yaml_str(
            r#"
title: Pilot
scenes:
  - Morning:
      - location: Kitchen
        title: Breakfast
      - location: Porch
        title: Coffee
        characters: ~
"#,
        )
        .unwrap();
        for scene in &episode.scenes[0].0["Morning"] {
            assert_eq!(scene.characters().count(), 0);
        }
    }

    #[test]
    fn missing_location_is_rejected() {
        let err = Episode::from_yaml_str(
            r#"
title: Pilot
scenes:
  - Morning:
      - title: Breakfast
"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidEpisode { .. }), "{err}");
    }
}
