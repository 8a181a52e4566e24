use crate::graph::{AttrTarget, Graph};
use crate::options::Palette;
use indexmap::IndexMap;
use vizepisode_core::sanitize::appearance_key;
use vizepisode_core::{CharacterMap, Episode, Result, resolve_display_name};

pub const CHARACTER_STYLES_COMMENT: &str = "Styles for Character Nodes";

/// Appearance identifiers per character, keyed by raw character name.
///
/// Characters are ordered by first appearance; each list is in scene order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterArcs(IndexMap<String, Vec<String>>);

impl CharacterArcs {
    pub fn collect(episode: &Episode) -> Self {
        let mut arcs: IndexMap<String, Vec<String>> = IndexMap::new();
        for (epoch_key, scenes) in episode.epochs() {
            for (index, scene) in scenes.iter().enumerate() {
                for character in scene.characters() {
                    arcs.entry(character.to_string())
                        .or_default()
                        .push(appearance_key(character, &epoch_key, index));
                }
            }
        }
        Self(arcs)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, character: &str) -> Option<&[String]> {
        self.0.get(character).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.0
            .iter()
            .map(|(name, keys)| (name.as_str(), keys.as_slice()))
    }
}

/// One character's path through the episode, with its resolved display name and palette slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterArc {
    pub name: String,
    pub display_name: String,
    pub color_index: usize,
    pub appearances: Vec<String>,
}

impl CharacterArc {
    /// Arc subgraph: defaults carry the color and label, then one node per appearance and an
    /// edge between each consecutive pair.
    pub fn to_subgraph(&self, palette: &Palette) -> Graph {
        let color = palette.color_attr(self.color_index);
        let mut graph = Graph::new();
        graph.defaults(
            AttrTarget::Node,
            &[
                ("color", color.as_str()),
                ("label", self.display_name.as_str()),
            ],
        );
        graph.defaults(AttrTarget::Edge, &[("color", color.as_str())]);

        for key in &self.appearances {
            graph.node(key.as_str());
        }
        for pair in self.appearances.windows(2) {
            graph.edge(pair[0].as_str(), pair[1].as_str());
        }
        graph
    }
}

/// Assigns palette slots in first-appearance order and resolves display names.
///
/// With a character table supplied, a character missing from it fails the whole episode.
pub fn plan_character_arcs(
    arcs: &CharacterArcs,
    table: Option<&CharacterMap>,
    palette: &Palette,
) -> Result<Vec<CharacterArc>> {
    arcs.iter()
        .enumerate()
        .map(|(ordinal, (name, appearances))| {
            Ok(CharacterArc {
                name: name.to_string(),
                display_name: resolve_display_name(table, name)?.to_string(),
                color_index: palette.color_index(ordinal),
                appearances: appearances.to_vec(),
            })
        })
        .collect()
}

/// Groups every arc subgraph under one anonymous subgraph carrying the shared node/edge style.
pub fn build_character_definitions(arcs: &[CharacterArc], palette: &Palette) -> Graph {
    let mut definitions = Graph::new().with_comment(CHARACTER_STYLES_COMMENT);
    definitions.defaults(
        AttrTarget::Node,
        &[
            ("colorscheme", palette.scheme.as_str()),
            ("shape", "box"),
            ("style", "rounded"),
        ],
    );
    definitions.defaults(
        AttrTarget::Edge,
        &[("colorscheme", palette.scheme.as_str())],
    );
    for arc in arcs {
        definitions.subgraph(arc.to_subgraph(palette));
    }
    definitions
}
