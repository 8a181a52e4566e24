use crate::arcs::{CharacterArc, CharacterArcs, build_character_definitions, plan_character_arcs};
use crate::clusters::build_scene_clusters;
use crate::graph::{AttrTarget, Graph};
use crate::options::AssembleOptions;
use crate::timeline::build_timeline;
use crate::writer::write_digraph;
use vizepisode_core::{CharacterMap, Episode, Result};

/// A fully assembled episode graph.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphDocument {
    pub graph: Graph,
    /// Character arcs in palette order, as attached under the character definitions subgraph.
    pub arcs: Vec<CharacterArc>,
}

impl GraphDocument {
    pub fn to_dot(&self) -> String {
        write_digraph(&self.graph)
    }
}

/// Assembles the DOT document for one episode.
///
/// Subgraphs are attached in a fixed order: timeline, character definitions, then one cluster per
/// epoch. Each part is built from the episode independently.
pub fn assemble(
    episode: &Episode,
    characters: Option<&CharacterMap>,
    options: &AssembleOptions,
) -> Result<GraphDocument> {
    let mut root = Graph::new().with_comment(episode.title.as_str());
    root.attr("center", "1").attr("rankdir", "TB");
    root.defaults(AttrTarget::Edge, &[("dir", "none")]);
    root.defaults(
        AttrTarget::Node,
        &[
            ("width", options.node_width.as_str()),
            ("height", options.node_height.as_str()),
        ],
    );

    root.subgraph(build_timeline(episode));

    let collected = CharacterArcs::collect(episode);
    let arcs = plan_character_arcs(&collected, characters, &options.palette)?;
    root.subgraph(build_character_definitions(&arcs, &options.palette));

    let clusters = build_scene_clusters(episode, options.wrap_width);
    let cluster_count = clusters.len();
    for cluster in clusters {
        root.subgraph(cluster);
    }

    tracing::debug!(
        title = %episode.title,
        epochs = cluster_count,
        characters = arcs.len(),
        "assembled episode graph"
    );

    Ok(GraphDocument { graph: root, arcs })
}
