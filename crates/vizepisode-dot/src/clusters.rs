use crate::graph::Graph;
use vizepisode_core::Episode;
use vizepisode_core::sanitize::{appearance_key, cluster_name, scene_key};
use vizepisode_core::text::wrap;

/// Builds one `cluster_<epoch>` per epoch name, each holding its anchor node and one labeled
/// `cluster_<epoch>_<i>` per scene.
///
/// Scene clusters list the same appearance identifiers the character arcs use, so Graphviz places
/// each arc node inside its scene box. Scenes without characters still get an (empty) cluster.
pub fn build_scene_clusters(episode: &Episode, wrap_width: usize) -> Vec<Graph> {
    episode
        .epochs()
        .map(|(epoch_key, scenes)| {
            let mut epoch = Graph::named(cluster_name(&epoch_key));
            epoch.node(epoch_key.as_str());

            for (index, scene) in scenes.iter().enumerate() {
                let mut cluster = Graph::named(cluster_name(&scene_key(&epoch_key, index)));
                cluster.attr("label", wrap(&scene.heading(), wrap_width));
                for character in scene.characters() {
                    cluster.node(appearance_key(character, &epoch_key, index));
                }
                epoch.subgraph(cluster);
            }
            epoch
        })
        .collect()
}
