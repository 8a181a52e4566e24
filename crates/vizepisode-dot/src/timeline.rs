use crate::graph::{AttrTarget, Graph};
use vizepisode_core::Episode;
use vizepisode_core::sanitize::keyify;

pub const TIMELINE_NAME: &str = "timeline";

/// Builds the invisible chain that pins epochs to document order.
///
/// Every epoch name is declared as an invisible node. Each epoch entry is chained through its
/// last name; an entry with no names is skipped without breaking the chain.
pub fn build_timeline(episode: &Episode) -> Graph {
    let mut timeline = Graph::named(TIMELINE_NAME);
    timeline.defaults(AttrTarget::Node, &[("label", ""), ("style", "invis")]);
    timeline.defaults(AttrTarget::Edge, &[("style", "invis")]);

    let mut last: Option<String> = None;
    for epoch in &episode.scenes {
        for name in epoch.names() {
            timeline.node(keyify(name));
        }
        let Some(key) = epoch.chain_key() else {
            continue;
        };
        if let Some(prev) = last.take() {
            timeline.edge(prev, key.clone());
        }
        last = Some(key);
    }

    timeline
}
