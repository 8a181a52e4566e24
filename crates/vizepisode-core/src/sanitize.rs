//! Identifier helpers shared by every graph builder.
//!
//! All identifiers in an episode graph are derived from display text through [`keyify`]. The
//! mapping is lossy: `"Dr. Who"` and `"Dr Who"` both become `Dr_Who`, and the two are then the
//! same graph element. Collisions are not detected.

/// Converts display text into a graph identifier: drops `.` and turns spaces into `_`.
pub fn keyify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        match ch {
            '.' => {}
            ' ' => out.push('_'),
            _ => out.push(ch),
        }
    }
    out
}

/// Key of the `index`-th scene in the epoch keyed `epoch_key`.
pub fn scene_key(epoch_key: &str, index: usize) -> String {
    format!("{epoch_key}_{index}")
}

/// Node identifier of one character appearing in one scene.
///
/// Both the character arcs and the scene clusters reference appearances through this function, so
/// the renderer sees a single shared node.
pub fn appearance_key(character: &str, epoch_key: &str, index: usize) -> String {
    format!("{}_{}", keyify(character), scene_key(epoch_key, index))
}

/// Graphviz only draws a subgraph as a box when its name starts with `cluster`.
pub fn cluster_name(key: &str) -> String {
    format!("cluster_{key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyify_drops_dots_and_replaces_spaces() {
        assert_eq!(keyify("Mr. T"), "Mr_T");
        assert_eq!(keyify("St. John's Wood"), "St_John's_Wood");
        assert_eq!(keyify("a\tb"), "a\tb");
        assert_eq!(keyify(""), "");
    }

    #[test]
    fn keyify_is_idempotent() {
        for s in ["Mr. T", "  lead  ", "...", "Zoë O. Brien", "a_b c.d"] {
            let once = keyify(s);
            assert_eq!(keyify(&once), once, "input: {s:?}");
        }
    }

    #[test]
    fn keyify_collisions_are_accepted() {
        assert_eq!(keyify("Dr. Who"), keyify("Dr Who"));
    }

    #[test]
    fn appearance_key_joins_character_epoch_and_index() {
        assert_eq!(appearance_key("Mary Ann", "Day_1", 3), "Mary_Ann_Day_1_3");
        assert_eq!(cluster_name(&scene_key("Day_1", 0)), "cluster_Day_1_0");
    }
}
