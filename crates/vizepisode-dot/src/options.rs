use vizepisode_core::text::LABEL_WRAP_WIDTH;

/// A Graphviz color scheme used for character arcs.
///
/// Colors inside a Brewer scheme are addressed by 1-based index; arcs cycle through the first
/// `size` entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub scheme: String,
    pub size: usize,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            scheme: "dark28".to_string(),
            size: 8,
        }
    }
}

impl Palette {
    /// Palette slot of the `ordinal`-th character (0-based).
    pub fn color_index(&self, ordinal: usize) -> usize {
        ordinal % self.size.max(1)
    }

    /// Graphviz `color` attribute value for a palette slot.
    pub fn color_attr(&self, color_index: usize) -> String {
        (color_index + 1).to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembleOptions {
    pub wrap_width: usize,
    pub palette: Palette,
    pub node_width: String,
    pub node_height: String,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            wrap_width: LABEL_WRAP_WIDTH,
            palette: Palette::default(),
            node_width: "0.3".to_string(),
            node_height: "0.3".to_string(),
        }
    }
}
