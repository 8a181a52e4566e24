#![forbid(unsafe_code)]

//! `vizepisode` turns episode YAML (epochs -> scenes -> characters) into Graphviz DOT.
//!
//! The generated graph shows the epoch timeline, scene clusters, and one colored path per
//! character. Layout and image output are left to Graphviz.
//!
//! # Features
//!
//! - `render`: run the Graphviz `dot` program to produce SVG/PNG/PDF (`vizepisode::render`)

use std::path::{Path, PathBuf};

pub use vizepisode_core::*;
pub use vizepisode_dot::{AssembleOptions, CharacterArc, CharacterArcs, GraphDocument, Palette};

#[cfg(feature = "render")]
pub mod render;

#[derive(Debug, thiserror::Error)]
pub enum VizError {
    #[error(transparent)]
    Episode(#[from] vizepisode_core::Error),
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[cfg(feature = "render")]
    #[error(transparent)]
    Render(#[from] render::RenderError),
}

pub type VizResult<T> = std::result::Result<T, VizError>;

/// Reads a file, tagging I/O failures with the path.
pub fn read_file(path: &Path) -> VizResult<String> {
    std::fs::read_to_string(path).map_err(|source| VizError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a file in one scoped open/write/close, tagging I/O failures with the path.
pub fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> VizResult<()> {
    std::fs::write(path, contents).map_err(|source| VizError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// `season_1.yml` -> `season_1.dot`.
pub fn dot_out_path(input: &Path) -> PathBuf {
    input.with_extension("dot")
}

/// Bundles assembly options and the optional character table for translating many episodes.
#[derive(Debug, Clone, Default)]
pub struct Visualizer {
    pub options: AssembleOptions,
    pub characters: Option<CharacterMap>,
}

impl Visualizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: AssembleOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_characters(mut self, characters: Option<CharacterMap>) -> Self {
        self.characters = characters;
        self
    }

    /// Loads the character table from `path`.
    pub fn with_character_file(self, path: &Path) -> VizResult<Self> {
        let table = CharacterMap::from_yaml_str(&read_file(path)?)?;
        tracing::debug!(path = %path.display(), entries = table.len(), "loaded character file");
        Ok(self.with_characters(Some(table)))
    }

    pub fn assemble(&self, episode: &Episode) -> Result<GraphDocument> {
        vizepisode_dot::assemble(episode, self.characters.as_ref(), &self.options)
    }

    /// Parses episode YAML and returns the DOT text.
    pub fn translate_str(&self, text: &str) -> Result<String> {
        let episode = Episode::from_yaml_str(text)?;
        Ok(self.assemble(&episode)?.to_dot())
    }

    /// Translates `input` and writes the DOT text next to it, returning the output path.
    pub fn translate_file(&self, input: &Path) -> VizResult<PathBuf> {
        let dot = self.translate_str(&read_file(input)?)?;
        let out = dot_out_path(input);
        write_file(&out, dot)?;
        tracing::info!(input = %input.display(), out = %out.display(), "wrote DOT");
        Ok(out)
    }
}
