#![forbid(unsafe_code)]

//! Translates an [`Episode`](vizepisode_core::Episode) into a Graphviz DOT document.
//!
//! The document overlays three structures on the same nodes:
//! - an invisible `timeline` chain keeping epochs in document order
//! - one colored path per character (its arc)
//! - epoch clusters nesting one labeled cluster per scene
//!
//! Layout is left to Graphviz; this crate only emits structure.

pub mod arcs;
pub mod assemble;
pub mod clusters;
pub mod graph;
pub mod options;
pub mod timeline;
pub mod writer;

pub use arcs::{CharacterArc, CharacterArcs};
pub use assemble::{GraphDocument, assemble};
pub use graph::{AttrTarget, Graph, Stmt};
pub use options::{AssembleOptions, Palette};
