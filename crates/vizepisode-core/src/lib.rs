#![forbid(unsafe_code)]

//! Episode model + identifier helpers (headless, no Graphviz dependency).
//!
//! An episode is a YAML document listing epochs, each holding an ordered list of scenes. This
//! crate owns:
//! - the deserialized model ([`Episode`], [`Epoch`], [`Scene`]), insertion-ordered throughout
//! - the optional character display-name table ([`CharacterMap`])
//! - identifier sanitization ([`sanitize`]) and label wrapping ([`text`])

pub mod characters;
pub mod error;
pub mod model;
pub mod sanitize;
pub mod text;

pub use characters::{CharacterMap, resolve_display_name};
pub use error::{Error, Result};
pub use model::{Episode, Epoch, Scene};
