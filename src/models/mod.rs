//! Models module for neume conversion
//!
//! Data types shared by the parser, expander, grouper and MEI emitter.

pub mod pitch;
pub mod glyph;
pub mod neume;
pub mod component;
pub mod serde_helpers;

// Re-export commonly used types
pub use pitch::{Direction, Note, Pitch};
pub use glyph::{BoundingBox, Glyph, GlyphKind, GlyphName, Staff};
pub use neume::{Marker, Modifier, NeumeDescriptor, NeumeShape, PlacedMarker, Step, Style};
pub use component::{ConnectionType, Curve, FacsimileRef, NeumeComponent, Tilt};
