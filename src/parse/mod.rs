//! Parsing module for symbolic glyph names
//!
//! Turns OMR class names such as `neume.torculus.2.3` into structured
//! `NeumeDescriptor` values.

pub mod neume_name;

// Re-export commonly used types
pub use neume_name::{NeumeNameParser, VariantToken, MAX_REPEAT, NEUME_DOMAIN};
