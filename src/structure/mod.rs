//! Staff structure
//!
//! Derives syllable groups from the horizontal layout of neume glyphs on a
//! staff. Stateless: each call looks only at the glyphs it is given.

pub mod syllables;

// Re-exports for convenience
pub use syllables::{group, NeumeGrouper, SyllableGroup};
