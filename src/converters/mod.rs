//! Format converters
//!
//! This module contains converters from external recognition formats.

pub mod omr;

// Re-export for convenience
pub use omr::{convert_omr_to_mei, load_omr_json, staves_from_records, MeiConversion, OmrRecord};
