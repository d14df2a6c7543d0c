//! OMR to MEI WASM API
//!
//! This module provides the JavaScript-facing API for the converter.
//!
//! # Module Structure
//!
//! - `helpers`: Console logging macros and serde conversion helpers
//! - `convert`: Exported conversion, name parsing and pitch functions

pub mod helpers;
pub mod convert;

pub use convert::{convert_omr_to_mei, convert_omr_to_mei_with_diagnostics, parse_neume_name, relative_pitch};
