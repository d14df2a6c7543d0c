//! Renderers module
//!
//! This module contains export logic for writing converted staves
//! into document formats.

pub mod mei;

// Re-export commonly used types
pub use mei::{emit_mei, MEI_NAMESPACE};
