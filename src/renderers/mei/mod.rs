//! MEI export module
//!
//! Provides MEI 4.0.0 / 5.0 neume-notation export for converted staves.
//!
//! # Module Structure
//!
//! - **builder**: indented XML element writer over `quick_xml`
//! - **emitter**: MEI document emitter (consumes IR from `crate::ir`)

pub mod builder;
pub mod emitter;

pub use builder::{MeiBuilder, MEI_NAMESPACE};
pub use emitter::emit_mei;
