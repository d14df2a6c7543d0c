//! Intermediate Representation (IR) Module
//!
//! A format-agnostic representation of converted staves, sitting between
//! the OMR glyph records and the MEI emitter.
//!
//! # Architecture
//!
//! ```text
//! Staff (OMR glyphs)
//!     ↓
//! StaffConverter (grouping + expansion)
//!     ↓
//! IR Types (ConvertedStaff, Syllable, Neume)
//!     ↓
//! MEI emitter
//! ```
//!
//! # Modules
//!
//! - **types**: IR type definitions
//! - **expand**: neume descriptor to component expansion
//! - **builder**: per-staff conversion and error policy
//!
//! # Usage
//!
//! ```rust,ignore
//! use omr_mei::config::ConversionConfig;
//! use omr_mei::ir::StaffConverter;
//!
//! let converter = StaffConverter::new(&ConversionConfig::default())?;
//! let converted = converter.convert_staves(&staves)?;
//! let mei = emit_mei(&converted, MeiVersion::V4)?;
//! ```

pub mod types;
pub mod expand;
pub mod builder;

pub use types::{ConvertedStaff, Neume, StaffItem, Syllable, Zone};

pub use expand::NeumeComponentExpander;

pub use builder::{collect_diagnostics, StaffConverter};
