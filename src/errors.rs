//! Error types for neume conversion
//!
//! The core (parser, grouper) only signals `NeumeNameError` and
//! `InvalidThresholdError`; the pipeline wraps them in `ConversionError`
//! together with loader, config and output failures.

use thiserror::Error;

/// Malformed or unrecognized symbolic glyph name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NeumeNameError {
    #[error("Empty glyph name")]
    Empty,

    #[error("Not a neume glyph: '{0}'")]
    NotANeume(String),

    #[error("Neume glyph name has no shape token: '{0}'")]
    MissingShape(String),

    #[error("Unrecognized neume shape '{0}'")]
    UnknownShape(String),

    /// Interval token that is not a positive integer
    #[error("Invalid interval '{0}': expected a positive integer in range")]
    InvalidInterval(String),

    /// Directed step token that is not a direction letter plus interval
    #[error("Invalid step '{0}': expected u/d/s followed by an interval")]
    InvalidStep(String),

    #[error("Shape '{shape}' needs {expected} interval(s), found {found}")]
    IntervalCount { shape: String, expected: usize, found: usize },

    #[error("'repeated' takes exactly one repeat count, found {0}")]
    RepeatCount(usize),
}

/// Grouping threshold outside its valid range
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidThresholdError {
    #[error("Maximum group size must be at least 1, got {0}")]
    MaxGroupSize(usize),

    #[error("Pixel gap fraction must be finite and non-negative, got {0}")]
    PixelGapFraction(f64),
}

/// Top-level conversion error type
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Glyph '{glyph}' on staff {staff}: {source}")]
    NeumeName {
        staff: usize,
        glyph: String,
        #[source]
        source: NeumeNameError,
    },

    #[error(transparent)]
    Threshold(#[from] InvalidThresholdError),

    #[error("Neume glyph '{glyph}' on staff {staff} has no pitch")]
    MissingPitch { staff: usize, glyph: String },

    #[error("Invalid OMR record: {0}")]
    Record(String),

    #[error("OMR JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("MEI writing failed: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("MEI output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
