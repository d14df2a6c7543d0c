//! Serde shapes of the OMR pitch finder's JSON output

use serde::Deserialize;

use crate::models::serde_helpers::{deserialize_opt_i64, deserialize_opt_string};

/// One classified glyph with its pitch placement
#[derive(Deserialize, Debug, Clone)]
pub struct OmrRecord {
    pub glyph: GlyphRecord,
    #[serde(default)]
    pub pitch: PitchRecord,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GlyphRecord {
    pub name: String,
    pub bounding_box: BoundingBoxRecord,
}

/// Upper-left corner plus size, in image pixels
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct BoundingBoxRecord {
    pub ulx: i32,
    pub uly: i32,
    pub ncols: i32,
    pub nrows: i32,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct PitchRecord {
    /// One-based staff number
    #[serde(default, deserialize_with = "deserialize_opt_i64")]
    pub staff: Option<i64>,

    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub note: Option<String>,

    #[serde(default, deserialize_with = "deserialize_opt_i64")]
    pub octave: Option<i64>,

    /// `clef.c`, `clef.f` or a bare letter
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub clef: Option<String>,
}
