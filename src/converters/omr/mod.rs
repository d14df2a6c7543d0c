//! OMR JSON to MEI converter module
//!
//! Reads the pitch finder's flat record list and splits it into staves of
//! horizontally ordered glyphs, ready for the staff converter.
//!
//! # Overview
//!
//! The converter follows a three-stage pipeline:
//! 1. **Load**: parse the JSON records into `Staff` values
//! 2. **Convert**: group and expand each staff (`crate::ir::StaffConverter`)
//! 3. **Generate**: write the MEI document
//!
//! # Basic Usage
//!
//! ```ignore
//! use omr_mei::converters::convert_omr_to_mei;
//!
//! let result = convert_omr_to_mei(json, None)?;
//! println!("{}", result.mei);
//! ```

pub mod records;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::ConversionConfig;
use crate::diagnostics::Diagnostics;
use crate::errors::{ConversionError, Result};
use crate::ir::{collect_diagnostics, StaffConverter};
use crate::renderers::emit_mei;
use crate::models::glyph::{BoundingBox, Glyph, GlyphKind, GlyphName, Staff};
use crate::models::pitch::{Note, Pitch};

pub use records::{BoundingBoxRecord, GlyphRecord, OmrRecord, PitchRecord};

/// MEI document plus the glyphs that were skipped on the way
#[derive(Serialize, Debug, Clone)]
pub struct MeiConversion {
    pub mei: String,
    pub diagnostics: Diagnostics,
}

/// Convert OMR JSON records to an MEI document
///
/// Uses the default configuration when `config` is `None`.
pub fn convert_omr_to_mei(json: &str, config: Option<ConversionConfig>) -> Result<MeiConversion> {
    let config = config.unwrap_or_default();
    config.validate()?;

    let staves = load_omr_json(json)?;
    let converted = StaffConverter::new(&config)?.convert_staves(&staves)?;
    let diagnostics = collect_diagnostics(&converted);
    if !diagnostics.is_empty() {
        log::warn!("{} glyph(s) skipped during conversion", diagnostics.len());
    }

    let mei = emit_mei(&converted, config.target_format_version)?;
    Ok(MeiConversion { mei, diagnostics })
}

/// Parse OMR JSON into staves ordered by staff number
pub fn load_omr_json(json: &str) -> Result<Vec<Staff>> {
    let records: Vec<OmrRecord> = serde_json::from_str(json)?;
    let staves = staves_from_records(&records)?;
    log::debug!("Loaded {} records into {} staves", records.len(), staves.len());
    Ok(staves)
}

pub fn staves_from_records(records: &[OmrRecord]) -> Result<Vec<Staff>> {
    let mut by_staff: BTreeMap<usize, Vec<&OmrRecord>> = BTreeMap::new();
    for record in records {
        by_staff.entry(staff_index(record)?).or_default().push(record);
    }

    by_staff
        .into_iter()
        .map(|(index, mut records)| {
            // Stable: glyphs sharing a left edge keep record order
            records.sort_by_key(|r| r.glyph.bounding_box.ulx);
            build_staff(index, &records)
        })
        .collect()
}

fn build_staff(index: usize, records: &[&OmrRecord]) -> Result<Staff> {
    let default_clef = records
        .iter()
        .find_map(|r| clef_glyph_letter(&r.glyph.name))
        .unwrap_or(Note::C);

    let mut clef_in_force = default_clef;
    let mut glyphs = Vec::with_capacity(records.len());

    for record in records {
        if let Some(letter) = clef_glyph_letter(&record.glyph.name) {
            clef_in_force = letter;
        }
        let clef_letter = match record.pitch.clef.as_deref() {
            Some(clef) => parse_clef(clef)?,
            None => clef_in_force,
        };

        glyphs.push(Glyph::new(
            &record.glyph.name,
            pitch_of(record)?,
            clef_letter,
            index,
            bounding_box_of(record)?,
        ));
    }

    Ok(Staff::new(index, glyphs))
}

/// Rejects negative extents and boxes whose far edges leave the `i32` range
fn bounding_box_of(record: &OmrRecord) -> Result<BoundingBox> {
    let b = record.glyph.bounding_box;
    let fits = b.ncols >= 0
        && b.nrows >= 0
        && b.ulx.checked_add(b.ncols).is_some()
        && b.uly.checked_add(b.nrows).is_some();
    if !fits {
        return Err(ConversionError::Record(format!(
            "glyph '{}' has invalid bounding box (ulx {}, uly {}, ncols {}, nrows {})",
            record.glyph.name, b.ulx, b.uly, b.ncols, b.nrows
        )));
    }
    Ok(BoundingBox::new(b.ulx, b.uly, b.ncols, b.nrows))
}

fn staff_index(record: &OmrRecord) -> Result<usize> {
    match record.pitch.staff {
        Some(n) if n >= 1 => Ok((n - 1) as usize),
        Some(n) => Err(ConversionError::Record(format!(
            "glyph '{}' has staff number {}, expected 1 or more",
            record.glyph.name, n
        ))),
        None => Err(ConversionError::Record(format!("glyph '{}' has no staff number", record.glyph.name))),
    }
}

fn pitch_of(record: &OmrRecord) -> Result<Option<Pitch>> {
    let (Some(note), Some(octave)) = (record.pitch.note.as_deref(), record.pitch.octave) else {
        return Ok(None);
    };
    let note = parse_note(note).ok_or_else(|| {
        ConversionError::Record(format!("glyph '{}' has invalid note '{}'", record.glyph.name, note))
    })?;
    Ok(Some(Pitch::new(note, octave)))
}

fn parse_note(note: &str) -> Option<Note> {
    let mut chars = note.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Note::from_letter(c),
        _ => None,
    }
}

/// Accepts `clef.c` or a bare `c`
fn parse_clef(clef: &str) -> Result<Note> {
    let letter = clef.trim().rsplit('.').next().unwrap_or_default();
    parse_note(letter).ok_or_else(|| ConversionError::Record(format!("invalid clef '{}'", clef)))
}

fn clef_glyph_letter(name: &str) -> Option<Note> {
    let name = GlyphName::parse(name);
    if name.kind() != GlyphKind::Clef {
        return None;
    }
    name.shape_token().and_then(parse_note)
}
