//! Conversion operations for the WASM API
//!
//! - OMR JSON to MEI, with or without the skipped-glyph report
//! - neume name parsing, for correction tools that preview a class name
//! - single relative pitch steps

use wasm_bindgen::prelude::*;

use crate::api::helpers::{deserialize_optional, serialize, to_js_error};
use crate::config::ConversionConfig;
use crate::converters::convert_omr_to_mei as convert;
use crate::models::pitch::{Direction, Note, Pitch};
use crate::parse::NeumeNameParser;
use crate::transposition::{PitchCalculator, ScaleFrame};
use crate::{wasm_error, wasm_info, wasm_log, wasm_warn};

// ============================================================================
// OMR to MEI
// ============================================================================

/// Convert OMR JSON records to an MEI document
///
/// # Parameters
/// * `json` - Array of glyph records from the pitch finder
/// * `config` - Optional `ConversionConfig` object (camelCase keys)
///
/// # Returns
/// MEI document string
#[wasm_bindgen(js_name = convertOmrToMei)]
pub fn convert_omr_to_mei(json: &str, config: JsValue) -> Result<String, JsValue> {
    wasm_info!("convertOmrToMei called ({} bytes)", json.len());

    let config: Option<ConversionConfig> = deserialize_optional(config, "Invalid conversion config")?;
    let result = convert(json, config).map_err(|e| {
        wasm_error!("OMR conversion error: {}", e);
        JsValue::from_str(&format!("OMR conversion error: {}", e))
    })?;

    for mark in &result.diagnostics.marks {
        wasm_warn!("Skipped glyph {} on staff {}: {}", mark.glyph + 1, mark.staff + 1, mark.message);
    }
    wasm_info!("  MEI generated: {} bytes", result.mei.len());

    Ok(result.mei)
}

/// Convert OMR JSON records and return `{ mei, diagnostics }`
#[wasm_bindgen(js_name = convertOmrToMeiWithDiagnostics)]
pub fn convert_omr_to_mei_with_diagnostics(json: &str, config: JsValue) -> Result<JsValue, JsValue> {
    wasm_log!("convertOmrToMeiWithDiagnostics called ({} bytes)", json.len());
    let config: Option<ConversionConfig> = deserialize_optional(config, "Invalid conversion config")?;
    let result = convert(json, config).map_err(|e| to_js_error("OMR conversion error", e))?;
    wasm_log!("  {} glyph(s) skipped", result.diagnostics.len());
    serialize(&result, "Failed to serialize conversion result")
}

// ============================================================================
// Neume names and pitches
// ============================================================================

/// Parse a dotted neume class name into its descriptor
#[wasm_bindgen(js_name = parseNeumeName)]
pub fn parse_neume_name(name: &str) -> Result<JsValue, JsValue> {
    wasm_log!("parseNeumeName: {}", name);
    let descriptor = NeumeNameParser::parse_name(name).map_err(|e| to_js_error("Invalid neume name", e))?;
    serialize(&descriptor, "Failed to serialize neume descriptor")
}

/// Pitch reached by moving `interval` scale steps from `note`/`octave`
///
/// # Parameters
/// * `direction` - `"u"`, `"d"` or `"s"`
/// * `clef_relative` - rotate the scale to start at `clef`
#[wasm_bindgen(js_name = relativePitch)]
pub fn relative_pitch(
    note: &str,
    octave: i32,
    clef: &str,
    direction: &str,
    interval: u32,
    clef_relative: bool,
) -> Result<JsValue, JsValue> {
    let start = Pitch::new(parse_letter(note, "note")?, i64::from(octave));
    let clef_letter = parse_letter(clef, "clef")?;
    let direction = single_char(direction)
        .and_then(Direction::from_code)
        .ok_or_else(|| to_js_error("Invalid direction", direction))?;

    let frame = if clef_relative {
        ScaleFrame::ClefRelative
    } else {
        ScaleFrame::Absolute
    };
    let pitch = PitchCalculator::new(frame).relative_pitch(start, clef_letter, direction, interval);
    serialize(&pitch, "Failed to serialize pitch")
}

fn parse_letter(value: &str, what: &str) -> Result<Note, JsValue> {
    single_char(value)
        .and_then(Note::from_letter)
        .ok_or_else(|| to_js_error(&format!("Invalid {}", what), value))
}

fn single_char(value: &str) -> Option<char> {
    let mut chars = value.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
