//! OMR to MEI WASM Module
//!
//! Turns the glyph classifications of an optical music recognition pass
//! over square-notation chant into MEI neume notation: symbolic glyph names
//! become pitched neume components, and glyphs are grouped into syllables
//! by horizontal proximity.

pub mod models;
pub mod errors;
pub mod config;
pub mod diagnostics;
pub mod parse;
pub mod transposition;
pub mod structure;
pub mod ir;
pub mod converters;
pub mod renderers;
pub mod api;

// Re-export commonly used types
pub use config::{ConversionConfig, MeiVersion};
pub use converters::{convert_omr_to_mei, load_omr_json, MeiConversion};
pub use errors::{ConversionError, InvalidThresholdError, NeumeNameError};
pub use ir::{ConvertedStaff, NeumeComponentExpander, StaffConverter};
pub use models::{Direction, Glyph, NeumeComponent, NeumeDescriptor, Note, Pitch, Staff};
pub use parse::NeumeNameParser;
pub use renderers::emit_mei;
pub use structure::{NeumeGrouper, SyllableGroup};
pub use transposition::{PitchCalculator, ScaleFrame};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    {
        if console_log::init_with_level(log::Level::Debug).is_err() {
            web_sys::console::warn_1(&JsValue::from_str("logger already initialized"));
        }
    }

    log::info!("OMR to MEI WASM module initialized");
}
