//! WASM build test
//!
//! This module tests that the WASM module can be built and the exported API works.

use omr_mei::api::{convert_omr_to_mei, parse_neume_name, relative_pitch};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const ONE_PUNCTUM: &str = r#"[{"glyph": {"name": "neume.punctum", "bounding_box": {"ulx": 0, "uly": 0, "ncols": 10, "nrows": 10}},
                               "pitch": {"staff": 1, "note": "c", "octave": 4, "clef": "clef.c"}}]"#;

#[wasm_bindgen_test]
fn test_convert_with_default_config() {
    let mei = convert_omr_to_mei(ONE_PUNCTUM, JsValue::UNDEFINED).expect("conversion should succeed");
    assert!(mei.contains("<nc pname=\"c\" oct=\"4\""));
}

#[wasm_bindgen_test]
fn test_convert_rejects_bad_json() {
    assert!(convert_omr_to_mei("[{", JsValue::NULL).is_err());
}

#[wasm_bindgen_test]
fn test_parse_neume_name() {
    assert!(parse_neume_name("neume.clivis.2").is_ok());
    assert!(parse_neume_name("neume.clivis").is_err());
}

#[wasm_bindgen_test]
fn test_relative_pitch() {
    assert!(relative_pitch("c", 4, "c", "u", 3, false).is_ok());
    assert!(relative_pitch("h", 4, "c", "u", 3, false).is_err());
    assert!(relative_pitch("c", 4, "c", "x", 3, false).is_err());
}
