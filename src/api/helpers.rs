//! Shared helpers for WASM API operations
//!
//! Console logging and serde conversion shared by the exported functions.

use wasm_bindgen::prelude::*;
use web_sys::console;
use serde::de::DeserializeOwned;
use serde::Serialize;

// ============================================================================
// Logging Macros
// ============================================================================

/// Log a debug message with [WASM] prefix
#[macro_export]
macro_rules! wasm_log {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_debug(&format!($($arg)*))
    };
}

/// Log an info message with [WASM] prefix
#[macro_export]
macro_rules! wasm_info {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_info(&format!($($arg)*))
    };
}

/// Log a warning message with [WASM] ⚠️ prefix
#[macro_export]
macro_rules! wasm_warn {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_warn(&format!($($arg)*))
    };
}

/// Log an error message with [WASM] ❌ prefix
#[macro_export]
macro_rules! wasm_error {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_error(&format!($($arg)*))
    };
}

// ============================================================================
// Logging Helper Functions (called by macros)
// ============================================================================

pub fn log_debug(msg: &str) {
    console::log_1(&JsValue::from_str(&format!("[WASM] {}", msg)));
}

pub fn log_info(msg: &str) {
    console::info_1(&JsValue::from_str(&format!("[WASM] {}", msg)));
}

pub fn log_warn(msg: &str) {
    console::warn_1(&JsValue::from_str(&format!("[WASM] ⚠️ {}", msg)));
}

pub fn log_error(msg: &str) {
    console::error_1(&JsValue::from_str(&format!("[WASM] ❌ {}", msg)));
}

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(
    value: JsValue,
    error_context: &str,
) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log_error(&msg);
        JsValue::from_str(&msg)
    })
}

/// Serialize a value to JavaScript with automatic error handling
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log_error(&msg);
        JsValue::from_str(&msg)
    })
}

/// Deserialize an optional JS argument; `undefined` and `null` give `None`
pub fn deserialize_optional<T: DeserializeOwned>(
    value: JsValue,
    error_context: &str,
) -> Result<Option<T>, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    deserialize(value, error_context).map(Some)
}

// ============================================================================
// Result Conversion Helpers
// ============================================================================

/// Log a library error and convert it for JavaScript
pub fn to_js_error(context: &str, err: impl std::fmt::Display) -> JsValue {
    let msg = format!("{}: {}", context, err);
    log_error(&msg);
    JsValue::from_str(&msg)
}
