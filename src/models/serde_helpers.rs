//! Serde helpers for the loosely typed OMR record fields
//!
//! The pitch finder writes numbers as either JSON numbers or strings, and
//! leaves fields empty on glyphs it could not place.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Int(i64),
    Float(f64),
    Str(String),
}

/// Accept `4`, `4.0`, `"4"`, `""` or `null`; empty values become `None`
pub fn deserialize_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Int(n)) => Ok(Some(n)),
        Some(NumberOrString::Float(f)) if f.fract() == 0.0 => Ok(Some(f as i64)),
        Some(NumberOrString::Float(f)) => Err(serde::de::Error::custom(format!("expected an integer, got {}", f))),
        Some(NumberOrString::Str(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrString::Str(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("expected an integer, got '{}'", s))),
    }
}

/// Accept an optional string, mapping `""` to `None`
pub fn deserialize_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
