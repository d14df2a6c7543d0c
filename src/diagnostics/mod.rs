//! Conversion diagnostics
//!
//! Glyphs the lenient pipeline could not convert are skipped and reported
//! here, keyed by staff and glyph position, so a correction UI can highlight
//! them on the facsimile.

use serde::{Deserialize, Serialize};

/// A skipped glyph
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticMark {
    /// Zero-based staff index
    pub staff: usize,
    /// Glyph index within the staff
    pub glyph: usize,
    /// Kind identifier (e.g., "unreadable_name", "missing_pitch")
    pub kind: String,
    /// Human-readable message
    pub message: String,
}

impl DiagnosticMark {
    pub fn new(
        staff: usize,
        glyph: usize,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            staff,
            glyph,
            kind: kind.into(),
            message: message.into(),
        }
    }
}

/// Collection of diagnostic marks for a conversion run
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Diagnostics {
    pub marks: Vec<DiagnosticMark>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self { marks: Vec::new() }
    }

    pub fn add(&mut self, mark: DiagnosticMark) {
        self.marks.push(mark);
    }

    pub fn extend(&mut self, marks: impl IntoIterator<Item = DiagnosticMark>) {
        self.marks.extend(marks);
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_mark_creation() {
        let mark = DiagnosticMark::new(1, 5, "unreadable_name", "Unrecognized neume shape 'flexa'");

        assert_eq!(mark.staff, 1);
        assert_eq!(mark.glyph, 5);
        assert_eq!(mark.kind, "unreadable_name");
    }

    #[test]
    fn test_diagnostics_collect_marks() {
        let mut diags = Diagnostics::new();
        assert!(diags.is_empty());

        diags.add(DiagnosticMark::new(0, 0, "missing_pitch", "no pitch"));
        diags.extend(vec![DiagnosticMark::new(0, 1, "unreadable_name", "bad name")]);
        assert_eq!(diags.len(), 2);
        assert_eq!(diags.marks[1].glyph, 1);
    }
}
