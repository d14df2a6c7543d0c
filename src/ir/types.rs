//! IR types handed from the conversion pipeline to document emitters

use serde::{Deserialize, Serialize};

use crate::diagnostics::DiagnosticMark;
use crate::models::component::{FacsimileRef, NeumeComponent};
use crate::models::glyph::BoundingBox;
use crate::models::pitch::{Note, Pitch};

/// Components expanded from one neume glyph
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Neume {
    /// Index of the source glyph within its staff
    pub glyph_index: usize,
    /// Dotted glyph name the components were read from
    pub name: String,
    pub components: Vec<NeumeComponent>,
}

/// Neumes of one syllable group, left to right
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Syllable {
    pub neumes: Vec<Neume>,
}

impl Syllable {
    /// All components of the syllable in order
    pub fn components(&self) -> impl Iterator<Item = &NeumeComponent> {
        self.neumes.iter().flat_map(|n| n.components.iter())
    }
}

/// One element of a staff's layer, in horizontal order
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "type")]
pub enum StaffItem {
    Clef {
        glyph_index: usize,
        shape: Note,
    },
    Custos {
        glyph_index: usize,
        pitch: Option<Pitch>,
    },
    Division {
        glyph_index: usize,
        form: Option<String>,
    },
    Syllable(Syllable),
}

/// Image region registered for a glyph that produced output
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub facsimile: FacsimileRef,
    pub bounding_box: BoundingBox,
}

impl Zone {
    pub fn id(&self) -> String {
        self.facsimile.zone_id()
    }
}

/// Result of converting one staff
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedStaff {
    /// Zero-based staff index
    pub index: usize,
    pub clef_letter: Option<Note>,
    pub items: Vec<StaffItem>,
    pub zones: Vec<Zone>,
    #[serde(skip)]
    pub diagnostics: Vec<DiagnosticMark>,
}

impl ConvertedStaff {
    pub fn syllables(&self) -> impl Iterator<Item = &Syllable> {
        self.items.iter().filter_map(|item| match item {
            StaffItem::Syllable(syllable) => Some(syllable),
            _ => None,
        })
    }
}
