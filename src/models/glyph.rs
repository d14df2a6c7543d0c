//! OMR glyph records
//!
//! A glyph is one classified connected component on a staff image: its
//! dot-delimited class name (`neume.clivis.2`, `clef.c`, `custos`), the pitch
//! the OMR pitch finder assigned to its first notehead, and its bounding box.

use serde::{Deserialize, Serialize};

use super::pitch::{Note, Pitch};

/// Pixel rectangle on the source image
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }
}

/// Top-level category of a glyph, taken from the first name token
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GlyphKind {
    Neume,
    Clef,
    Custos,
    Division,
    Other,
}

/// Symbolic glyph class name, split on dots
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(into = "String", from = "String")]
pub struct GlyphName {
    tokens: Vec<String>,
}

impl GlyphName {
    pub fn parse(name: &str) -> Self {
        Self {
            tokens: name
                .trim()
                .split('.')
                .filter(|t| !t.is_empty())
                .map(|t| t.to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn tokens(&self) -> Vec<&str> {
        self.tokens.iter().map(String::as_str).collect()
    }

    pub fn kind(&self) -> GlyphKind {
        match self.tokens.first().map(String::as_str) {
            Some("neume") => GlyphKind::Neume,
            Some("clef") => GlyphKind::Clef,
            Some("custos") => GlyphKind::Custos,
            Some("division") => GlyphKind::Division,
            _ => GlyphKind::Other,
        }
    }

    /// Second token: the neume shape, or the clef letter for clefs
    pub fn shape_token(&self) -> Option<&str> {
        self.tokens.get(1).map(String::as_str)
    }

    /// Final token, if the name has anything after the shape
    pub fn trailing_variant(&self) -> Option<&str> {
        if self.tokens.len() > 2 {
            self.tokens.last().map(String::as_str)
        } else {
            None
        }
    }

    pub fn as_dotted(&self) -> String {
        self.tokens.join(".")
    }
}

impl From<String> for GlyphName {
    fn from(s: String) -> Self {
        GlyphName::parse(&s)
    }
}

impl From<GlyphName> for String {
    fn from(name: GlyphName) -> Self {
        name.as_dotted()
    }
}

/// One OMR glyph as handed to the converter
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Glyph {
    pub name: GlyphName,

    /// Pitch of the first notehead; clefs and divisions may have none
    pub pitch: Option<Pitch>,

    /// Letter of the clef in force on this staff
    pub clef_letter: Note,

    /// Zero-based staff index
    pub staff_index: usize,

    pub bounding_box: BoundingBox,
}

impl Glyph {
    pub fn new(name: &str, pitch: Option<Pitch>, clef_letter: Note, staff_index: usize, bounding_box: BoundingBox) -> Self {
        Self {
            name: GlyphName::parse(name),
            pitch,
            clef_letter,
            staff_index,
            bounding_box,
        }
    }

    pub fn kind(&self) -> GlyphKind {
        self.name.kind()
    }

    /// Neume glyph whose shape token is `inclinatum`
    pub fn is_inclinatum(&self) -> bool {
        self.kind() == GlyphKind::Neume && self.name.shape_token() == Some("inclinatum")
    }

    /// Neume glyph ending in a bare `ligature` token; its second note is the next glyph
    pub fn ends_in_open_ligature(&self) -> bool {
        self.name.trailing_variant() == Some("ligature")
    }
}

/// Glyphs of one staff in left-to-right order
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    /// Zero-based staff index
    pub index: usize,
    pub glyphs: Vec<Glyph>,
}

impl Staff {
    pub fn new(index: usize, glyphs: Vec<Glyph>) -> Self {
        Self { index, glyphs }
    }

    /// Clef letter of the first clef glyph, if any
    pub fn clef_letter(&self) -> Option<Note> {
        self.glyphs
            .iter()
            .find(|g| g.kind() == GlyphKind::Clef)
            .map(|g| g.clef_letter)
    }
}
