//! Neume components (noteheads) and their visual attributes
//!
//! Attribute codes follow the MEI neumes module: `@curve` a/c, `@con` g/l/e,
//! `@tilt` compass directions.

use serde::{Deserialize, Serialize};

use super::pitch::{Direction, Pitch};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Curve {
    Anticlockwise,
    Clockwise,
}

impl Curve {
    pub fn code(self) -> &'static str {
        match self {
            Curve::Anticlockwise => "a",
            Curve::Clockwise => "c",
        }
    }
}

/// How a notehead connects to the previous one
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    Gapped,
    Looped,
    Extended,
}

impl ConnectionType {
    pub fn code(self) -> &'static str {
        match self {
            ConnectionType::Gapped => "g",
            ConnectionType::Looped => "l",
            ConnectionType::Extended => "e",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tilt {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl Tilt {
    pub fn code(self) -> &'static str {
        match self {
            Tilt::N => "n",
            Tilt::Ne => "ne",
            Tilt::E => "e",
            Tilt::Se => "se",
            Tilt::S => "s",
            Tilt::Sw => "sw",
            Tilt::W => "w",
            Tilt::Nw => "nw",
        }
    }
}

/// Link from a component to the glyph region it was read from
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct FacsimileRef {
    pub staff_index: usize,
    pub glyph_index: usize,
}

impl FacsimileRef {
    pub fn new(staff_index: usize, glyph_index: usize) -> Self {
        Self { staff_index, glyph_index }
    }

    /// Stable zone identifier for the document builder
    pub fn zone_id(&self) -> String {
        format!("zone-s{}-g{}", self.staff_index + 1, self.glyph_index + 1)
    }
}

/// One notehead of a neume
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NeumeComponent {
    pub pitch: Pitch,

    /// Movement from the previous component; `None` on the first
    pub intermediate_direction: Option<Direction>,

    pub liques: bool,
    pub connection_type: Option<ConnectionType>,
    pub curve: Option<Curve>,
    pub angled: bool,
    pub hooked: bool,
    pub ligature: bool,
    pub tilt: Option<Tilt>,

    pub facsimile: Option<FacsimileRef>,
}

impl NeumeComponent {
    pub fn new(pitch: Pitch) -> Self {
        Self {
            pitch,
            intermediate_direction: None,
            liques: false,
            connection_type: None,
            curve: None,
            angled: false,
            hooked: false,
            ligature: false,
            tilt: None,
            facsimile: None,
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.intermediate_direction = Some(direction);
        self
    }
}
