//! Neume shapes and the descriptor produced from a glyph name

use serde::{Deserialize, Serialize};

use super::component::{ConnectionType, Curve};
use super::pitch::Direction;

/// Named neume shape, from the second token of a glyph name
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NeumeShape {
    Punctum,
    Virga,
    Inclinatum,
    Cephalicus,
    Clivis,
    Epiphonus,
    /// Also written `pes`
    Podatus,
    Porrectus,
    Pressus,
    Salicus,
    Scandicus,
    Climacus,
    Torculus,
    Ancus,
    /// Free sequence of directed steps (`neume.compound.u2.d3`)
    Compound,
    /// Shape token outside the table; only accepted when a modifier supplies the steps
    Unlisted(String),
}

impl NeumeShape {
    /// Map a shape token to a known shape
    pub fn from_token(token: &str) -> Option<NeumeShape> {
        let shape = match token {
            "punctum" => NeumeShape::Punctum,
            "virga" => NeumeShape::Virga,
            "inclinatum" => NeumeShape::Inclinatum,
            "cephalicus" => NeumeShape::Cephalicus,
            "clivis" => NeumeShape::Clivis,
            "epiphonus" => NeumeShape::Epiphonus,
            "podatus" | "pes" => NeumeShape::Podatus,
            "porrectus" => NeumeShape::Porrectus,
            "pressus" => NeumeShape::Pressus,
            "salicus" => NeumeShape::Salicus,
            "scandicus" => NeumeShape::Scandicus,
            "climacus" => NeumeShape::Climacus,
            "torculus" => NeumeShape::Torculus,
            "ancus" => NeumeShape::Ancus,
            "compound" => NeumeShape::Compound,
            _ => return None,
        };
        Some(shape)
    }

    /// Directions of the noteheads after the first, in order
    ///
    /// Compound and unlisted shapes have no fixed contour; their steps always
    /// come from directed variant tokens.
    pub fn default_directions(&self) -> &'static [Direction] {
        use Direction::*;
        match self {
            NeumeShape::Punctum | NeumeShape::Virga | NeumeShape::Inclinatum => &[],
            NeumeShape::Cephalicus | NeumeShape::Clivis => &[Down],
            NeumeShape::Epiphonus | NeumeShape::Podatus => &[Up],
            NeumeShape::Pressus => &[Same, Down],
            NeumeShape::Porrectus => &[Down, Up],
            NeumeShape::Salicus | NeumeShape::Scandicus => &[Up, Up],
            NeumeShape::Climacus | NeumeShape::Ancus => &[Down, Down],
            NeumeShape::Torculus => &[Up, Down],
            NeumeShape::Compound | NeumeShape::Unlisted(_) => &[],
        }
    }

    pub fn name(&self) -> &str {
        match self {
            NeumeShape::Punctum => "punctum",
            NeumeShape::Virga => "virga",
            NeumeShape::Inclinatum => "inclinatum",
            NeumeShape::Cephalicus => "cephalicus",
            NeumeShape::Clivis => "clivis",
            NeumeShape::Epiphonus => "epiphonus",
            NeumeShape::Podatus => "podatus",
            NeumeShape::Porrectus => "porrectus",
            NeumeShape::Pressus => "pressus",
            NeumeShape::Salicus => "salicus",
            NeumeShape::Scandicus => "scandicus",
            NeumeShape::Climacus => "climacus",
            NeumeShape::Torculus => "torculus",
            NeumeShape::Ancus => "ancus",
            NeumeShape::Compound => "compound",
            NeumeShape::Unlisted(name) => name,
        }
    }
}

/// Graphical style letter (`a` or `b`) following the shape token
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    A,
    B,
}

impl Style {
    pub fn from_token(token: &str) -> Option<Style> {
        match token {
            "a" => Some(Style::A),
            "b" => Some(Style::B),
            _ => None,
        }
    }
}

/// Shape modifier; when present, steps are spelled out explicitly in the name
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Flexus,
    Resupinus,
    Subpunctis,
    Repeated,
}

impl Modifier {
    pub fn from_token(token: &str) -> Option<Modifier> {
        match token {
            "flexus" => Some(Modifier::Flexus),
            "resupinus" => Some(Modifier::Resupinus),
            "subpunctis" => Some(Modifier::Subpunctis),
            "repeated" => Some(Modifier::Repeated),
            _ => None,
        }
    }
}

/// One melodic step to the next notehead
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Step {
    pub direction: Direction,
    /// 1-based diatonic interval (1 = unison, 2 = second, ...)
    pub interval: u32,
}

impl Step {
    pub fn new(direction: Direction, interval: u32) -> Self {
        Self { direction, interval }
    }
}

/// Visual marker variant token
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Marker {
    /// `ligature` joins with the next glyph; `ligatureN` implies a second note N below
    Ligature { interval: Option<u32> },
    Inclinatum,
    Liquescent,
    Curve { curve: Curve },
    Angled,
    Hooked,
    Connection { connection: ConnectionType },
}

/// A marker attached to a notehead by index (0 = first notehead)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlacedMarker {
    pub notehead: usize,
    pub marker: Marker,
}

/// Structured reading of one neume glyph name
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NeumeDescriptor {
    pub shape: NeumeShape,
    pub style: Option<Style>,
    pub modifier: Option<Modifier>,
    pub style2: Option<Style>,
    pub steps: Vec<Step>,
    pub markers: Vec<PlacedMarker>,
}

impl NeumeDescriptor {
    /// Number of noteheads drawn by the glyph itself (synthetic ligature notes excluded)
    pub fn notehead_count(&self) -> usize {
        self.steps.len() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pes_is_podatus() {
        assert_eq!(NeumeShape::from_token("pes"), Some(NeumeShape::Podatus));
        assert_eq!(NeumeShape::from_token("podatus"), Some(NeumeShape::Podatus));
    }

    #[test]
    fn test_direction_table() {
        use Direction::*;
        assert_eq!(NeumeShape::Clivis.default_directions(), &[Down]);
        assert_eq!(NeumeShape::Pressus.default_directions(), &[Same, Down]);
        assert_eq!(NeumeShape::Porrectus.default_directions(), &[Down, Up]);
        assert_eq!(NeumeShape::Torculus.default_directions(), &[Up, Down]);
        assert!(NeumeShape::Punctum.default_directions().is_empty());
    }

    #[test]
    fn test_unknown_shape_token() {
        assert_eq!(NeumeShape::from_token("quilisma"), None);
    }
}
