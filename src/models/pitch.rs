//! Diatonic pitch representation for chant notation
//!
//! Neume pitches are plain diatonic letters with an octave number. There are
//! no accidentals here: a flat in chant is a separate glyph and never changes
//! the letter name computed for a notehead.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Number of letters in the diatonic cycle
pub const SCALE_LEN: i64 = 7;

/// Diatonic pitch letter, ordered as the cycle a, b, c, d, e, f, g
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Note {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl Note {
    /// All letters in scale order
    pub const ALL: [Note; 7] = [Note::A, Note::B, Note::C, Note::D, Note::E, Note::F, Note::G];

    /// Position of this letter in the a-based cycle (a = 0, g = 6)
    pub fn index(self) -> i64 {
        match self {
            Note::A => 0,
            Note::B => 1,
            Note::C => 2,
            Note::D => 3,
            Note::E => 4,
            Note::F => 5,
            Note::G => 6,
        }
    }

    /// Letter at a cycle position; any integer is wrapped into the cycle
    pub fn from_index(index: i64) -> Note {
        Note::ALL[index.rem_euclid(SCALE_LEN) as usize]
    }

    /// Lowercase letter, as written in MEI `@pname`
    pub fn letter(self) -> char {
        match self {
            Note::A => 'a',
            Note::B => 'b',
            Note::C => 'c',
            Note::D => 'd',
            Note::E => 'e',
            Note::F => 'f',
            Note::G => 'g',
        }
    }

    /// Parse a letter, case-insensitive
    pub fn from_letter(c: char) -> Option<Note> {
        match c.to_ascii_lowercase() {
            'a' => Some(Note::A),
            'b' => Some(Note::B),
            'c' => Some(Note::C),
            'd' => Some(Note::D),
            'e' => Some(Note::E),
            'f' => Some(Note::F),
            'g' => Some(Note::G),
            _ => None,
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Note {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Note::from_letter(c).ok_or_else(|| format!("Invalid note letter: {}", s)),
            _ => Err(format!("Invalid note letter: {}", s)),
        }
    }
}

/// Melodic movement between two consecutive noteheads
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Same,
}

impl Direction {
    /// Single-letter code used in glyph names and MEI `@intm`
    pub fn code(self) -> &'static str {
        match self {
            Direction::Up => "u",
            Direction::Down => "d",
            Direction::Same => "s",
        }
    }

    pub fn from_code(c: char) -> Option<Direction> {
        match c {
            'u' => Some(Direction::Up),
            'd' => Some(Direction::Down),
            's' => Some(Direction::Same),
            _ => None,
        }
    }
}

/// A pitch: diatonic letter plus octave
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pitch {
    pub note: Note,

    /// Octave number; unbounded in either direction
    pub octave: i64,
}

impl Pitch {
    pub fn new(note: Note, octave: i64) -> Self {
        Self { note, octave }
    }

    /// Absolute diatonic position (octave * 7 + letter index), used for ordering
    pub fn diatonic_number(&self) -> i128 {
        i128::from(self.octave) * i128::from(SCALE_LEN) + i128::from(self.note.index())
    }
}

impl Ord for Pitch {
    fn cmp(&self, other: &Self) -> Ordering {
        self.diatonic_number().cmp(&other.diatonic_number())
    }
}

impl PartialOrd for Pitch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.note, self.octave)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_index_round_trip() {
        for note in Note::ALL {
            assert_eq!(Note::from_index(note.index()), note);
        }
    }

    #[test]
    fn test_from_index_wraps_negative() {
        assert_eq!(Note::from_index(-1), Note::G);
        assert_eq!(Note::from_index(7), Note::A);
        assert_eq!(Note::from_index(-15), Note::G);
    }

    #[test]
    fn test_note_from_str() {
        assert_eq!("C".parse::<Note>().unwrap(), Note::C);
        assert_eq!(" f ".parse::<Note>().unwrap(), Note::F);
        assert!("h".parse::<Note>().is_err());
        assert!("cd".parse::<Note>().is_err());
    }

    #[test]
    fn test_pitch_ordering_by_diatonic_number() {
        // g3 is the top of its octave; a4 starts the next one
        assert!(Pitch::new(Note::G, 3) < Pitch::new(Note::A, 4));
        assert!(Pitch::new(Note::C, 4) < Pitch::new(Note::D, 4));
        assert_eq!(Pitch::new(Note::E, 2).cmp(&Pitch::new(Note::E, 2)), Ordering::Equal);
        assert_eq!(Pitch::new(Note::A, 4).diatonic_number(), 28);
        assert!(Pitch::new(Note::G, i64::MAX) > Pitch::new(Note::A, i64::MAX));
        assert!(Pitch::new(Note::A, i64::MIN) < Pitch::new(Note::G, i64::MIN));
    }

    #[test]
    fn test_pitch_serde_shape() {
        let json = serde_json::to_string(&Pitch::new(Note::D, 4)).unwrap();
        assert_eq!(json, r#"{"note":"d","octave":4}"#);
    }
}
