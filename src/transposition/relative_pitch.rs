//! Diatonic stepping between neume noteheads
//!
//! A neume glyph name records only the interval to each following notehead
//! ("clivis, down a third"). This module turns that into a letter + octave.
//!
//! Octave numbers roll over at `a` in the default frame, which is how the
//! OMR pitch finder numbers its octaves. In the clef-relative frame the cycle
//! is rotated so the rollover happens at the staff's clef letter instead.

use crate::models::pitch::{Direction, Note, Pitch, SCALE_LEN};

/// Where the diatonic cycle starts for index lookups
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScaleFrame {
    /// Fixed a, b, c, d, e, f, g cycle
    #[default]
    Absolute,
    /// Cycle rotated to start at the clef letter
    ClefRelative,
}

/// Computes the pitch reached by a melodic step
#[derive(Clone, Copy, Debug, Default)]
pub struct PitchCalculator {
    frame: ScaleFrame,
}

impl PitchCalculator {
    pub fn new(frame: ScaleFrame) -> Self {
        Self { frame }
    }

    /// Step `interval` (1-based: 1 is the same letter) from `start` in `direction`
    ///
    /// Total over every input; octaves are never clamped.
    pub fn relative_pitch(&self, start: Pitch, clef_letter: Note, direction: Direction, interval: u32) -> Pitch {
        let origin = match self.frame {
            ScaleFrame::Absolute => 0,
            ScaleFrame::ClefRelative => clef_letter.index(),
        };
        let index = (start.note.index() - origin).rem_euclid(SCALE_LEN);
        let steps = interval as i64 - 1;

        let (new_index, octave) = match direction {
            Direction::Same => return start,
            Direction::Up => {
                let total = index + steps;
                (total.rem_euclid(SCALE_LEN), start.octave + total.div_euclid(SCALE_LEN))
            }
            Direction::Down => {
                let carry = (SCALE_LEN - index - 1 + steps).div_euclid(SCALE_LEN);
                ((index - steps).rem_euclid(SCALE_LEN), start.octave - carry)
            }
        };

        Pitch::new(Note::from_index(new_index + origin), octave)
    }
}

/// Relative pitch in the absolute a-based frame
pub fn relative_pitch(start: Pitch, clef_letter: Note, direction: Direction, interval: u32) -> Pitch {
    PitchCalculator::default().relative_pitch(start, clef_letter, direction, interval)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(note: Note, octave: i64) -> Pitch {
        Pitch::new(note, octave)
    }

    #[test]
    fn test_clivis_second_below_d() {
        assert_eq!(relative_pitch(p(Note::D, 4), Note::C, Direction::Down, 2), p(Note::C, 4));
    }

    #[test]
    fn test_down_across_a_drops_octave() {
        assert_eq!(relative_pitch(p(Note::A, 4), Note::C, Direction::Down, 2), p(Note::G, 3));
        assert_eq!(relative_pitch(p(Note::B, 4), Note::C, Direction::Down, 3), p(Note::G, 3));
    }

    #[test]
    fn test_up_across_g_raises_octave() {
        assert_eq!(relative_pitch(p(Note::G, 3), Note::C, Direction::Up, 2), p(Note::A, 4));
        assert_eq!(relative_pitch(p(Note::E, 3), Note::C, Direction::Up, 5), p(Note::B, 4));
    }

    #[test]
    fn test_unison_interval_is_identity() {
        for dir in [Direction::Up, Direction::Down] {
            assert_eq!(relative_pitch(p(Note::F, 2), Note::F, dir, 1), p(Note::F, 2));
        }
    }

    #[test]
    fn test_octave_interval() {
        assert_eq!(relative_pitch(p(Note::C, 4), Note::C, Direction::Up, 8), p(Note::C, 5));
        assert_eq!(relative_pitch(p(Note::C, 4), Note::C, Direction::Down, 8), p(Note::C, 3));
    }

    #[test]
    fn test_same_ignores_interval() {
        for interval in [0, 1, 5, 100] {
            assert_eq!(relative_pitch(p(Note::E, 3), Note::F, Direction::Same, interval), p(Note::E, 3));
        }
    }

    #[test]
    fn test_zero_interval_steps_backwards() {
        // interval 0 is one step against the direction; still total
        assert_eq!(relative_pitch(p(Note::A, 4), Note::C, Direction::Up, 0), p(Note::G, 3));
        assert_eq!(relative_pitch(p(Note::G, 3), Note::C, Direction::Down, 0), p(Note::A, 4));
    }

    #[test]
    fn test_huge_interval_does_not_clamp() {
        let result = relative_pitch(p(Note::A, 0), Note::C, Direction::Up, 7 * 1000 + 1);
        assert_eq!(result, p(Note::A, 1000));
    }

    #[test]
    fn test_clef_relative_frame_rolls_over_at_clef() {
        let calc = PitchCalculator::new(ScaleFrame::ClefRelative);
        // With a c clef, b -> c going up crosses into the next octave
        assert_eq!(calc.relative_pitch(p(Note::B, 3), Note::C, Direction::Up, 2), p(Note::C, 4));
        // ... and a -> b does not
        assert_eq!(calc.relative_pitch(p(Note::A, 3), Note::C, Direction::Up, 2), p(Note::B, 3));
        assert_eq!(calc.relative_pitch(p(Note::C, 4), Note::C, Direction::Down, 2), p(Note::B, 3));
    }

    #[test]
    fn test_up_then_down_round_trip_both_frames() {
        for frame in [ScaleFrame::Absolute, ScaleFrame::ClefRelative] {
            let calc = PitchCalculator::new(frame);
            for clef in Note::ALL {
                for note in Note::ALL {
                    for octave in -2..=6 {
                        for interval in 1..=22 {
                            let start = p(note, octave);
                            let up = calc.relative_pitch(start, clef, Direction::Up, interval);
                            let back = calc.relative_pitch(up, clef, Direction::Down, interval);
                            assert_eq!(back, start, "{:?} {} up/down {} clef {}", frame, start, interval, clef);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_direction_ordering() {
        let start = p(Note::D, 4);
        for interval in 2..=9 {
            assert!(relative_pitch(start, Note::C, Direction::Up, interval) > start);
            assert!(relative_pitch(start, Note::C, Direction::Down, interval) < start);
        }
    }
}
