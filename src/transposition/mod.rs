//! Diatonic pitch arithmetic

pub mod relative_pitch;

pub use relative_pitch::{relative_pitch, PitchCalculator, ScaleFrame};
