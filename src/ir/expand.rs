//! Neume component expansion
//!
//! Walks a descriptor's steps from the glyph's starting pitch and produces
//! one `NeumeComponent` per notehead, then applies the visual markers.

use crate::config::ConversionConfig;
use crate::errors::{ConversionError, Result};
use crate::models::component::{FacsimileRef, NeumeComponent, Tilt};
use crate::models::glyph::Glyph;
use crate::models::neume::{Marker, NeumeDescriptor, NeumeShape};
use crate::models::pitch::{Direction, Note, Pitch};
use crate::parse::NeumeNameParser;
use crate::transposition::{PitchCalculator, ScaleFrame};

use super::types::Neume;

/// Expands descriptors into ordered component sequences
#[derive(Clone, Copy, Debug, Default)]
pub struct NeumeComponentExpander {
    calculator: PitchCalculator,
}

impl NeumeComponentExpander {
    pub fn new(calculator: PitchCalculator) -> Self {
        Self { calculator }
    }

    pub fn from_config(config: &ConversionConfig) -> Self {
        let frame = if config.clef_relative_scale {
            ScaleFrame::ClefRelative
        } else {
            ScaleFrame::Absolute
        };
        Self::new(PitchCalculator::new(frame))
    }

    /// Components of one neume, first notehead at `start`
    pub fn expand(&self, descriptor: &NeumeDescriptor, start: Pitch, clef_letter: Note) -> Vec<NeumeComponent> {
        self.expand_with_facsimile(descriptor, start, clef_letter, None)
    }

    /// Parse a neume glyph's name and expand it, linking every component to the glyph's zone
    pub fn expand_glyph(&self, glyph: &Glyph, glyph_index: usize) -> Result<Neume> {
        let name = glyph.name.as_dotted();
        let descriptor = NeumeNameParser::parse(&glyph.name.tokens()).map_err(|source| ConversionError::NeumeName {
            staff: glyph.staff_index + 1,
            glyph: name.clone(),
            source,
        })?;
        let start = glyph.pitch.ok_or_else(|| ConversionError::MissingPitch {
            staff: glyph.staff_index + 1,
            glyph: name.clone(),
        })?;

        let facsimile = FacsimileRef::new(glyph.staff_index, glyph_index);
        let components = self.expand_with_facsimile(&descriptor, start, glyph.clef_letter, Some(facsimile));

        Ok(Neume {
            glyph_index,
            name,
            components,
        })
    }

    fn expand_with_facsimile(
        &self,
        descriptor: &NeumeDescriptor,
        start: Pitch,
        clef_letter: Note,
        facsimile: Option<FacsimileRef>,
    ) -> Vec<NeumeComponent> {
        let mut heads = Vec::with_capacity(descriptor.notehead_count());

        let mut first = NeumeComponent::new(start);
        if descriptor.shape == NeumeShape::Inclinatum {
            first.tilt = Some(Tilt::Se);
        }
        heads.push(first);

        let mut previous = start;
        for step in &descriptor.steps {
            let next = self.calculator.relative_pitch(previous, clef_letter, step.direction, step.interval);
            heads.push(NeumeComponent::new(next).with_direction(step.direction));
            previous = next;
        }

        // Synthetic second notes of closed ligatures, keyed by the notehead they follow
        let mut ligated: Vec<Option<NeumeComponent>> = vec![None; heads.len()];

        for placed in &descriptor.markers {
            let Some(head) = heads.get_mut(placed.notehead) else {
                log::warn!("marker {:?} points past the last notehead", placed.marker);
                continue;
            };
            match placed.marker {
                Marker::Ligature { interval } => {
                    head.ligature = true;
                    if let Some(interval) = interval {
                        let pitch = self.calculator.relative_pitch(head.pitch, clef_letter, Direction::Down, interval);
                        let mut second = NeumeComponent::new(pitch).with_direction(Direction::Down);
                        second.ligature = true;
                        ligated[placed.notehead] = Some(second);
                    }
                }
                Marker::Inclinatum => head.tilt = Some(Tilt::Se),
                Marker::Liquescent => head.liques = true,
                Marker::Curve { curve } => head.curve = Some(curve),
                Marker::Angled => head.angled = true,
                Marker::Hooked => head.hooked = true,
                Marker::Connection { connection } => head.connection_type = Some(connection),
            }
        }

        let mut components = Vec::with_capacity(heads.len() + ligated.iter().flatten().count());
        for (head, second) in heads.into_iter().zip(ligated) {
            components.push(head);
            components.extend(second);
        }
        for component in &mut components {
            component.facsimile = facsimile;
        }
        components
    }
}
