//! Staff-to-IR conversion
//!
//! For each staff the converter groups the neume glyphs into syllables,
//! expands every neume into components, and interleaves the resulting
//! syllables with the staff's clefs, custodes and divisions by left edge.
//!
//! # Error policy
//!
//! - **strict**: the first unreadable neume name or pitchless neume aborts
//!   the conversion with its `ConversionError`
//! - **lenient** (default): the glyph is skipped, logged and recorded as a
//!   `DiagnosticMark`; syllables left with no neumes are dropped
//!
//! Threshold errors are never recovered from.

use crate::config::ConversionConfig;
use crate::diagnostics::{DiagnosticMark, Diagnostics};
use crate::errors::{ConversionError, Result};
use crate::models::component::FacsimileRef;
use crate::models::glyph::{Glyph, GlyphKind, Staff};
use crate::models::pitch::Note;
use crate::structure::{NeumeGrouper, SyllableGroup};

use super::expand::NeumeComponentExpander;
use super::types::{ConvertedStaff, StaffItem, Syllable, Zone};

/// Converts staves of OMR glyphs into `ConvertedStaff` values
#[derive(Clone, Copy, Debug)]
pub struct StaffConverter {
    grouper: NeumeGrouper,
    expander: NeumeComponentExpander,
    strict: bool,
}

/// A layer item waiting to be placed by horizontal position
struct Placed {
    left: i32,
    glyph_index: usize,
    item: StaffItem,
}

impl StaffConverter {
    pub fn new(config: &ConversionConfig) -> Result<Self> {
        Ok(Self {
            grouper: NeumeGrouper::from_config(config)?,
            expander: NeumeComponentExpander::from_config(config),
            strict: config.strict,
        })
    }

    pub fn convert_staves(&self, staves: &[Staff]) -> Result<Vec<ConvertedStaff>> {
        staves.iter().map(|staff| self.convert_staff(staff)).collect()
    }

    pub fn convert_staff(&self, staff: &Staff) -> Result<ConvertedStaff> {
        let mut converted = ConvertedStaff {
            index: staff.index,
            clef_letter: staff.clef_letter(),
            ..ConvertedStaff::default()
        };

        let neume_indices: Vec<usize> = staff
            .glyphs
            .iter()
            .enumerate()
            .filter(|(_, glyph)| glyph.kind() == GlyphKind::Neume)
            .map(|(i, _)| i)
            .collect();
        let neumes: Vec<&Glyph> = neume_indices.iter().map(|&i| &staff.glyphs[i]).collect();

        let groups = self.grouper.group(&neumes)?;

        let mut placed: Vec<Placed> = Vec::with_capacity(groups.len());
        for group in &groups {
            if let Some(entry) = self.convert_group(staff, group, &neume_indices, &mut converted)? {
                placed.push(entry);
            }
        }

        for (glyph_index, glyph) in staff.glyphs.iter().enumerate() {
            let item = match glyph.kind() {
                GlyphKind::Neume => continue,
                GlyphKind::Clef => StaffItem::Clef {
                    glyph_index,
                    shape: clef_shape(glyph),
                },
                GlyphKind::Custos => StaffItem::Custos {
                    glyph_index,
                    pitch: glyph.pitch,
                },
                GlyphKind::Division => StaffItem::Division {
                    glyph_index,
                    form: glyph.name.shape_token().map(str::to_string),
                },
                GlyphKind::Other => {
                    log::debug!("Skipping glyph '{}' on staff {}", glyph.name.as_dotted(), staff.index + 1);
                    continue;
                }
            };
            converted.zones.push(zone_for(staff.index, glyph_index, glyph));
            placed.push(Placed {
                left: glyph.bounding_box.left(),
                glyph_index,
                item,
            });
        }

        placed.sort_by_key(|p| (p.left, p.glyph_index));
        converted.items = placed.into_iter().map(|p| p.item).collect();
        converted.zones.sort_by_key(|zone| zone.facsimile.glyph_index);

        log::info!(
            "Staff {}: {} glyphs -> {} items ({} skipped)",
            staff.index + 1,
            staff.glyphs.len(),
            converted.items.len(),
            converted.diagnostics.len()
        );

        Ok(converted)
    }

    fn convert_group(
        &self,
        staff: &Staff,
        group: &SyllableGroup,
        neume_indices: &[usize],
        converted: &mut ConvertedStaff,
    ) -> Result<Option<Placed>> {
        let mut syllable = Syllable::default();

        for &member in group.members() {
            let glyph_index = neume_indices[member];
            let glyph = &staff.glyphs[glyph_index];

            match self.expander.expand_glyph(glyph, glyph_index) {
                Ok(neume) => {
                    converted.zones.push(zone_for(staff.index, glyph_index, glyph));
                    syllable.neumes.push(neume);
                }
                Err(err) if self.strict => return Err(err),
                Err(err) => {
                    log::warn!("{}", err);
                    converted.diagnostics.push(diagnostic_for(staff.index, glyph_index, &err));
                }
            }
        }

        let Some(first) = syllable.neumes.first() else {
            return Ok(None);
        };
        let glyph_index = first.glyph_index;

        Ok(Some(Placed {
            left: group.left(),
            glyph_index,
            item: StaffItem::Syllable(syllable),
        }))
    }
}

/// Gather the diagnostics of every converted staff
pub fn collect_diagnostics(staves: &[ConvertedStaff]) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    for staff in staves {
        diagnostics.extend(staff.diagnostics.iter().cloned());
    }
    diagnostics
}

fn clef_shape(glyph: &Glyph) -> Note {
    glyph
        .name
        .shape_token()
        .and_then(|token| token.chars().next())
        .and_then(Note::from_letter)
        .unwrap_or(glyph.clef_letter)
}

fn zone_for(staff_index: usize, glyph_index: usize, glyph: &Glyph) -> Zone {
    Zone {
        facsimile: FacsimileRef::new(staff_index, glyph_index),
        bounding_box: glyph.bounding_box,
    }
}

fn diagnostic_for(staff_index: usize, glyph_index: usize, err: &ConversionError) -> DiagnosticMark {
    let kind = match err {
        ConversionError::MissingPitch { .. } => "missing_pitch",
        _ => "unreadable_name",
    };
    DiagnosticMark::new(staff_index, glyph_index, kind, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::glyph::BoundingBox;
    use crate::models::pitch::Pitch;

    fn glyph(name: &str, x: i32) -> Glyph {
        Glyph::new(name, Some(Pitch::new(Note::D, 4)), Note::C, 0, BoundingBox::new(x, 100, 20, 20))
    }

    fn staff(glyphs: Vec<Glyph>) -> Staff {
        Staff::new(0, glyphs)
    }

    #[test]
    fn test_items_interleaved_by_position() {
        let staff = staff(vec![
            glyph("clef.c", 0),
            glyph("neume.clivis.2", 40),
            glyph("neume.punctum", 200),
            glyph("division.minima", 120),
            glyph("custos", 400),
        ]);
        let converter = StaffConverter::new(&ConversionConfig::default()).unwrap();
        let converted = converter.convert_staff(&staff).unwrap();

        let kinds: Vec<&str> = converted
            .items
            .iter()
            .map(|item| match item {
                StaffItem::Clef { .. } => "clef",
                StaffItem::Custos { .. } => "custos",
                StaffItem::Division { .. } => "division",
                StaffItem::Syllable(_) => "syllable",
            })
            .collect();
        assert_eq!(kinds, vec!["clef", "syllable", "division", "syllable", "custos"]);
        assert_eq!(converted.zones.len(), 5);
        assert_eq!(converted.clef_letter, Some(Note::C));
    }

    #[test]
    fn test_clef_shape_from_name() {
        let staff = staff(vec![glyph("clef.f", 0)]);
        let converted = StaffConverter::new(&ConversionConfig::default()).unwrap().convert_staff(&staff).unwrap();
        assert_eq!(
            converted.items,
            vec![StaffItem::Clef {
                glyph_index: 0,
                shape: Note::F
            }]
        );
    }

    #[test]
    fn test_lenient_skips_bad_glyph() {
        let staff = staff(vec![glyph("neume.flexa.2", 0), glyph("neume.punctum", 300)]);
        let converted = StaffConverter::new(&ConversionConfig::default()).unwrap().convert_staff(&staff).unwrap();

        assert_eq!(converted.syllables().count(), 1);
        assert_eq!(converted.diagnostics.len(), 1);
        assert_eq!(converted.diagnostics[0].glyph, 0);
        assert_eq!(converted.diagnostics[0].kind, "unreadable_name");
        assert_eq!(converted.zones.len(), 1);
    }

    #[test]
    fn test_strict_returns_first_error() {
        let config = ConversionConfig {
            strict: true,
            ..ConversionConfig::default()
        };
        let staff = staff(vec![glyph("neume.punctum", 0), glyph("neume.flexa.2", 300)]);
        let err = StaffConverter::new(&config).unwrap().convert_staff(&staff).unwrap_err();
        assert!(matches!(err, ConversionError::NeumeName { staff: 1, .. }));
    }

    #[test]
    fn test_missing_pitch_diagnostic() {
        let mut pitchless = glyph("neume.punctum", 0);
        pitchless.pitch = None;
        let converted = StaffConverter::new(&ConversionConfig::default())
            .unwrap()
            .convert_staff(&staff(vec![pitchless]))
            .unwrap();

        assert!(converted.items.is_empty());
        assert_eq!(converted.diagnostics[0].kind, "missing_pitch");
    }

    #[test]
    fn test_clefs_do_not_split_neume_grouping() {
        // Neumes 0 and 2 are adjacent once the clef is filtered out
        let staff = staff(vec![
            glyph("neume.punctum", 0),
            glyph("clef.c", 22),
            glyph("neume.punctum", 25),
            glyph("neume.punctum", 500),
        ]);
        let converted = StaffConverter::new(&ConversionConfig::default()).unwrap().convert_staff(&staff).unwrap();
        let sizes: Vec<usize> = converted.syllables().map(|s| s.neumes.len()).collect();
        assert_eq!(sizes, vec![2, 1]);
    }

    #[test]
    fn test_collect_diagnostics_across_staves() {
        let converter = StaffConverter::new(&ConversionConfig::default()).unwrap();
        let staves = vec![
            staff(vec![glyph("neume.flexa", 0)]),
            Staff::new(1, vec![glyph("neume.punctum.x", 0)]),
        ];
        let converted = converter.convert_staves(&staves).unwrap();
        let diagnostics = collect_diagnostics(&converted);
        assert_eq!(diagnostics.len(), 2);
        let kinds: Vec<(usize, &str)> = diagnostics.marks.iter().map(|m| (m.staff, m.kind.as_str())).collect();
        assert_eq!(kinds, vec![(0, "unreadable_name"), (1, "unreadable_name")]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ConversionConfig {
            max_group_size: 0,
            ..ConversionConfig::default()
        };
        assert!(matches!(StaffConverter::new(&config), Err(ConversionError::Threshold(_))));
    }
}
