//! Syllable grouping of neume glyphs on one staff
//!
//! Every glyph starts as its own group. Three passes then merge neighbours:
//!
//! 1. a group opening with an `inclinatum` joins the group on its left
//!    (an inclinatum never starts a syllable)
//! 2. right to left, a group ending in an open `ligature` joins the group on its right
//! 3. interior groups join their left neighbour when the horizontal gap between
//!    them is below the pixel threshold and the result stays within the size cap
//!
//! Pass 3 computes all gaps once, before any merge, and makes a single
//! left-to-right sweep. A gap is not re-measured against a neighbour that
//! has grown, so a glyph tucked under a wide preceding glyph can stay on its
//! own (see `test_distance_merge_is_single_pass`).

use std::borrow::Borrow;

use crate::config::ConversionConfig;
use crate::errors::InvalidThresholdError;
use crate::models::glyph::Glyph;

/// Glyphs merged into one syllable, as indices into the grouped slice
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyllableGroup {
    members: Vec<usize>,
    left: i32,
    right: i32,
}

impl SyllableGroup {
    fn singleton(index: usize, glyph: &Glyph) -> Self {
        Self {
            members: vec![index],
            left: glyph.bounding_box.left(),
            right: glyph.bounding_box.right(),
        }
    }

    /// Append a group lying to the right, extending the span
    fn absorb(&mut self, other: SyllableGroup) {
        self.members.extend(other.members);
        self.left = self.left.min(other.left);
        self.right = self.right.max(other.right);
    }

    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn left(&self) -> i32 {
        self.left
    }

    pub fn right(&self) -> i32 {
        self.right
    }

    pub fn glyphs<'a, G: Borrow<Glyph>>(&'a self, glyphs: &'a [G]) -> impl Iterator<Item = &'a Glyph> + 'a {
        self.members.iter().filter_map(move |&i| glyphs.get(i).map(<G as Borrow<Glyph>>::borrow))
    }

    fn first<'a, G: Borrow<Glyph>>(&self, glyphs: &'a [G]) -> Option<&'a Glyph> {
        self.members.first().and_then(|&i| glyphs.get(i)).map(<G as Borrow<Glyph>>::borrow)
    }

    fn last<'a, G: Borrow<Glyph>>(&self, glyphs: &'a [G]) -> Option<&'a Glyph> {
        self.members.last().and_then(|&i| glyphs.get(i)).map(<G as Borrow<Glyph>>::borrow)
    }
}

/// Group horizontally ordered glyphs into syllables
///
/// Accepts owned glyphs or references, so a caller can group a filtered view
/// of a staff without cloning.
pub fn group<G: Borrow<Glyph>>(glyphs: &[G], max_pixel_gap: f64, max_group_size: usize) -> Result<Vec<SyllableGroup>, InvalidThresholdError> {
    if max_group_size < 1 {
        return Err(InvalidThresholdError::MaxGroupSize(max_group_size));
    }

    let groups: Vec<SyllableGroup> = glyphs
        .iter()
        .enumerate()
        .map(|(i, glyph)| SyllableGroup::singleton(i, <G as Borrow<Glyph>>::borrow(glyph)))
        .collect();

    let groups = merge_inclinata_left(groups, glyphs);
    let groups = merge_open_ligatures_right(groups, glyphs);
    let groups = merge_by_distance(groups, max_pixel_gap, max_group_size);

    log::debug!("grouped {} glyphs into {} syllables", glyphs.len(), groups.len());
    Ok(groups)
}

fn merge_inclinata_left<G: Borrow<Glyph>>(groups: Vec<SyllableGroup>, glyphs: &[G]) -> Vec<SyllableGroup> {
    let mut merged: Vec<SyllableGroup> = Vec::with_capacity(groups.len());

    for group in groups {
        let opens_with_inclinatum = group.first(glyphs).is_some_and(Glyph::is_inclinatum);
        match merged.last_mut() {
            Some(previous) if opens_with_inclinatum => previous.absorb(group),
            _ => merged.push(group),
        }
    }

    merged
}

fn merge_open_ligatures_right<G: Borrow<Glyph>>(groups: Vec<SyllableGroup>, glyphs: &[G]) -> Vec<SyllableGroup> {
    // Built back to front; `following` is the group immediately to the right
    let mut reversed: Vec<SyllableGroup> = Vec::with_capacity(groups.len());

    for mut group in groups.into_iter().rev() {
        let ends_in_ligature = group.last(glyphs).is_some_and(Glyph::ends_in_open_ligature);
        if ends_in_ligature {
            if let Some(following) = reversed.pop() {
                group.absorb(following);
            }
        }
        reversed.push(group);
    }

    reversed.reverse();
    reversed
}

fn merge_by_distance(groups: Vec<SyllableGroup>, max_pixel_gap: f64, max_group_size: usize) -> Vec<SyllableGroup> {
    let count = groups.len();

    // gaps[i]: distance from group i-1's right edge to group i's left edge
    let gaps: Vec<Option<f64>> = (0..count)
        .map(|i| {
            let interior = i > 0 && i + 1 < count;
            interior.then(|| f64::from(groups[i].left) - f64::from(groups[i - 1].right))
        })
        .collect();

    let mut merged: Vec<SyllableGroup> = Vec::with_capacity(count);
    for (group, gap) in groups.into_iter().zip(gaps) {
        let close = gap.is_some_and(|gap| gap < max_pixel_gap);
        match merged.last_mut() {
            Some(previous) if close && previous.len() + group.len() <= max_group_size => previous.absorb(group),
            _ => merged.push(group),
        }
    }

    merged
}

/// Grouper configured from `ConversionConfig`
///
/// The pixel threshold scales with the glyphs on each staff: it is
/// `max_pixel_gap_fraction` times the mean glyph width.
#[derive(Clone, Copy, Debug)]
pub struct NeumeGrouper {
    max_pixel_gap_fraction: f64,
    max_group_size: usize,
}

impl NeumeGrouper {
    pub fn from_config(config: &ConversionConfig) -> Result<Self, InvalidThresholdError> {
        config.validate()?;
        Ok(Self {
            max_pixel_gap_fraction: config.max_pixel_gap_fraction,
            max_group_size: config.max_group_size,
        })
    }

    pub fn max_pixel_gap<G: Borrow<Glyph>>(&self, glyphs: &[G]) -> f64 {
        if glyphs.is_empty() {
            return 0.0;
        }
        let total_width: f64 = glyphs.iter().map(|g| f64::from(<G as Borrow<Glyph>>::borrow(g).bounding_box.width)).sum();
        self.max_pixel_gap_fraction * total_width / glyphs.len() as f64
    }

    pub fn group<G: Borrow<Glyph>>(&self, glyphs: &[G]) -> Result<Vec<SyllableGroup>, InvalidThresholdError> {
        group(glyphs, self.max_pixel_gap(glyphs), self.max_group_size)
    }
}
