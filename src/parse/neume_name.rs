//! Glyph name grammar
//!
//! A neume glyph name is `neume.<shape>[.<style>][.<modifier>][.<style>][.<variant>...]`.
//! Variants either carry a step (`2`, `u2`, `d3`) or are visual markers
//! (`ligature`, `ligature2`, `liquescent`, ...). Markers attach to the
//! notehead produced by the step token before them.
//!
//! Which kind of step token is expected depends on the shape:
//! - with a modifier, or for `compound`: directed tokens (`u2`); `repeated` instead
//!   takes one count N and yields N unison steps
//! - for table shapes (`clivis`, `torculus`, ...): bare intervals, one per table
//!   direction; intervals past the table are ignored
//! - for single-notehead shapes: none, and any interval tokens are ignored

use crate::errors::NeumeNameError;
use crate::models::component::{ConnectionType, Curve};
use crate::models::neume::{Marker, Modifier, NeumeDescriptor, NeumeShape, PlacedMarker, Step, Style};
use crate::models::pitch::Direction;

/// Largest count accepted after `repeated`
pub const MAX_REPEAT: u32 = 64;

/// Leading token of every neume glyph name
pub const NEUME_DOMAIN: &str = "neume";

/// Classified variant token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VariantToken {
    /// Bare positive interval (`3`)
    Interval(u32),
    /// Direction letter plus interval (`d3`)
    Directed(Step),
    Marker(Marker),
}

impl VariantToken {
    pub fn recognize(token: &str) -> Result<VariantToken, NeumeNameError> {
        if let Some(marker) = Self::marker(token)? {
            return Ok(VariantToken::Marker(marker));
        }

        if token.chars().all(|c| c.is_ascii_digit()) {
            return parse_interval(token, token).map(VariantToken::Interval);
        }

        let mut chars = token.chars();
        match chars.next().and_then(Direction::from_code) {
            Some(direction) => {
                let digits = chars.as_str();
                if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
                    return Err(NeumeNameError::InvalidStep(token.to_string()));
                }
                let interval = parse_interval(digits, token)?;
                Ok(VariantToken::Directed(Step::new(direction, interval)))
            }
            None => Err(NeumeNameError::InvalidInterval(token.to_string())),
        }
    }

    fn marker(token: &str) -> Result<Option<Marker>, NeumeNameError> {
        let marker = match token {
            "ligature" => Marker::Ligature { interval: None },
            "inclinatum" => Marker::Inclinatum,
            "liquescent" => Marker::Liquescent,
            "clockwise" => Marker::Curve { curve: Curve::Clockwise },
            "anticlockwise" => Marker::Curve { curve: Curve::Anticlockwise },
            "angled" => Marker::Angled,
            "hooked" => Marker::Hooked,
            "gapped" => Marker::Connection { connection: ConnectionType::Gapped },
            "looped" => Marker::Connection { connection: ConnectionType::Looped },
            "extended" => Marker::Connection { connection: ConnectionType::Extended },
            _ => match token.strip_prefix("ligature") {
                Some(digits) if digits.chars().all(|c| c.is_ascii_digit()) => Marker::Ligature {
                    interval: Some(parse_interval(digits, token)?),
                },
                _ => return Ok(None),
            },
        };
        Ok(Some(marker))
    }
}

fn parse_interval(digits: &str, token: &str) -> Result<u32, NeumeNameError> {
    match digits.parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(NeumeNameError::InvalidInterval(token.to_string())),
    }
}

/// Parser from glyph name tokens to `NeumeDescriptor`
pub struct NeumeNameParser;

impl NeumeNameParser {
    /// Parse a dotted glyph name such as `neume.torculus.2.3`
    pub fn parse_name(name: &str) -> Result<NeumeDescriptor, NeumeNameError> {
        let tokens: Vec<&str> = name.trim().split('.').filter(|t| !t.is_empty()).collect();
        Self::parse(&tokens)
    }

    /// Parse already split tokens; the first must be the `neume` domain tag
    pub fn parse(tokens: &[&str]) -> Result<NeumeDescriptor, NeumeNameError> {
        let domain = tokens.first().ok_or(NeumeNameError::Empty)?;
        if *domain != NEUME_DOMAIN {
            return Err(NeumeNameError::NotANeume(tokens.join(".")));
        }
        let shape_token = *tokens.get(1).ok_or_else(|| NeumeNameError::MissingShape(tokens.join(".")))?;

        let mut pos = 2;
        let mut style = None;
        let mut modifier = None;
        let mut style2 = None;

        if let Some(s) = tokens.get(pos).and_then(|t| Style::from_token(t)) {
            style = Some(s);
            pos += 1;
        }
        if let Some(m) = tokens.get(pos).and_then(|t| Modifier::from_token(t)) {
            modifier = Some(m);
            pos += 1;
            if let Some(s) = tokens.get(pos).and_then(|t| Style::from_token(t)) {
                style2 = Some(s);
                pos += 1;
            }
        }

        let shape = match NeumeShape::from_token(shape_token) {
            Some(shape) => shape,
            None if modifier.is_some() => NeumeShape::Unlisted(shape_token.to_string()),
            None => return Err(NeumeNameError::UnknownShape(shape_token.to_string())),
        };

        let variants = tokens.get(pos..).unwrap_or(&[]);
        let (step_tokens, markers) = Self::split_variants(variants)?;
        let steps = Self::derive_steps(&shape, modifier, &step_tokens)?;

        let last_notehead = steps.len();
        let markers = markers
            .into_iter()
            .map(|placed| PlacedMarker {
                notehead: placed.notehead.min(last_notehead),
                marker: placed.marker,
            })
            .collect();

        let descriptor = NeumeDescriptor {
            shape,
            style,
            modifier,
            style2,
            steps,
            markers,
        };
        log::debug!("parsed '{}' -> {:?}", tokens.join("."), descriptor);
        Ok(descriptor)
    }

    /// Separate step-carrying tokens from markers, recording which notehead each marker follows
    fn split_variants<'a>(variants: &[&'a str]) -> Result<(Vec<(&'a str, VariantToken)>, Vec<PlacedMarker>), NeumeNameError> {
        let mut steps = Vec::new();
        let mut markers = Vec::new();

        for token in variants {
            match VariantToken::recognize(token)? {
                VariantToken::Marker(marker) => markers.push(PlacedMarker {
                    notehead: steps.len(),
                    marker,
                }),
                recognized => steps.push((*token, recognized)),
            }
        }

        Ok((steps, markers))
    }

    fn derive_steps(
        shape: &NeumeShape,
        modifier: Option<Modifier>,
        step_tokens: &[(&str, VariantToken)],
    ) -> Result<Vec<Step>, NeumeNameError> {
        if modifier == Some(Modifier::Repeated) {
            return match step_tokens {
                [(_, VariantToken::Interval(count))] if *count <= MAX_REPEAT => {
                    Ok(vec![Step::new(Direction::Same, 1); *count as usize])
                }
                [(token, _)] => Err(NeumeNameError::InvalidInterval(token.to_string())),
                _ => Err(NeumeNameError::RepeatCount(step_tokens.len())),
            };
        }

        if modifier.is_some() || *shape == NeumeShape::Compound {
            return step_tokens
                .iter()
                .map(|(token, variant)| match variant {
                    VariantToken::Directed(step) => Ok(*step),
                    _ => Err(NeumeNameError::InvalidStep(token.to_string())),
                })
                .collect();
        }

        let directions = shape.default_directions();
        if step_tokens.len() < directions.len() {
            return Err(NeumeNameError::IntervalCount {
                shape: shape.name().to_string(),
                expected: directions.len(),
                found: step_tokens.len(),
            });
        }

        if step_tokens.len() > directions.len() {
            log::debug!(
                "ignoring {} surplus interval(s) on '{}'",
                step_tokens.len() - directions.len(),
                shape.name()
            );
        }

        directions
            .iter()
            .zip(step_tokens)
            .map(|(direction, (token, variant))| match variant {
                VariantToken::Interval(interval) => Ok(Step::new(*direction, *interval)),
                _ => Err(NeumeNameError::InvalidInterval(token.to_string())),
            })
            .collect()
    }
}
