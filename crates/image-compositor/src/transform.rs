//! Overlay placement transform: translation + uniform scale.
//!
//! Raw input comes from untrusted JSON (`{x, y, scale}`, all optional).
//! Fields may be JSON numbers or numeric strings; `null` counts as absent.

use serde::Deserialize;

use crate::error::CompositeError;

/// A transform field as it arrives over the wire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

/// Unvalidated transform input.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawTransform {
    #[serde(default)]
    pub x: Option<RawNumber>,
    #[serde(default)]
    pub y: Option<RawNumber>,
    #[serde(default)]
    pub scale: Option<RawNumber>,
}

/// Validated placement of the overlay relative to the base image.
///
/// `x`/`y` may be negative or lie past the base edges; that is handled by
/// clipping during compositing. `scale` is always finite and positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformSpec {
    pub x: i32,
    pub y: i32,
    pub scale: f64,
}

impl Default for TransformSpec {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            scale: 1.0,
        }
    }
}

impl TransformSpec {
    pub fn new(x: i32, y: i32, scale: f64) -> Result<Self, CompositeError> {
        Ok(Self {
            x,
            y,
            scale: validate_scale(scale)?,
        })
    }

    /// Coerce raw input: missing offsets are 0, missing scale is 1.0.
    ///
    /// Offsets are truncated toward zero (`-1.7 -> -1`), not floored.
    pub fn from_raw(raw: &RawTransform) -> Result<Self, CompositeError> {
        let x = coerce_offset("x", raw.x.as_ref())?;
        let y = coerce_offset("y", raw.y.as_ref())?;
        let scale = coerce_scale(raw.scale.as_ref())?;
        Ok(Self { x, y, scale })
    }
}

fn coerce_offset(field: &str, value: Option<&RawNumber>) -> Result<i32, CompositeError> {
    match value {
        None => Ok(0),
        Some(RawNumber::Number(n)) => truncate_to_i32(field, *n),
        // Text goes through integer parsing: "12" is fine, "12.5" is not.
        Some(RawNumber::Text(s)) => s.trim().parse::<i32>().map_err(|_| {
            CompositeError::invalid_transform(format!("{field} must be an integer, got {s:?}"))
        }),
    }
}

fn truncate_to_i32(field: &str, n: f64) -> Result<i32, CompositeError> {
    if !n.is_finite() {
        return Err(CompositeError::invalid_transform(format!(
            "{field} must be a finite number"
        )));
    }
    let t = n.trunc();
    if t < f64::from(i32::MIN) || t > f64::from(i32::MAX) {
        return Err(CompositeError::invalid_transform(format!(
            "{field} is out of range: {n}"
        )));
    }
    Ok(t as i32)
}

fn coerce_scale(value: Option<&RawNumber>) -> Result<f64, CompositeError> {
    let scale = match value {
        None => 1.0,
        Some(RawNumber::Number(n)) => *n,
        Some(RawNumber::Text(s)) => s.trim().parse::<f64>().map_err(|_| {
            CompositeError::invalid_transform(format!("scale must be a number, got {s:?}"))
        })?,
    };
    validate_scale(scale)
}

pub(crate) fn validate_scale(scale: f64) -> Result<f64, CompositeError> {
    if !scale.is_finite() {
        return Err(CompositeError::invalid_transform("scale must be a finite number"));
    }
    if scale <= 0.0 {
        return Err(CompositeError::invalid_transform(format!(
            "scale must be positive, got {scale}"
        )));
    }
    Ok(scale)
}
