//! Overlay resampling.
//!
//! Scales with Lanczos3 filtering. Alpha goes through the same filter as the
//! color channels, so hard overlay edges come out anti-aliased.

use image::imageops::{self, FilterType};
use tracing::debug;

use crate::error::CompositeError;
use crate::raster::RasterBuffer;
use crate::transform::validate_scale;

/// Largest resampled overlay accepted, in pixels (64 Mpx).
pub const MAX_RESAMPLED_PIXELS: u64 = 64 * 1024 * 1024;

/// Target dimensions for `scale`, truncated toward zero.
pub fn scaled_dimensions(width: u32, height: u32, scale: f64) -> Result<(u32, u32), CompositeError> {
    let scale = validate_scale(scale)?;
    let w = (f64::from(width) * scale).trunc();
    let h = (f64::from(height) * scale).trunc();

    // `as u64` saturates, which is what the error report wants.
    let (w64, h64) = (w as u64, h as u64);
    if w > f64::from(u32::MAX) || h > f64::from(u32::MAX) {
        return Err(CompositeError::OverlayTooLarge {
            width: w64,
            height: h64,
        });
    }
    if w64.saturating_mul(h64) > MAX_RESAMPLED_PIXELS {
        return Err(CompositeError::OverlayTooLarge {
            width: w64,
            height: h64,
        });
    }

    Ok((w64 as u32, h64 as u32))
}

/// Resample `buffer` by a uniform `scale`.
///
/// `scale == 1.0` returns the input untouched. A target that truncates to 0
/// on either axis yields a zero-area buffer, which compositing treats as a
/// no-op.
pub fn resample(buffer: RasterBuffer, scale: f64) -> Result<RasterBuffer, CompositeError> {
    let scale = validate_scale(scale)?;
    let (orig_w, orig_h) = buffer.dimensions();

    if scale == 1.0 {
        debug!(orig_w, orig_h, "Overlay unscaled, skipping resample");
        return Ok(buffer);
    }

    let (new_width, new_height) = scaled_dimensions(orig_w, orig_h, scale)?;

    if new_width == 0 || new_height == 0 || buffer.is_empty() {
        debug!(
            orig_w,
            orig_h,
            scale,
            new_width,
            new_height,
            "Overlay degenerates to zero area"
        );
        return Ok(RasterBuffer::new(new_width, new_height));
    }

    debug!(
        orig_w,
        orig_h,
        scale,
        new_width,
        new_height,
        "Resampling overlay"
    );

    let resized = imageops::resize(buffer.as_image(), new_width, new_height, FilterType::Lanczos3);
    Ok(RasterBuffer::from(resized))
}
