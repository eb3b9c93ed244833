//! Two-layer composition: overlay underneath, base on top, flattened onto white.
//!
//! Order of operations:
//! 1. transparent working canvas sized to the base
//! 2. overlay pasted at `(x, y)` with "over", clipped to the canvas
//! 3. base pasted over everything at `(0, 0)`
//! 4. result flattened onto opaque white using its own alpha as mask
//!
//! The base is drawn last, so the overlay only shows through where the base
//! is (partially) transparent.

use image::{Rgb, RgbImage, RgbaImage};
use tracing::debug;

use crate::error::CompositeError;
use crate::raster::RasterBuffer;
use crate::resize::resample;
use crate::transform::TransformSpec;
use crate::BACKGROUND;

/// Final flattened composite: opaque RGB, same size as the base image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeResult {
    image: RgbImage,
}

impl CompositeResult {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    pub fn as_image(&self) -> &RgbImage {
        &self.image
    }
}

/// Resample the overlay by `spec.scale`, then composite it at `(spec.x, spec.y)`.
pub fn merge(
    base: &RasterBuffer,
    overlay: RasterBuffer,
    spec: &TransformSpec,
) -> Result<CompositeResult, CompositeError> {
    debug!(
        base_w = base.width(),
        base_h = base.height(),
        overlay_w = overlay.width(),
        overlay_h = overlay.height(),
        x = spec.x,
        y = spec.y,
        scale = spec.scale,
        "Merging images"
    );
    let overlay = resample(overlay, spec.scale)?;
    composite(base, &overlay, spec.x, spec.y)
}

/// Composite `overlay` under `base` and flatten onto white.
///
/// The overlay is placed only when `offset_x < base.width && offset_y <
/// base.height`. That is the whole guard: there is no intersection test, so
/// an overlay lying entirely left of or above the canvas still goes through
/// (fully clipped) placement.
pub fn composite(
    base: &RasterBuffer,
    overlay: &RasterBuffer,
    offset_x: i32,
    offset_y: i32,
) -> Result<CompositeResult, CompositeError> {
    let (width, height) = base.dimensions();
    let mut canvas = RgbaImage::new(width, height);

    if overlay_in_range(offset_x, offset_y, width, height) {
        if overlay.is_empty() {
            debug!("Zero-area overlay, nothing to place");
        } else {
            paste_over(
                &mut canvas,
                overlay.as_image(),
                i64::from(offset_x),
                i64::from(offset_y),
            );
        }
    } else {
        debug!(
            offset_x,
            offset_y, width, height, "Overlay offset past base bounds, skipping overlay"
        );
    }

    // Canvas and base must line up pixel for pixel.
    debug_assert_eq!(canvas.dimensions(), base.dimensions());
    paste_over(&mut canvas, base.as_image(), 0, 0);

    let image = flatten(&canvas);
    Ok(CompositeResult { image })
}

fn overlay_in_range(offset_x: i32, offset_y: i32, width: u32, height: u32) -> bool {
    i64::from(offset_x) < i64::from(width) && i64::from(offset_y) < i64::from(height)
}

/// Alpha-composite `top` onto `dst` at `(x, y)`, discarding pixels outside `dst`.
fn paste_over(dst: &mut RgbaImage, top: &RgbaImage, x: i64, y: i64) {
    let (dst_w, dst_h) = (i64::from(dst.width()), i64::from(dst.height()));
    let (top_w, top_h) = (i64::from(top.width()), i64::from(top.height()));

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + top_w).min(dst_w);
    let y1 = (y + top_h).min(dst_h);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    for ty in y0..y1 {
        for tx in x0..x1 {
            // All four values are inside their images by construction above.
            let src = top.get_pixel((tx - x) as u32, (ty - y) as u32).0;
            let out = dst.get_pixel_mut(tx as u32, ty as u32);
            out.0 = over(out.0, src);
        }
    }
}

/// Straight-alpha "over": `c = src*a + dst*(1-a)`, `a = src_a + dst_a*(1-src_a)`.
pub fn over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = u16::from(src[3]);
    if sa == 255 {
        return src;
    }
    if sa == 0 {
        return dst;
    }

    let inv = 255 - sa;
    let mut out = [0u8; 4];
    for i in 0..3 {
        out[i] = mul_div255(u16::from(src[i]), sa)
            .saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out[3] = src[3].saturating_add(mul_div255(u16::from(dst[3]), inv));
    out
}

fn flatten(canvas: &RgbaImage) -> RgbImage {
    let mut out = RgbImage::from_pixel(canvas.width(), canvas.height(), Rgb(BACKGROUND));
    for (px, bg) in canvas.pixels().zip(out.pixels_mut()) {
        let a = u16::from(px[3]);
        let inv = 255 - a;
        for i in 0..3 {
            bg[i] = mul_div255(u16::from(px[i]), a)
                .saturating_add(mul_div255(u16::from(bg[i]), inv));
        }
    }
    out
}

fn mul_div255(x: u16, y: u16) -> u8 {
    ((u32::from(x) * u32::from(y) + 127) / 255) as u8
}
