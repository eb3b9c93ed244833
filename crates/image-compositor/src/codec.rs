//! Thin decode/encode adapters around the `image` codecs.

use std::io::Cursor;

use image::ImageFormat;
use tracing::debug;

use crate::compose::CompositeResult;
use crate::error::CompositeError;
use crate::raster::RasterBuffer;

/// Input encodings accepted by [`decode`].
const SUPPORTED_FORMATS: &[ImageFormat] = &[ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::Gif];

/// Decode PNG/JPEG/GIF bytes into an RGBA buffer. GIFs yield their first frame.
pub fn decode(bytes: &[u8]) -> Result<RasterBuffer, CompositeError> {
    let format = image::guess_format(bytes)?;
    if !SUPPORTED_FORMATS.contains(&format) {
        return Err(CompositeError::UnsupportedFormat(format!("{format:?}")));
    }

    let img = image::load_from_memory_with_format(bytes, format)?;
    let rgba = img.to_rgba8();
    debug!(
        ?format,
        width = rgba.width(),
        height = rgba.height(),
        "Decoded image"
    );
    Ok(RasterBuffer::from(rgba))
}

/// Encode a flattened composite as RGB PNG.
pub fn encode_png(result: &CompositeResult) -> Result<Vec<u8>, CompositeError> {
    let mut buf = Cursor::new(Vec::new());
    result
        .as_image()
        .write_to(&mut buf, ImageFormat::Png)
        .map_err(CompositeError::Encode)?;
    Ok(buf.into_inner())
}

/// Encode an RGBA buffer as PNG, alpha included.
pub fn encode_rgba_png(buffer: &RasterBuffer) -> Result<Vec<u8>, CompositeError> {
    let mut buf = Cursor::new(Vec::new());
    buffer
        .as_image()
        .write_to(&mut buf, ImageFormat::Png)
        .map_err(CompositeError::Encode)?;
    Ok(buf.into_inner())
}
