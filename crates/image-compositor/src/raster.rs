//! Decoded RGBA pixel buffers.

use image::{Rgba, RgbaImage};

/// An owned, decoded image: row-major RGBA8 with a top-left origin.
///
/// Zero-area buffers are valid values (a heavily downscaled overlay can
/// truncate to 0 pixels on either axis).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    image: RgbaImage,
}

impl RasterBuffer {
    /// Fully transparent buffer, every pixel `(0, 0, 0, 0)`.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Buffer filled with a single RGBA value.
    pub fn from_pixel(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba(rgba)),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// True when either side is 0.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// RGBA value at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x < self.width() && y < self.height() {
            self.image.put_pixel(x, y, Rgba(rgba));
        }
    }

    /// Raw row-major RGBA bytes.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }
}

impl From<RgbaImage> for RasterBuffer {
    fn from(image: RgbaImage) -> Self {
        Self { image }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_transparent() {
        let buf = RasterBuffer::new(3, 2);
        assert_eq!(buf.dimensions(), (3, 2));
        assert!(buf.as_raw().iter().all(|&b| b == 0));
    }

    #[test]
    fn from_image_keeps_pixels() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(1, 0, Rgba([5, 6, 7, 8]));
        let buf = RasterBuffer::from(image);
        assert_eq!(buf.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(buf.pixel(1, 0), Some([5, 6, 7, 8]));
    }

    #[test]
    fn zero_area_buffer_is_empty() {
        assert!(RasterBuffer::new(0, 10).is_empty());
        assert!(RasterBuffer::new(10, 0).is_empty());
        assert!(!RasterBuffer::new(1, 1).is_empty());
    }

    #[test]
    fn pixel_outside_bounds_is_none() {
        let buf = RasterBuffer::from_pixel(4, 4, [9, 9, 9, 255]);
        assert_eq!(buf.pixel(4, 0), None);
        assert_eq!(buf.pixel(0, 4), None);
    }

    #[test]
    fn put_pixel_ignores_out_of_bounds() {
        let mut buf = RasterBuffer::new(2, 2);
        buf.put_pixel(5, 5, [1, 1, 1, 1]);
        buf.put_pixel(1, 1, [7, 7, 7, 7]);
        assert_eq!(buf.pixel(1, 1), Some([7, 7, 7, 7]));
    }
}
