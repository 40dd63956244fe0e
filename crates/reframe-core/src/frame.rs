//! The in-memory frame representation shared by every operation.

use crate::error::GeometryError;

/// A single frame in RGB8 format.
///
/// Pixels are stored row-major as `[r, g, b, r, g, b, ...]`, so the buffer
/// always holds exactly `width * height * 3` bytes. Whether the frame came
/// from a still image or a clip makes no difference to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Interleaved RGB8 pixel data
    pub pixels: Vec<u8>,
}

impl Frame {
    /// Creates a new frame from raw RGB8 data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * 3,
            "pixel buffer must be exactly width * height * 3 bytes"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Creates a frame from an `image` crate RGB buffer without copying.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let width = img.width();
        let height = img.height();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Converts the frame into an `image` crate RGB buffer without copying.
    ///
    /// Fails only when the pixel buffer does not match the declared
    /// dimensions, which cannot happen for frames built through [`Frame::new`]
    /// or [`Frame::from_rgb_image`].
    pub fn into_rgb_image(self) -> Result<image::RgbImage, GeometryError> {
        let (width, height) = (self.width, self.height);
        let expected = width as usize * height as usize * 3;
        let actual = self.pixels.len();
        image::RgbImage::from_raw(width, height, self.pixels).ok_or(
            GeometryError::InvalidPixelData {
                width,
                height,
                expected,
                actual,
            },
        )
    }

    /// Returns the total number of pixels.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Returns the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Returns the `[r, g, b]` triple at `(x, y)`.
    ///
    /// Panics when the coordinates fall outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }
}
