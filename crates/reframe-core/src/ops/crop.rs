//! Crop: extract a rectangular window from a frame.

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::frame::Frame;

/// An axis-aligned crop window in absolute pixel coordinates.
///
/// `x1`/`y1` are inclusive and `x2`/`y2` are exclusive, matching array
/// slicing: the box `[0, 0, w, h]` selects the whole frame. The box is
/// checked against the frame's real dimensions only when it is applied,
/// because the frame size is unknown until then.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropBox {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl CropBox {
    /// Width of the selected window.
    pub fn width(&self) -> u32 {
        self.x2.saturating_sub(self.x1)
    }

    /// Height of the selected window.
    pub fn height(&self) -> u32 {
        self.y2.saturating_sub(self.y1)
    }
}

/// Copies the selected window into a new frame.
///
/// Rows are copied as whole slices, one per scanline of the window.
pub(crate) fn apply(frame: Frame, cb: CropBox) -> Result<Frame, GeometryError> {
    if cb.x1 >= cb.x2 || cb.y1 >= cb.y2 {
        return Err(GeometryError::EmptyCropBox {
            x1: cb.x1,
            y1: cb.y1,
            x2: cb.x2,
            y2: cb.y2,
        });
    }
    if cb.x2 > frame.width || cb.y2 > frame.height {
        return Err(GeometryError::CropOutOfBounds {
            x1: cb.x1,
            y1: cb.y1,
            x2: cb.x2,
            y2: cb.y2,
            width: frame.width,
            height: frame.height,
        });
    }

    // Full-frame crop changes nothing.
    if cb.x1 == 0 && cb.y1 == 0 && cb.x2 == frame.width && cb.y2 == frame.height {
        return Ok(frame);
    }

    let out_width = cb.width() as usize;
    let row_bytes = out_width * 3;
    let stride = frame.width as usize * 3;

    let mut pixels = Vec::with_capacity(row_bytes * cb.height() as usize);
    for y in cb.y1 as usize..cb.y2 as usize {
        let start = y * stride + cb.x1 as usize * 3;
        pixels.extend_from_slice(&frame.pixels[start..start + row_bytes]);
    }

    Ok(Frame::new(cb.width(), cb.height(), pixels))
}

#[cfg(test)]
fn test_frame(width: u32, height: u32) -> Frame {
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            let value = ((y * width + x) % 256) as u8;
            pixels.push(value);
            pixels.push(value);
            pixels.push(value);
        }
    }
    Frame::new(width, height, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_interior_window() {
        let frame = test_frame(4, 4);
        let cropped = apply(
            frame,
            CropBox {
                x1: 1,
                y1: 1,
                x2: 3,
                y2: 3,
            },
        )
        .unwrap();

        assert_eq!(cropped.width, 2);
        assert_eq!(cropped.height, 2);
        // Source pixel (1, 1) has value 1 * 4 + 1 = 5 and lands at (0, 0).
        assert_eq!(cropped.pixel(0, 0), [5, 5, 5]);
        assert_eq!(cropped.pixel(1, 0), [6, 6, 6]);
        assert_eq!(cropped.pixel(0, 1), [9, 9, 9]);
        assert_eq!(cropped.pixel(1, 1), [10, 10, 10]);
    }

    #[test]
    fn test_crop_full_frame_is_identity() {
        let frame = test_frame(5, 3);
        let expected = frame.clone();
        let cropped = apply(
            frame,
            CropBox {
                x1: 0,
                y1: 0,
                x2: 5,
                y2: 3,
            },
        )
        .unwrap();
        assert_eq!(cropped, expected);
    }

    #[test]
    fn test_crop_single_pixel() {
        let frame = test_frame(4, 4);
        let cropped = apply(
            frame,
            CropBox {
                x1: 2,
                y1: 3,
                x2: 3,
                y2: 4,
            },
        )
        .unwrap();
        assert_eq!(cropped.width, 1);
        assert_eq!(cropped.height, 1);
        // Value of source pixel (2, 3) is 3 * 4 + 2 = 14.
        assert_eq!(cropped.pixel(0, 0), [14, 14, 14]);
    }

    #[test]
    fn test_crop_flush_with_edges() {
        let frame = test_frame(6, 4);
        let cropped = apply(
            frame,
            CropBox {
                x1: 3,
                y1: 2,
                x2: 6,
                y2: 4,
            },
        )
        .unwrap();
        assert_eq!(cropped.width, 3);
        assert_eq!(cropped.height, 2);
    }

    #[test]
    fn test_crop_out_of_bounds_is_rejected() {
        let frame = test_frame(100, 100);
        let err = apply(
            frame,
            CropBox {
                x1: 10,
                y1: 20,
                x2: 200,
                y2: 180,
            },
        )
        .unwrap_err();

        match err {
            GeometryError::CropOutOfBounds { width, height, .. } => {
                assert_eq!(width, 100);
                assert_eq!(height, 100);
            }
            other => panic!("expected CropOutOfBounds, got {other:?}"),
        }
    }

    #[test]
    fn test_crop_empty_box_is_rejected() {
        let frame = test_frame(10, 10);
        let err = apply(
            frame,
            CropBox {
                x1: 4,
                y1: 2,
                x2: 4,
                y2: 8,
            },
        )
        .unwrap_err();
        assert!(matches!(err, GeometryError::EmptyCropBox { .. }));
    }

    #[test]
    fn test_crop_box_dimensions() {
        let cb = CropBox {
            x1: 10,
            y1: 20,
            x2: 200,
            y2: 180,
        };
        assert_eq!(cb.width(), 190);
        assert_eq!(cb.height(), 160);

        // Degenerate boxes report zero instead of underflowing.
        let degenerate = CropBox {
            x1: 5,
            y1: 5,
            x2: 3,
            y2: 3,
        };
        assert_eq!(degenerate.width(), 0);
        assert_eq!(degenerate.height(), 0);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
