//! Resize: rescale a frame to an exact target size.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::frame::Frame;

/// Resampling filters for resizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeFilter {
    /// Nearest neighbor. Fastest, blocky results.
    Nearest,
    /// Triangle (bilinear) interpolation. Good balance of speed and quality.
    #[default]
    Bilinear,
    /// Lanczos with window 3. Slowest, best for downscaling.
    Lanczos3,
}

impl ResizeFilter {
    /// Converts to the `image` crate's filter type.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            ResizeFilter::Nearest => image::imageops::FilterType::Nearest,
            ResizeFilter::Bilinear => image::imageops::FilterType::Triangle,
            ResizeFilter::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

impl fmt::Display for ResizeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResizeFilter::Nearest => "nearest",
            ResizeFilter::Bilinear => "bilinear",
            ResizeFilter::Lanczos3 => "lanczos3",
        };
        write!(f, "{name}")
    }
}

/// An exact resize target. Aspect ratio is not preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeSpec {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub filter: ResizeFilter,
}

/// Rescales the frame to exactly `spec.width` x `spec.height`.
pub(crate) fn apply(frame: Frame, spec: ResizeSpec) -> Result<Frame, GeometryError> {
    if spec.width == 0 || spec.height == 0 {
        return Err(GeometryError::EmptyResizeTarget {
            width: spec.width,
            height: spec.height,
        });
    }

    // Already at the target size.
    if frame.width == spec.width && frame.height == spec.height {
        return Ok(frame);
    }

    let rgb = frame.into_rgb_image()?;
    let filter = spec.filter.to_image_filter();
    let resized = image::imageops::resize(&rgb, spec.width, spec.height, filter);
    Ok(Frame::from_rgb_image(resized))
}

#[cfg(test)]
fn solid_frame(width: u32, height: u32, value: u8) -> Frame {
    Frame::new(width, height, vec![value; (width * height * 3) as usize])
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn filter_strategy() -> impl Strategy<Value = ResizeFilter> {
        prop_oneof![
            Just(ResizeFilter::Nearest),
            Just(ResizeFilter::Bilinear),
            Just(ResizeFilter::Lanczos3),
        ]
    }

    proptest! {
        #[test]
        fn prop_resize_output_matches_target(
            src_w in 1u32..24,
            src_h in 1u32..24,
            dst_w in 1u32..48,
            dst_h in 1u32..48,
            filter in filter_strategy(),
        ) {
            let resized = apply(
                solid_frame(src_w, src_h, 77),
                ResizeSpec { width: dst_w, height: dst_h, filter },
            ).unwrap();
            prop_assert_eq!(resized.width, dst_w);
            prop_assert_eq!(resized.height, dst_h);
        }

        #[test]
        fn prop_resize_is_deterministic(
            dst_w in 1u32..32,
            dst_h in 1u32..32,
            filter in filter_strategy(),
        ) {
            let spec = ResizeSpec { width: dst_w, height: dst_h, filter };
            let a = apply(solid_frame(11, 7, 130), spec).unwrap();
            let b = apply(solid_frame(11, 7, 130), spec).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
