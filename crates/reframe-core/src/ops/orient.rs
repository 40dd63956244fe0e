//! Orientation changes: quarter-turn rotation and mirroring.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::frame::Frame;

/// Mirror axis, named for the direction the pixels travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipAxis {
    /// Left-right mirror.
    #[serde(alias = "horizontally")]
    Horizontal,
    /// Top-bottom reflection.
    #[serde(alias = "vertically")]
    Vertical,
}

impl fmt::Display for FlipAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlipAxis::Horizontal => write!(f, "horizontal"),
            FlipAxis::Vertical => write!(f, "vertical"),
        }
    }
}

/// Rotates the frame clockwise by `turns` quarter turns.
///
/// `turns` is taken modulo 4, so any count is safe. Odd turn counts swap
/// the frame's width and height.
pub(crate) fn apply_rotate(frame: Frame, turns: u8) -> Result<Frame, GeometryError> {
    if turns % 4 == 0 {
        return Ok(frame);
    }
    let rgb = frame.into_rgb_image()?;
    let rotated = match turns % 4 {
        1 => image::imageops::rotate90(&rgb),
        2 => image::imageops::rotate180(&rgb),
        _ => image::imageops::rotate270(&rgb),
    };
    Ok(Frame::from_rgb_image(rotated))
}

/// Mirrors the frame across the given axis. Dimensions are unchanged.
pub(crate) fn apply_flip(frame: Frame, axis: FlipAxis) -> Result<Frame, GeometryError> {
    let rgb = frame.into_rgb_image()?;
    let flipped = match axis {
        FlipAxis::Horizontal => image::imageops::flip_horizontal(&rgb),
        FlipAxis::Vertical => image::imageops::flip_vertical(&rgb),
    };
    Ok(Frame::from_rgb_image(flipped))
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


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..16, 1u32..16)
    }

    fn axis_strategy() -> impl Strategy<Value = FlipAxis> {
        prop_oneof![Just(FlipAxis::Horizontal), Just(FlipAxis::Vertical)]
    }

    proptest! {
        #[test]
        fn prop_four_quarter_turns_is_identity((w, h) in dimensions_strategy()) {
            let original = test_frame(w, h);
            let mut frame = original.clone();
            for _ in 0..4 {
                frame = apply_rotate(frame, 1).unwrap();
            }
            prop_assert_eq!(frame, original);
        }

        #[test]
        fn prop_rotate_matches_repeated_single_turns(
            (w, h) in dimensions_strategy(),
            turns in 0u8..4,
        ) {
            let direct = apply_rotate(test_frame(w, h), turns).unwrap();
            let mut stepped = test_frame(w, h);
            for _ in 0..turns {
                stepped = apply_rotate(stepped, 1).unwrap();
            }
            prop_assert_eq!(direct, stepped);
        }

        #[test]
        fn prop_odd_turns_swap_dimensions(
            (w, h) in dimensions_strategy(),
            turns in 0u8..4,
        ) {
            let rotated = apply_rotate(test_frame(w, h), turns).unwrap();
            if turns % 2 == 1 {
                prop_assert_eq!((rotated.width, rotated.height), (h, w));
            } else {
                prop_assert_eq!((rotated.width, rotated.height), (w, h));
            }
        }

        #[test]
        fn prop_flip_is_an_involution(
            (w, h) in dimensions_strategy(),
            axis in axis_strategy(),
        ) {
            let original = test_frame(w, h);
            let once = apply_flip(original.clone(), axis).unwrap();
            let twice = apply_flip(once, axis).unwrap();
            prop_assert_eq!(twice, original);
        }

        #[test]
        fn prop_half_turn_equals_both_flips((w, h) in dimensions_strategy()) {
            let rotated = apply_rotate(test_frame(w, h), 2).unwrap();
            let flipped = apply_flip(
                apply_flip(test_frame(w, h), FlipAxis::Horizontal).unwrap(),
                FlipAxis::Vertical,
            )
            .unwrap();
            prop_assert_eq!(rotated, flipped);
        }
    }
}
