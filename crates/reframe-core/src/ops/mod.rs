//! The operation set and its dispatch.
//!
//! Every transformation the pipeline can perform is a variant of [`Op`].
//! Adding an operation means adding a variant here, implementing it in its
//! own submodule, and giving it a slot in the canonical order built by
//! [`crate::pipeline::Pipeline::new`].

use std::fmt;

use crate::error::GeometryError;
use crate::frame::Frame;

mod adjust;
mod crop;
mod orient;
mod resize;

pub use crop::CropBox;
pub use orient::FlipAxis;
pub use resize::{ResizeFilter, ResizeSpec};

/// A single configured operation, ready to apply to frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Op {
    /// Extract a rectangular window.
    Crop(CropBox),
    /// Rescale to an exact size.
    Resize(ResizeSpec),
    /// Scale every channel by a factor.
    Brightness(f32),
    /// Blend channels toward or away from gray.
    Saturation(f32),
    /// Rotate clockwise by quarter turns.
    Rotate(u8),
    /// Mirror across an axis.
    Flip(FlipAxis),
}

impl Op {
    /// Short name used in logs and error context.
    pub fn name(&self) -> &'static str {
        match self {
            Op::Crop(_) => "crop",
            Op::Resize(_) => "resize",
            Op::Brightness(_) => "brightness",
            Op::Saturation(_) => "saturation",
            Op::Rotate(_) => "rotate",
            Op::Flip(_) => "flip",
        }
    }

    /// Applies the operation, consuming the input frame.
    ///
    /// Photometric operations reuse the input's pixel buffer; geometric
    /// ones allocate a new frame.
    pub fn apply(&self, frame: Frame) -> Result<Frame, GeometryError> {
        match *self {
            Op::Crop(cb) => crop::apply(frame, cb),
            Op::Resize(spec) => resize::apply(frame, spec),
            Op::Brightness(factor) => {
                let mut frame = frame;
                adjust::apply_brightness(&mut frame.pixels, factor);
                Ok(frame)
            }
            Op::Saturation(factor) => {
                let mut frame = frame;
                adjust::apply_saturation(&mut frame.pixels, factor);
                Ok(frame)
            }
            Op::Rotate(turns) => orient::apply_rotate(frame, turns),
            Op::Flip(axis) => orient::apply_flip(frame, axis),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Crop(cb) => write!(f, "crop [{}, {}, {}, {}]", cb.x1, cb.y1, cb.x2, cb.y2),
            Op::Resize(spec) => {
                write!(f, "resize to {}x{} ({})", spec.width, spec.height, spec.filter)
            }
            Op::Brightness(factor) => write!(f, "brightness x{factor}"),
            Op::Saturation(factor) => write!(f, "saturation x{factor}"),
            Op::Rotate(turns) => write!(f, "rotate {} deg clockwise", u32::from(*turns) * 90),
            Op::Flip(axis) => write!(f, "flip {axis}"),
        }
    }
}
