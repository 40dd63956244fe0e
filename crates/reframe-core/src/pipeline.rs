//! Pipeline assembly and execution.
//!
//! Enabled operations always run in one canonical order, independent of
//! how the configuration document arranges its tables:
//!
//! 1. crop
//! 2. resize
//! 3. brightness
//! 4. saturation
//! 5. rotate
//! 6. flip
//!
//! Cropping runs first so later per-pixel work touches the fewest pixels,
//! and orientation changes run last because they only move pixels that
//! have already been computed.

use tracing::{debug, instrument};

use crate::config::PipelineConfig;
use crate::error::GeometryError;
use crate::frame::Frame;
use crate::ops::Op;

/// An ordered chain of operations built from one configuration section.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    ops: Vec<Op>,
}

impl Pipeline {
    /// Builds the canonical operation chain for a configuration.
    pub fn new(config: &PipelineConfig) -> Self {
        let mut ops = Vec::with_capacity(6);
        if let Some(cb) = config.crop {
            ops.push(Op::Crop(cb));
        }
        if let Some(spec) = config.resize {
            ops.push(Op::Resize(spec));
        }
        if let Some(factor) = config.brightness {
            ops.push(Op::Brightness(factor));
        }
        if let Some(factor) = config.saturation {
            ops.push(Op::Saturation(factor));
        }
        if let Some(turns) = config.rotate {
            ops.push(Op::Rotate(turns));
        }
        if let Some(axis) = config.flip {
            ops.push(Op::Flip(axis));
        }
        Self { ops }
    }

    /// The operations in execution order.
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// True when no operation is enabled: frames pass through untouched.
    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    /// Runs the whole chain over one frame.
    ///
    /// Stops at the first operation whose parameters do not fit the frame
    /// it actually receives at that point in the chain.
    #[instrument(level = "debug", skip_all, fields(ops = self.ops.len()))]
    pub fn apply(&self, frame: Frame) -> Result<Frame, GeometryError> {
        let mut frame = frame;
        for op in &self.ops {
            debug!(
                op = op.name(),
                width = frame.width,
                height = frame.height,
                "applying operation"
            );
            frame = op.apply(frame)?;
        }
        Ok(frame)
    }
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
