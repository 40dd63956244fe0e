//! Error types for configuration decoding and frame transformation.
//!
//! Failures split into two families with different timing:
//!
//! - [`ConfigError`] is raised while decoding a configuration document,
//!   before any pixel data is touched. Decoding is fail-fast and only
//!   validates operations that are actually enabled.
//! - [`GeometryError`] is raised while applying an operation to a concrete
//!   frame, when parameters turn out to be incompatible with the frame's
//!   actual dimensions.

use thiserror::Error;

/// Errors produced while decoding a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration document: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Section `{section}` must be a table of operation settings")]
    SectionNotTable { section: &'static str },

    #[error("Operation `{op}` settings must be a table")]
    OpNotTable { op: &'static str },

    #[error("Operation `{op}` is enabled but `{field}` is missing")]
    MissingField {
        op: &'static str,
        field: &'static str,
    },

    #[error("Field `{op}.{field}` {expected}")]
    InvalidField {
        op: &'static str,
        field: &'static str,
        expected: &'static str,
    },

    #[error("Flag `{flag}` must be a boolean")]
    InvalidFlag { flag: &'static str },
}

/// Errors produced while applying an operation to a frame.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// The crop box selects no pixels. `x2` and `y2` are exclusive, so a
    /// valid box needs `x1 < x2` and `y1 < y2`.
    #[error(
        "Crop box [{x1}, {y1}, {x2}, {y2}] is empty: coordinates must satisfy x1 < x2 and y1 < y2"
    )]
    EmptyCropBox { x1: u32, y1: u32, x2: u32, y2: u32 },

    /// The crop box extends past the right or bottom edge of the frame.
    #[error("Crop box [{x1}, {y1}, {x2}, {y2}] does not fit within a {width}x{height} frame")]
    CropOutOfBounds {
        x1: u32,
        y1: u32,
        x2: u32,
        y2: u32,
        width: u32,
        height: u32,
    },

    #[error("Resize target {width}x{height} must be at least 1x1")]
    EmptyResizeTarget { width: u32, height: u32 },

    /// The frame's pixel buffer does not match its declared dimensions.
    #[error("Invalid pixel data for a {width}x{height} frame: expected {expected} bytes, got {actual}")]
    InvalidPixelData {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// A [`GeometryError`] tagged with the index of the clip frame it hit.
#[derive(Debug, Error)]
#[error("Frame {index}: {source}")]
pub struct FrameError {
    /// Zero-based index of the failing frame within the clip.
    pub index: usize,
    #[source]
    pub source: GeometryError,
}
