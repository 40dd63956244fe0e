//! Core engine for config-driven frame transformations.
//!
//! A TOML document declares which operations are enabled and with what
//! parameters. Decoding it yields a [`PipelineConfig`], which builds a
//! [`Pipeline`]: an ordered chain of operations applied to RGB8
//! [`Frame`]s. The same chain serves single images and frame sequences;
//! see [`process_clip`] for the multi-frame path.
//!
//! # Example
//!
//! ```ignore
//! use reframe_core::{MediaKind, Pipeline, PipelineConfig};
//!
//! let config = PipelineConfig::from_toml_str(&text, MediaKind::Image)?;
//! let pipeline = Pipeline::new(&config);
//! let output = pipeline.apply(frame)?;
//! ```

pub mod clip;
pub mod config;
pub mod error;
pub mod frame;
pub mod ops;
pub mod pipeline;

pub use clip::process_clip;
pub use config::{ClipFlags, MediaKind, PipelineConfig, DEFAULT_CONFIG};
pub use error::{ConfigError, FrameError, GeometryError};
pub use frame::Frame;
pub use ops::{CropBox, FlipAxis, Op, ResizeFilter, ResizeSpec};
pub use pipeline::Pipeline;
