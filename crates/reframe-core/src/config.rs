//! Configuration decoding.
//!
//! A configuration document is TOML with one table per media kind,
//! `[image_settings]` and `[video_settings]`. Each operation lives in its
//! own sub-table keyed by the operation name and gated by an `enabled`
//! flag:
//!
//! ```toml
//! [image_settings.cropped]
//! enabled = true
//! box = [10, 20, 200, 180]
//! ```
//!
//! Decoding is fail-fast and validates enabled operations only: a disabled
//! operation may carry nonsense parameters without failing the decode.
//! Unrecognized keys are ignored so configurations can carry annotations
//! for other tools.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::ops::{CropBox, FlipAxis, ResizeFilter, ResizeSpec};

/// Which section of the configuration document to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// A single still image, configured by `[image_settings]`.
    Image,
    /// A frame sequence, configured by `[video_settings]`.
    Video,
}

impl MediaKind {
    /// Name of the top-level table holding this kind's settings.
    pub fn section(self) -> &'static str {
        match self {
            MediaKind::Image => "image_settings",
            MediaKind::Video => "video_settings",
        }
    }
}

/// Output switches for clip processing.
///
/// The pipeline itself never reads these; the caller decides what to do
/// with transformed frames based on them. All default to off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipFlags {
    /// Show frames as they are produced.
    pub preview: bool,
    /// Assemble transformed frames into a video file.
    pub save_video: bool,
    /// Write each transformed frame as an image file.
    pub save_image: bool,
}

/// A decoded, validated transformation setup for one media kind.
///
/// `None` means the operation is disabled. Parameters held here have
/// passed every check that does not depend on frame dimensions; bounds
/// against real frame sizes are checked when the pipeline runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineConfig {
    pub crop: Option<CropBox>,
    pub resize: Option<ResizeSpec>,
    pub brightness: Option<f32>,
    pub saturation: Option<f32>,
    /// Quarter turns clockwise, already reduced modulo 4.
    pub rotate: Option<u8>,
    pub flip: Option<FlipAxis>,
    /// Video-only output switches; always default for image configs.
    pub flags: ClipFlags,
}

impl PipelineConfig {
    /// Decodes the section for `kind` from a TOML document.
    ///
    /// A document without that section decodes to the identity
    /// configuration: nothing enabled, all flags off.
    pub fn from_toml_str(text: &str, kind: MediaKind) -> Result<Self, ConfigError> {
        let doc = text.parse::<toml::Value>()?;
        Self::from_document(&doc, kind)
    }

    /// Decodes the section for `kind` from an already-parsed document.
    pub fn from_document(doc: &toml::Value, kind: MediaKind) -> Result<Self, ConfigError> {
        let Some(value) = doc.get(kind.section()) else {
            return Ok(Self::default());
        };
        let section = value.as_table().ok_or(ConfigError::SectionNotTable {
            section: kind.section(),
        })?;

        let mut config = Self::default();
        if let Some(op) = enabled_op(section, "cropped")? {
            config.crop = Some(decode_crop(op)?);
        }
        if let Some(op) = enabled_op(section, "resize")? {
            config.resize = Some(decode_resize(op)?);
        }
        if let Some(op) = enabled_op(section, "brightness")? {
            config.brightness = Some(decode_brightness(op)?);
        }
        if let Some(op) = enabled_op(section, "saturation")? {
            config.saturation = Some(decode_saturation(op)?);
        }
        if let Some(op) = enabled_op(section, "rotate")? {
            config.rotate = Some(decode_rotate(op)?);
        }
        if let Some(op) = enabled_op(section, "flip")? {
            config.flip = Some(decode_flip(op)?);
        }
        if kind == MediaKind::Video {
            config.flags = decode_flags(section)?;
        }
        Ok(config)
    }
}

/// Looks up an operation sub-table and applies the `enabled` gate.
///
/// Returns `None` for absent or disabled operations; their remaining
/// fields are never inspected.
fn enabled_op<'a>(
    section: &'a toml::Table,
    op: &'static str,
) -> Result<Option<&'a toml::Table>, ConfigError> {
    let Some(value) = section.get(op) else {
        return Ok(None);
    };
    let table = value.as_table().ok_or(ConfigError::OpNotTable { op })?;
    match table.get("enabled") {
        None | Some(toml::Value::Boolean(false)) => Ok(None),
        Some(toml::Value::Boolean(true)) => Ok(Some(table)),
        Some(_) => Err(ConfigError::InvalidField {
            op,
            field: "enabled",
            expected: "must be a boolean",
        }),
    }
}

fn field<'a>(
    op_table: &'a toml::Table,
    op: &'static str,
    field: &'static str,
) -> Result<&'a toml::Value, ConfigError> {
    op_table.get(field).ok_or(ConfigError::MissingField { op, field })
}

/// Factor fields accept both TOML integers and floats.
fn float_field(
    op_table: &toml::Table,
    op: &'static str,
    name: &'static str,
) -> Result<f64, ConfigError> {
    match field(op_table, op, name)? {
        toml::Value::Float(value) => Ok(*value),
        toml::Value::Integer(value) => Ok(*value as f64),
        _ => Err(ConfigError::InvalidField {
            op,
            field: name,
            expected: "must be a number",
        }),
    }
}

fn coordinate(value: &toml::Value) -> Option<u32> {
    match value {
        toml::Value::Integer(v) => u32::try_from(*v).ok(),
        _ => None,
    }
}

fn decode_crop(op: &toml::Table) -> Result<CropBox, ConfigError> {
    let invalid = || ConfigError::InvalidField {
        op: "cropped",
        field: "box",
        expected: "must be an array [x1, y1, x2, y2] of non-negative integers",
    };

    let array = field(op, "cropped", "box")?.as_array().ok_or_else(invalid)?;
    if array.len() != 4 {
        return Err(invalid());
    }
    let mut coords = [0u32; 4];
    for (slot, value) in coords.iter_mut().zip(array) {
        *slot = coordinate(value).ok_or_else(invalid)?;
    }

    let [x1, y1, x2, y2] = coords;
    if x1 >= x2 || y1 >= y2 {
        return Err(ConfigError::InvalidField {
            op: "cropped",
            field: "box",
            expected: "must satisfy x1 < x2 and y1 < y2",
        });
    }
    Ok(CropBox { x1, y1, x2, y2 })
}

fn decode_resize(op: &toml::Table) -> Result<ResizeSpec, ConfigError> {
    let invalid = || ConfigError::InvalidField {
        op: "resize",
        field: "size",
        expected: "must be an array [width, height] of positive integers",
    };

    let array = field(op, "resize", "size")?.as_array().ok_or_else(invalid)?;
    if array.len() != 2 {
        return Err(invalid());
    }
    let width = coordinate(&array[0]).filter(|&w| w > 0).ok_or_else(invalid)?;
    let height = coordinate(&array[1]).filter(|&h| h > 0).ok_or_else(invalid)?;

    let filter = match op.get("filter") {
        None => ResizeFilter::default(),
        Some(value) => value.clone().try_into().map_err(|_| ConfigError::InvalidField {
            op: "resize",
            field: "filter",
            expected: "must be \"nearest\", \"bilinear\", or \"lanczos3\"",
        })?,
    };

    Ok(ResizeSpec {
        width,
        height,
        filter,
    })
}

fn decode_brightness(op: &toml::Table) -> Result<f32, ConfigError> {
    let factor = float_field(op, "brightness", "factor")?;
    if !factor.is_finite() || factor <= 0.0 {
        return Err(ConfigError::InvalidField {
            op: "brightness",
            field: "factor",
            expected: "must be a finite number greater than zero",
        });
    }
    Ok(factor as f32)
}

fn decode_saturation(op: &toml::Table) -> Result<f32, ConfigError> {
    let factor = float_field(op, "saturation", "factor")?;
    if !factor.is_finite() || factor < 0.0 {
        return Err(ConfigError::InvalidField {
            op: "saturation",
            field: "factor",
            expected: "must be a finite number, zero or greater",
        });
    }
    Ok(factor as f32)
}

fn decode_rotate(op: &toml::Table) -> Result<u8, ConfigError> {
    let angle = match field(op, "rotate", "angle")? {
        toml::Value::Integer(angle) => *angle,
        _ => {
            return Err(ConfigError::InvalidField {
                op: "rotate",
                field: "angle",
                expected: "must be an integer count of quarter turns",
            })
        }
    };
    // Negative angles turn counterclockwise: -1 behaves like 3.
    Ok(angle.rem_euclid(4) as u8)
}

fn decode_flip(op: &toml::Table) -> Result<FlipAxis, ConfigError> {
    field(op, "flip", "axis")?
        .clone()
        .try_into()
        .map_err(|_| ConfigError::InvalidField {
            op: "flip",
            field: "axis",
            expected: "must be \"horizontal\" or \"vertical\"",
        })
}

fn decode_flags(section: &toml::Table) -> Result<ClipFlags, ConfigError> {
    Ok(ClipFlags {
        preview: flag(section, "preview")?,
        save_video: flag(section, "save_video")?,
        save_image: flag(section, "save_image")?,
    })
}

fn flag(section: &toml::Table, name: &'static str) -> Result<bool, ConfigError> {
    match section.get(name) {
        None => Ok(false),
        Some(toml::Value::Boolean(value)) => Ok(*value),
        Some(_) => Err(ConfigError::InvalidFlag { flag: name }),
    }
}

/// A commented starter configuration with every operation disabled.
pub const DEFAULT_CONFIG: &str = r#"# reframe configuration
#
# Still images read [image_settings]; clips read [video_settings]. Each
# operation stays off until its `enabled` flag is set to true. Disabled
# operations are never validated, so placeholder values are safe to keep.
#
# Enabled operations always run in the same fixed order, no matter how
# the tables below are arranged:
#   crop -> resize -> brightness -> saturation -> rotate -> flip

[image_settings.cropped]
enabled = false
# Window in pixels; x2 and y2 are exclusive.
box = [0, 0, 640, 480]

[image_settings.resize]
enabled = false
size = [640, 480]
# Optional: "nearest", "bilinear" (default), or "lanczos3".
filter = "bilinear"

[image_settings.brightness]
enabled = false
# 1.0 keeps the image as is; must be greater than zero.
factor = 1.2

[image_settings.saturation]
enabled = false
# 0.0 is grayscale, 1.0 keeps the image as is.
factor = 1.2

[image_settings.rotate]
enabled = false
# Quarter turns clockwise; negative values turn counterclockwise.
angle = 1

[image_settings.flip]
enabled = false
# "horizontal" or "vertical"
axis = "horizontal"

[video_settings]
# Output switches for clip processing.
preview = false
save_video = false
save_image = true

[video_settings.cropped]
enabled = false
box = [0, 0, 640, 480]

[video_settings.resize]
enabled = false
size = [640, 480]

[video_settings.brightness]
enabled = false
factor = 1.2

[video_settings.saturation]
enabled = false
factor = 1.2

[video_settings.rotate]
enabled = false
angle = 1

[video_settings.flip]
enabled = false
axis = "horizontal"
"#;


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_decode_never_panics(text in ".{0,200}") {
            // Arbitrary input either decodes or reports an error.
            let _ = PipelineConfig::from_toml_str(&text, MediaKind::Image);
            let _ = PipelineConfig::from_toml_str(&text, MediaKind::Video);
        }

        #[test]
        fn prop_any_integer_angle_decodes(angle in i64::MIN / 2..i64::MAX / 2) {
            let config = PipelineConfig::from_toml_str(
                &format!("[image_settings.rotate]\nenabled = true\nangle = {angle}\n"),
                MediaKind::Image,
            ).unwrap();
            let turns = config.rotate.unwrap();
            prop_assert!(turns < 4);
            prop_assert_eq!(i64::from(turns), angle.rem_euclid(4));
        }
    }
}
