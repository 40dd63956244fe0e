//! Media I/O: image files in and out, frame-sequence discovery, and
//! output naming.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use chrono::Local;
use exif::{In, Reader, Tag};
use image::DynamicImage;
use tracing::debug;

use reframe_core::Frame;

/// File extensions treated as frames, matched case-insensitively.
const FRAME_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Loads an image file as an RGB8 frame.
///
/// Files carrying an EXIF orientation tag are rotated upright before the
/// pipeline sees them, so crop boxes always refer to the image as a
/// viewer would see it.
pub fn load_frame(path: &Path) -> anyhow::Result<Frame> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let img =
        image::load_from_memory(&bytes).with_context(|| format!("decoding {}", path.display()))?;

    let orientation = exif_orientation(&bytes);
    if orientation != 1 {
        debug!(orientation, path = %path.display(), "normalizing EXIF orientation");
    }
    let img = normalize_orientation(img, orientation);

    Ok(Frame::from_rgb_image(img.into_rgb8()))
}

/// Writes a frame to `path`, with the format chosen by the extension.
pub fn save_frame(frame: Frame, path: &Path) -> anyhow::Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    if !FRAME_EXTENSIONS.contains(&ext.as_str()) {
        bail!(
            "unsupported output extension for {} (expected jpg, jpeg, or png)",
            path.display()
        );
    }

    let rgb = frame
        .into_rgb_image()
        .context("frame buffer does not match its dimensions")?;
    rgb.save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Reads the EXIF orientation tag, defaulting to 1 (upright).
fn exif_orientation(bytes: &[u8]) -> u32 {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .unwrap_or(1),
        Err(_) => 1,
    }
}

/// Undoes an EXIF orientation so the pixels end up upright.
fn normalize_orientation(img: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        // 1 is upright; anything else is out of spec and left alone.
        _ => img,
    }
}

/// Lists the frame files directly inside `dir`, sorted by file name.
///
/// The scan is not recursive, and anything without a frame extension is
/// skipped. Sorting by name keeps zero-padded frame dumps in playback
/// order.
pub fn frame_sequence(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))?;

    let mut frames = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("reading directory {}", dir.display()))?
            .path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        if FRAME_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known))
        {
            frames.push(path);
        }
    }

    if frames.is_empty() {
        bail!("no frames (jpg, jpeg, png) found in {}", dir.display());
    }
    frames.sort();
    Ok(frames)
}

/// Derives `name_YYYYmmdd_HHMMSS.ext` next to the input file.
pub fn timestamped_sibling(input: &Path) -> anyhow::Result<PathBuf> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("cannot derive an output name for {}", input.display()))?;
    let ext = input
        .extension()
        .and_then(|s| s.to_str())
        .with_context(|| format!("cannot derive an output name for {}", input.display()))?;
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    Ok(input.with_file_name(format!("{stem}_{stamp}.{ext}")))
}

/// Derives `name_YYYYmmdd_HHMMSS` next to the input directory.
pub fn timestamped_sibling_dir(dir: &Path) -> anyhow::Result<PathBuf> {
    let name = dir.file_name().and_then(|s| s.to_str()).with_context(|| {
        format!(
            "cannot derive an output name for {}; pass --output",
            dir.display()
        )
    })?;
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    Ok(dir.with_file_name(format!("{name}_{stamp}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_frame(width: u32, height: u32) -> Frame {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let value = ((y * width + x) % 256) as u8;
                pixels.extend_from_slice(&[value, value, value]);
            }
        }
        Frame::new(width, height, pixels)
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");

        let frame = gradient_frame(5, 4);
        save_frame(frame.clone(), &path).unwrap();

        // PNG is lossless, so the frame comes back byte for byte.
        let loaded = load_frame(&path).unwrap();
        assert_eq!(loaded, frame);
    }

    #[test]
    fn test_save_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let err = save_frame(gradient_frame(2, 2), &dir.path().join("frame.bmp")).unwrap_err();
        assert!(err.to_string().contains("unsupported output extension"));
    }

    #[test]
    fn test_load_missing_file_names_the_path() {
        let err = load_frame(Path::new("/nonexistent/frame.png")).unwrap_err();
        assert!(err.to_string().contains("frame.png"));
    }

    #[test]
    fn test_frame_sequence_is_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.jpg", "c.jpeg", "notes.txt", "UPPER.JPG"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("d.png"), b"").unwrap();

        let frames = frame_sequence(dir.path()).unwrap();
        let names: Vec<_> = frames
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_owned())
            .collect();
        assert_eq!(names, ["UPPER.JPG", "a.jpg", "b.png", "c.jpeg"]);
    }

    #[test]
    fn test_frame_sequence_rejects_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(frame_sequence(dir.path()).is_err());
    }

    #[test]
    fn test_timestamped_sibling_shape() {
        let out = timestamped_sibling(Path::new("/media/shot.jpg")).unwrap();
        let name = out.file_name().unwrap().to_str().unwrap();

        assert!(name.starts_with("shot_"));
        assert!(name.ends_with(".jpg"));
        // stem, underscore, then YYYYmmdd_HHMMSS.
        assert_eq!(name.len(), "shot_".len() + 15 + ".jpg".len());
        assert_eq!(out.parent(), Some(Path::new("/media")));
    }

    #[test]
    fn test_timestamped_sibling_dir_shape() {
        let out = timestamped_sibling_dir(Path::new("/media/frames")).unwrap();
        let name = out.file_name().unwrap().to_str().unwrap();

        assert!(name.starts_with("frames_"));
        assert_eq!(name.len(), "frames_".len() + 15);
        assert_eq!(out.parent(), Some(Path::new("/media")));
    }

    #[test]
    fn test_orientation_normalization() {
        // A 2x1 strip [A, B].
        let strip = || {
            DynamicImage::ImageRgb8(
                image::RgbImage::from_raw(2, 1, vec![10, 10, 10, 20, 20, 20]).unwrap(),
            )
        };

        // Upright stays untouched.
        let img = normalize_orientation(strip(), 1).into_rgb8();
        assert_eq!(img.get_pixel(0, 0).0, [10, 10, 10]);

        // 2 mirrors left-right.
        let img = normalize_orientation(strip(), 2).into_rgb8();
        assert_eq!(img.get_pixel(0, 0).0, [20, 20, 20]);

        // 6 turns the strip into a column.
        let img = normalize_orientation(strip(), 6).into_rgb8();
        assert_eq!((img.width(), img.height()), (1, 2));

        // Out-of-spec values pass through.
        let img = normalize_orientation(strip(), 99).into_rgb8();
        assert_eq!(img.get_pixel(0, 0).0, [10, 10, 10]);
    }

    #[test]
    fn test_exif_orientation_defaults_without_metadata() {
        // PNG bytes carry no EXIF container.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.png");
        save_frame(gradient_frame(2, 2), &path).unwrap();

        assert_eq!(exif_orientation(&fs::read(&path).unwrap()), 1);
    }
}
