//! Command implementations.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use tracing::{debug, info, warn};

use reframe_core::{MediaKind, Pipeline, PipelineConfig};

use crate::media;

/// Transforms a single image with the `[image_settings]` chain.
pub fn image(config_path: &Path, input: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path, MediaKind::Image)?;
    let pipeline = Pipeline::new(&config);
    describe(&pipeline);

    let frame = media::load_frame(input)?;
    info!(
        input = %input.display(),
        width = frame.width,
        height = frame.height,
        "image loaded"
    );

    let frame = pipeline
        .apply(frame)
        .with_context(|| format!("transforming {}", input.display()))?;

    let out_path = match output {
        Some(path) => path.to_path_buf(),
        None => media::timestamped_sibling(input)?,
    };
    media::save_frame(frame, &out_path)?;
    info!(output = %out_path.display(), "image saved");
    Ok(())
}

/// Transforms a directory of frames with the `[video_settings]` chain.
pub fn clip(
    config_path: &Path,
    dir: &Path,
    output: Option<&Path>,
    jobs: usize,
) -> anyhow::Result<()> {
    let config = load_config(config_path, MediaKind::Video)?;
    let pipeline = Pipeline::new(&config);
    describe(&pipeline);

    let flags = config.flags;
    if flags.preview {
        warn!("preview is not supported here; ignoring");
    }
    if flags.save_video {
        warn!("save_video is not supported here; ignoring");
    }

    let paths = media::frame_sequence(dir)?;
    info!(frames = paths.len(), dir = %dir.display(), "clip discovered");

    let mut frames = Vec::with_capacity(paths.len());
    for path in &paths {
        frames.push(media::load_frame(path)?);
    }

    let workers = if jobs == 0 { default_workers() } else { jobs };
    let transformed = reframe_core::process_clip(&pipeline, frames, workers)
        .with_context(|| format!("transforming {}", dir.display()))?;

    if !flags.save_image {
        info!(
            frames = transformed.len(),
            "save_image is off; transformed frames were not persisted"
        );
        return Ok(());
    }

    let out_dir = match output {
        Some(path) => path.to_path_buf(),
        None => media::timestamped_sibling_dir(dir)?,
    };
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    for (path, frame) in paths.iter().zip(transformed) {
        let Some(file_name) = path.file_name() else {
            bail!("frame path {} has no file name", path.display());
        };
        media::save_frame(frame, &out_dir.join(file_name))?;
    }
    info!(frames = paths.len(), output = %out_dir.display(), "clip saved");
    Ok(())
}

/// Validates the configuration and prints both resolved chains.
pub fn check(config_path: &Path) -> anyhow::Result<()> {
    let text = fs::read_to_string(config_path)
        .with_context(|| format!("reading configuration {}", config_path.display()))?;

    for kind in [MediaKind::Image, MediaKind::Video] {
        let config = PipelineConfig::from_toml_str(&text, kind)
            .with_context(|| format!("decoding [{}]", kind.section()))?;
        let pipeline = Pipeline::new(&config);

        println!("[{}]", kind.section());
        if pipeline.is_identity() {
            println!("  no operations enabled; frames pass through unchanged");
        }
        for op in pipeline.ops() {
            println!("  {op}");
        }
        if kind == MediaKind::Video {
            println!(
                "  flags: preview={} save_video={} save_image={}",
                config.flags.preview, config.flags.save_video, config.flags.save_image
            );
        }
    }
    println!("configuration ok");
    Ok(())
}

/// Writes the commented starter configuration, refusing to overwrite.
pub fn init(config_path: &Path) -> anyhow::Result<()> {
    if config_path.exists() {
        bail!(
            "{} already exists; refusing to overwrite",
            config_path.display()
        );
    }
    fs::write(config_path, reframe_core::DEFAULT_CONFIG)
        .with_context(|| format!("writing {}", config_path.display()))?;
    info!(path = %config_path.display(), "starter configuration written");
    Ok(())
}

fn load_config(path: &Path, kind: MediaKind) -> anyhow::Result<PipelineConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading configuration {}", path.display()))?;
    let config = PipelineConfig::from_toml_str(&text, kind)
        .with_context(|| format!("decoding [{}] from {}", kind.section(), path.display()))?;
    Ok(config)
}

fn describe(pipeline: &Pipeline) {
    if pipeline.is_identity() {
        debug!("no operations enabled");
        return;
    }
    for op in pipeline.ops() {
        debug!(%op, "enabled operation");
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
