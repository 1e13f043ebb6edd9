use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use asciify_ascii::luminance::map_frame;
use asciify_core::config::ConvertConfig;
use asciify_core::frame::{CharGrid, FrameBuffer};
use asciify_source::image::load_image;
use asciify_source::resize::resample;

use crate::output::write_output;

/// Résultat d'une conversion écrite sur disque.
#[derive(Debug)]
pub struct Conversion {
    /// Output file path.
    pub path: PathBuf,
    /// Serialized art, as written to `path`.
    pub text: String,
    /// Grid the text was serialized from.
    pub grid: CharGrid,
}

/// Resample a decoded frame and map it onto the configured ramp.
///
/// The config is expected to be validated already, as [`run`] does.
///
/// # Errors
/// Returns an error if the ramp cannot be built or resampling fails.
pub fn convert_frame(frame: &FrameBuffer, config: &ConvertConfig) -> Result<CharGrid> {
    let ramp = config.ramp()?;
    log::debug!(
        "ramp {:?} ({} chars), invert={}",
        ramp.chars().iter().collect::<String>(),
        ramp.len(),
        config.invert
    );

    let resized = resample(frame, config.resolution, config.vertical_scale, config.filter)?;
    let grid = map_frame(&resized, &ramp, config.invert)?;
    Ok(grid)
}

/// Load → resample → map → serialize → write.
///
/// The config is validated before the image is opened, and the output file
/// is only created once the text is complete.
///
/// # Errors
/// Returns an error naming the invalid config value, the unreadable image,
/// or the output path that could not be written.
pub fn run(
    image_path: &Path,
    config: &ConvertConfig,
    output_dir: Option<&Path>,
    timestamp: i64,
) -> Result<Conversion> {
    config.validate().context("invalid configuration")?;

    let frame = load_image(image_path)?;
    log::info!(
        "loaded {} ({}×{})",
        image_path.display(),
        frame.width,
        frame.height
    );

    let grid = convert_frame(&frame, config)?;
    let text = grid.serialize();
    log::info!("grid {}×{}", grid.width(), grid.height());

    let path = write_output(image_path, output_dir, timestamp, &text)?;
    Ok(Conversion { path, text, grid })
}
