use std::path::Path;

use anyhow::{Context, Result};
use asciify_core::error::CoreError;
use asciify_core::frame::FrameBuffer;

/// Charge une image depuis le disque en RGB 8 bits.
///
/// Alpha and extra channels are dropped; grayscale sources are expanded.
///
/// # Errors
/// Returns [`CoreError::FileNotFound`] if `path` does not exist, or an
/// error naming the path if the file cannot be decoded.
///
/// # Example
/// ```no_run
/// use asciify_source::image::load_image;
/// use std::path::Path;
/// let frame = load_image(Path::new("mona_lisa.jpg")).unwrap();
/// ```
pub fn load_image(path: &Path) -> Result<FrameBuffer> {
    if !path.exists() {
        return Err(CoreError::FileNotFound {
            path: path.display().to_string(),
        }
        .into());
    }
    let img = image::open(path).with_context(|| format!("cannot decode {}", path.display()))?;
    let frame = frame_from_image(&img)
        .with_context(|| format!("unusable image {}", path.display()))?;
    log::debug!(
        "loaded {} ({}×{})",
        path.display(),
        frame.width,
        frame.height
    );
    Ok(frame)
}

/// Flatten any decoded image into an RGB frame.
fn frame_from_image(img: &image::DynamicImage) -> Result<FrameBuffer, CoreError> {
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    FrameBuffer::from_raw(width, height, rgb.into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};

    #[test]
    fn load_png_drops_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixel.png");
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([10, 20, 30, 0]));
        img.put_pixel(1, 0, Rgba([255, 255, 255, 255]));
        img.save_with_format(&path, ImageFormat::Png).unwrap();

        let frame = load_image(&path).unwrap();
        assert_eq!((frame.width, frame.height), (2, 1));
        assert_eq!(frame.data.len(), 6);
        assert_eq!(frame.pixel(0, 0), (10, 20, 30));
        assert_eq!(frame.pixel(1, 0), (255, 255, 255));
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_image(&dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::FileNotFound { .. })
        ));
    }

    #[test]
    fn garbage_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        let err = load_image(&path).unwrap_err();
        assert!(err.to_string().contains("fake.png"));
    }

    #[test]
    fn grayscale_is_expanded_to_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        image::GrayImage::from_pixel(3, 2, image::Luma([128]))
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();
        let frame = load_image(&path).unwrap();
        assert_eq!((frame.width, frame.height), (3, 2));
        assert_eq!(frame.pixel(2, 1), (128, 128, 128));
    }
}
