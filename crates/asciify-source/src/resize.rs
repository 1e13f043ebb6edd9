use anyhow::{Context, Result};
use asciify_core::config::ResizeFilter;
use asciify_core::error::CoreError;
use asciify_core::frame::FrameBuffer;
use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer as FirResizer};

/// Resizer réutilisable wrappant fast_image_resize, pixels RGB.
///
/// # Example
/// ```
/// use asciify_source::resize::Resizer;
/// use asciify_core::config::ResizeFilter;
/// let r = Resizer::new(ResizeFilter::Nearest);
/// ```
pub struct Resizer {
    inner: FirResizer,
    options: ResizeOptions,
    /// Scratch image for source (owned buffer to avoid the mut borrow issue).
    src_buf: Vec<u8>,
}

impl Resizer {
    /// Create a new resizer using `filter` for every pass.
    #[must_use]
    pub fn new(filter: ResizeFilter) -> Self {
        Self {
            inner: FirResizer::new(),
            options: ResizeOptions::new().resize_alg(resize_alg(filter)),
            src_buf: Vec::new(),
        }
    }

    /// Resize `src` into `dst`. Dimensions of `dst` determine output size.
    ///
    /// # Errors
    /// Returns an error if the resize operation fails.
    ///
    /// # Example
    /// ```
    /// use asciify_source::resize::Resizer;
    /// use asciify_core::config::ResizeFilter;
    /// use asciify_core::frame::FrameBuffer;
    /// let mut r = Resizer::new(ResizeFilter::Bilinear);
    /// let src = FrameBuffer::new(100, 100);
    /// let mut dst = FrameBuffer::new(50, 20);
    /// r.resize_into(&src, &mut dst).unwrap();
    /// ```
    pub fn resize_into(&mut self, src: &FrameBuffer, dst: &mut FrameBuffer) -> Result<()> {
        if src.width == dst.width && src.height == dst.height {
            dst.data.copy_from_slice(&src.data);
            return Ok(());
        }

        // fast_image_resize wants &mut on the source buffer
        self.src_buf.clear();
        self.src_buf.extend_from_slice(&src.data);

        let src_image =
            Image::from_slice_u8(src.width, src.height, &mut self.src_buf, PixelType::U8x3)
                .context("Invalid source dimensions")?;

        let mut dst_image =
            Image::from_slice_u8(dst.width, dst.height, &mut dst.data, PixelType::U8x3)
                .context("Invalid destination dimensions")?;

        self.inner
            .resize(&src_image, &mut dst_image, Some(&self.options))
            .context("Resize failed")?;

        Ok(())
    }

    /// Resize into a freshly allocated frame of `width × height`.
    ///
    /// # Errors
    /// Returns an error if the resize operation fails.
    pub fn resize(&mut self, src: &FrameBuffer, width: u32, height: u32) -> Result<FrameBuffer> {
        let mut dst = FrameBuffer::new(width, height);
        self.resize_into(src, &mut dst)?;
        Ok(dst)
    }
}

fn resize_alg(filter: ResizeFilter) -> ResizeAlg {
    match filter {
        ResizeFilter::Nearest => ResizeAlg::Nearest,
        ResizeFilter::Bilinear => ResizeAlg::Convolution(FilterType::Bilinear),
        ResizeFilter::CatmullRom => ResizeAlg::Convolution(FilterType::CatmullRom),
        ResizeFilter::Lanczos3 => ResizeAlg::Convolution(FilterType::Lanczos3),
    }
}

/// Round a scaled dimension, never below 1.
#[inline]
fn scaled_dim(dim: u32, factor: f64) -> u32 {
    (f64::from(dim) * factor).round().max(1.0) as u32
}

/// Pass 1: `height × vertical_scale`, width unchanged.
///
/// # Example
/// ```
/// use asciify_source::resize::aspect_corrected_size;
/// assert_eq!(aspect_corrected_size(200, 100, 0.4), (200, 40));
/// assert_eq!(aspect_corrected_size(3, 1, 0.1), (3, 1));
/// ```
#[must_use]
pub fn aspect_corrected_size(width: u32, height: u32, vertical_scale: f64) -> (u32, u32) {
    (width.max(1), scaled_dim(height, vertical_scale))
}

/// Pass 2: scale both sides so the longest equals `resolution`.
///
/// # Example
/// ```
/// use asciify_source::resize::bounded_size;
/// assert_eq!(bounded_size(200, 40, 100), (100, 20));
/// assert_eq!(bounded_size(10, 30, 60), (20, 60));
/// ```
#[must_use]
pub fn bounded_size(width: u32, height: u32, resolution: u32) -> (u32, u32) {
    let scale = f64::from(resolution) / f64::from(width.max(height).max(1));
    (scaled_dim(width, scale), scaled_dim(height, scale))
}

/// Final grid geometry for a source of `width × height`.
#[must_use]
pub fn target_size(width: u32, height: u32, resolution: u32, vertical_scale: f64) -> (u32, u32) {
    let (w, h) = aspect_corrected_size(width, height, vertical_scale);
    bounded_size(w, h, resolution)
}

/// Rééchantillonne une image vers la grille de caractères.
///
/// Two sequential resizes: aspect correction on rows, then uniform bounding
/// of the longest side to `resolution`. Both output dimensions are ≥ 1.
///
/// # Errors
/// Returns [`CoreError::Config`] for a zero `resolution` or a non-finite or
/// non-positive `vertical_scale`, or an error if a resize pass fails.
///
/// # Example
/// ```
/// use asciify_source::resize::resample;
/// use asciify_core::config::ResizeFilter;
/// use asciify_core::frame::FrameBuffer;
/// let src = FrameBuffer::new(400, 300);
/// let out = resample(&src, 100, 0.5, ResizeFilter::Bilinear).unwrap();
/// assert_eq!((out.width, out.height), (100, 38));
/// ```
pub fn resample(
    src: &FrameBuffer,
    resolution: u32,
    vertical_scale: f64,
    filter: ResizeFilter,
) -> Result<FrameBuffer> {
    if resolution == 0 {
        return Err(CoreError::Config("resolution must be positive".into()).into());
    }
    if !vertical_scale.is_finite() || vertical_scale <= 0.0 {
        return Err(CoreError::Config(format!(
            "vertical_scale must be a positive number, got {vertical_scale}"
        ))
        .into());
    }

    let mut resizer = Resizer::new(filter);

    let (w, h) = aspect_corrected_size(src.width, src.height, vertical_scale);
    let corrected = resizer
        .resize(src, w, h)
        .with_context(|| format!("aspect correction to {w}×{h}"))?;

    let (w, h) = bounded_size(corrected.width, corrected.height, resolution);
    let bounded = resizer
        .resize(&corrected, w, h)
        .with_context(|| format!("bounding to {w}×{h}"))?;

    log::debug!(
        "resampled {}×{} → {}×{} → {}×{}",
        src.width,
        src.height,
        corrected.width,
        corrected.height,
        bounded.width,
        bounded.height
    );
    Ok(bounded)
}
