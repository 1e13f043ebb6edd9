use asciify_core::charset::DensityRamp;
use asciify_core::error::CoreError;
use asciify_core::frame::{CharGrid, FrameBuffer};
use rayon::prelude::*;

/// Luminance perçue BT.601 (0.299 R + 0.587 G + 0.114 B), dans [0.0, 255.0].
///
/// Weights are applied in per-mille integers so black is exactly 0.0 and
/// white exactly 255.0. `invert` returns `255 - luminance`.
///
/// # Example
/// ```
/// use asciify_ascii::luminance::perceived_luminance;
/// assert_eq!(perceived_luminance((0, 0, 0), false), 0.0);
/// assert_eq!(perceived_luminance((255, 255, 255), false), 255.0);
/// assert_eq!(perceived_luminance((255, 255, 255), true), 0.0);
/// ```
#[inline(always)]
#[must_use]
pub fn perceived_luminance((r, g, b): (u8, u8, u8), invert: bool) -> f64 {
    let weighted = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
    let lum = f64::from(weighted) / 1000.0;
    if invert { 255.0 - lum } else { lum }
}

/// Character for one pixel.
#[inline(always)]
#[must_use]
pub fn map_pixel(pixel: (u8, u8, u8), ramp: &DensityRamp, invert: bool) -> char {
    ramp.map(perceived_luminance(pixel, invert))
}

/// Map every pixel of `frame` to a ramp character.
///
/// Rows are processed in parallel; each worker fills its own row slice, so
/// cell (row, col) always comes from pixel (row, col).
///
/// # Errors
/// Returns [`CoreError::InvalidDimensions`] if the frame has a zero dimension
/// or its buffer does not match its dimensions.
///
/// # Example
/// ```
/// use asciify_core::frame::FrameBuffer;
/// use asciify_core::charset::DensityRamp;
/// use asciify_ascii::luminance::map_frame;
///
/// let frame = FrameBuffer::from_rows(&[vec![(0, 0, 0), (255, 255, 255)]]).unwrap();
/// let ramp = DensityRamp::new(" #").unwrap();
/// let grid = map_frame(&frame, &ramp, false).unwrap();
/// assert_eq!(grid.serialize(), " #");
/// ```
pub fn map_frame(
    frame: &FrameBuffer,
    ramp: &DensityRamp,
    invert: bool,
) -> Result<CharGrid, CoreError> {
    let invalid = CoreError::InvalidDimensions {
        width: frame.width,
        height: frame.height,
    };
    let width = frame.width as usize;
    let height = frame.height as usize;
    if width == 0 || height == 0 || frame.data.len() != width * height * 3 {
        return Err(invalid);
    }

    let mut cells = vec![' '; width * height];
    cells
        .par_chunks_mut(width)
        .zip(frame.data.par_chunks(width * 3))
        .for_each(|(row, pixels)| {
            for (cell, px) in row.iter_mut().zip(pixels.chunks_exact(3)) {
                *cell = map_pixel((px[0], px[1], px[2]), ramp, invert);
            }
        });

    log::debug!(
        "mapped {}×{} pixels onto a {}-character ramp",
        frame.width,
        frame.height,
        ramp.len()
    );
    CharGrid::from_cells(frame.width, frame.height, cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: (u8, u8, u8) = (255, 255, 255);
    const BLACK: (u8, u8, u8) = (0, 0, 0);

    fn checkerboard() -> FrameBuffer {
        FrameBuffer::from_rows(&[vec![WHITE, BLACK], vec![BLACK, WHITE]]).unwrap()
    }

    #[test]
    fn luminance_weights() {
        // 0.299 × 255 = 76.245
        assert!((perceived_luminance((255, 0, 0), false) - 76.245).abs() < 1e-9);
        assert!((perceived_luminance((0, 255, 0), false) - 149.685).abs() < 1e-9);
        assert!((perceived_luminance((0, 0, 255), false) - 29.07).abs() < 1e-9);
    }

    #[test]
    fn invert_swaps_endpoints() {
        assert_eq!(perceived_luminance(BLACK, true), 255.0);
        assert_eq!(perceived_luminance(WHITE, true), 0.0);
        let gray = perceived_luminance((10, 100, 200), false);
        let inv = perceived_luminance((10, 100, 200), true);
        assert!((gray + inv - 255.0).abs() < 1e-9);
    }

    #[test]
    fn pure_black_maps_to_first_character() {
        let frame = FrameBuffer::new(5, 3);
        let ramp = DensityRamp::new("WXI=,.").unwrap();
        let grid = map_frame(&frame, &ramp, false).unwrap();
        assert_eq!((grid.width(), grid.height()), (5, 3));
        assert!(grid.rows().flatten().all(|&c| c == 'W'));
    }

    #[test]
    fn inverted_darkest_matches_brightest() {
        let ramp = DensityRamp::new("$@B%8&WM#*oahkbdpq").unwrap();
        assert_eq!(map_pixel(BLACK, &ramp, true), map_pixel(WHITE, &ramp, false));
        assert_eq!(map_pixel(WHITE, &ramp, true), map_pixel(BLACK, &ramp, false));
    }

    #[test]
    fn invert_uses_complement_luminance() {
        let ramp = DensityRamp::new("0123456789").unwrap();
        for v in (0..=255u16).step_by(5) {
            let px = (v as u8, (255 - v) as u8, (v / 2) as u8);
            let expected = ramp.map(255.0 - perceived_luminance(px, false));
            assert_eq!(map_pixel(px, &ramp, true), expected, "pixel {px:?}");
        }
    }

    #[test]
    fn checkerboard_two_char_ramp() {
        let ramp = DensityRamp::new("AB").unwrap();
        let grid = map_frame(&checkerboard(), &ramp, false).unwrap();
        assert_eq!(grid.to_rows(), vec![vec!['B', 'A'], vec!['A', 'B']]);

        let grid = map_frame(&checkerboard(), &ramp, true).unwrap();
        assert_eq!(grid.to_rows(), vec![vec!['A', 'B'], vec!['B', 'A']]);
    }

    #[test]
    fn grid_keeps_row_major_order() {
        // Each row is a different gray, each column too: order must survive the parallel scan.
        let width = 17u32;
        let height = 64u32;
        let rows: Vec<Vec<(u8, u8, u8)>> = (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| {
                        let v = ((y * 4 + x) % 256) as u8;
                        (v, v, v)
                    })
                    .collect()
            })
            .collect();
        let frame = FrameBuffer::from_rows(&rows).unwrap();
        let ramp = DensityRamp::new(asciify_core::charset::CHARSET_BOURKE).unwrap();
        let grid = map_frame(&frame, &ramp, false).unwrap();
        for y in 0..height {
            for x in 0..width {
                assert_eq!(
                    grid.get(x, y),
                    map_pixel(frame.pixel(x, y), &ramp, false),
                    "cell ({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn zero_sized_frame_is_rejected() {
        let ramp = DensityRamp::new("AB").unwrap();
        assert!(map_frame(&FrameBuffer::new(0, 4), &ramp, false).is_err());
    }
}
