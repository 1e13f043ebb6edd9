use std::fmt;

use crate::error::CoreError;

/// Image RGB immuable. Chaque resize produit un nouveau buffer.
///
/// Stocke les pixels en RGB row-major, 3 bytes par pixel.
///
/// # Example
/// ```
/// use asciify_core::frame::FrameBuffer;
/// let fb = FrameBuffer::new(10, 10);
/// assert_eq!(fb.data.len(), 300);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    /// Pixels RGB, row-major, 3 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Crée un buffer noir aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use asciify_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(100, 50);
    /// assert_eq!(fb.width, 100);
    /// assert_eq!(fb.height, 50);
    /// assert_eq!(fb.data.len(), 100 * 50 * 3);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 3],
            width,
            height,
        }
    }

    /// Wrap raw RGB bytes.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if a dimension is zero or
    /// `data` does not hold exactly `width × height × 3` bytes.
    ///
    /// # Example
    /// ```
    /// use asciify_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::from_raw(1, 2, vec![0, 0, 0, 255, 255, 255]).unwrap();
    /// assert_eq!(fb.pixel(0, 1), (255, 255, 255));
    /// assert!(FrameBuffer::from_raw(2, 2, vec![0; 3]).is_err());
    /// ```
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CoreError> {
        if width == 0 || height == 0 || data.len() != width as usize * height as usize * 3 {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Build a buffer from rows of `(r, g, b)` pixels, top to bottom.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if there are no rows, a row is
    /// empty, or rows have different lengths.
    ///
    /// # Example
    /// ```
    /// use asciify_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::from_rows(&[vec![(255, 0, 0), (0, 0, 255)]]).unwrap();
    /// assert_eq!((fb.width, fb.height), (2, 1));
    /// assert_eq!(fb.pixel(1, 0), (0, 0, 255));
    /// ```
    pub fn from_rows(rows: &[Vec<(u8, u8, u8)>]) -> Result<Self, CoreError> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, Vec::len) as u32;
        if rows.iter().any(|row| row.len() as u32 != width) {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        let data = rows
            .iter()
            .flatten()
            .flat_map(|&(r, g, b)| [r, g, b])
            .collect();
        Self::from_raw(width, height, data)
    }

    /// Accès au pixel (x, y) → (r, g, b).
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        (self.data[idx], self.data[idx + 1], self.data[idx + 2])
    }
}

/// Grille de caractères, row-major, mêmes dimensions que l'image rééchantillonnée.
///
/// Construite une fois, jamais modifiée ensuite.
///
/// # Example
/// ```
/// use asciify_core::frame::CharGrid;
/// let grid = CharGrid::from_cells(2, 2, vec!['A', 'B', 'B', 'A']).unwrap();
/// assert_eq!(grid.get(1, 0), 'B');
/// assert_eq!(grid.serialize(), "AB\nBA");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharGrid {
    cells: Vec<char>,
    width: u32,
    height: u32,
}

impl CharGrid {
    /// Wrap row-major cells.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if a dimension is zero or
    /// `cells.len() != width × height`.
    pub fn from_cells(width: u32, height: u32, cells: Vec<char>) -> Result<Self, CoreError> {
        if width == 0 || height == 0 || cells.len() != width as usize * height as usize {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Width in characters.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in characters.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Character at column `x`, row `y`.
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> char {
        self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Rows top to bottom, each left to right.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[char]> {
        self.cells.chunks_exact(self.width as usize)
    }

    /// Rows as owned vectors.
    ///
    /// # Example
    /// ```
    /// use asciify_core::frame::CharGrid;
    /// let grid = CharGrid::from_cells(1, 2, vec!['x', 'y']).unwrap();
    /// assert_eq!(grid.to_rows(), vec![vec!['x'], vec!['y']]);
    /// ```
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<char>> {
        self.rows().map(<[char]>::to_vec).collect()
    }

    /// Rows joined by `\n`, no separator between characters, no trailing newline.
    #[must_use]
    pub fn serialize(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CharGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for &ch in row {
                fmt::Write::write_char(f, ch)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_rejects_zero_dimensions() {
        assert_eq!(
            FrameBuffer::from_raw(0, 3, Vec::new()),
            Err(CoreError::InvalidDimensions {
                width: 0,
                height: 3
            })
        );
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        let rows = vec![vec![(0, 0, 0), (1, 1, 1)], vec![(2, 2, 2)]];
        assert!(FrameBuffer::from_rows(&rows).is_err());
        assert!(FrameBuffer::from_rows(&[]).is_err());
    }

    #[test]
    fn pixels_are_row_major() {
        let fb = FrameBuffer::from_rows(&[
            vec![(1, 2, 3), (4, 5, 6)],
            vec![(7, 8, 9), (10, 11, 12)],
        ])
        .unwrap();
        assert_eq!(fb.pixel(1, 0), (4, 5, 6));
        assert_eq!(fb.pixel(0, 1), (7, 8, 9));
        assert_eq!(fb.data[6..], [7, 8, 9, 10, 11, 12]);
    }

    #[test]
    fn grid_rejects_mismatched_cells() {
        assert!(CharGrid::from_cells(2, 2, vec!['a'; 3]).is_err());
        assert!(CharGrid::from_cells(0, 0, Vec::new()).is_err());
    }

    #[test]
    fn serialize_has_no_trailing_newline() {
        let grid = CharGrid::from_cells(3, 2, "abcdef".chars().collect()).unwrap();
        assert_eq!(grid.serialize(), "abc\ndef");
        assert_eq!(grid.rows().len(), 2);
    }

    #[test]
    fn serialize_is_deterministic() {
        let grid = CharGrid::from_cells(2, 3, "W°.W°.".chars().collect()).unwrap();
        let first = grid.serialize();
        let second = grid.serialize();
        assert_eq!(first.as_bytes(), second.as_bytes());
        assert_eq!(first, "W°\n.W\n°.");
    }

    #[test]
    fn single_row_grid() {
        let grid = CharGrid::from_cells(4, 1, vec!['#'; 4]).unwrap();
        assert_eq!(grid.serialize(), "####");
        assert_eq!(grid.get(3, 0), '#');
    }
}
