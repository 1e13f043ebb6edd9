use crate::error::CoreError;

/// 70 characters, Paul Bourke's ramp (dense → light).
pub const CHARSET_BOURKE: &str =
    "$@B%8&WM#*oahkbdpqwmZO0QLCJUYXzcvunxrjft/\\|()1{}[]?-_+~<>i!lI;:,\"^`'.";

/// 8 characters, letter weights down to a blank.
pub const CHARSET_LETTERS: &str = "WKli:,. ";

/// 7 characters, soft symbols.
pub const CHARSET_SOFT: &str = "WXx=*°'";

/// 6 characters, high contrast.
pub const CHARSET_CONTRAST: &str = "WXI=,.";

/// 8 characters, digits and strokes down to a blank.
pub const CHARSET_STROKES: &str = "W6O/=-. ";

/// Built-in ramps, selected by `charset_index`.
///
/// Index 0 of each ramp is chosen for the darkest luminance.
pub const CATALOG: &[&str] = &[
    CHARSET_BOURKE,
    CHARSET_LETTERS,
    CHARSET_SOFT,
    CHARSET_CONTRAST,
    CHARSET_STROKES,
];

/// Look up a catalog ramp by index.
///
/// # Errors
/// Returns [`CoreError::Config`] if `index` is outside the catalog.
///
/// # Example
/// ```
/// use asciify_core::charset::{catalog_entry, CHARSET_CONTRAST};
/// assert_eq!(catalog_entry(3).unwrap(), CHARSET_CONTRAST);
/// assert!(catalog_entry(99).is_err());
/// ```
pub fn catalog_entry(index: usize) -> Result<&'static str, CoreError> {
    CATALOG.get(index).copied().ok_or_else(|| {
        CoreError::Config(format!(
            "charset_index {index} out of range (catalog has {} entries)",
            CATALOG.len()
        ))
    })
}

/// Ordered character ramp mapping luminance [0.0, 255.0] → character.
///
/// The index is `floor(luminance / 256 × N)`, clamped to `0..N`, so luminance
/// 0 selects the first character and 255 the last one.
///
/// # Example
/// ```
/// use asciify_core::charset::DensityRamp;
/// let ramp = DensityRamp::new("AB").unwrap();
/// assert_eq!(ramp.map(0.0), 'A');
/// assert_eq!(ramp.map(255.0), 'B');
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DensityRamp {
    chars: Vec<char>,
}

impl DensityRamp {
    /// Build a ramp from a string, first character = darkest luminance.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyCharset`] if `charset` has no characters.
    pub fn new(charset: &str) -> Result<Self, CoreError> {
        let chars: Vec<char> = charset.chars().collect();
        if chars.is_empty() {
            return Err(CoreError::EmptyCharset);
        }
        Ok(Self { chars })
    }

    /// Ramp for a catalog index.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] if `index` is outside the catalog.
    pub fn from_catalog(index: usize) -> Result<Self, CoreError> {
        Self::new(catalog_entry(index)?)
    }

    /// Number of characters in the ramp.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false; construction rejects empty ramps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Characters in ramp order.
    #[must_use]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Ramp index for a luminance value.
    ///
    /// Values outside [0.0, 255.0] (and NaN) are clamped onto the ramp ends.
    ///
    /// # Example
    /// ```
    /// use asciify_core::charset::DensityRamp;
    /// let ramp = DensityRamp::new("0123").unwrap();
    /// assert_eq!(ramp.index_for(0.0), 0);
    /// assert_eq!(ramp.index_for(127.0), 1);
    /// assert_eq!(ramp.index_for(128.0), 2);
    /// assert_eq!(ramp.index_for(255.0), 3);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn index_for(&self, luminance: f64) -> usize {
        let last = self.chars.len() - 1;
        let scaled = (luminance / 256.0 * self.chars.len() as f64).floor();
        if scaled.is_nan() || scaled <= 0.0 {
            0
        } else {
            (scaled as usize).min(last)
        }
    }

    /// Map a luminance value to its ramp character.
    #[inline(always)]
    #[must_use]
    pub fn map(&self, luminance: f64) -> char {
        self.chars[self.index_for(luminance)]
    }
}
