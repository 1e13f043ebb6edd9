use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::charset::{CATALOG, DensityRamp};
use crate::error::CoreError;

/// Paramètres d'une conversion, fixés à l'invocation.
///
/// Sérialisable en TOML. Les valeurs par défaut reprennent le réglage
/// historique (100 colonnes max, charset 3, inversion active, échelle 0.4).
///
/// # Example
/// ```
/// use asciify_core::config::ConvertConfig;
/// let config = ConvertConfig::default();
/// assert_eq!(config.resolution, 100);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ConvertConfig {
    /// Maximum number of characters in a row or column.
    pub resolution: u32,
    /// Index du charset actif parmi les presets du catalogue.
    pub charset_index: usize,
    /// Explicit ramp, replaces the catalog entry when set.
    pub charset: Option<String>,
    /// Si vrai, les zones claires deviennent denses.
    pub invert: bool,
    /// Row scale compensating for tall glyph cells (<1 compresses rows).
    pub vertical_scale: f64,
    /// Filtre de rééchantillonnage.
    pub filter: ResizeFilter,
}

/// Resampling filter used by both resize passes.
///
/// # Example
/// ```
/// use asciify_core::config::ResizeFilter;
/// assert_eq!(ResizeFilter::default(), ResizeFilter::Bilinear);
/// assert_eq!("lanczos3".parse::<ResizeFilter>().unwrap(), ResizeFilter::Lanczos3);
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeFilter {
    /// Nearest neighbour, no smoothing.
    Nearest,
    /// Bilinear convolution.
    #[default]
    Bilinear,
    /// Catmull-Rom bicubic convolution.
    CatmullRom,
    /// Lanczos3 convolution, sharpest.
    Lanczos3,
}

impl std::str::FromStr for ResizeFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "bilinear" => Ok(Self::Bilinear),
            "catmull-rom" | "catmullrom" | "bicubic" => Ok(Self::CatmullRom),
            "lanczos3" | "lanczos" => Ok(Self::Lanczos3),
            other => Err(CoreError::Config(format!("unknown resize filter '{other}'"))),
        }
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            resolution: 100,
            charset_index: 3,
            charset: None,
            invert: true,
            vertical_scale: 0.4,
            filter: ResizeFilter::Bilinear,
        }
    }
}

impl ConvertConfig {
    /// Check every field before any image is touched.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] for a zero resolution, an out-of-catalog
    /// `charset_index` (without explicit charset) or a bad vertical scale,
    /// and [`CoreError::EmptyCharset`] for an empty explicit charset.
    ///
    /// # Example
    /// ```
    /// use asciify_core::config::ConvertConfig;
    /// let config = ConvertConfig { resolution: 0, ..ConvertConfig::default() };
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.resolution == 0 {
            return Err(CoreError::Config("resolution must be positive".into()));
        }
        if !self.vertical_scale.is_finite() || self.vertical_scale <= 0.0 {
            return Err(CoreError::Config(format!(
                "vertical_scale must be a positive number, got {}",
                self.vertical_scale
            )));
        }
        match self.charset.as_deref() {
            Some("") => Err(CoreError::EmptyCharset),
            Some(_) => Ok(()),
            None if self.charset_index >= CATALOG.len() => Err(CoreError::Config(format!(
                "charset_index {} out of range (catalog has {} entries)",
                self.charset_index,
                CATALOG.len()
            ))),
            None => Ok(()),
        }
    }

    /// Resolve the active ramp: explicit charset first, catalog otherwise.
    ///
    /// # Errors
    /// Same conditions as [`DensityRamp::new`] and [`DensityRamp::from_catalog`].
    ///
    /// # Example
    /// ```
    /// use asciify_core::config::ConvertConfig;
    /// let config = ConvertConfig { charset: Some("AB".into()), ..ConvertConfig::default() };
    /// assert_eq!(config.ramp().unwrap().chars(), &['A', 'B']);
    /// ```
    pub fn ramp(&self) -> Result<DensityRamp, CoreError> {
        match self.charset.as_deref() {
            Some(chars) => DensityRamp::new(chars),
            None => DensityRamp::from_catalog(self.charset_index),
        }
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    convert: Option<ConvertSection>,
}

/// Convert section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct ConvertSection {
    resolution: Option<u32>,
    charset_index: Option<usize>,
    charset: Option<String>,
    invert: Option<bool>,
    vertical_scale: Option<f64>,
    filter: Option<ResizeFilter>,
}

/// Parse TOML text and merge it over the defaults.
///
/// # Errors
/// Returns an error if the text is not valid TOML for this schema.
///
/// # Example
/// ```
/// use asciify_core::config::parse_config;
/// let config = parse_config("[convert]\nresolution = 40\ninvert = false\n").unwrap();
/// assert_eq!(config.resolution, 40);
/// assert!(!config.invert);
/// assert_eq!(config.charset_index, 3);
/// ```
pub fn parse_config(content: &str) -> Result<ConvertConfig> {
    let file: ConfigFile = toml::from_str(content).context("TOML parse error")?;

    let mut config = ConvertConfig::default();

    if let Some(c) = file.convert {
        if let Some(v) = c.resolution {
            config.resolution = v;
        }
        if let Some(v) = c.charset_index {
            config.charset_index = v;
        }
        if let Some(v) = c.charset {
            config.charset = Some(v);
        }
        if let Some(v) = c.invert {
            config.invert = v;
        }
        if let Some(v) = c.vertical_scale {
            config.vertical_scale = v;
        }
        if let Some(v) = c.filter {
            config.filter = v;
        }
    }

    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// The result is not validated; call [`ConvertConfig::validate`] once CLI
/// overrides have been applied.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use asciify_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<ConvertConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let config =
        parse_config(&content).with_context(|| format!("invalid config {}", path.display()))?;
    log::debug!("config loaded from {}: {config:?}", path.display());
    Ok(config)
}
