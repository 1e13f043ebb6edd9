use std::path::PathBuf;

use asciify_core::config::{ConvertConfig, ResizeFilter};
use clap::Parser;

/// asciify — convertit une image en art ASCII.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image source : PNG, JPEG, BMP ou GIF.
    pub image: PathBuf,

    /// Fichier de configuration TOML. Défaut : config/default.toml s'il existe.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Maximum number of characters in a row or column.
    #[arg(short, long)]
    pub resolution: Option<u32>,

    /// Index of the built-in character set (0-4).
    #[arg(short = 's', long)]
    pub charset_index: Option<usize>,

    /// Explicit character ramp, darkest luminance first. Overrides --charset-index.
    #[arg(long)]
    pub charset: Option<String>,

    /// Lighter parts of the image become denser characters.
    #[arg(long, overrides_with = "no_invert")]
    pub invert: bool,

    /// Darker parts of the image become denser characters.
    #[arg(long, overrides_with = "invert")]
    pub no_invert: bool,

    /// Row scale for the font's cell aspect (e.g. 0.4-0.5 for most terminals).
    #[arg(long)]
    pub vertical_scale: Option<f64>,

    /// Filtre de resize : nearest, bilinear, catmull-rom, lanczos3.
    #[arg(long)]
    pub filter: Option<ResizeFilter>,

    /// Directory for the output file. Défaut : à côté de l'image.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Afficher aussi le résultat sur stdout.
    #[arg(long, default_value_t = false)]
    pub print: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Apply command-line overrides on top of a loaded config.
    pub fn apply_overrides(&self, config: &mut ConvertConfig) {
        if let Some(v) = self.resolution {
            config.resolution = v;
        }
        if let Some(v) = self.charset_index {
            config.charset_index = v;
        }
        if let Some(ref v) = self.charset {
            config.charset = Some(v.clone());
        }
        if self.invert {
            config.invert = true;
        } else if self.no_invert {
            config.invert = false;
        }
        if let Some(v) = self.vertical_scale {
            config.vertical_scale = v;
        }
        if let Some(v) = self.filter {
            config.filter = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_only_given_fields() {
        let cli = Cli::try_parse_from([
            "asciify",
            "cat.png",
            "-r",
            "60",
            "--no-invert",
            "--filter",
            "lanczos3",
        ])
        .unwrap();
        let mut config = ConvertConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.resolution, 60);
        assert!(!config.invert);
        assert_eq!(config.filter, ResizeFilter::Lanczos3);
        assert_eq!(config.charset_index, 3);
        assert!((config.vertical_scale - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn last_invert_flag_wins() {
        let cli = Cli::try_parse_from(["asciify", "a.png", "--no-invert", "--invert"]).unwrap();
        let mut config = ConvertConfig {
            invert: false,
            ..ConvertConfig::default()
        };
        cli.apply_overrides(&mut config);
        assert!(config.invert);
    }

    #[test]
    fn no_invert_flag_keeps_config_value() {
        let cli = Cli::try_parse_from(["asciify", "a.png"]).unwrap();
        let mut config = ConvertConfig::default();
        cli.apply_overrides(&mut config);
        assert!(config.invert);
    }

    #[test]
    fn unknown_filter_is_rejected() {
        assert!(Cli::try_parse_from(["asciify", "a.png", "--filter", "box"]).is_err());
    }

    #[test]
    fn negative_resolution_is_rejected() {
        assert!(Cli::try_parse_from(["asciify", "a.png", "-r", "-5"]).is_err());
    }

    #[test]
    fn image_argument_is_required() {
        assert!(Cli::try_parse_from(["asciify"]).is_err());
    }
}
