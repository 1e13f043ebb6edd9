use std::path::{Path, PathBuf};

use anyhow::Result;
use asciify_core::config::ConvertConfig;
use asciify_core::error::CoreError;
use clap::Parser;

pub mod cli;
pub mod output;
pub mod pipeline;

/// Config lue si aucun --config n'est fourni.
const DEFAULT_CONFIG: &str = "config/default.toml";

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config, puis les overrides CLI (validée par pipeline::run)
    let mut config = resolve_config(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    println!("Processing...");
    let timestamp = chrono::Utc::now().timestamp();
    let conversion = pipeline::run(&cli.image, &config, cli.output_dir.as_deref(), timestamp)?;

    log::info!(
        "{}×{} characters",
        conversion.grid.width(),
        conversion.grid.height()
    );
    if cli.print {
        println!("{}", conversion.text);
    }
    println!("Created ascii image in {}", conversion.path.display());
    Ok(())
}

/// Resolve config: explicit --config must exist, the default file is optional.
fn resolve_config(explicit: Option<&Path>) -> Result<ConvertConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(CoreError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        return asciify_core::config::load_config(path);
    }

    let default = PathBuf::from(DEFAULT_CONFIG);
    if default.exists() {
        asciify_core::config::load_config(&default)
    } else {
        log::info!("{DEFAULT_CONFIG} not found, using built-in defaults.");
        Ok(ConvertConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_config(Some(&dir.path().join("none.toml"))).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::FileNotFound { .. })
        ));
    }

    #[test]
    fn explicit_config_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.toml");
        std::fs::write(&path, "[convert]\ncharset_index = 1\n").unwrap();
        let config = resolve_config(Some(&path)).unwrap();
        assert_eq!(config.charset_index, 1);
    }
}
