use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Nombre max de suffixes essayés avant d'abandonner.
const MAX_COLLISIONS: u32 = 1000;

/// `{stem}_{timestamp}.txt`, next to the input unless `output_dir` is given.
///
/// `attempt > 0` appends `_{attempt}` to keep the name unique.
#[must_use]
pub fn output_path(
    input: &Path,
    output_dir: Option<&Path>,
    timestamp: i64,
    attempt: u32,
) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("ascii");
    let name = if attempt == 0 {
        format!("{stem}_{timestamp}.txt")
    } else {
        format!("{stem}_{timestamp}_{attempt}.txt")
    };
    let dir = output_dir.or_else(|| input.parent()).unwrap_or(Path::new(""));
    dir.join(name)
}

/// Write `text` to a fresh output file and return its path.
///
/// Never overwrites: an existing name gets a numeric suffix.
///
/// # Errors
/// Returns an error if the directory is not writable or no free name is found.
pub fn write_output(
    input: &Path,
    output_dir: Option<&Path>,
    timestamp: i64,
    text: &str,
) -> Result<PathBuf> {
    for attempt in 0..MAX_COLLISIONS {
        let path = output_path(input, output_dir, timestamp, attempt);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => {
                write_or_remove(file, &path, text)?;
                log::info!("wrote {} bytes to {}", text.len(), path.display());
                return Ok(path);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                log::debug!("{} exists, trying next suffix", path.display());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("cannot create {}", path.display()));
            }
        }
    }
    anyhow::bail!(
        "no free output name for {} after {MAX_COLLISIONS} attempts",
        input.display()
    )
}

/// Write all of `text`; on failure the partial file at `path` is removed.
fn write_or_remove<W: Write>(mut writer: W, path: &Path, text: &str) -> Result<()> {
    let written = writer
        .write_all(text.as_bytes())
        .and_then(|()| writer.flush());
    drop(writer);
    if let Err(e) = written {
        if let Err(rm) = std::fs::remove_file(path) {
            log::warn!("cannot remove partial {}: {rm}", path.display());
        }
        return Err(e).with_context(|| format!("cannot write {}", path.display()));
    }
    Ok(())
}
