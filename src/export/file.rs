//! Writing converted output to disk.
//!
//! The conversion core never picks paths; these helpers are what the CLI uses when asked to
//! auto-name files in a directory.

use std::io::Write;
use std::path::{Path, PathBuf};

use glob::Pattern;
use tempfile::NamedTempFile;

use crate::error::ConvertResult;

/// Prefix of auto-named output files (`Precip_1.txt`, `Precip_2.txt`, ...).
pub const OUTPUT_PREFIX: &str = "Precip";
/// Prefix used when the counted name is already taken (`CONCAT_1.txt`, ...).
pub const COLLISION_PREFIX: &str = "CONCAT";
/// Extension of auto-named output files.
pub const OUTPUT_EXTENSION: &str = "txt";

/// Choose a fresh output path inside `dir`.
///
/// The candidate is `Precip_{n}.txt` where `n` is one more than the number of `Precip*.txt`
/// files already in `dir`. If that name exists (for example after a file was deleted), the
/// first free `CONCAT_{k}.txt` is used instead.
pub fn next_output_path(dir: impl AsRef<Path>) -> ConvertResult<PathBuf> {
    let dir = dir.as_ref();
    let pattern = format!(
        "{}/{OUTPUT_PREFIX}*.{OUTPUT_EXTENSION}",
        Pattern::escape(&dir.to_string_lossy())
    );
    let existing = glob::glob(&pattern)?.filter_map(Result::ok).count();

    let candidate = dir.join(format!("{OUTPUT_PREFIX}_{}.{OUTPUT_EXTENSION}", existing + 1));
    if !candidate.exists() {
        return Ok(candidate);
    }

    let mut counter = 1usize;
    loop {
        let fallback = dir.join(format!("{COLLISION_PREFIX}_{counter}.{OUTPUT_EXTENSION}"));
        if !fallback.exists() {
            return Ok(fallback);
        }
        counter += 1;
    }
}

/// Write `content` to `path` in one shot.
///
/// Data goes to a temporary file in the destination directory which is then renamed over
/// `path`, so readers never observe a half-written file.
pub fn write_output(path: impl AsRef<Path>, content: &str) -> ConvertResult<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    tracing::info!(path = %path.display(), bytes = content.len(), "wrote sql values");
    Ok(())
}
