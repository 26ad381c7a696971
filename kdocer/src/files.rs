//! Input path expansion for `kdocer fill`.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Expand files, directories (non-recursive) and glob patterns into the
/// Kotlin sources they name. Only files with a Kotlin extension are kept;
/// an explicit file without one is skipped with a warning.
pub fn expand(patterns: &[String], extensions: &[String]) -> Result<Vec<PathBuf>> {
    let is_source = |p: &Path| {
        p.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| extensions.iter().any(|k| k == ext))
    };

    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            if is_source(path) {
                files.push(path.to_path_buf());
            } else {
                warn!("skipping {}: not a Kotlin source file", path.display());
            }
            continue;
        }
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && is_source(p.as_path()) {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file() && is_source(p.as_path()))
            .collect();
        if matches.is_empty() {
            warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    files.sort();
    files.dedup();
    Ok(files)
}
