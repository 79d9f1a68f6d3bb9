use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use reorder_syntax::Language;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Compiled `--exclude` patterns
pub(crate) struct Excludes {
    set: GlobSet,
}

impl Excludes {
    pub(crate) fn new(patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .with_context(|| format!("Invalid exclude pattern '{pattern}'"))?;
            builder.add(glob);
        }
        let set = builder.build().context("Failed to compile exclude patterns")?;
        Ok(Self { set })
    }

    /// Matches either the whole (relative) path or just the file name
    pub(crate) fn is_excluded(&self, path: &Path) -> bool {
        if self.set.is_empty() {
            return false;
        }
        self.set.is_match(path) || path.file_name().is_some_and(|name| self.set.is_match(name))
    }
}

/// Collect Go files under `root`, sorted, honoring excludes.
///
/// A file argument is taken as-is when it is a Go file; directories are walked
/// recursively and matched relative to `root`.
pub(crate) fn discover_files(root: &Path, excludes: &Excludes) -> Result<Vec<PathBuf>> {
    let metadata = std::fs::metadata(root)
        .with_context(|| format!("Failed to access {}", root.display()))?;

    if !metadata.is_dir() {
        let keep = is_go_file(root) && !excludes.is_excluded(root);
        return Ok(if keep { vec![root.to_path_buf()] } else { Vec::new() });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() || !is_go_file(entry.path()) {
            continue;
        }
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        if excludes.is_excluded(relative) {
            log::debug!("excluded {}", entry.path().display());
            continue;
        }
        files.push(entry.into_path());
    }

    Ok(files)
}

fn is_go_file(path: &Path) -> bool {
    Language::from_path(path) == Language::Go
}
