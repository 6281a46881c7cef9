use crate::config::absolute_path;
use anyhow::Result;
use std::cmp::Ordering;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

const JSON_EXTENSION: &str = ".json";

/// Collects every `*.json` file under `root`, recursively, as absolute paths.
///
/// Within each directory its own files come first, sorted by name, followed
/// by its subdirectories in name order.
pub fn collect_json_files(root: &Path) -> Result<Vec<PathBuf>> {
    let root = absolute_path(root)?;
    if !root.is_dir() {
        warn!("Data directory {} does not exist", root.display());
        return Ok(Vec::new());
    }

    let walker = WalkDir::new(&root).sort_by(files_before_directories);

    let mut files = Vec::new();
    for entry in walker {
        match entry {
            Ok(entry) => {
                // path().is_file() follows symlinks; symlinked directories are
                // still not descended into.
                if is_json_file_name(entry.file_name()) && entry.path().is_file() {
                    files.push(entry.into_path());
                }
            }
            Err(e) => warn!("Skipping unreadable entry under {}: {}", root.display(), e),
        }
    }

    if files.is_empty() {
        warn!("No {} files found in {}", JSON_EXTENSION, root.display());
    }
    Ok(files)
}

fn files_before_directories(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

/// Shell-glob semantics of `*.json`: case-sensitive, and `*` does not match
/// a leading dot.
fn is_json_file_name(name: &OsStr) -> bool {
    name.to_str()
        .map(|name| name.ends_with(JSON_EXTENSION) && !name.starts_with('.'))
        .unwrap_or(false)
}
