// Best-effort filesystem search used only after an executable failed to launch.
// Walks an entire drive, so it must never run on a success path.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// First ancestor of `path` (the drive root on Windows, `/` elsewhere)
pub fn drive_root(path: &Path) -> PathBuf {
    path.ancestors()
        .last()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| path.to_path_buf())
}

/// Collect up to `limit` files under `root` named `file_name`.
/// Unreadable directories are skipped silently.
pub fn scan_for_file(root: &Path, file_name: &str, limit: usize) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| names_match(&entry.file_name().to_string_lossy(), file_name))
        .map(|entry| entry.into_path())
        .take(limit)
        .collect()
}

fn names_match(candidate: &str, wanted: &str) -> bool {
    if cfg!(windows) {
        candidate.eq_ignore_ascii_case(wanted)
    } else {
        candidate == wanted
    }
}
