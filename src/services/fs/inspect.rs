use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// What a single inspection of a path reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inspected {
    Directory,
    File { size: u64 },
}

/// Read-only view of a filesystem. Each operation can fail on its own and
/// the tree builder decides what a failure means for the tree.
pub trait Inspector {
    fn inspect(&self, path: &Path) -> io::Result<Inspected>;

    /// Raw names of the immediate entries of a directory, in any order.
    fn list(&self, path: &Path) -> io::Result<Vec<OsString>>;

    /// Resolved location used to detect directory cycles.
    fn real_path(&self, path: &Path) -> io::Result<PathBuf> {
        Ok(path.to_path_buf())
    }
}

/// [`Inspector`] backed by `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct FsInspector {
    follow_symlinks: bool,
}

impl FsInspector {
    pub fn new(follow_symlinks: bool) -> Self {
        Self { follow_symlinks }
    }
}

impl Default for FsInspector {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Inspector for FsInspector {
    fn inspect(&self, path: &Path) -> io::Result<Inspected> {
        let md = if self.follow_symlinks {
            fs::metadata(path)?
        } else {
            fs::symlink_metadata(path)?
        };
        if md.is_dir() {
            Ok(Inspected::Directory)
        } else {
            Ok(Inspected::File { size: md.len() })
        }
    }

    fn list(&self, path: &Path) -> io::Result<Vec<OsString>> {
        let entries = readable_entries(path, fs::read_dir(path)?);
        Ok(entries.into_iter().map(|e| e.file_name()).collect())
    }

    fn real_path(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }
}

/// Drops entries that fail mid-listing; their siblings are kept.
fn readable_entries<T>(dir: &Path, entries: impl IntoIterator<Item = io::Result<T>>) -> Vec<T> {
    entries
        .into_iter()
        .filter_map(|entry| {
            entry
                .inspect_err(|e| debug!(path = %dir.display(), error = %e, "skipping entry"))
                .ok()
        })
        .collect()
}
