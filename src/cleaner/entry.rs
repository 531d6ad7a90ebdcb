use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::common::errors::CleanError;

/// What an entry turned out to be when it was classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    File,
    Symlink,
    Directory,
    /// Fifo, socket, device node
    Other,
}

impl EntryKind {
    pub fn from_file_type(file_type: fs::FileType) -> Self {
        if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }
}

/// Result of one entry-deletion attempt
#[derive(Debug)]
pub enum EntryOutcome {
    /// The node (or whole subtree) is gone
    Removed { path: PathBuf, kind: EntryKind },
    /// Vanished before we got to it
    AlreadyAbsent { path: PathBuf },
    /// Not a file, link or directory; left in place
    Skipped { path: PathBuf, kind: EntryKind },
    /// Deletion failed; `kind` is unknown when classification itself failed
    Failed {
        path: PathBuf,
        kind: Option<EntryKind>,
        error: CleanError,
    },
}

/// Paths of a directory's immediate entries, in listing order
pub type Listing = Box<dyn Iterator<Item = io::Result<PathBuf>>>;

/// Filesystem operations the cleaner performs on targets and entries
pub trait EntryRemover {
    /// List the immediate entries of a target
    fn read_dir(&self, dir: &Path) -> io::Result<Listing> {
        let listing = fs::read_dir(dir)?;
        Ok(Box::new(listing.map(|entry| entry.map(|e| e.path()))))
    }

    /// Classify without following symlinks
    fn symlink_metadata(&self, path: &Path) -> io::Result<fs::Metadata> {
        fs::symlink_metadata(path)
    }

    /// Remove a single node (file or link itself)
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Remove an empty directory, or a directory symlink on Windows
    fn remove_dir(&self, path: &Path) -> io::Result<()>;

    /// Remove a directory and everything beneath it
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// Removes entries with `std::fs`
#[derive(Debug, Default, Clone, Copy)]
pub struct StdRemover;

impl EntryRemover for StdRemover {
    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir_all(path)
    }
}

/// Classify one entry and delete it.
///
/// Files and symlinks lose only the node itself; directories are removed
/// recursively. `NotFound` at any step means someone else got there first.
pub fn remove_entry<R: EntryRemover + ?Sized>(remover: &R, path: &Path) -> EntryOutcome {
    let metadata = match remover.symlink_metadata(path) {
        Ok(m) => m,
        Err(e) => return failure_or_absent(path, None, e),
    };

    let kind = EntryKind::from_file_type(metadata.file_type());
    let result = match kind {
        EntryKind::File | EntryKind::Symlink => remove_link_or_file(remover, path, &metadata),
        EntryKind::Directory => remover.remove_dir_all(path),
        EntryKind::Other => {
            return EntryOutcome::Skipped {
                path: path.to_path_buf(),
                kind,
            }
        }
    };

    match result {
        Ok(()) => EntryOutcome::Removed {
            path: path.to_path_buf(),
            kind,
        },
        Err(e) => failure_or_absent(path, Some(kind), e),
    }
}

#[cfg(windows)]
fn remove_link_or_file<R: EntryRemover + ?Sized>(
    remover: &R,
    path: &Path,
    metadata: &fs::Metadata,
) -> io::Result<()> {
    use std::os::windows::fs::FileTypeExt;
    // Directory symlinks and junctions are removed like empty directories
    if metadata.file_type().is_symlink_dir() {
        remover.remove_dir(path)
    } else {
        remover.remove_file(path)
    }
}

#[cfg(not(windows))]
fn remove_link_or_file<R: EntryRemover + ?Sized>(
    remover: &R,
    path: &Path,
    _metadata: &fs::Metadata,
) -> io::Result<()> {
    remover.remove_file(path)
}

fn failure_or_absent(path: &Path, kind: Option<EntryKind>, error: io::Error) -> EntryOutcome {
    if error.kind() == io::ErrorKind::NotFound {
        EntryOutcome::AlreadyAbsent {
            path: path.to_path_buf(),
        }
    } else {
        EntryOutcome::Failed {
            path: path.to_path_buf(),
            kind,
            error: CleanError::Remove {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}
