use std::path::PathBuf;

/// Typed errors for runclean operations.
/// The binary uses `anyhow` at the top level, but the cleaner records
/// these per entry so reports can say exactly what went wrong where.
#[derive(Debug, thiserror::Error)]
pub enum CleanError {
    /// Removing a file, link or directory tree failed
    #[error("{source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Listing a target directory failed
    #[error("{source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is invalid
    #[error("Config error in '{}': {message}", .path.display())]
    Config { path: PathBuf, message: String },

    /// No built-in target list with this name
    #[error("Unknown preset '{name}' (expected one of: {expected})")]
    UnknownPreset { name: String, expected: String },
}

impl CleanError {
    /// True when the underlying I/O error means the path is already gone
    pub fn is_not_found(&self) -> bool {
        match self {
            CleanError::Remove { source, .. } | CleanError::ReadDir { source, .. } => {
                source.kind() == std::io::ErrorKind::NotFound
            }
            _ => false,
        }
    }
}
