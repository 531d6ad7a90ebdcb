use std::fmt;
use std::path::PathBuf;

/// A human-readable status line about a target or entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The target directory was not there at check time
    Missing { target: PathBuf },
    /// The target is a path runclean refuses to empty
    Protected { target: PathBuf },
    /// The target exists but its listing could not be opened
    Unreadable { target: PathBuf, detail: String },
    /// One entry could not be deleted
    EntryFailed { path: PathBuf, detail: String },
    /// Iteration over the target finished (not a promise it is empty)
    Completed { target: PathBuf },
}

impl Notice {
    /// Error notices go to the error sink
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Notice::Protected { .. } | Notice::Unreadable { .. } | Notice::EntryFailed { .. }
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Missing { target } => write!(f, "{} does not exist", target.display()),
            Notice::Protected { target } => {
                write!(f, "Refusing to clean protected path: {}", target.display())
            }
            Notice::Unreadable { target, detail } => {
                write!(f, "Error reading {}: {}", target.display(), detail)
            }
            Notice::EntryFailed { path, detail } => {
                write!(f, "Error deleting {}: {}", path.display(), detail)
            }
            Notice::Completed { target } => write!(
                f,
                "All files in '{}' have been deleted.",
                target.display()
            ),
        }
    }
}

/// Receives notices in the order the cleaner emits them
pub trait NoticeSink {
    fn notice(&mut self, notice: &Notice);
}

/// Collects notices in memory
impl NoticeSink for Vec<Notice> {
    fn notice(&mut self, notice: &Notice) {
        self.push(notice.clone());
    }
}

/// Drops every notice
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl NoticeSink for NullSink {
    fn notice(&mut self, _notice: &Notice) {}
}
