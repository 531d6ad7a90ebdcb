use std::path::{Path, PathBuf};
use std::time::Instant;

use super::entry::{remove_entry, EntryOutcome, EntryRemover, StdRemover};
use super::notice::{Notice, NoticeSink};
use super::report::{CleanReport, TargetReport, TargetStatus};
use crate::common::config::Config;
use crate::common::errors::CleanError;
use crate::common::safety;

/// Empties a list of target directories, keeping the directories themselves.
///
/// Targets are processed in order, entries one at a time. Nothing that goes
/// wrong on disk aborts the run: each problem becomes a notice and a line in
/// the [`CleanReport`].
#[derive(Debug, Clone)]
pub struct DirectoryCleaner<R = StdRemover> {
    targets: Vec<PathBuf>,
    protect_home: bool,
    remover: R,
}

impl DirectoryCleaner<StdRemover> {
    pub fn new<I, P>(targets: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            targets: targets.into_iter().map(Into::into).collect(),
            protect_home: true,
            remover: StdRemover,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.target_paths()).protect_home(config.protect_home)
    }
}

impl<R: EntryRemover> DirectoryCleaner<R> {
    /// Swap the filesystem backend used for deleting entries
    pub fn with_remover<R2: EntryRemover>(self, remover: R2) -> DirectoryCleaner<R2> {
        DirectoryCleaner {
            targets: self.targets,
            protect_home: self.protect_home,
            remover,
        }
    }

    pub fn protect_home(mut self, protect: bool) -> Self {
        self.protect_home = protect;
        self
    }

    pub fn targets(&self) -> &[PathBuf] {
        &self.targets
    }

    /// Clean every target in order
    pub fn clean(&self, sink: &mut dyn NoticeSink) -> CleanReport {
        let start = Instant::now();
        let mut report = CleanReport::new();

        for target in &self.targets {
            report.targets.push(self.clean_target(target, sink));
        }

        report.duration_secs = start.elapsed().as_secs_f64();
        tracing::debug!(
            targets = report.targets.len(),
            removed = report.total_removed(),
            failed = report.total_failed(),
            "cleanup run finished"
        );
        report
    }

    /// Empty one target directory
    pub fn clean_target(&self, target: &Path, sink: &mut dyn NoticeSink) -> TargetReport {
        if !target.exists() {
            tracing::info!(dir = %target.display(), "target does not exist");
            return missing(target, sink);
        }

        if safety::is_protected(target, self.protect_home) {
            tracing::warn!(dir = %target.display(), "refusing protected target");
            sink.notice(&Notice::Protected {
                target: target.to_path_buf(),
            });
            return TargetReport::new(target.to_path_buf(), TargetStatus::Protected);
        }

        let listing = match self.remover.read_dir(target) {
            Ok(listing) => listing,
            Err(e) => {
                let error = CleanError::ReadDir {
                    path: target.to_path_buf(),
                    source: e,
                };
                // Removed between the existence check and the listing
                if error.is_not_found() {
                    return missing(target, sink);
                }
                tracing::warn!(dir = %target.display(), error = %error, "cannot list target");
                sink.notice(&Notice::Unreadable {
                    target: target.to_path_buf(),
                    detail: error.to_string(),
                });
                return TargetReport::new(
                    target.to_path_buf(),
                    TargetStatus::Unreadable {
                        error: error.to_string(),
                    },
                );
            }
        };

        let mut report = TargetReport::new(target.to_path_buf(), TargetStatus::Completed);

        for next in listing {
            let outcome = match next {
                Ok(path) => remove_entry(&self.remover, &path),
                Err(e) => {
                    let error = CleanError::ReadDir {
                        path: target.to_path_buf(),
                        source: e,
                    };
                    if error.is_not_found() {
                        continue;
                    }
                    EntryOutcome::Failed {
                        path: target.to_path_buf(),
                        kind: None,
                        error,
                    }
                }
            };

            match &outcome {
                EntryOutcome::Removed { path, kind } => {
                    tracing::debug!(path = %path.display(), ?kind, "removed")
                }
                EntryOutcome::AlreadyAbsent { path } => {
                    tracing::debug!(path = %path.display(), "already gone")
                }
                EntryOutcome::Skipped { path, kind } => {
                    tracing::debug!(path = %path.display(), ?kind, "left in place")
                }
                EntryOutcome::Failed { path, error, .. } => {
                    tracing::warn!(path = %path.display(), error = %error, "delete failed");
                    sink.notice(&Notice::EntryFailed {
                        path: path.clone(),
                        detail: error.to_string(),
                    });
                }
            }

            report.record(&outcome);
        }

        tracing::info!(
            dir = %target.display(),
            removed = report.removed,
            failed = report.failed(),
            "target processed"
        );
        sink.notice(&Notice::Completed {
            target: target.to_path_buf(),
        });
        report
    }
}

fn missing(target: &Path, sink: &mut dyn NoticeSink) -> TargetReport {
    sink.notice(&Notice::Missing {
        target: target.to_path_buf(),
    });
    TargetReport::new(target.to_path_buf(), TargetStatus::Missing)
}

/// Clean `targets` with the standard filesystem backend
pub fn clean<P: AsRef<Path>>(targets: &[P], sink: &mut dyn NoticeSink) -> CleanReport {
    DirectoryCleaner::new(targets.iter().map(|p| p.as_ref().to_path_buf())).clean(sink)
}
