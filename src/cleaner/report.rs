use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

use super::entry::{EntryKind, EntryOutcome};

/// How processing of a target ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum TargetStatus {
    /// Not there at check time; nothing touched
    Missing,
    /// Refused; nothing touched
    Protected,
    /// Listing could not be opened; nothing touched
    Unreadable { error: String },
    /// Every entry was attempted
    Completed,
}

/// An entry that could not be deleted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryFailure {
    pub path: PathBuf,
    /// Absent when the entry could not even be classified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<EntryKind>,
    pub error: String,
}

/// Outcome of cleaning one target
#[derive(Debug, Clone, Serialize)]
pub struct TargetReport {
    pub target: PathBuf,
    #[serde(flatten)]
    pub status: TargetStatus,
    pub removed: usize,
    pub already_absent: usize,
    pub skipped: usize,
    pub failures: Vec<EntryFailure>,
}

impl TargetReport {
    pub fn new(target: PathBuf, status: TargetStatus) -> Self {
        Self {
            target,
            status,
            removed: 0,
            already_absent: 0,
            skipped: 0,
            failures: Vec::new(),
        }
    }

    /// Fold one entry outcome into the counts
    pub fn record(&mut self, outcome: &EntryOutcome) {
        match outcome {
            EntryOutcome::Removed { .. } => self.removed += 1,
            EntryOutcome::AlreadyAbsent { .. } => self.already_absent += 1,
            EntryOutcome::Skipped { .. } => self.skipped += 1,
            EntryOutcome::Failed { path, kind, error } => self.failures.push(EntryFailure {
                path: path.clone(),
                kind: *kind,
                error: error.to_string(),
            }),
        }
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Entries seen while iterating
    pub fn attempted(&self) -> usize {
        self.removed + self.already_absent + self.skipped + self.failed()
    }

    /// Completed with no failed or skipped entry
    pub fn is_clean(&self) -> bool {
        self.status == TargetStatus::Completed && self.failures.is_empty() && self.skipped == 0
    }
}

/// Report from a whole cleanup run
#[derive(Debug, Clone, Serialize)]
pub struct CleanReport {
    /// When the run started
    pub started_at: DateTime<Utc>,
    pub duration_secs: f64,
    pub targets: Vec<TargetReport>,
}

impl CleanReport {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            duration_secs: 0.0,
            targets: Vec::new(),
        }
    }

    pub fn total_removed(&self) -> usize {
        self.targets.iter().map(|t| t.removed).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.targets.iter().map(|t| t.failed()).sum()
    }

    pub fn total_skipped(&self) -> usize {
        self.targets.iter().map(|t| t.skipped).sum()
    }

    pub fn completed_targets(&self) -> usize {
        self.count_status(|s| *s == TargetStatus::Completed)
    }

    pub fn missing_targets(&self) -> usize {
        self.count_status(|s| *s == TargetStatus::Missing)
    }

    fn count_status(&self, pred: impl Fn(&TargetStatus) -> bool) -> usize {
        self.targets.iter().filter(|t| pred(&t.status)).count()
    }
}

impl Default for CleanReport {
    fn default() -> Self {
        Self::new()
    }
}
