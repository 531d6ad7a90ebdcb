pub mod engine;
pub mod entry;
pub mod notice;
pub mod report;

pub use engine::{clean, DirectoryCleaner};
pub use entry::{remove_entry, EntryKind, EntryOutcome, EntryRemover, Listing, StdRemover};
pub use notice::{Notice, NoticeSink, NullSink};
pub use report::{CleanReport, EntryFailure, TargetReport, TargetStatus};
