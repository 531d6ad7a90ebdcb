//! # runclean
//!
//! Resets run working directories between prover runs.
//!
//! runclean empties a configured list of directories (by default the nine
//! `./_run_*` directories) while keeping the directories themselves. It features:
//!
//! - **Fault-Tolerant**: a failed entry is reported and skipped, never fatal
//! - **Link-Safe**: symlinks are removed, their targets are never followed
//! - **Configurable Targets**: `runclean.toml`, named presets, or `--target`
//! - **Structured Reports**: per-target counts, human or JSON output

pub mod cli;
pub mod cleaner;
pub mod common;
