use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// runclean — empties run working directories between runs
#[derive(Parser, Debug)]
#[command(
    name = "runclean",
    version,
    about = "Empties run working directories between runs",
    long_about = "runclean removes every file, symlink and subdirectory inside each\n\
                   configured target directory, keeping the directories themselves.\n\
                   Failed entries are reported and skipped; the run always finishes.",
    after_help = "EXAMPLES:\n  \
        runclean                               Clean all ./_run_* directories\n  \
        runclean --preset default              Clean only ./_run_default\n  \
        runclean --target build/tmp            Clean an explicit directory\n  \
        runclean --config ci.toml              Use targets from a config file\n  \
        runclean --format json                 Machine-readable report"
)]
pub struct Cli {
    /// Config file (defaults to ./runclean.toml when present)
    #[arg(long, short, value_name = "FILE", env = "RUNCLEAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Built-in target list to use instead of the configured one
    #[arg(long, value_name = "NAME", conflicts_with = "target")]
    pub preset: Option<String>,

    /// Directory to clean (repeatable); replaces the configured targets
    #[arg(long = "target", short, value_name = "DIR")]
    pub target: Vec<PathBuf>,

    /// Output format
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbose output
    #[arg(long, short)]
    pub verbose: bool,

    /// Quiet mode — only errors
    #[arg(long, short)]
    pub quiet: bool,
}

#[derive(Debug, Clone, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Quiet,
}
