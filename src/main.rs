use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use runclean::cleaner::DirectoryCleaner;
use runclean::cli::args::{Cli, OutputFormat};
use runclean::cli::output::{self, ConsoleSink};
use runclean::common::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    init_tracing(cli.verbose);

    let format = if cli.quiet {
        OutputFormat::Quiet
    } else {
        cli.format.clone()
    };

    let config = resolve_config(&cli)?;
    let cleaner = DirectoryCleaner::from_config(&config);

    let mut sink = ConsoleSink::new(format.clone());
    let report = cleaner.clean(&mut sink);

    // Failed entries are in the report; the exit status stays 0
    match format {
        OutputFormat::Human => output::print_summary(&report),
        OutputFormat::Json => output::print_report_json(&report)?,
        OutputFormat::Quiet => {}
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        Some(EnvFilter::new("runclean=debug"))
    } else {
        EnvFilter::try_from_default_env().ok()
    };

    if let Some(filter) = filter {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Config file first, then `--preset` or `--target` replace its targets
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;

    if let Some(ref preset) = cli.preset {
        config.apply_preset(preset)?;
    } else if !cli.target.is_empty() {
        config.targets = cli
            .target
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
    }

    tracing::debug!(targets = ?config.targets, "resolved targets");
    Ok(config)
}
