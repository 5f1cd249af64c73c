use std::io::Write;

use anyhow::{anyhow, Context};
use colored::Colorize;
use tracing::debug;
use trimerge_merge::merge_files;

use crate::cli::Cli;
use crate::config::CliConfig;

/// Merge the three files named on the command line.
///
/// Returns the number of conflicts left in the output.
pub fn run_merge(cli: &Cli) -> anyhow::Result<usize> {
    let config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    let options = config.into_options(cli)?;
    debug!(?options, "merge options");

    let mut result = merge_files(&cli.base, &cli.current, &cli.other, &options)
        .with_context(|| format!("merging into '{}'", cli.current.display()))?;
    let buffer = result
        .take_data()
        .ok_or_else(|| anyhow!("nothing was merged into '{}'", cli.current.display()))?;

    if cli.stdout {
        let mut out = std::io::stdout().lock();
        out.write_all(buffer.as_bytes())?;
        out.flush()?;
    } else {
        std::fs::write(&cli.current, buffer.as_bytes())
            .with_context(|| format!("writing '{}'", cli.current.display()))?;
    }

    if result.conflicts > 0 && !cli.quiet {
        eprintln!(
            "{} {} conflict{} in {}",
            "warning:".yellow().bold(),
            result.conflicts,
            if result.conflicts == 1 { "" } else { "s" },
            cli.current.display().to_string().bold(),
        );
    }

    Ok(result.conflicts)
}
