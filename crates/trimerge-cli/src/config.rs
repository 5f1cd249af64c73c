use std::path::Path;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use trimerge_merge::MergeFileOptions;

use crate::cli::Cli;

/// Contents of a `--config` file.
///
/// ```toml
/// [options]
/// our_label = "mine"
/// favor = "union"
///
/// [options.flags]
/// style_diff3 = true
/// ```
#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub options: MergeFileOptions,
}

impl CliConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config '{}'", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config '{}'", path.display()))
    }

    /// Overlay the command-line flags on the configured options.
    ///
    /// Flags only ever switch things on; an unset flag keeps the configured
    /// value.
    pub fn into_options(self, cli: &Cli) -> anyhow::Result<MergeFileOptions> {
        let mut options = self.options;

        if cli.labels.len() > 3 {
            bail!("too many labels: {} given, at most 3 allowed", cli.labels.len());
        }
        let mut labels = cli.labels.iter().cloned();
        if let Some(label) = labels.next() {
            options.our_label = Some(label);
        }
        if let Some(label) = labels.next() {
            options.ancestor_label = Some(label);
        }
        if let Some(label) = labels.next() {
            options.their_label = Some(label);
        }

        if let Some(favor) = cli.favor() {
            options.favor = favor;
        }
        options.flags.style_diff3 |= cli.diff3;
        options.flags.simplify_alnum |= cli.zealous_alnum;

        Ok(options)
    }
}
