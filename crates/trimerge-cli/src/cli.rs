use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use trimerge_merge::MergeFavor;

#[derive(Parser, Debug)]
#[command(
    name = "trimerge",
    about = "Three-way file merge",
    long_about = "Incorporates the changes that lead from BASE to OTHER into CURRENT.\n\
                  The exit status is the number of conflicts (at most 127), or 255 on error.",
    version,
    group(ArgGroup::new("favor").args(["ours", "theirs", "union"])),
)]
pub struct Cli {
    /// Our version; overwritten with the result unless --stdout is given
    pub current: PathBuf,
    /// Common ancestor of CURRENT and OTHER
    pub base: PathBuf,
    /// Their version
    pub other: PathBuf,

    /// Conflict labels for CURRENT, BASE and OTHER, in that order
    #[arg(short = 'L', value_name = "LABEL")]
    pub labels: Vec<String>,

    /// Print the result instead of writing it to CURRENT
    #[arg(short = 'p', long)]
    pub stdout: bool,

    /// Do not warn about conflicts
    #[arg(short, long)]
    pub quiet: bool,

    /// Show the BASE text inside conflicts
    #[arg(long)]
    pub diff3: bool,

    /// Also join conflicts separated only by lines without letters or digits
    #[arg(long)]
    pub zealous_alnum: bool,

    /// Resolve conflicts with our side
    #[arg(long)]
    pub ours: bool,
    /// Resolve conflicts with their side
    #[arg(long)]
    pub theirs: bool,
    /// Resolve conflicts with both sides, ours first
    #[arg(long)]
    pub union: bool,

    /// TOML file with default merge options
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The favor selected on the command line, if any.
    pub fn favor(&self) -> Option<MergeFavor> {
        if self.ours {
            Some(MergeFavor::Ours)
        } else if self.theirs {
            Some(MergeFavor::Theirs)
        } else if self.union {
            Some(MergeFavor::Union)
        } else {
            None
        }
    }
}
