use serde::{Deserialize, Serialize};
use trimerge_xdiff::{Favor, Level, Style};

/// How textual conflicts are resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeFavor {
    /// Leave conflict markers in the output.
    #[default]
    Normal,
    /// Take our side of each conflict.
    Ours,
    /// Take their side of each conflict.
    Theirs,
    /// Take both sides of each conflict, ours first.
    Union,
}

impl MergeFavor {
    pub(crate) fn engine_favor(self) -> Favor {
        match self {
            Self::Normal => Favor::Normal,
            Self::Ours => Favor::Ours,
            Self::Theirs => Favor::Theirs,
            Self::Union => Favor::Union,
        }
    }
}

/// Output style switches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeFlags {
    /// Include the ancestor's text in conflicts (`|||||||` section).
    pub style_diff3: bool,
    /// Also join conflicts separated only by lines without letters or digits.
    pub simplify_alnum: bool,
}

impl MergeFlags {
    pub(crate) fn engine_level(self) -> Level {
        if self.simplify_alnum {
            Level::ZealousAlnum
        } else {
            Level::Zealous
        }
    }

    pub(crate) fn engine_style(self) -> Style {
        if self.style_diff3 {
            Style::Diff3
        } else {
            Style::Plain
        }
    }
}

/// Options for [`merge_files`](crate::merge_files) and friends.
///
/// Unset labels fall back to each side's path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeFileOptions {
    pub ancestor_label: Option<String>,
    pub our_label: Option<String>,
    pub their_label: Option<String>,
    pub favor: MergeFavor,
    pub flags: MergeFlags,
}
