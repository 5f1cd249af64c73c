use serde::{Deserialize, Serialize};

/// How a conflicting region is written out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Favor {
    /// Keep both sides between conflict markers.
    #[default]
    Normal,
    /// Take our side, no markers.
    Ours,
    /// Take their side, no markers.
    Theirs,
    /// Take our side followed by their side, no markers.
    Union,
}

/// How aggressively conflicts are shrunk before they are written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    /// Split conflicts at lines both sides agree on, then rejoin conflicts
    /// separated by at most three lines.
    #[default]
    Zealous,
    /// As [`Level::Zealous`], and also rejoin conflicts separated only by lines
    /// with no alphanumeric characters.
    ZealousAlnum,
}

/// Conflict marker layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// `<<<<<<<`, `=======`, `>>>>>>>`.
    #[default]
    Plain,
    /// Plain markers plus a `|||||||` section holding the ancestor text.
    Diff3,
}

/// Parameters of a single engine invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeParams {
    /// Name shown after the `|||||||` marker.
    pub ancestor_label: Option<String>,
    /// Name shown after the `<<<<<<<` marker.
    pub ours_label: Option<String>,
    /// Name shown after the `>>>>>>>` marker.
    pub theirs_label: Option<String>,
    pub favor: Favor,
    pub level: Level,
    pub style: Style,
}

impl MergeParams {
    /// Width of every conflict marker.
    pub const MARKER_SIZE: usize = 7;
}
