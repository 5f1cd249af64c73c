//! The three-way merge walk and output rendering.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::MergedBuffer;
use crate::error::{EngineError, EngineResult};
use crate::hunks::{changes, contains_alnum, split_lines, Hunk, Line};
use crate::params::{Favor, Level, MergeParams, Style};

/// Conflicts separated by at most this many lines are rejoined.
const MAX_SIMPLIFY_GAP: usize = 3;

/// A text-merge engine.
///
/// Implementations must be total over arbitrary byte inputs within their
/// limits: textual conflicts are reported in [`MergeOutput::conflicts`], and
/// `Err` is reserved for hard failures.
pub trait TextMerger: Send + Sync {
    fn merge(
        &self,
        ancestor: &[u8],
        ours: &[u8],
        theirs: &[u8],
        params: &MergeParams,
    ) -> EngineResult<MergeOutput>;
}

/// Result of one engine invocation.
#[derive(Debug)]
pub struct MergeOutput {
    /// Merged content, with conflict markers if `conflicts > 0`.
    pub buffer: MergedBuffer,
    /// Number of conflicts left in `buffer`.
    pub conflicts: usize,
}

/// Limits of the built-in engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Largest accepted input, in bytes.
    pub max_input_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_input_size: 1024 * 1024 * 1024,
        }
    }
}

/// Line-based diff3 merge engine.
#[derive(Clone, Debug, Default)]
pub struct LineMerger {
    config: EngineConfig,
}

impl LineMerger {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn check_size(&self, side: &'static str, data: &[u8]) -> EngineResult<()> {
        if data.len() > self.config.max_input_size {
            return Err(EngineError::InputTooLarge {
                side,
                size: data.len(),
                limit: self.config.max_input_size,
            });
        }
        Ok(())
    }
}

impl TextMerger for LineMerger {
    fn merge(
        &self,
        ancestor: &[u8],
        ours: &[u8],
        theirs: &[u8],
        params: &MergeParams,
    ) -> EngineResult<MergeOutput> {
        self.check_size("ancestor", ancestor)?;
        self.check_size("ours", ours)?;
        self.check_size("theirs", theirs)?;

        let base = split_lines(ancestor);
        let ours = split_lines(ours);
        let theirs = split_lines(theirs);

        let mut segments = three_way(&base, &ours, &theirs);
        // Splitting a conflict loses its ancestor text, so diff3 output keeps
        // conflicts whole.
        if params.style == Style::Plain {
            segments = refine_conflicts(segments);
            segments = simplify_conflicts(segments, params.level == Level::ZealousAlnum);
        }

        let (data, conflicts) = render(&segments, params);
        debug!(
            base_lines = base.len(),
            ours_lines = ours.len(),
            theirs_lines = theirs.len(),
            conflicts,
            "text merge complete"
        );

        Ok(MergeOutput {
            buffer: MergedBuffer::new(data),
            conflicts,
        })
    }
}

// ---------------------------------------------------------------------------
// Segments
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment<'a> {
    /// Text both sides agree on.
    Common(Vec<Line<'a>>),
    /// A change made by one side only, or identically by both.
    Resolved(Vec<Line<'a>>),
    Conflict {
        base: Vec<Line<'a>>,
        ours: Vec<Line<'a>>,
        theirs: Vec<Line<'a>>,
    },
}

#[derive(Default)]
struct Segments<'a>(Vec<Segment<'a>>);

impl<'a> Segments<'a> {
    fn common(&mut self, lines: &[Line<'a>]) {
        if lines.is_empty() {
            return;
        }
        match self.0.last_mut() {
            Some(Segment::Common(prev)) => prev.extend_from_slice(lines),
            _ => self.0.push(Segment::Common(lines.to_vec())),
        }
    }

    fn resolved(&mut self, lines: Vec<Line<'a>>) {
        if lines.is_empty() {
            return;
        }
        match self.0.last_mut() {
            Some(Segment::Resolved(prev)) => prev.extend(lines),
            _ => self.0.push(Segment::Resolved(lines)),
        }
    }

    fn conflict(&mut self, base: Vec<Line<'a>>, ours: Vec<Line<'a>>, theirs: Vec<Line<'a>>) {
        self.0.push(Segment::Conflict { base, ours, theirs });
    }
}

/// Walk both ancestor-relative change sets and group overlapping or touching
/// changes into one region each.
fn three_way<'a>(base: &[Line<'a>], ours: &[Line<'a>], theirs: &[Line<'a>]) -> Vec<Segment<'a>> {
    let ours_hunks = changes(base, ours);
    let theirs_hunks = changes(base, theirs);

    let mut out = Segments::default();
    let (mut oi, mut ti, mut cursor) = (0, 0, 0);

    loop {
        let next = [ours_hunks.get(oi), theirs_hunks.get(ti)]
            .into_iter()
            .flatten()
            .map(|h| h.base.start)
            .min();
        let Some(start) = next else { break };

        let (ours_begin, theirs_begin) = (oi, ti);
        let mut end = start;
        loop {
            let mut grew = false;
            while let Some(h) = ours_hunks.get(oi).filter(|h| h.base.start <= end) {
                end = end.max(h.base.end);
                oi += 1;
                grew = true;
            }
            while let Some(h) = theirs_hunks.get(ti).filter(|h| h.base.start <= end) {
                end = end.max(h.base.end);
                ti += 1;
                grew = true;
            }
            if !grew {
                break;
            }
        }

        out.common(&base[cursor..start]);

        let ours_group = &ours_hunks[ours_begin..oi];
        let theirs_group = &theirs_hunks[theirs_begin..ti];
        let region = start..end;

        if theirs_group.is_empty() {
            out.resolved(side_region(base, ours, ours_group, region));
        } else if ours_group.is_empty() {
            out.resolved(side_region(base, theirs, theirs_group, region));
        } else {
            let ours_text = side_region(base, ours, ours_group, region.clone());
            let theirs_text = side_region(base, theirs, theirs_group, region.clone());
            if ours_text == theirs_text {
                out.resolved(ours_text);
            } else {
                out.conflict(base[region].to_vec(), ours_text, theirs_text);
            }
        }

        cursor = end;
    }

    out.common(&base[cursor..]);
    out.0
}

/// One side's text for a base region, given that side's hunks inside it.
fn side_region<'a>(
    base: &[Line<'a>],
    side: &[Line<'a>],
    hunks: &[Hunk],
    region: Range<usize>,
) -> Vec<Line<'a>> {
    let mut out = Vec::new();
    let mut pos = region.start;
    for hunk in hunks {
        out.extend_from_slice(&base[pos..hunk.base.start]);
        out.extend_from_slice(&side[hunk.side.clone()]);
        pos = hunk.base.end;
    }
    out.extend_from_slice(&base[pos..region.end]);
    out
}

/// Split every conflict at the lines both sides agree on.
fn refine_conflicts(segments: Vec<Segment<'_>>) -> Vec<Segment<'_>> {
    let mut out = Segments::default();
    for segment in segments {
        match segment {
            Segment::Common(lines) => out.common(&lines),
            Segment::Resolved(lines) => out.resolved(lines),
            Segment::Conflict { ours, theirs, .. } => {
                let mut pos = 0;
                for hunk in changes(&ours, &theirs) {
                    out.common(&ours[pos..hunk.base.start]);
                    out.conflict(
                        Vec::new(),
                        ours[hunk.base.clone()].to_vec(),
                        theirs[hunk.side].to_vec(),
                    );
                    pos = hunk.base.end;
                }
                out.common(&ours[pos..]);
            }
        }
    }
    out.0
}

/// Rejoin conflicts separated by a short or alphanumeric-free common gap.
fn simplify_conflicts(segments: Vec<Segment<'_>>, if_no_alnum: bool) -> Vec<Segment<'_>> {
    let mut out: Vec<Segment<'_>> = Vec::with_capacity(segments.len());

    for segment in segments {
        let (base, ours, theirs) = match segment {
            Segment::Conflict { base, ours, theirs } => (base, ours, theirs),
            other => {
                out.push(other);
                continue;
            }
        };

        let joined = match out.as_mut_slice() {
            [.., Segment::Conflict {
                base: prev_base,
                ours: prev_ours,
                theirs: prev_theirs,
            }, Segment::Common(gap)]
                if gap.len() <= MAX_SIMPLIFY_GAP || (if_no_alnum && !contains_alnum(&gap[..])) =>
            {
                for (prev, next) in [
                    (prev_base, &base),
                    (prev_ours, &ours),
                    (prev_theirs, &theirs),
                ] {
                    prev.extend_from_slice(&gap[..]);
                    prev.extend_from_slice(next);
                }
                true
            }
            _ => false,
        };

        if joined {
            // The gap now lives inside the joined conflict.
            out.pop();
        } else {
            out.push(Segment::Conflict { base, ours, theirs });
        }
    }

    out
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render(segments: &[Segment<'_>], params: &MergeParams) -> (Vec<u8>, usize) {
    let mut out = Vec::new();
    let mut conflicts = 0;

    for segment in segments {
        match segment {
            Segment::Common(lines) | Segment::Resolved(lines) => write_lines(&mut out, lines),
            Segment::Conflict { base, ours, theirs } => match params.favor {
                Favor::Ours => write_lines(&mut out, ours),
                Favor::Theirs => write_lines(&mut out, theirs),
                Favor::Union => {
                    write_terminated(&mut out, ours);
                    write_lines(&mut out, theirs);
                }
                Favor::Normal => {
                    conflicts += 1;
                    write_marker(&mut out, b'<', params.ours_label.as_deref());
                    write_terminated(&mut out, ours);
                    if params.style == Style::Diff3 {
                        write_marker(&mut out, b'|', params.ancestor_label.as_deref());
                        write_terminated(&mut out, base);
                    }
                    write_marker(&mut out, b'=', None);
                    write_terminated(&mut out, theirs);
                    write_marker(&mut out, b'>', params.theirs_label.as_deref());
                }
            },
        }
    }

    (out, conflicts)
}

fn write_lines(out: &mut Vec<u8>, lines: &[Line<'_>]) {
    for line in lines {
        out.extend_from_slice(line);
    }
}

/// Write lines, adding a newline if the last one lacks it so a following
/// marker starts on its own line.
fn write_terminated(out: &mut Vec<u8>, lines: &[Line<'_>]) {
    write_lines(out, lines);
    if lines.last().is_some_and(|line| !line.ends_with(b"\n")) {
        out.push(b'\n');
    }
}

fn write_marker(out: &mut Vec<u8>, ch: u8, label: Option<&str>) {
    out.extend(std::iter::repeat(ch).take(MergeParams::MARKER_SIZE));
    if let Some(label) = label {
        out.push(b' ');
        out.extend_from_slice(label.as_bytes());
    }
    out.push(b'\n');
}
