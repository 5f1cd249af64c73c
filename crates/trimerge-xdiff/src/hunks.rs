//! Line splitting and change extraction on top of `similar`.

use std::ops::Range;

use similar::{capture_diff_slices, Algorithm, DiffTag};

/// A line including its terminator (the last line of a buffer may lack one).
pub(crate) type Line<'a> = &'a [u8];

/// A contiguous change: `base` lines replaced by `side` lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Hunk {
    pub base: Range<usize>,
    pub side: Range<usize>,
}

pub(crate) fn split_lines(data: &[u8]) -> Vec<Line<'_>> {
    data.split_inclusive(|&b| b == b'\n').collect()
}

/// Compute the changes turning `base` into `side`, in base order.
///
/// Consecutive non-equal operations are coalesced, so two hunks are always
/// separated by at least one unchanged line. Positions are tracked from the
/// operation lengths alone: the index `similar` reports for the side an
/// insert or delete does not touch is not reliable.
pub(crate) fn changes(base: &[Line<'_>], side: &[Line<'_>]) -> Vec<Hunk> {
    let ops = capture_diff_slices(Algorithm::Myers, base, side);
    let mut hunks: Vec<Hunk> = Vec::new();
    let (mut old_pos, mut new_pos) = (0, 0);
    let mut after_equal = true;

    for op in &ops {
        let (tag, old, new) = op.as_tag_tuple();
        let (old_len, new_len) = match tag {
            DiffTag::Delete => (old.len(), 0),
            DiffTag::Insert => (0, new.len()),
            DiffTag::Equal | DiffTag::Replace => (old.len(), new.len()),
        };
        let base_range = old_pos..old_pos + old_len;
        let side_range = new_pos..new_pos + new_len;
        old_pos = base_range.end;
        new_pos = side_range.end;

        if tag == DiffTag::Equal {
            after_equal = true;
            continue;
        }
        match hunks.last_mut() {
            Some(last) if !after_equal => {
                last.base.end = base_range.end;
                last.side.end = side_range.end;
            }
            _ => hunks.push(Hunk {
                base: base_range,
                side: side_range,
            }),
        }
        after_equal = false;
    }

    hunks
}

/// Whether any line carries an ASCII letter or digit.
pub(crate) fn contains_alnum(lines: &[Line<'_>]) -> bool {
    lines
        .iter()
        .any(|line| line.iter().any(u8::is_ascii_alphanumeric))
}
