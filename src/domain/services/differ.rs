//! Differ Domain Service
//!
//! Compares two command lists line by line, used to preview a rollback.

use similar::{capture_diff_slices, Algorithm, ChangeTag, DiffOp};

/// A single line change in a diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub tag: DiffTag,
    /// 1-based position in the old list (if applicable)
    pub old_pos: Option<usize>,
    /// 1-based position in the new list (if applicable)
    pub new_pos: Option<usize>,
    pub command: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffTag {
    Delete,
    Insert,
    Equal,
}

impl From<ChangeTag> for DiffTag {
    fn from(tag: ChangeTag) -> Self {
        match tag {
            ChangeTag::Delete => DiffTag::Delete,
            ChangeTag::Insert => DiffTag::Insert,
            ChangeTag::Equal => DiffTag::Equal,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DiffResult {
    pub lines: Vec<DiffLine>,
    pub additions: usize,
    pub deletions: usize,
}

impl DiffResult {
    pub fn has_changes(&self) -> bool {
        self.additions > 0 || self.deletions > 0
    }

    /// e.g. "+2, -1"
    pub fn summary(&self) -> String {
        format!("+{}, -{}", self.additions, self.deletions)
    }
}

/// Diff `old` against `new`, treating each command as one line.
pub fn diff_commands(old: &[String], new: &[String]) -> DiffResult {
    let mut result = DiffResult::default();

    for op in capture_diff_slices(Algorithm::Myers, old, new) {
        for (tag, old_range, new_range) in op_lines(&op) {
            match tag {
                ChangeTag::Delete => result.deletions += 1,
                ChangeTag::Insert => result.additions += 1,
                ChangeTag::Equal => {}
            }
            let command = match tag {
                ChangeTag::Insert => new_range.map(|i| new[i].clone()),
                _ => old_range.map(|i| old[i].clone()),
            }
            .unwrap_or_default();
            result.lines.push(DiffLine {
                tag: tag.into(),
                old_pos: old_range.map(|i| i + 1),
                new_pos: new_range.map(|i| i + 1),
                command,
            });
        }
    }

    result
}

/// Expand one op into per-line (tag, old index, new index) triples.
fn op_lines(op: &DiffOp) -> Vec<(ChangeTag, Option<usize>, Option<usize>)> {
    match *op {
        DiffOp::Equal {
            old_index,
            new_index,
            len,
        } => (0..len)
            .map(|i| (ChangeTag::Equal, Some(old_index + i), Some(new_index + i)))
            .collect(),
        DiffOp::Delete {
            old_index, old_len, ..
        } => (0..old_len)
            .map(|i| (ChangeTag::Delete, Some(old_index + i), None))
            .collect(),
        DiffOp::Insert {
            new_index, new_len, ..
        } => (0..new_len)
            .map(|i| (ChangeTag::Insert, None, Some(new_index + i)))
            .collect(),
        DiffOp::Replace {
            old_index,
            old_len,
            new_index,
            new_len,
        } => (0..old_len)
            .map(|i| (ChangeTag::Delete, Some(old_index + i), None))
            .chain((0..new_len).map(|i| (ChangeTag::Insert, None, Some(new_index + i))))
            .collect(),
    }
}
