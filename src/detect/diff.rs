//! Text normalization and line-level diffing for the content strategy.

/// A line that differs between two snapshots.
///
/// Context (unchanged) lines are not represented; an empty change list means
/// the snapshots are identical line for line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineChange {
    /// A line present only in the new snapshot.
    Added(String),
    /// A line present only in the previous snapshot.
    Removed(String),
}

/// Normalize page text before snapshotting.
///
/// Collapses runs of newline characters to a single newline and runs of
/// spaces to a single space, so markup reflows and trailing-whitespace churn
/// do not register as changes. Idempotent: normalizing already-normalized
/// text yields the same text.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if c == '\n' {
            while chars.peek() == Some(&'\n') {
                chars.next();
            }
        } else if c == ' ' {
            while chars.peek() == Some(&' ') {
                chars.next();
            }
        }
    }
    out
}

/// Compute the lines added or removed between two snapshots.
///
/// Common leading and trailing lines are treated as context; everything
/// between is reported as removals from `old` followed by additions from
/// `new`. Any non-empty result means the target changed.
pub fn diff_lines(old: &str, new: &str) -> Vec<LineChange> {
    let old_lines: Vec<&str> = old.lines().collect();
    let new_lines: Vec<&str> = new.lines().collect();

    let mut prefix = 0;
    while prefix < old_lines.len()
        && prefix < new_lines.len()
        && old_lines[prefix] == new_lines[prefix]
    {
        prefix += 1;
    }

    let mut suffix = 0;
    while suffix < old_lines.len() - prefix
        && suffix < new_lines.len() - prefix
        && old_lines[old_lines.len() - 1 - suffix] == new_lines[new_lines.len() - 1 - suffix]
    {
        suffix += 1;
    }

    let mut changes = Vec::new();
    for line in &old_lines[prefix..old_lines.len() - suffix] {
        changes.push(LineChange::Removed((*line).to_string()));
    }
    for line in &new_lines[prefix..new_lines.len() - suffix] {
        changes.push(LineChange::Added((*line).to_string()));
    }
    changes
}
