//! Line classification over the `similar` diff primitive.
//!
//! Wraps a line-level LCS diff and regroups its per-line changes into
//! maximal same-kind runs that partition both inputs in order. The
//! aligner consumes these runs without knowing anything about `similar`.

use similar::{Algorithm, ChangeTag, TextDiff};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Equal,
    Added,
    Removed,
}

/// A maximal contiguous stretch of identically-classified lines.
#[derive(Debug, Clone)]
pub struct Run {
    pub kind: RunKind,
    pub lines: Vec<String>,
}

/// Classify two line sequences into ordered runs.
///
/// Within a replaced region `similar` emits all deletions before the
/// matching insertions, so a removed run directly followed by an added
/// run marks an in-place replacement.
pub fn classify(left: &[String], right: &[String]) -> Vec<Run> {
    let old: Vec<&str> = left.iter().map(String::as_str).collect();
    let new: Vec<&str> = right.iter().map(String::as_str).collect();

    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_slices(&old, &new);

    let mut runs: Vec<Run> = Vec::new();
    for change in diff.iter_all_changes() {
        let kind = match change.tag() {
            ChangeTag::Equal => RunKind::Equal,
            ChangeTag::Insert => RunKind::Added,
            ChangeTag::Delete => RunKind::Removed,
        };

        match runs.last_mut() {
            Some(run) if run.kind == kind => run.lines.push(change.value().to_string()),
            _ => runs.push(Run {
                kind,
                lines: vec![change.value().to_string()],
            }),
        }
    }

    runs
}

/// Split raw text into lines the way the rest of the crate expects
/// (no trailing-newline phantom line).
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}
