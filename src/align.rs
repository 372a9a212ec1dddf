//! Section alignment for side-by-side display.
//!
//! Turns classifier runs into an ordered list of [`Section`]s, each
//! holding two equal-length display columns. A removed run directly
//! followed by an added run is merged into one section so an in-place
//! replacement renders as a single block with old and new lines on the
//! same row, padded with synthetic `Empty` rows where the sides differ
//! in length.

use crate::classify::{classify, RunKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Equal,
    Removed,
    Added,
    /// Synthetic padding with no backing source line; never numbered.
    Empty,
}

#[derive(Debug, Clone)]
pub struct DisplayLine {
    pub content: String,
    pub kind: LineKind,
}

impl DisplayLine {
    fn new(content: &str, kind: LineKind) -> Self {
        Self {
            content: content.to_string(),
            kind,
        }
    }

    fn empty() -> Self {
        Self {
            content: String::new(),
            kind: LineKind::Empty,
        }
    }
}

/// One aligned unit of the diff: two equal-length columns plus the
/// 0-based source offsets at which the section begins on each side.
#[derive(Debug, Clone)]
pub struct Section {
    pub left: Vec<DisplayLine>,
    pub right: Vec<DisplayLine>,
    pub left_start: usize,
    pub right_start: usize,
}

impl Section {
    pub fn rows(&self) -> usize {
        debug_assert_eq!(self.left.len(), self.right.len());
        self.left.len()
    }

    pub fn has_changes(&self) -> bool {
        self.left
            .iter()
            .chain(self.right.iter())
            .any(|l| matches!(l.kind, LineKind::Removed | LineKind::Added))
    }

    /// Count of real (non-padding) lines in the left column.
    pub fn left_occupancy(&self) -> usize {
        self.left.iter().filter(|l| l.kind != LineKind::Empty).count()
    }

    /// Count of real (non-padding) lines in the right column.
    pub fn right_occupancy(&self) -> usize {
        self.right.iter().filter(|l| l.kind != LineKind::Empty).count()
    }

    /// Real left-column contents, in order.
    pub fn left_payload(&self) -> Vec<String> {
        self.left
            .iter()
            .filter(|l| l.kind != LineKind::Empty)
            .map(|l| l.content.clone())
            .collect()
    }

    /// Real right-column contents, in order.
    pub fn right_payload(&self) -> Vec<String> {
        self.right
            .iter()
            .filter(|l| l.kind != LineKind::Empty)
            .map(|l| l.content.clone())
            .collect()
    }
}

/// Align two line sequences into sections.
///
/// Always yields at least one section: two empty documents produce a
/// single section with one empty `Equal` row, so viewport math never
/// sees zero rows.
pub fn align(left_lines: &[String], right_lines: &[String]) -> Vec<Section> {
    let runs = classify(left_lines, right_lines);

    let mut sections = Vec::new();
    let mut left_pos = 0usize;
    let mut right_pos = 0usize;
    let mut i = 0;

    while i < runs.len() {
        let run = &runs[i];
        match run.kind {
            RunKind::Equal => {
                let make = |kind| -> Vec<DisplayLine> {
                    run.lines.iter().map(|l| DisplayLine::new(l, kind)).collect()
                };
                sections.push(Section {
                    left: make(LineKind::Equal),
                    right: make(LineKind::Equal),
                    left_start: left_pos,
                    right_start: right_pos,
                });
                left_pos += run.lines.len();
                right_pos += run.lines.len();
                i += 1;
            }
            RunKind::Removed => {
                // Pair with an immediately following added run, if any.
                let paired = runs.get(i + 1).filter(|r| r.kind == RunKind::Added);
                let removed = run.lines.as_slice();
                let added = paired.map(|r| r.lines.as_slice()).unwrap_or(&[]);

                let rows = removed.len().max(added.len());
                let mut left = Vec::with_capacity(rows);
                let mut right = Vec::with_capacity(rows);
                for j in 0..rows {
                    left.push(match removed.get(j) {
                        Some(l) => DisplayLine::new(l, LineKind::Removed),
                        None => DisplayLine::empty(),
                    });
                    right.push(match added.get(j) {
                        Some(l) => DisplayLine::new(l, LineKind::Added),
                        None => DisplayLine::empty(),
                    });
                }
                sections.push(Section {
                    left,
                    right,
                    left_start: left_pos,
                    right_start: right_pos,
                });
                left_pos += removed.len();
                right_pos += added.len();
                i += if paired.is_some() { 2 } else { 1 };
            }
            RunKind::Added => {
                let rows = run.lines.len();
                sections.push(Section {
                    left: (0..rows).map(|_| DisplayLine::empty()).collect(),
                    right: run
                        .lines
                        .iter()
                        .map(|l| DisplayLine::new(l, LineKind::Added))
                        .collect(),
                    left_start: left_pos,
                    right_start: right_pos,
                });
                right_pos += rows;
                i += 1;
            }
        }
    }

    sections.retain(|s| s.rows() > 0);

    if sections.is_empty() {
        sections.push(Section {
            left: vec![DisplayLine::new("", LineKind::Equal)],
            right: vec![DisplayLine::new("", LineKind::Equal)],
            left_start: 0,
            right_start: 0,
        });
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::split_lines;

    fn align_texts(left: &str, right: &str) -> Vec<Section> {
        align(&split_lines(left), &split_lines(right))
    }

    fn kinds(column: &[DisplayLine]) -> Vec<LineKind> {
        column.iter().map(|l| l.kind).collect()
    }

    #[test]
    fn test_columns_always_equal_length() {
        let cases = [
            ("a\nb\nc", "a\nb\nc"),
            ("a\nb", "c"),
            ("", "x\ny\nz"),
            ("one\ntwo\nthree", ""),
            ("a\nmid\nz", "a\nchanged\nextra\nz"),
        ];
        for (left, right) in cases {
            for section in align_texts(left, right) {
                assert_eq!(section.left.len(), section.right.len());
            }
        }
    }

    #[test]
    fn test_identical_documents_are_one_equal_section() {
        let sections = align_texts("a\nb\nc", "a\nb\nc");

        assert_eq!(sections.len(), 1);
        assert!(!sections[0].has_changes());
        assert_eq!(
            sections[0].left.iter().map(|l| l.content.as_str()).collect::<Vec<_>>(),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn test_empty_documents_yield_single_empty_equal_row() {
        let sections = align_texts("", "");

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].rows(), 1);
        assert_eq!(sections[0].left[0].kind, LineKind::Equal);
        assert_eq!(sections[0].left[0].content, "");
        assert!(!sections[0].has_changes());
    }

    #[test]
    fn test_pure_insertion() {
        let sections = align_texts("a", "a\nb");

        let added: Vec<&DisplayLine> = sections
            .iter()
            .flat_map(|s| s.right.iter())
            .filter(|l| l.kind == LineKind::Added)
            .collect();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].content, "b");

        let removed = sections
            .iter()
            .flat_map(|s| s.left.iter())
            .filter(|l| l.kind == LineKind::Removed)
            .count();
        assert_eq!(removed, 0);
    }

    #[test]
    fn test_pure_deletion() {
        let sections = align_texts("a\nb", "a");

        let removed: Vec<&DisplayLine> = sections
            .iter()
            .flat_map(|s| s.left.iter())
            .filter(|l| l.kind == LineKind::Removed)
            .collect();
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].content, "b");
    }

    #[test]
    fn test_single_line_replacement_merges_into_one_section() {
        let sections = align_texts("old line", "new line");

        assert_eq!(sections.len(), 1);
        let section = &sections[0];
        assert_eq!(section.rows(), 1);
        assert_eq!(section.left[0].kind, LineKind::Removed);
        assert_eq!(section.left[0].content, "old line");
        assert_eq!(section.right[0].kind, LineKind::Added);
        assert_eq!(section.right[0].content, "new line");
    }

    #[test]
    fn test_unequal_replacement_pads_with_empty() {
        let sections = align_texts("a\nb", "c");

        assert_eq!(sections.len(), 1);
        let section = &sections[0];
        assert_eq!(section.rows(), 2);
        assert_eq!(kinds(&section.left), vec![LineKind::Removed, LineKind::Removed]);
        assert_eq!(kinds(&section.right), vec![LineKind::Added, LineKind::Empty]);
        assert_eq!(section.left[0].content, "a");
        assert_eq!(section.right[0].content, "c");
        assert_eq!(section.left[1].content, "b");
        assert_eq!(section.right[1].content, "");
    }

    #[test]
    fn test_section_start_offsets() {
        let sections = align_texts("a\nb\nold\nz", "a\nb\nnew1\nnew2\nz");

        // equal, replacement, equal
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].left_start, 0);
        assert_eq!(sections[0].right_start, 0);
        assert_eq!(sections[1].left_start, 2);
        assert_eq!(sections[1].right_start, 2);
        assert_eq!(sections[2].left_start, 3);
        assert_eq!(sections[2].right_start, 4);
    }

    #[test]
    fn test_occupancy_and_payload_skip_padding() {
        let sections = align_texts("a\nb", "c");
        let section = &sections[0];

        assert_eq!(section.left_occupancy(), 2);
        assert_eq!(section.right_occupancy(), 1);
        assert_eq!(section.left_payload(), vec!["a", "b"]);
        assert_eq!(section.right_payload(), vec!["c"]);
    }
}
