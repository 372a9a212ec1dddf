//! Fold-aware viewport math and renderable row construction.
//!
//! A [`Layout`] maps the flattened, fold-aware row space onto sections:
//! long unchanged sections collapse to their edge context plus a single
//! placeholder row standing for the hidden middle. Per-side line-number
//! counters advance through a placeholder by the full hidden count so
//! numbers stay correct after a fold.

use crate::align::{LineKind, Section};
use serde::Serialize;

/// One renderable row of the side-by-side display.
#[derive(Debug, Clone, Serialize)]
pub struct Row {
    pub left_number: Option<usize>,
    pub left_prefix: &'static str,
    pub left_text: String,
    pub right_number: Option<usize>,
    pub right_prefix: &'static str,
    pub right_text: String,
    pub is_cursor: bool,
    pub divider: char,
}

/// Viewport parameters for row construction.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub scroll: usize,
    pub height: usize,
    pub cursor: usize,
    pub hscroll: usize,
}

pub struct Layout<'a> {
    sections: &'a [Section],
    fold: bool,
    context: usize,
}

impl<'a> Layout<'a> {
    pub fn new(sections: &'a [Section], fold: bool, context: usize) -> Self {
        Self {
            sections,
            fold,
            context,
        }
    }

    pub fn is_folded(&self, section: &Section) -> bool {
        self.fold && !section.has_changes() && section.rows() > 2 * self.context + 1
    }

    /// Rows this section occupies in the flattened display.
    pub fn section_rows(&self, section: &Section) -> usize {
        if self.is_folded(section) {
            2 * self.context + 1
        } else {
            section.rows()
        }
    }

    pub fn total_rows(&self) -> usize {
        self.sections.iter().map(|s| self.section_rows(s)).sum()
    }

    /// First display row of the section at `idx`.
    #[allow(dead_code)]
    pub fn section_start(&self, idx: usize) -> usize {
        self.sections[..idx]
            .iter()
            .map(|s| self.section_rows(s))
            .sum()
    }

    /// Index of the section whose display-row range contains `row`.
    pub fn section_at(&self, row: usize) -> usize {
        let mut acc = 0;
        for (idx, section) in self.sections.iter().enumerate() {
            acc += self.section_rows(section);
            if row < acc {
                return idx;
            }
        }
        self.sections.len().saturating_sub(1)
    }

    /// Start row of the first changed section strictly below `cursor`.
    pub fn next_changed_start(&self, cursor: usize) -> Option<usize> {
        let mut acc = 0;
        for section in self.sections {
            if acc > cursor && section.has_changes() {
                return Some(acc);
            }
            acc += self.section_rows(section);
        }
        None
    }

    /// Start row of the last changed section strictly above `cursor`.
    pub fn prev_changed_start(&self, cursor: usize) -> Option<usize> {
        let mut acc = 0;
        let mut found = None;
        for section in self.sections {
            if acc >= cursor {
                break;
            }
            if section.has_changes() {
                found = Some(acc);
            }
            acc += self.section_rows(section);
        }
        found
    }

    /// Build the renderable rows for the given viewport.
    pub fn rows(&self, vp: &Viewport, brackets: bool) -> Vec<Row> {
        let end = vp.scroll.saturating_add(vp.height);
        let mut out = Vec::new();
        let mut global = 0usize;
        let mut left_no = 1usize;
        let mut right_no = 1usize;

        for section in self.sections {
            let folded = self.is_folded(section);
            let shown = self.section_rows(section);
            let changed = section.has_changes();

            for row in 0..shown {
                if global >= end {
                    return out;
                }

                if folded && row == self.context {
                    // Placeholder standing for the folded middle; both
                    // counters advance by the full hidden count.
                    let hidden = section.rows() - 2 * self.context;
                    if global >= vp.scroll {
                        let text = format!("··· {} unchanged lines ···", hidden);
                        out.push(Row {
                            left_number: None,
                            left_prefix: "  ",
                            left_text: text.clone(),
                            right_number: None,
                            right_prefix: "  ",
                            right_text: text,
                            is_cursor: global == vp.cursor,
                            divider: '│',
                        });
                    }
                    left_no += hidden;
                    right_no += hidden;
                } else {
                    let raw = if folded && row > self.context {
                        section.rows() - shown + row
                    } else {
                        row
                    };
                    let l = &section.left[raw];
                    let r = &section.right[raw];

                    let left_number = (l.kind != LineKind::Empty).then(|| {
                        let n = left_no;
                        left_no += 1;
                        n
                    });
                    let right_number = (r.kind != LineKind::Empty).then(|| {
                        let n = right_no;
                        right_no += 1;
                        n
                    });

                    if global >= vp.scroll {
                        out.push(Row {
                            left_number,
                            left_prefix: prefix_for(l.kind),
                            left_text: clip(&l.content, vp.hscroll),
                            right_number,
                            right_prefix: prefix_for(r.kind),
                            right_text: clip(&r.content, vp.hscroll),
                            is_cursor: global == vp.cursor,
                            divider: divider_for(changed && brackets, shown, row),
                        });
                    }
                }

                global += 1;
            }
        }

        out
    }
}

fn prefix_for(kind: LineKind) -> &'static str {
    match kind {
        LineKind::Added => "+ ",
        LineKind::Removed => "- ",
        LineKind::Equal | LineKind::Empty => "  ",
    }
}

fn divider_for(bracketed: bool, section_rows: usize, row: usize) -> char {
    if !bracketed {
        '│'
    } else if section_rows == 1 {
        '─'
    } else if row == 0 {
        '┌'
    } else if row == section_rows - 1 {
        '└'
    } else {
        '├'
    }
}

fn clip(text: &str, hscroll: usize) -> String {
    if hscroll == 0 {
        text.to_string()
    } else {
        text.chars().skip(hscroll).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::align;
    use crate::classify::split_lines;

    fn sections_of(left: &str, right: &str) -> Vec<crate::align::Section> {
        align(&split_lines(left), &split_lines(right))
    }

    fn full_viewport(layout: &Layout) -> Viewport {
        Viewport {
            scroll: 0,
            height: layout.total_rows(),
            cursor: 0,
            hscroll: 0,
        }
    }

    #[test]
    fn test_folding_collapses_long_unchanged_sections() {
        let text: String = (1..=20).map(|n| format!("line {}\n", n)).collect();
        let sections = sections_of(&text, &text);
        assert_eq!(sections.len(), 1);

        let unfolded = Layout::new(&sections, false, 3);
        assert_eq!(unfolded.total_rows(), 20);

        let folded = Layout::new(&sections, true, 3);
        assert_eq!(folded.section_rows(&sections[0]), 7);
        assert_eq!(folded.total_rows(), 7);
    }

    #[test]
    fn test_short_and_changed_sections_never_fold() {
        let sections = sections_of("a\nb\nc", "a\nb\nc");
        let layout = Layout::new(&sections, true, 3);
        assert_eq!(layout.total_rows(), 3);

        let changed = sections_of(
            "a\nb\nc\nd\ne\nf\ng\nh",
            "a\nb\nc\nd\ne\nf\ng\nCHANGED",
        );
        let layout = Layout::new(&changed, true, 3);
        let raw: usize = changed.iter().map(|s| s.rows()).sum();
        // The changed tail section stays raw; only the unchanged head folds
        // if long enough (7 rows here, at the threshold, so it does not).
        assert_eq!(layout.total_rows(), raw);
    }

    #[test]
    fn test_line_numbers_advance_across_fold_placeholder() {
        let text: String = (1..=20).map(|n| format!("line {}\n", n)).collect();
        let sections = sections_of(&text, &text);
        let layout = Layout::new(&sections, true, 3);
        let rows = layout.rows(&full_viewport(&layout), true);

        assert_eq!(rows.len(), 7);
        assert_eq!(rows[2].left_number, Some(3));
        assert_eq!(rows[3].left_number, None);
        assert!(rows[3].left_text.contains("14 unchanged lines"));
        assert_eq!(rows[4].left_number, Some(18));
        assert_eq!(rows[6].left_number, Some(20));
        assert_eq!(rows[6].right_number, Some(20));
        assert_eq!(rows[6].left_text, "line 20");
    }

    #[test]
    fn test_padding_rows_have_no_number() {
        let sections = sections_of("a\nb", "c");
        let layout = Layout::new(&sections, false, 3);
        let rows = layout.rows(&full_viewport(&layout), false);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].left_number, Some(1));
        assert_eq!(rows[0].right_number, Some(1));
        assert_eq!(rows[1].left_number, Some(2));
        assert_eq!(rows[1].right_number, None);
        assert_eq!(rows[1].right_prefix, "  ");
    }

    #[test]
    fn test_prefixes() {
        let sections = sections_of("keep\nold", "keep\nnew");
        let layout = Layout::new(&sections, false, 3);
        let rows = layout.rows(&full_viewport(&layout), false);

        assert_eq!(rows[0].left_prefix, "  ");
        assert_eq!(rows[0].right_prefix, "  ");
        assert_eq!(rows[1].left_prefix, "- ");
        assert_eq!(rows[1].right_prefix, "+ ");
    }

    #[test]
    fn test_divider_glyphs_for_changed_sections() {
        // Single-row change
        let sections = sections_of("old", "new");
        let layout = Layout::new(&sections, false, 3);
        let rows = layout.rows(&full_viewport(&layout), true);
        assert_eq!(rows[0].divider, '─');

        // Multi-row change
        let sections = sections_of("a\nb\nc", "x\ny\nz");
        let layout = Layout::new(&sections, false, 3);
        let rows = layout.rows(&full_viewport(&layout), true);
        assert_eq!(rows[0].divider, '┌');
        assert_eq!(rows[1].divider, '├');
        assert_eq!(rows[2].divider, '└');

        // Unchanged rows keep the plain separator even with brackets on
        let sections = sections_of("same", "same");
        let layout = Layout::new(&sections, false, 3);
        let rows = layout.rows(&full_viewport(&layout), true);
        assert_eq!(rows[0].divider, '│');
    }

    #[test]
    fn test_viewport_windowing_and_cursor_flag() {
        let text: String = (1..=10).map(|n| format!("l{}\n", n)).collect();
        let sections = sections_of(&text, &text);
        let layout = Layout::new(&sections, false, 3);
        let vp = Viewport {
            scroll: 4,
            height: 3,
            cursor: 5,
            hscroll: 0,
        };
        let rows = layout.rows(&vp, false);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].left_number, Some(5));
        assert!(!rows[0].is_cursor);
        assert!(rows[1].is_cursor);
        assert_eq!(rows[2].left_number, Some(7));
    }

    #[test]
    fn test_horizontal_scroll_clips_content() {
        let sections = sections_of("abcdef", "abcdef");
        let layout = Layout::new(&sections, false, 3);
        let vp = Viewport {
            scroll: 0,
            height: 1,
            cursor: 0,
            hscroll: 2,
        };
        let rows = layout.rows(&vp, false);
        assert_eq!(rows[0].left_text, "cdef");
        assert_eq!(rows[0].right_text, "cdef");
    }

    #[test]
    fn test_section_at_and_start() {
        let sections = sections_of("a\nold\nz", "a\nnew\nz");
        let layout = Layout::new(&sections, false, 3);

        assert_eq!(layout.section_start(0), 0);
        assert_eq!(layout.section_start(1), 1);
        assert_eq!(layout.section_start(2), 2);
        assert_eq!(layout.section_at(0), 0);
        assert_eq!(layout.section_at(1), 1);
        assert_eq!(layout.section_at(2), 2);
        // Out-of-range rows clamp to the last section
        assert_eq!(layout.section_at(99), 2);
    }

    #[test]
    fn test_changed_section_navigation_targets() {
        let sections = sections_of("a\nb\nold\nc\nd", "a\nb\nnew\nc\nd");
        let layout = Layout::new(&sections, false, 3);
        // Rows: 0-1 equal, 2 changed, 3-4 equal.
        assert_eq!(layout.next_changed_start(0), Some(2));
        assert_eq!(layout.next_changed_start(2), None);
        assert_eq!(layout.prev_changed_start(4), Some(2));
        assert_eq!(layout.prev_changed_start(2), None);
    }
}
