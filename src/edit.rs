//! Editable working document with snapshot undo.
//!
//! Holds the immutable left document, the right document's original
//! text, and the mutable working copy. Edits splice whole line ranges
//! and push a full snapshot first, so every operation either applies
//! completely or not at all, and undo restores the previous text
//! verbatim.

use crate::align::{align, Section};
use crate::classify::split_lines;
use anyhow::{Context, Result};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Workspace {
    left_text: String,
    original_right: String,
    working: String,
    undo_stack: Vec<String>,
}

impl Workspace {
    pub fn new(left_text: String, right_text: String) -> Self {
        Self {
            left_text,
            original_right: right_text.clone(),
            working: right_text,
            undo_stack: Vec::new(),
        }
    }

    pub fn working_text(&self) -> &str {
        &self.working
    }

    /// Derived, never stored: the working copy differs from the original.
    pub fn edited(&self) -> bool {
        self.working != self.original_right
    }

    #[allow(dead_code)]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Current alignment of the left document against the working copy.
    pub fn sections(&self) -> Vec<Section> {
        align(&split_lines(&self.left_text), &split_lines(&self.working))
    }

    /// Replace the current section's right-side content with the left
    /// side's. No-op on an unchanged section. Returns whether anything
    /// was applied.
    pub fn copy_left_to_right(&mut self, sections: &[Section], idx: usize) -> bool {
        let section = match sections.get(idx) {
            Some(s) => s,
            None => return false,
        };
        if !section.has_changes() {
            return false;
        }
        let replacement = section.left_payload();
        self.splice_right(sections, idx, replacement)
    }

    /// Put back the original right-side content for the current section.
    ///
    /// The counterpart in the pristine (left vs original-right) alignment
    /// is located by left-side line range, not by section ordinal: prior
    /// edits shift and merge section boundaries, so the current section
    /// may span several pristine sections. All overlapping pristine
    /// right-side content is concatenated in order.
    pub fn restore_original(&mut self, sections: &[Section], idx: usize) -> bool {
        let section = match sections.get(idx) {
            Some(s) => s,
            None => return false,
        };
        let pristine = align(
            &split_lines(&self.left_text),
            &split_lines(&self.original_right),
        );
        let replacement = pristine_replacement(
            &pristine,
            section,
            idx == 0,
            idx + 1 == sections.len(),
        );
        self.splice_right(sections, idx, replacement)
    }

    /// Pop the most recent snapshot. Returns false when there is nothing
    /// to undo.
    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop() {
            Some(snapshot) => {
                self.working = snapshot;
                true
            }
            None => false,
        }
    }

    /// Blocking write of the working text. Does not touch the undo stack
    /// or the edited flag.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.working)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Splice `replacement` over the section's real right-side rows.
    /// Pushes a snapshot first; skipped entirely (no snapshot) when the
    /// splice would not change the text.
    fn splice_right(&mut self, sections: &[Section], idx: usize, replacement: Vec<String>) -> bool {
        let at: usize = sections[..idx].iter().map(Section::right_occupancy).sum();
        let remove = sections[idx].right_occupancy();

        let mut lines = split_lines(&self.working);
        let at = at.min(lines.len());
        let end = (at + remove).min(lines.len());
        if lines[at..end] == replacement[..] {
            return false;
        }

        self.undo_stack.push(self.working.clone());

        let keep_newline = self.working.ends_with('\n') || self.working.is_empty();
        lines.splice(at..end, replacement);
        let mut text = lines.join("\n");
        if keep_newline && !text.is_empty() {
            text.push('\n');
        }
        self.working = text;
        true
    }
}

/// Original right-side lines corresponding to `section`'s left range.
///
/// A pristine section with left lines is included when its range
/// intersects the current one. A pristine pure insertion is included
/// when its insertion point falls strictly inside the range; on the
/// range boundary it is included only when the current section is the
/// document's first (leading boundary) or last (trailing boundary) —
/// an interior boundary insertion still lives in its own current
/// section and restoring it here would duplicate it. An insertion the
/// original never had yields an empty replacement, which deletes it.
fn pristine_replacement(
    pristine: &[Section],
    section: &Section,
    is_first: bool,
    is_last: bool,
) -> Vec<String> {
    let start = section.left_start;
    let occ = section.left_occupancy();
    let end = start + occ;

    let mut out = Vec::new();
    for p in pristine {
        let p_occ = p.left_occupancy();
        let include = if p_occ > 0 {
            occ > 0 && p.left_start < end && start < p.left_start + p_occ
        } else if occ == 0 {
            p.left_start == start
        } else if p.left_start == start {
            is_first
        } else if p.left_start == end {
            is_last
        } else {
            start < p.left_start && p.left_start < end
        };
        if include {
            out.extend(p.right_payload());
        }
    }
    out
}
