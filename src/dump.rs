//! Non-interactive output of the aligned rows.
//!
//! Produces exactly the row list the interactive renderer would draw
//! for a fixed viewport/scroll/fold configuration, serialized as plain
//! text or JSON. Used to inspect and validate alignment and folding
//! without a live terminal.

use crate::align::Section;
use crate::view::{Layout, Row, Viewport};
use anyhow::Result;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpFormat {
    Text,
    Json,
}

impl DumpFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(DumpFormat::Text),
            "json" => Some(DumpFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DumpOptions {
    pub fold: bool,
    pub context: usize,
    pub brackets: bool,
    pub scroll: usize,
    /// 0 means "all rows from scroll onward".
    pub height: usize,
    pub cursor: usize,
    pub hscroll: usize,
}

pub fn dump(sections: &[Section], opts: &DumpOptions, format: DumpFormat) -> Result<String> {
    let layout = Layout::new(sections, opts.fold, opts.context);
    let height = if opts.height == 0 {
        layout.total_rows()
    } else {
        opts.height
    };
    let vp = Viewport {
        scroll: opts.scroll,
        height,
        cursor: opts.cursor,
        hscroll: opts.hscroll,
    };
    let rows = layout.rows(&vp, opts.brackets);

    match format {
        DumpFormat::Json => Ok(serde_json::to_string_pretty(&rows)?),
        DumpFormat::Text => Ok(render_text(&rows)),
    }
}

fn render_text(rows: &[Row]) -> String {
    let left_width = rows
        .iter()
        .map(|r| r.left_text.chars().count())
        .max()
        .unwrap_or(0)
        .max(8);

    let mut out = String::new();
    for row in rows {
        let marker = if row.is_cursor { '>' } else { ' ' };
        let _ = writeln!(
            out,
            "{}{} {}{:<width$} {} {} {}{}",
            marker,
            number(row.left_number),
            row.left_prefix,
            row.left_text,
            row.divider,
            number(row.right_number),
            row.right_prefix,
            row.right_text,
            width = left_width,
        );
    }
    out
}

fn number(n: Option<usize>) -> String {
    match n {
        Some(n) => format!("{:>4}", n),
        None => "    ".to_string(),
    }
}
