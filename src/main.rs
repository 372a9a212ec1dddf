//! sidediff - side-by-side diff viewer with folding, selective merge and undo
//!
//! Presents two text files side by side: navigate between changed
//! sections, fold long unchanged regions, copy the left side's content
//! over the right, undo, and write the edited right file back. A --dump
//! mode prints the same aligned rows without a terminal.

mod align;
mod app;
mod classify;
mod config;
mod dump;
mod edit;
mod tui;
mod view;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::app::App;
use crate::config::Config;
use crate::dump::{dump, DumpFormat, DumpOptions};
use crate::edit::Workspace;

#[derive(Parser)]
#[command(name = "sidediff")]
#[command(about = "Side-by-side diff viewer with folding, selective merge and undo")]
#[command(version)]
struct Cli {
    /// Left (original) file
    left: Option<PathBuf>,

    /// Right (working) file; edits are written back here
    right: Option<PathBuf>,

    /// Print the aligned rows to stdout instead of starting the TUI
    #[arg(long)]
    dump: bool,

    /// Dump format: text or json
    #[arg(long, default_value = "text")]
    format: String,

    /// Viewport height for --dump (0 = all rows)
    #[arg(long, default_value_t = 0)]
    height: usize,

    /// Scroll offset for --dump
    #[arg(long, default_value_t = 0)]
    scroll: usize,

    /// Fold long unchanged sections
    #[arg(long, conflicts_with = "no_fold")]
    fold: bool,

    /// Do not fold, overriding the config file
    #[arg(long)]
    no_fold: bool,

    /// Context lines kept at each edge of a fold
    #[arg(long)]
    context: Option<usize>,
}

impl Cli {
    fn fold_override(&self) -> Option<bool> {
        if self.fold {
            Some(true)
        } else if self.no_fold {
            Some(false)
        } else {
            None
        }
    }
}

const DEMO_LEFT: &str = "\
The quick brown fox
jumps over the lazy dog.
Pack my box
with five dozen liquor jugs.
How vexingly quick
daft zebras jump!
Sphinx of black quartz,
judge my vow.
";

const DEMO_RIGHT: &str = "\
The quick brown fox
leaps over the sleepy dog.
Pack my box
with five dozen liquor jugs.
Extra line only on the right.
How vexingly quick
daft zebras jump!
Sphinx of black quartz,
judge my vow.
";

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?.with_overrides(cli.fold_override(), cli.context);

    let (ws, left_name, right_name, save_path) = match (&cli.left, &cli.right) {
        (Some(left), Some(right)) => {
            let left_text = std::fs::read_to_string(left)
                .with_context(|| format!("Failed to read {}", left.display()))?;
            let right_text = std::fs::read_to_string(right)
                .with_context(|| format!("Failed to read {}", right.display()))?;
            (
                Workspace::new(left_text, right_text),
                left.display().to_string(),
                right.display().to_string(),
                Some(right.clone()),
            )
        }
        (None, None) => (
            Workspace::new(DEMO_LEFT.to_string(), DEMO_RIGHT.to_string()),
            "demo (left)".to_string(),
            "demo (right)".to_string(),
            None,
        ),
        _ => anyhow::bail!("Provide two files to compare, or none for the built-in demo"),
    };

    if cli.dump {
        let format = DumpFormat::from_str(&cli.format)
            .context("Invalid format. Use: text or json")?;
        let opts = DumpOptions {
            fold: config.fold,
            context: config.context_lines,
            brackets: config.brackets,
            scroll: cli.scroll,
            height: cli.height,
            cursor: cli.scroll,
            hscroll: 0,
        };
        let sections = ws.sections();
        print!("{}", dump(&sections, &opts, format)?);
        return Ok(());
    }

    let mut app = App::new(ws, left_name, right_name, save_path, &config);
    tui::run(&mut app)
}
