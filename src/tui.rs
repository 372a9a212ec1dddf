//! TUI layer using ratatui and crossterm
//!
//! Draws the side-by-side panes, status bar and modal overlays; all
//! state transitions live in [`App`].

use crate::app::{App, Modal};
use crate::view::Row;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io::{self, Stdout};
use unicode_width::UnicodeWidthChar;

/// Runs the interactive session
pub fn run(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
                if app.should_quit() {
                    return Ok(());
                }
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Diff panes
            Constraint::Length(3), // Status
        ])
        .split(f.area());

    // The viewport height depends on the terminal; tell the app before
    // asking it for rows.
    app.set_viewport_height(chunks[1].height.saturating_sub(2) as usize);

    render_header(f, app, chunks[0]);
    render_diff(f, app, chunks[1]);
    render_status(f, app, chunks[2]);

    match app.modal {
        Modal::Help => render_help(f),
        Modal::ConfirmQuit => render_confirm_quit(f),
        Modal::None => {}
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let edited = if app.ws.edited() { " [edited]" } else { "" };
    let title = format!(" {}  ⇄  {}{}", app.left_name, app.right_name, edited);

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL).title(" sidediff "));

    f.render_widget(header, area);
}

fn render_diff(f: &mut Frame, app: &App, area: Rect) {
    let rows = app.visible_rows();
    let inner_width = area.width.saturating_sub(2) as usize;
    // Per side: 4-digit number, a space and the 2-char prefix; the
    // divider takes 3 cells including its padding.
    let pane_width = inner_width.saturating_sub(2 * 7 + 3) / 2;

    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| render_row(row, pane_width))
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL));
    f.render_widget(list, area);
}

fn render_row(row: &Row, pane_width: usize) -> ListItem<'static> {
    let left_style = side_style(row.left_prefix);
    let right_style = side_style(row.right_prefix);
    let (left_style, right_style, divider_style) = if row.is_cursor {
        (
            left_style.add_modifier(Modifier::REVERSED),
            right_style.add_modifier(Modifier::REVERSED),
            Style::default().add_modifier(Modifier::REVERSED),
        )
    } else {
        (left_style, right_style, Style::default().fg(Color::DarkGray))
    };

    let left = format!(
        "{} {}{}",
        pad_number(row.left_number),
        row.left_prefix,
        fit(&row.left_text, pane_width)
    );
    let right = format!(
        "{} {}{}",
        pad_number(row.right_number),
        row.right_prefix,
        fit(&row.right_text, pane_width)
    );

    ListItem::new(Line::from(vec![
        Span::styled(left, left_style),
        Span::styled(format!(" {} ", row.divider), divider_style),
        Span::styled(right, right_style),
    ]))
}

fn side_style(prefix: &str) -> Style {
    match prefix {
        "+ " => Style::default().fg(Color::Green),
        "- " => Style::default().fg(Color::Red),
        _ => Style::default(),
    }
}

fn pad_number(n: Option<usize>) -> String {
    match n {
        Some(n) => format!("{:>4}", n),
        None => "    ".to_string(),
    }
}

/// Truncate or pad to an exact display width, counting wide characters.
fn fit(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    while used < width {
        out.push(' ');
        used += 1;
    }
    out
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let status = app.status();

    let content = if let Some(msg) = &status.message {
        format!(" {}", msg)
    } else {
        " j/k: move | n/N: change | f: fold | c: copy left | r: restore | u: undo | s: save | ?: help | q: quit"
            .to_string()
    };

    let summary = format!(
        " row {}/{} · section {}/{} · fold {}{} ",
        status.row,
        status.total_rows,
        status.section,
        status.total_sections,
        if status.fold { "on" } else { "off" },
        if status.edited { " · edited" } else { "" },
    );

    let widget = Paragraph::new(content)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title(summary));

    f.render_widget(widget, area);
}

fn render_help(f: &mut Frame) {
    let area = centered_rect(60, 70, f.area());

    let help_text = vec![
        "",
        "  Navigation:",
        "    j / ↓     Move down",
        "    k / ↑     Move up",
        "    PgDn/PgUp Page down / up",
        "    n         Next changed section",
        "    N / p     Previous changed section",
        "    g         Go to top",
        "    G         Go to bottom",
        "    h/l, ←/→  Scroll content horizontally",
        "",
        "  View:",
        "    f         Toggle folding of unchanged sections",
        "",
        "  Editing:",
        "    c         Copy left section over the right side",
        "    r         Restore the section's original right side",
        "    u         Undo last edit",
        "    s         Save the working document",
        "",
        "  Other:",
        "    ?         Toggle this help",
        "    q         Quit",
        "",
    ];

    let help = Paragraph::new(help_text.join("\n"))
        .style(Style::default())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .style(Style::default().bg(Color::DarkGray)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(help, area);
}

fn render_confirm_quit(f: &mut Frame) {
    let area = centered_rect(50, 20, f.area());

    let text = vec![
        "",
        "  The working document has unsaved edits.",
        "",
        "    s    Save and quit",
        "    d    Discard edits and quit",
        "    Esc  Keep editing",
        "",
    ];

    let confirm = Paragraph::new(text.join("\n"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Unsaved changes ")
                .style(Style::default().bg(Color::DarkGray)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(confirm, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
