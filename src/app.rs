//! Interactive session state: navigation, folding, edits and modals.
//!
//! All key handling lives here as pure state transitions over one
//! explicit value, so the whole interaction model is testable without a
//! terminal. The TUI layer only draws what this struct exposes.

use crate::align::Section;
use crate::config::Config;
use crate::edit::Workspace;
use crate::view::{Layout, Row, Viewport};
use crossterm::event::{KeyCode, KeyEvent};
use std::path::PathBuf;

/// Overlays that fully intercept input while active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    None,
    Help,
    ConfirmQuit,
}

/// One-line summary for the status bar.
#[derive(Debug, Clone)]
pub struct Status {
    pub row: usize,
    pub total_rows: usize,
    pub section: usize,
    pub total_sections: usize,
    pub fold: bool,
    pub edited: bool,
    pub message: Option<String>,
}

pub struct App {
    pub ws: Workspace,
    pub left_name: String,
    pub right_name: String,
    save_path: Option<PathBuf>,

    sections: Vec<Section>,
    cursor: usize,
    scroll: usize,
    hscroll: usize,
    current_section: usize,
    fold: bool,
    context: usize,
    brackets: bool,
    viewport_height: usize,

    pub modal: Modal,
    message: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(
        ws: Workspace,
        left_name: String,
        right_name: String,
        save_path: Option<PathBuf>,
        config: &Config,
    ) -> Self {
        let sections = ws.sections();
        Self {
            ws,
            left_name,
            right_name,
            save_path,
            sections,
            cursor: 0,
            scroll: 0,
            hscroll: 0,
            current_section: 0,
            fold: config.fold,
            context: config.context_lines,
            brackets: config.brackets,
            viewport_height: 1,
            modal: Modal::None,
            message: None,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    #[allow(dead_code)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[allow(dead_code)]
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    #[allow(dead_code)]
    pub fn current_section(&self) -> usize {
        self.current_section
    }

    #[allow(dead_code)]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn total_rows(&self) -> usize {
        self.layout().total_rows()
    }

    pub fn status(&self) -> Status {
        Status {
            row: self.cursor + 1,
            total_rows: self.total_rows(),
            section: self.current_section + 1,
            total_sections: self.sections.len(),
            fold: self.fold,
            edited: self.ws.edited(),
            message: self.message.clone(),
        }
    }

    /// Rows for the current viewport, ready to draw.
    pub fn visible_rows(&self) -> Vec<Row> {
        let vp = Viewport {
            scroll: self.scroll,
            height: self.viewport_height,
            cursor: self.cursor,
            hscroll: self.hscroll,
        };
        self.layout().rows(&vp, self.brackets)
    }

    /// Called by the renderer whenever the terminal size is known.
    pub fn set_viewport_height(&mut self, height: usize) {
        let height = height.max(1);
        if height != self.viewport_height {
            self.viewport_height = height;
            self.sync();
        }
    }

    fn layout(&self) -> Layout<'_> {
        Layout::new(&self.sections, self.fold, self.context)
    }

    /// Re-establish every positional invariant after a cursor move,
    /// fold toggle or section recompute: clamp the cursor, restore the
    /// scroll window around it, rederive the current section.
    fn sync(&mut self) {
        let total = self.total_rows();
        self.cursor = self.cursor.min(total.saturating_sub(1));
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + self.viewport_height {
            self.scroll = self.cursor - self.viewport_height + 1;
        }
        self.current_section = self.layout().section_at(self.cursor);
    }

    fn move_cursor(&mut self, delta: isize) {
        let total = self.total_rows() as isize;
        self.cursor = (self.cursor as isize + delta).clamp(0, total - 1) as usize;
        self.sync();
    }

    fn next_change(&mut self) {
        let target = self.layout().next_changed_start(self.cursor);
        match target {
            Some(row) => {
                self.cursor = row;
                self.sync();
            }
            None => self.message = Some("No further changes".to_string()),
        }
    }

    fn prev_change(&mut self) {
        let target = self.layout().prev_changed_start(self.cursor);
        match target {
            Some(row) => {
                self.cursor = row;
                self.sync();
            }
            None => self.message = Some("No earlier changes".to_string()),
        }
    }

    fn toggle_fold(&mut self) {
        self.fold = !self.fold;
        self.sync();
        self.message = Some(if self.fold {
            "Folding on".to_string()
        } else {
            "Folding off".to_string()
        });
    }

    /// Recompute sections from the working document. The cursor's display
    /// row survives (re-clamped) and the current section is rederived
    /// from it, so "current section" tracks row position, not identity.
    fn recompute(&mut self) {
        self.sections = self.ws.sections();
        self.sync();
    }

    fn copy_left(&mut self) {
        if self.ws.copy_left_to_right(&self.sections, self.current_section) {
            self.recompute();
            self.message = Some("Copied left section into working copy".to_string());
        } else {
            self.message = Some("Nothing to copy here".to_string());
        }
    }

    fn restore(&mut self) {
        if self.ws.restore_original(&self.sections, self.current_section) {
            self.recompute();
            self.message = Some("Restored original content".to_string());
        } else {
            self.message = Some("Section already matches the original".to_string());
        }
    }

    fn undo(&mut self) {
        if self.ws.undo() {
            self.recompute();
            self.message = Some("Undone".to_string());
        } else {
            self.message = Some("Nothing to undo".to_string());
        }
    }

    fn save(&mut self) -> bool {
        match &self.save_path {
            Some(path) => match self.ws.save_to(path) {
                Ok(()) => {
                    self.message = Some(format!("Saved {}", path.display()));
                    true
                }
                Err(err) => {
                    self.message = Some(format!("Save failed: {err:#}"));
                    false
                }
            },
            None => {
                self.message = Some("No file to save to (demo buffers)".to_string());
                false
            }
        }
    }

    fn request_quit(&mut self) {
        if self.ws.edited() {
            self.modal = Modal::ConfirmQuit;
        } else {
            self.should_quit = true;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Transient messages live until the next key press.
        self.message = None;

        match self.modal {
            Modal::Help => self.modal = Modal::None,
            Modal::ConfirmQuit => self.handle_confirm_key(key),
            Modal::None => self.handle_normal_key(key),
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('s') => {
                self.modal = Modal::None;
                if self.save() {
                    self.should_quit = true;
                }
            }
            KeyCode::Char('d') | KeyCode::Char('y') => {
                self.modal = Modal::None;
                self.should_quit = true;
            }
            KeyCode::Esc | KeyCode::Char('c') | KeyCode::Char('n') => {
                self.modal = Modal::None;
            }
            _ => {}
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.request_quit(),
            KeyCode::Char('?') => self.modal = Modal::Help,

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => self.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-1),
            KeyCode::PageDown => self.move_cursor(self.viewport_height as isize),
            KeyCode::PageUp => self.move_cursor(-(self.viewport_height as isize)),
            KeyCode::Char('g') => {
                self.cursor = 0;
                self.sync();
            }
            KeyCode::Char('G') => {
                self.cursor = self.total_rows().saturating_sub(1);
                self.sync();
            }
            KeyCode::Char('n') => self.next_change(),
            KeyCode::Char('N') | KeyCode::Char('p') => self.prev_change(),
            KeyCode::Char('h') | KeyCode::Left => {
                self.hscroll = self.hscroll.saturating_sub(4);
            }
            KeyCode::Char('l') | KeyCode::Right => {
                self.hscroll += 4;
            }

            // View
            KeyCode::Char('f') => self.toggle_fold(),

            // Editing
            KeyCode::Char('c') => self.copy_left(),
            KeyCode::Char('r') => self.restore(),
            KeyCode::Char('u') => self.undo(),
            KeyCode::Char('s') => {
                self.save();
            }

            _ => {}
        }
    }
}
