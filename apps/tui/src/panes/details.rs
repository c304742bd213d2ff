//! Details pane: the rendered detail document with anchor scrolling.

use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use terradex_core::DetailDocument;

use crate::widgets::{markdown_lines, pane_block};

/// Lines moved by PageUp / PageDown.
const PAGE: usize = 10;

pub(crate) struct DetailsPane {
    lines: Vec<String>,
    scroll: usize,
}

impl DetailsPane {
    pub(crate) fn new(document: &DetailDocument) -> Self {
        Self {
            lines: document.lines(),
            scroll: 0,
        }
    }

    /// Show a new document from the top.
    pub(crate) fn set_document(&mut self, document: &DetailDocument) {
        self.lines = document.lines();
        self.scroll = 0;
    }

    /// Bring `line` to the top of the pane.
    pub(crate) fn scroll_to(&mut self, line: usize) {
        self.scroll = line.min(self.max_scroll());
    }

    pub(crate) fn scroll(&self) -> usize {
        self.scroll
    }

    fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }

    pub(crate) fn handle_key(&mut self, code: KeyCode) {
        self.scroll = match code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll + 1,
            KeyCode::PageUp => self.scroll.saturating_sub(PAGE),
            KeyCode::PageDown => self.scroll + PAGE,
            KeyCode::Home | KeyCode::Char('g') => 0,
            KeyCode::End | KeyCode::Char('G') => self.max_scroll(),
            _ => return,
        }
        .min(self.max_scroll());
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect, focused: bool) {
        let offset = u16::try_from(self.scroll).unwrap_or(u16::MAX);
        let paragraph = Paragraph::new(markdown_lines(&self.lines))
            .block(pane_block("details", focused))
            .scroll((offset, 0));
        f.render_widget(paragraph, area);
    }
}
