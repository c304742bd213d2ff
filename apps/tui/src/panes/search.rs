//! Search pane: single-line query input under the navigator.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Result of a key press in the search input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SearchAction {
    None,
    /// Text changed; schedule a query-change event.
    Edited,
    /// Apply the query now.
    Submit,
    /// Leave the input.
    Leave,
}

pub(crate) struct SearchPane {
    input: String,
}

impl SearchPane {
    pub(crate) fn new(initial: Option<&str>) -> Self {
        Self {
            input: initial.unwrap_or_default().to_string(),
        }
    }

    pub(crate) fn text(&self) -> &str {
        &self.input
    }

    pub(crate) fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> SearchAction {
        match code {
            KeyCode::Esc => SearchAction::Leave,
            KeyCode::Enter => SearchAction::Submit,
            KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
                if self.input.is_empty() {
                    return SearchAction::None;
                }
                self.input.clear();
                SearchAction::Edited
            }
            KeyCode::Backspace => {
                if self.input.pop().is_some() {
                    SearchAction::Edited
                } else {
                    SearchAction::None
                }
            }
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.push(c);
                SearchAction::Edited
            }
            _ => SearchAction::None,
        }
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect, focused: bool) {
        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" search ")
            .border_style(border_style);

        let paragraph = if self.input.is_empty() && !focused {
            Paragraph::new("Search providers, resources, data sources, and functions...")
                .style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(self.input.as_str())
        };
        f.render_widget(paragraph.block(block), area);

        if focused {
            f.set_cursor_position(self.cursor_position(area));
        }
    }

    /// Cursor just after the typed text, kept inside the border.
    fn cursor_position(&self, area: Rect) -> Position {
        let width = u16::try_from(self.input.chars().count()).unwrap_or(u16::MAX);
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(width)
            .min(area.right().saturating_sub(2));
        Position::new(x, area.y.saturating_add(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_and_erasing_report_edits() {
        let mut pane = SearchPane::new(None);
        assert_eq!(pane.handle_key(KeyCode::Char('i'), KeyModifiers::NONE), SearchAction::Edited);
        assert_eq!(pane.handle_key(KeyCode::Char('n'), KeyModifiers::SHIFT), SearchAction::Edited);
        assert_eq!(pane.text(), "in");

        assert_eq!(pane.handle_key(KeyCode::Backspace, KeyModifiers::NONE), SearchAction::Edited);
        assert_eq!(pane.text(), "i");
        assert_eq!(
            pane.handle_key(KeyCode::Char('u'), KeyModifiers::CONTROL),
            SearchAction::Edited
        );
        assert_eq!(pane.text(), "");
        assert_eq!(pane.handle_key(KeyCode::Backspace, KeyModifiers::NONE), SearchAction::None);
    }

    #[test]
    fn cursor_stays_inside_the_input() {
        let area = Rect::new(4, 10, 20, 3);
        assert_eq!(SearchPane::new(Some("vpc")).cursor_position(area), Position::new(8, 11));

        let long = "x".repeat(usize::from(u16::MAX) + 10);
        let pane = SearchPane::new(Some(&long));
        assert_eq!(pane.cursor_position(area), Position::new(22, 11));

        let far_right = Rect::new(u16::MAX - 5, 0, 5, 3);
        assert_eq!(pane.cursor_position(far_right).x, far_right.right().saturating_sub(2));
    }

    #[test]
    fn enter_and_esc() {
        let mut pane = SearchPane::new(Some("vpc"));
        assert_eq!(pane.handle_key(KeyCode::Enter, KeyModifiers::NONE), SearchAction::Submit);
        assert_eq!(pane.handle_key(KeyCode::Esc, KeyModifiers::NONE), SearchAction::Leave);
        assert_eq!(pane.text(), "vpc");
    }
}
