//! Fields pane: attribute or function names of the current selection.

use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, ListState};

use crate::widgets::pane_block;

/// Result of a key press in the field list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FieldAction {
    None,
    /// The highlighted field changed or was confirmed: pick it.
    Pick(String),
}

pub(crate) struct FieldsPane {
    cursor: usize,
}

impl FieldsPane {
    pub(crate) fn new() -> Self {
        Self { cursor: 0 }
    }

    /// Back to the top after a new tree selection.
    pub(crate) fn reset(&mut self) {
        self.cursor = 0;
    }

    pub(crate) fn handle_key(&mut self, code: KeyCode, fields: &[String]) -> FieldAction {
        if fields.is_empty() {
            return FieldAction::None;
        }
        let previous = self.cursor.min(fields.len() - 1);

        self.cursor = match code {
            KeyCode::Up | KeyCode::Char('k') => previous.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => (previous + 1).min(fields.len() - 1),
            KeyCode::Home | KeyCode::Char('g') => 0,
            KeyCode::End | KeyCode::Char('G') => fields.len() - 1,
            KeyCode::Enter => return FieldAction::Pick(fields[previous].clone()),
            _ => return FieldAction::None,
        };

        if self.cursor == previous {
            FieldAction::None
        } else {
            FieldAction::Pick(fields[self.cursor].clone())
        }
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect, fields: &[String], focused: bool) {
        let items: Vec<ListItem> = fields.iter().map(|name| ListItem::new(name.as_str())).collect();
        let list = List::new(items)
            .block(pane_block(&format!("attributes ({})", fields.len()), focused))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::REVERSED),
            );

        let selected = (!fields.is_empty()).then(|| self.cursor.min(fields.len() - 1));
        let mut state = ListState::default().with_selected(selected);
        f.render_stateful_widget(list, area, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> Vec<String> {
        vec!["bucket".into(), "region".into(), "tags".into()]
    }

    #[test]
    fn moving_the_highlight_picks() {
        let mut pane = FieldsPane::new();
        let fields = fields();
        assert_eq!(pane.handle_key(KeyCode::Down, &fields), FieldAction::Pick("region".into()));
        assert_eq!(pane.handle_key(KeyCode::End, &fields), FieldAction::Pick("tags".into()));
        assert_eq!(pane.handle_key(KeyCode::Down, &fields), FieldAction::None);
        assert_eq!(pane.handle_key(KeyCode::Enter, &fields), FieldAction::Pick("tags".into()));
    }

    #[test]
    fn empty_list_ignores_keys() {
        let mut pane = FieldsPane::new();
        assert_eq!(pane.handle_key(KeyCode::Enter, &[]), FieldAction::None);
    }

    #[test]
    fn reset_returns_to_top() {
        let mut pane = FieldsPane::new();
        let fields = fields();
        pane.handle_key(KeyCode::End, &fields);
        pane.reset();
        assert_eq!(pane.handle_key(KeyCode::Enter, &fields), FieldAction::Pick("bucket".into()));
    }
}
