//! Reusable TUI widgets.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Bottom status bar.
pub(crate) fn status_bar(msg: &str) -> Paragraph<'_> {
    Paragraph::new(format!(" {msg}"))
        .style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White),
        )
}

/// Bordered pane block; the border is highlighted when the pane has focus.
///
/// The title is copied into the block, so callers may pass a temporary.
pub(crate) fn pane_block(title: &str, focused: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
        .border_style(border_style)
}

/// Style Markdown lines for the detail pane: headings bold, table rules dim.
pub(crate) fn markdown_lines(lines: &[String]) -> Vec<Line<'_>> {
    lines
        .iter()
        .map(|line| {
            if let Some(heading) = line.strip_prefix("# ") {
                Line::from(heading).style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                )
            } else if line.starts_with('#') {
                let text = line.trim_start_matches('#').trim_start();
                Line::from(text).style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else if line.starts_with("|-") {
                Line::from(line.as_str()).style(Style::default().fg(Color::DarkGray))
            } else {
                Line::from(line.as_str())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pane_block_outlives_a_temporary_title() {
        let block = pane_block(&format!("attributes ({})", 3), true);
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        block.render(area, &mut buf);

        let top: String = (0..area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect();
        assert!(top.contains(" attributes (3) "));
    }

    #[test]
    fn markdown_headings_drop_their_hashes() {
        let lines = vec![
            "# aws_instance".to_string(),
            "## ami".to_string(),
            "|---|---|".to_string(),
        ];
        let styled = markdown_lines(&lines);
        assert_eq!(styled[0].to_string(), "aws_instance");
        assert_eq!(styled[1].to_string(), "ami");
        assert_eq!(styled[2].to_string(), "|---|---|");
    }
}
