use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = match app.mode {
        Mode::Navigate => {
            if let Some(ref message) = app.status {
                Line::from(Span::styled(
                    message.clone(),
                    Style::default().fg(app.theme.empty).bg(bg),
                ))
            } else {
                // Show active filters dimmed, key hints right-aligned
                let mut left = String::new();
                if let Some(ref tag) = app.tag_filter {
                    left.push_str(&format!("#{} ", tag));
                }
                if let Some(ref query) = app.last_search {
                    left.push_str(&format!("/{}", query));
                }
                let hint = "space take  f filter  / search  q quit";
                let mut spans = vec![Span::styled(
                    left.clone(),
                    Style::default().fg(app.theme.dim).bg(bg),
                )];
                let left_width = left.chars().count();
                let hint_width = hint.chars().count();
                if left_width + hint_width < width {
                    spans.push(Span::styled(
                        " ".repeat(width - left_width - hint_width),
                        Style::default().bg(bg),
                    ));
                    spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
                }
                Line::from(spans)
            }
        }
        Mode::Search => {
            // Search prompt: /pattern▌
            let mut spans = vec![
                Span::styled(
                    format!("/{}", app.search_input),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
                Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
            ];
            let hint = "Enter search  Esc cancel";
            let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
            let hint_width = hint.chars().count();
            if content_width + hint_width < width {
                spans.push(Span::styled(
                    " ".repeat(width - content_width - hint_width),
                    Style::default().bg(bg),
                ));
                spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
            }
            Line::from(spans)
        }
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
