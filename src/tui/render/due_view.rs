use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::schedule;
use crate::tui::app::App;
use crate::util::text::truncate_to_width;

use super::cabinet_view::scroll_offset;

/// Render the due view: medicines whose dose-time windows cover the
/// current hour, with a checkbox for doses taken this session.
pub fn render_due_view(frame: &mut Frame, app: &App, area: Rect) {
    let due = app.due_list();
    let bg = app.theme.background;

    let periods = schedule::active_periods(app.hour, &app.store.config.windows);
    let period_labels: Vec<&str> = periods.iter().map(|p| p.label()).collect();
    let header = if period_labels.is_empty() {
        format!(" {}:00 — no dose window active", app.hour)
    } else {
        format!(" {}:00 — {}", app.hour, period_labels.join(", "))
    };

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            header,
            Style::default().fg(app.theme.dim).bg(bg),
        )),
        Line::default(),
    ];

    if due.is_empty() {
        lines.push(Line::from(Span::styled(
            "  nothing due right now",
            Style::default().fg(app.theme.dim).bg(bg),
        )));
    } else {
        let height = (area.height as usize).saturating_sub(2);
        let scroll = scroll_offset(app.due_cursor, due.len(), height);
        for (i, med) in due.iter().enumerate().skip(scroll).take(height) {
            let selected = i == app.due_cursor;
            let row_bg = if selected { app.theme.selection_bg } else { bg };
            let taken = app.taken.contains(&med.id);
            let marker = if taken { "[x]" } else { "[ ]" };
            let marker_style = if taken {
                Style::default().fg(app.theme.enough).bg(row_bg)
            } else {
                Style::default().fg(app.theme.text).bg(row_bg)
            };
            let mut name_style = if selected {
                Style::default()
                    .fg(app.theme.text_bright)
                    .bg(row_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(app.theme.text).bg(row_bg)
            };
            if taken {
                name_style = name_style.add_modifier(Modifier::CROSSED_OUT);
            }

            let mut spans = vec![
                Span::styled(format!(" {} ", marker), marker_style),
                Span::styled(truncate_to_width(&med.name, 24), name_style),
                Span::styled(
                    format!("  {} left", med.amount_left),
                    Style::default().fg(app.theme.level_color(med.level)).bg(row_bg),
                ),
            ];
            let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
            let width = area.width as usize;
            if used < width {
                spans.push(Span::styled(
                    " ".repeat(width - used),
                    Style::default().bg(row_bg),
                ));
            }
            lines.push(Line::from(spans));
        }
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
