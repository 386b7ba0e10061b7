use chrono::{Datelike, Local};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::cost;
use crate::tui::app::App;
use crate::util::text::format_money;

/// Render the costs view: stock value, daily burn, and the projection
/// for the current calendar month.
pub fn render_costs_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let today = Local::now().date_naive();
    let summary = cost::aggregate(&app.store.cabinet.medicines, today);

    let label_style = Style::default().fg(app.theme.dim).bg(bg);
    let value_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::from(Span::styled(
            format!(" costs for {:04}-{:02}", today.year(), today.month()),
            Style::default().fg(app.theme.text).bg(bg),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("  stock on hand   ", label_style),
            Span::styled(format_money(summary.total), value_style),
        ]),
        Line::from(vec![
            Span::styled("  per day         ", label_style),
            Span::styled(format_money(summary.daily), value_style),
        ]),
        Line::from(vec![
            Span::styled("  this month      ", label_style),
            Span::styled(format_money(summary.monthly), value_style),
        ]),
        Line::default(),
        Line::from(Span::styled(
            format!("  {} medicines in cabinet", app.store.cabinet.medicines.len()),
            label_style,
        )),
    ];

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
