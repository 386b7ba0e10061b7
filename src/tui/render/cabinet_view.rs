use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::medicine::Medicine;
use crate::tui::app::App;
use crate::util::text::{join_tags, truncate_to_width};

/// Render the cabinet view: one row per medicine with level marker,
/// stock, and tags.
pub fn render_cabinet_view(frame: &mut Frame, app: &App, area: Rect) {
    let medicines = app.visible_medicines();
    let bg = app.theme.background;

    if medicines.is_empty() {
        let message = if app.last_search.is_some() || app.tag_filter.is_some() {
            "no matches"
        } else {
            "cabinet is empty — add medicines with `dose add`"
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(
            format!("  {}", message),
            Style::default().fg(app.theme.dim).bg(bg),
        )))
        .style(Style::default().bg(bg));
        frame.render_widget(paragraph, area);
        return;
    }

    let height = area.height as usize;
    let scroll = scroll_offset(app.cabinet_cursor, medicines.len(), height);

    let mut lines: Vec<Line> = Vec::new();
    for (i, med) in medicines.iter().enumerate().skip(scroll).take(height) {
        lines.push(medicine_row(app, med, i == app.cabinet_cursor, area.width as usize));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn medicine_row<'a>(app: &App, med: &'a Medicine, selected: bool, width: usize) -> Line<'a> {
    let row_bg = if selected {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let level_style = Style::default().fg(app.theme.level_color(med.level)).bg(row_bg);
    let name_style = if selected {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(row_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(row_bg)
    };
    let dim_style = Style::default().fg(app.theme.dim).bg(row_bg);

    let mut spans = vec![
        Span::styled(format!(" [{}] ", med.level.bracket_char()), level_style),
        Span::styled(truncate_to_width(&med.name, 24), name_style),
    ];

    let name_width = spans.iter().map(|s| s.content.chars().count()).sum::<usize>();
    if name_width < 30 {
        spans.push(Span::styled(" ".repeat(30 - name_width), Style::default().bg(row_bg)));
    }
    spans.push(Span::styled(
        format!("{:>4} left  {}/day  ", med.amount_left, med.daily_needed),
        dim_style,
    ));

    let mut tags = String::new();
    if !med.purpose_tag.is_empty() {
        tags.push_str(&med.purpose_tag);
    }
    if !med.time_tags.is_empty() {
        if !tags.is_empty() {
            tags.push_str(" · ");
        }
        tags.push_str(&join_tags(&med.time_tags));
    }
    let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    spans.push(Span::styled(
        truncate_to_width(&tags, width.saturating_sub(used + 1)),
        dim_style,
    ));

    // Pad selection to full width
    let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), Style::default().bg(row_bg)));
    }

    Line::from(spans)
}

/// First visible row so the cursor stays on screen.
pub(super) fn scroll_offset(cursor: usize, len: usize, height: usize) -> usize {
    if height == 0 || len <= height {
        return 0;
    }
    if cursor < height {
        0
    } else {
        (cursor + 1 - height).min(len - height)
    }
}
