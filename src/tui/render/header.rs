use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::StatusFilter;
use crate::tui::app::App;

/// Render the header: app name and filter tabs, then the stats line
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // stats
        ])
        .split(area);

    render_tabs(frame, app, chunks[0]);
    render_stats(frame, app, chunks[1]);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let bg_style = Style::default().bg(bg);
    let sep = Span::styled("\u{2502}", Style::default().fg(app.theme.dim).bg(bg));

    let mut spans: Vec<Span> = vec![
        Span::styled(" ", bg_style),
        Span::styled(
            "\u{25B6}",
            Style::default().fg(app.theme.highlight).bg(bg),
        ),
        Span::styled(
            " ticklist ",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    let current = app.store.filter();
    for (i, filter) in StatusFilter::ALL.iter().enumerate() {
        spans.push(sep.clone());
        let label = format!(
            " {} {} ({}) ",
            i + 1,
            filter.label(),
            app.store.filter_count(*filter)
        );
        let style = if *filter == current {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };
        spans.push(Span::styled(label, style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}

fn render_stats(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let stats = app.store.stats();
    let dim = Style::default().fg(app.theme.dim).bg(bg);
    let dot = Span::styled(" \u{00B7} ", dim);

    let mut spans = vec![
        Span::styled(format!(" {} total", stats.total), dim),
        dot.clone(),
        Span::styled(
            format!("{} active", stats.active),
            Style::default().fg(app.theme.text).bg(bg),
        ),
        dot.clone(),
        Span::styled(
            format!("{} done", stats.completed),
            Style::default().fg(app.theme.green).bg(bg),
        ),
    ];
    if stats.overdue > 0 {
        spans.push(dot.clone());
        spans.push(Span::styled(
            format!("{} overdue", stats.overdue),
            Style::default()
                .fg(app.theme.red)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));
    }
    if stats.total > 0 {
        spans.push(dot);
        spans.push(Span::styled(
            format!("{}% complete", stats.completed * 100 / stats.total),
            dim,
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}
