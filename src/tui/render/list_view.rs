use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{Priority, StatusFilter, Todo};
use crate::ops::stats::due_label;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::push_highlighted_spans;

/// Render the search bar shown while searching or while a term is active
pub fn render_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let mut spans = vec![Span::styled(
        format!(" /{}", app.store.search_term()),
        Style::default().fg(app.theme.text_bright).bg(bg),
    )];
    if app.mode == Mode::Search {
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    }
    spans.push(Span::styled(
        format!("  {} match(es)", app.store.filtered_len()),
        Style::default().fg(app.theme.dim).bg(bg),
    ));
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

/// Render the filtered todo list, one row per todo
pub fn render_list(frame: &mut Frame, app: &mut App, area: Rect) {
    app.list_area = Some(area);
    let height = area.height as usize;
    if height == 0 {
        return;
    }

    app.clamp_cursor();
    // Keep the cursor on screen
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if app.cursor >= app.scroll_offset + height {
        app.scroll_offset = app.cursor + 1 - height;
    }

    if app.store.filtered_len() == 0 {
        render_empty_state(frame, app, area);
        return;
    }

    let now = app.store.now();
    let search_re = app.search_re();
    let width = area.width as usize;
    let lines: Vec<Line> = app
        .store
        .filtered()
        .into_iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(height)
        .map(|(i, todo)| {
            render_row(app, todo, i == app.cursor, width, now, search_re.as_ref())
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(app.theme.background)),
        area,
    );
}

fn priority_marker(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "\u{25B2}",
        Priority::Medium => "\u{25C6}",
        Priority::Low => "\u{25BD}",
    }
}

fn render_row<'a>(
    app: &App,
    todo: &Todo,
    selected: bool,
    width: usize,
    now: chrono::DateTime<chrono::Utc>,
    search_re: Option<&regex::Regex>,
) -> Line<'a> {
    let bg = if selected {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let base = Style::default().bg(bg);

    let mut left: Vec<Span> = vec![
        Span::styled(
            if selected { " \u{25B8} " } else { "   " },
            base.fg(app.theme.highlight),
        ),
        Span::styled(
            if todo.completed { "[x] " } else { "[ ] " },
            base.fg(if todo.completed {
                app.theme.green
            } else {
                app.theme.text
            }),
        ),
        Span::styled(
            format!("{} ", priority_marker(todo.priority)),
            base.fg(app.theme.priority_color(todo.priority)),
        ),
    ];

    // Right-hand badges: category, due label
    let mut right: Vec<Span> = Vec::new();
    if let Some(category) = &todo.category {
        right.push(Span::styled(
            format!(" #{}", category),
            base.fg(app.theme.category_color(category)),
        ));
    }
    if let Some(due) = todo.due_date {
        let style = if todo.is_overdue(now) {
            base.fg(app.theme.red).add_modifier(Modifier::BOLD)
        } else {
            base.fg(app.theme.dim)
        };
        right.push(Span::styled(format!(" {}", due_label(due, now)), style));
    }
    right.push(Span::styled(" ", base));

    let used: usize = left
        .iter()
        .chain(right.iter())
        .map(|s| unicode::display_width(&s.content))
        .sum();
    let title_room = width.saturating_sub(used + 1);

    let mut title_style = base.fg(if selected {
        app.theme.text_bright
    } else {
        app.theme.text
    });
    if todo.completed {
        title_style = title_style
            .fg(app.theme.dim)
            .add_modifier(Modifier::CROSSED_OUT);
    }
    let highlight = base
        .fg(app.theme.search_match_fg)
        .bg(app.theme.search_match_bg);

    let title = unicode::truncate_to_width(&todo.title, title_room);
    let mut text_width = unicode::display_width(&title);
    push_highlighted_spans(&mut left, &title, title_style, highlight, search_re);
    // Description fills leftover room, dimmed
    if !todo.description.is_empty() && text_width + 4 < title_room {
        let desc = unicode::truncate_to_width(&todo.description, title_room - text_width - 3);
        text_width += 3 + unicode::display_width(&desc);
        left.push(Span::styled(" \u{00B7} ", base.fg(app.theme.dim)));
        push_highlighted_spans(&mut left, &desc, base.fg(app.theme.dim), highlight, search_re);
    }

    let pad = title_room.saturating_sub(text_width) + 1;
    left.push(Span::styled(" ".repeat(pad), base));
    left.extend(right);
    Line::from(left)
}

/// Title and hint per filter when nothing is visible
pub fn empty_state(filter: StatusFilter, search_term: &str) -> (&'static str, String) {
    if !search_term.is_empty() {
        return (
            "No matches",
            format!("Nothing matches \"{}\". Esc clears the search.", search_term),
        );
    }
    match filter {
        StatusFilter::All => ("No todos", "Press a to add your first todo.".into()),
        StatusFilter::Active => ("No active todos", "Everything is done.".into()),
        StatusFilter::Completed => ("No completed todos", "Nothing finished yet.".into()),
        StatusFilter::Overdue => ("No overdue todos", "Everything is on schedule.".into()),
    }
}

fn render_empty_state(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let (title, message) = empty_state(app.store.filter(), app.store.search_term());
    let top = area.height.saturating_sub(2) / 2;
    let mut lines: Vec<Line> = (0..top).map(|_| Line::from("")).collect();
    lines.push(
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .centered(),
    );
    lines.push(
        Line::from(Span::styled(
            message,
            Style::default().fg(app.theme.dim).bg(bg),
        ))
        .centered(),
    );
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}
