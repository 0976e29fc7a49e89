pub mod confirm_view;
pub mod dialog;
pub mod form_view;
pub mod header;
pub mod help_overlay;
pub mod list_view;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use regex::Regex;

use super::app::{App, Mode};

/// Main render function; dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Hit regions are rebuilt every frame
    app.dialog_area = None;
    app.hit_targets.clear();
    app.list_area = None;

    let search_rows = if app.mode == Mode::Search || !app.store.search_term().is_empty() {
        1
    } else {
        0
    };

    // Layout: header (2 rows) | search bar | list | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(search_rows),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);
    if search_rows > 0 {
        list_view::render_search_bar(frame, app, chunks[1]);
    }
    list_view::render_list(frame, app, chunks[2]);
    status_row::render_status_row(frame, app, chunks[3]);

    // Dialogs, bottom to top
    if app.help_modal.is_rendered() {
        help_overlay::render_help_overlay(frame, app, area);
    }
    if app.form_modal.is_rendered() {
        form_view::render_form_dialog(frame, app, area);
    }
    if app.delete_modal.is_rendered() {
        confirm_view::render_delete_dialog(frame, app, area);
    }
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let Some(re) = search_re else {
        spans.push(Span::styled(text.to_string(), base_style));
        return;
    };

    let mut last_end = 0;
    for m in re.find_iter(text) {
        if m.start() > last_end {
            spans.push(Span::styled(
                text[last_end..m.start()].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(m.as_str().to_string(), highlight_style));
        last_end = m.end();
    }
    if last_end < text.len() || text.is_empty() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;
    use crate::tui::modal::ENTER_DELAY;
    use test_helpers::*;

    #[test]
    fn highlighted_spans_split_on_matches() {
        let re = Regex::new("(?i)ab").unwrap();
        let hl = Style::default().bg(ratatui::style::Color::Red);
        let mut spans = Vec::new();
        push_highlighted_spans(&mut spans, "xABy ab", Style::default(), hl, Some(&re));
        let parts: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(parts, vec!["x", "AB", "y ", "ab"]);
        assert_eq!(spans[1].style, hl);

        let mut plain = Vec::new();
        push_highlighted_spans(&mut plain, "none", Style::default(), hl, Some(&re));
        assert_eq!(plain.len(), 1);
    }

    #[test]
    fn full_screen_shows_header_list_and_status() {
        let mut app = app_with_todos(&[
            ("Write report", Priority::High, false),
            ("Call plumber", Priority::Low, true),
        ]);
        let out = render_app(&mut app);
        assert!(out.contains("ticklist"), "{}", out);
        assert!(out.contains("All (2)"));
        assert!(out.contains("Active (1)"));
        assert!(out.contains("Write report"));
        assert!(out.contains("[x] "));
        assert!(app.list_area.is_some());
        assert!(app.dialog_area.is_none());
    }

    #[test]
    fn open_form_registers_dialog_regions() {
        let mut app = app_with_todos(&[]);
        let t0 = app.now;
        app.open_add_modal();
        app.tick(t0 + ENTER_DELAY);
        let out = render_app(&mut app);
        assert!(out.contains("New todo"), "{}", out);
        assert!(app.dialog_area.is_some());
        assert!(!app.hit_targets.is_empty());
    }
}
