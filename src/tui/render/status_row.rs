use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Dialog, Mode};
use crate::util::unicode;

/// Render the status row (bottom of screen): message or sort on the left,
/// key hints for the current context on the right
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let left = match (&app.status_message, app.sort_mode) {
        (Some(msg), _) => Span::styled(
            format!(" {}", msg),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ),
        (None, Some(mode)) => Span::styled(
            format!(" sort: {}", mode.label()),
            Style::default().fg(app.theme.dim).bg(bg),
        ),
        (None, None) => Span::styled(" ", Style::default().bg(bg)),
    };

    let mut spans = vec![left];
    if app.show_key_hints {
        let hint = key_hints(app);
        let content_width: usize = spans.iter().map(|s| unicode::display_width(&s.content)).sum();
        let hint_width = unicode::display_width(hint);
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn key_hints(app: &App) -> &'static str {
    match app.active_dialog() {
        Some(Dialog::Delete) => "y delete  n cancel ",
        Some(Dialog::Form) => "Tab next  Enter save  Esc cancel ",
        Some(Dialog::Help) => "Esc close ",
        None => match app.mode {
            Mode::Search => "Enter keep  Esc clear ",
            Mode::Navigate => "a add  e edit  d del  / search  s sort  ? help ",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;
    use crate::tui::render::test_helpers::*;

    fn status(app: &App) -> String {
        render_to_string(TERM_W, 1, |frame, area| render_status_row(frame, app, area))
    }

    #[test]
    fn shows_sort_and_hints() {
        let mut app = app_with_todos(&[("x", Priority::Low, false)]);
        assert!(status(&app).contains("? help"));
        app.cycle_sort();
        app.status_message = None;
        let out = status(&app);
        assert!(out.contains("sort: newest first"), "{}", out);
    }

    #[test]
    fn message_wins_and_hints_can_be_hidden() {
        let mut app = app_with_todos(&[]);
        app.show_key_hints = false;
        app.status_message = Some("cleared 2 completed".into());
        let out = status(&app);
        assert!(out.contains("cleared 2 completed"));
        assert!(!out.contains("help"));
    }
}
