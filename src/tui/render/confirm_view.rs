use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Button, Dialog};
use crate::util::unicode;

use super::dialog::{DialogArea, render_buttons, render_dialog_frame};

/// Render the delete confirmation dialog
pub fn render_delete_dialog(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(DialogArea { inner, faded }) = render_dialog_frame(frame, app, Dialog::Delete, area)
    else {
        return;
    };
    if inner.height < 2 {
        return;
    }

    let bg = app.theme.background;
    let text_fg = if faded { app.theme.dim } else { app.theme.text };
    let title = app
        .deleting
        .and_then(|id| app.store.get(id))
        .map(|t| t.title.clone())
        .unwrap_or_default();
    let quoted = unicode::truncate_to_width(
        &format!("\u{201c}{}\u{201d}", title),
        inner.width.saturating_sub(2) as usize,
    );

    let lines = vec![
        Line::from(Span::styled(
            " Delete this todo?",
            Style::default().fg(text_fg).bg(bg),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(" {}", quoted),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " This cannot be undone.",
            Style::default().fg(app.theme.dim).bg(bg),
        )),
    ];
    let body = Rect {
        height: inner.height - 1,
        ..inner
    };
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), body);

    let focused = app.delete_modal.focused();
    render_buttons(
        frame,
        app,
        Rect::new(inner.x, inner.bottom() - 1, inner.width, 1),
        &[(Button::CancelDelete, "Cancel"), (Button::ConfirmDelete, "Delete")],
        focused,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;
    use crate::tui::app::FocusTarget;
    use crate::tui::modal::ENTER_DELAY;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn shows_title_and_buttons_without_close() {
        let mut app = app_with_todos(&[("Old receipts", Priority::Low, true)]);
        let t0 = app.now;
        app.open_delete_confirm(1);
        app.tick(t0 + ENTER_DELAY);
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_delete_dialog(frame, &mut app, area)
        });
        assert!(out.contains("Delete todo"), "{}", out);
        assert!(out.contains("\u{201c}Old receipts\u{201d}"));
        assert!(out.contains("[ Cancel ]"));
        assert!(out.contains("[ Delete ]"));
        assert!(!out.contains("[x]"));
        assert!(
            app.hit_targets
                .iter()
                .any(|(_, t)| *t == FocusTarget::Button(Button::ConfirmDelete))
        );
    }
}
