use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Dialog};

use super::dialog::{DialogArea, render_dialog_frame};

const LIST_KEYS: &[(&str, &str)] = &[
    ("\u{2191}\u{2193}/jk", "Move cursor"),
    ("g/G", "First / last"),
    ("Space", "Toggle completed"),
    ("a", "Add todo"),
    ("e/Enter", "Edit todo"),
    ("d", "Delete todo"),
    ("y", "Duplicate todo"),
    ("1-4", "All / active / completed / overdue"),
    ("/", "Search (Esc clears)"),
    ("s", "Cycle sort order"),
    ("A", "Mark all completed"),
    ("C", "Clear completed"),
    ("q", "Quit"),
];

const FORM_KEYS: &[(&str, &str)] = &[
    ("Tab/S-Tab", "Next / previous field"),
    ("\u{2190}\u{2192}/Space", "Change priority"),
    ("\u{2191}\u{2193}", "Category suggestions"),
    ("Ctrl+U", "Clear field"),
    ("Enter/Ctrl+S", "Save"),
    ("Esc", "Cancel"),
];

/// Render the help dialog (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(DialogArea { inner, .. }) = render_dialog_frame(frame, app, Dialog::Help, area)
    else {
        return;
    };

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" List", header_style)));
    for (key, desc) in LIST_KEYS {
        add_binding(&mut lines, key, desc, key_style, desc_style);
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Todo form", header_style)));
    for (key, desc) in FORM_KEYS {
        add_binding(&mut lines, key, desc, key_style, desc_style);
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:<14}", key), key_style),
        Span::styled(desc, desc_style),
    ]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::modal::ENTER_DELAY;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn lists_bindings() {
        let mut app = app_with_todos(&[]);
        let t0 = app.now;
        app.open_help();
        app.tick(t0 + ENTER_DELAY);
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_help_overlay(frame, &mut app, area)
        });
        assert!(out.contains("Keys"), "{}", out);
        assert!(out.contains("Toggle completed"));
        assert!(out.contains("Mark all completed"));
    }
}
