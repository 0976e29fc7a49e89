use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_segmentation::UnicodeSegmentation;

use crate::model::Priority;
use crate::tui::app::{App, Button, Dialog, FocusTarget, FormMode};
use crate::tui::form::{FormField, TextInput};
use crate::util::unicode;

use super::dialog::{DialogArea, render_buttons, render_dialog_frame};

/// Render the add/edit dialog
pub fn render_form_dialog(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(DialogArea { inner, faded }) = render_dialog_frame(frame, app, Dialog::Form, area)
    else {
        return;
    };
    if inner.height < 2 || inner.width < 8 {
        return;
    }

    let focused = app.form_modal.focused();
    let today = app.store.now().date_naive();
    // Last row is reserved for the buttons
    let body_bottom = inner.bottom() - 1;
    let mut y = inner.y;

    for field in FormField::ALL {
        if y + 1 >= body_bottom {
            break;
        }
        let is_focused = focused == Some(FocusTarget::Field(field));
        let label_row = Rect::new(inner.x, y, inner.width, 1);
        let value_row = Rect::new(inner.x, y + 1, inner.width, 1);
        render_label(frame, app, field, label_row, faded, today);
        match field {
            FormField::Priority => render_priority(frame, app, value_row, is_focused),
            _ => {
                if let Some(input) = app.form.input(field) {
                    let line = text_line(app, input, value_row.width, is_focused);
                    frame.render_widget(Paragraph::new(line), value_row);
                }
            }
        }
        app.hit_targets.push((
            Rect::new(inner.x, y, inner.width, 2),
            FocusTarget::Field(field),
        ));
        y += 2;

        if field == FormField::Category && is_focused && y < body_bottom {
            render_suggestions(frame, app, Rect::new(inner.x, y, inner.width, 1));
        }
        y += 1;
    }

    let submit_label = if app.form.is_submitting() {
        "Saving\u{2026}"
    } else {
        match app.form_mode {
            FormMode::Add => "Add",
            FormMode::Edit => "Save",
        }
    };
    render_buttons(
        frame,
        app,
        Rect::new(inner.x, body_bottom, inner.width, 1),
        &[(Button::Cancel, "Cancel"), (Button::Submit, submit_label)],
        focused,
    );
}

fn render_label(
    frame: &mut Frame,
    app: &App,
    field: FormField,
    row: Rect,
    faded: bool,
    today: chrono::NaiveDate,
) {
    let bg = app.theme.background;
    let label_fg = if faded { app.theme.dim } else { app.theme.text };
    let required = if field == FormField::Title { " *" } else { "" };
    let left = Span::styled(
        format!(" {}{}", field.label(), required),
        Style::default().fg(label_fg).bg(bg).add_modifier(Modifier::BOLD),
    );

    // Right side: error, else a counter or due preview
    let right = if let Some(err) = app.form.visible_error(field) {
        Some(Span::styled(
            format!("{} ", err),
            Style::default().fg(app.theme.red).bg(bg),
        ))
    } else if field == FormField::DueDate {
        app.form
            .due_preview(today)
            .map(|p| Span::styled(format!("{} ", p), Style::default().fg(app.theme.dim).bg(bg)))
    } else {
        app.form.input(field).map(|input| {
            Span::styled(
                format!("{}/{} ", input.len(), input.max_len()),
                Style::default().fg(app.theme.dim).bg(bg),
            )
        })
    };

    let mut spans = vec![left];
    if let Some(right) = right {
        let used = unicode::display_width(&spans[0].content) + unicode::display_width(&right.content);
        let pad = (row.width as usize).saturating_sub(used);
        spans.push(Span::styled(" ".repeat(pad), Style::default().bg(bg)));
        spans.push(right);
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), row);
}

/// The visible slice of `value` for a field `width` cells wide, scrolled so
/// the cursor stays in view. Returns the slice and the cursor column in it.
pub fn scroll_window(value: &str, cursor: usize, width: usize) -> (String, usize) {
    let cursor_col = unicode::byte_offset_to_display_col(value, cursor);
    let start_col = cursor_col.saturating_sub(width.saturating_sub(1));
    let mut col = 0;
    let mut out = String::new();
    for g in value.graphemes(true) {
        let w = unicode::display_width(g);
        if col >= start_col && col + w - start_col <= width {
            out.push_str(g);
        }
        col += w;
    }
    (out, cursor_col - start_col)
}

fn text_line<'a>(app: &App, input: &TextInput, width: u16, focused: bool) -> Line<'a> {
    let bg = if focused {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let fg = if focused {
        app.theme.text_bright
    } else {
        app.theme.text
    };
    let style = Style::default().fg(fg).bg(bg);
    // One cell of margin on each side
    let field_w = (width as usize).saturating_sub(2);

    let mut spans = vec![Span::styled(" ", Style::default().bg(app.theme.background))];
    if !focused {
        let shown = unicode::fit_to_width(input.value(), field_w);
        spans.push(Span::styled(shown, style));
        return Line::from(spans);
    }

    let (visible, cursor_col) = scroll_window(input.value(), input.cursor(), field_w);
    // Split the visible text at the cursor to draw it reversed
    let split = visible
        .grapheme_indices(true)
        .scan(0usize, |col, (i, g)| {
            let here = *col;
            *col += unicode::display_width(g);
            Some((i, g, here))
        })
        .find(|(_, _, col)| *col == cursor_col);
    let cursor_style = Style::default().fg(bg).bg(app.theme.highlight);
    match split {
        Some((i, g, _)) => {
            spans.push(Span::styled(visible[..i].to_string(), style));
            spans.push(Span::styled(g.to_string(), cursor_style));
            spans.push(Span::styled(visible[i + g.len()..].to_string(), style));
        }
        None => {
            spans.push(Span::styled(visible.clone(), style));
            spans.push(Span::styled(" ", cursor_style));
        }
    }
    let used = unicode::display_width(&visible) + usize::from(split.is_none());
    spans.push(Span::styled(" ".repeat(field_w.saturating_sub(used)), style));
    Line::from(spans)
}

fn render_priority(frame: &mut Frame, app: &App, row: Rect, focused: bool) {
    let bg = app.theme.background;
    let row_bg = if focused { app.theme.selection_bg } else { bg };
    let mut spans = vec![Span::styled(" ", Style::default().bg(bg))];
    if focused {
        spans.push(Span::styled("\u{2039} ", Style::default().fg(app.theme.dim).bg(row_bg)));
    }
    for priority in Priority::ALL {
        let color: Color = app.theme.priority_color(priority);
        let span = if priority == app.form.priority {
            Span::styled(
                format!("[{}]", priority.as_str()),
                Style::default().fg(color).bg(row_bg).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                format!(" {} ", priority.as_str()),
                Style::default().fg(app.theme.dim).bg(row_bg),
            )
        };
        spans.push(span);
        spans.push(Span::styled(" ", Style::default().bg(row_bg)));
    }
    if focused {
        spans.push(Span::styled("\u{203A}", Style::default().fg(app.theme.dim).bg(row_bg)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), row);
}

fn render_suggestions(frame: &mut Frame, app: &App, row: Rect) {
    let known = app.store.categories();
    let matches = app.form.category_matches(known);
    if matches.is_empty() {
        return;
    }
    let text = format!("   \u{2191}\u{2193} {}", matches.join(", "));
    let text = unicode::truncate_to_width(&text, row.width as usize);
    frame.render_widget(
        Paragraph::new(Span::styled(
            text,
            Style::default().fg(app.theme.dim).bg(app.theme.background),
        )),
        row,
    );
}
