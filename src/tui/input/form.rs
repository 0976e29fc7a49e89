use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, FocusTarget};
use crate::tui::form::FormField;

use super::*;

pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    if !app.form_modal.is_open() {
        return;
    }
    let before = app.form_modal.focused();

    if app.form_modal.handle_key(key, app.now) {
        // Leaving a field counts as touching it
        if let Some(FocusTarget::Field(field)) = before
            && app.form_modal.focused() != before
        {
            app.form.touch(field);
        }
        // Escape closed the dialog: drop any submit in flight
        if !app.form_modal.is_open() {
            app.form.cancel();
        }
        app.sync_focus();
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
        app.submit_form();
        app.sync_focus();
        return;
    }

    match before {
        Some(FocusTarget::Field(FormField::Priority)) => handle_priority(app, key),
        Some(FocusTarget::Field(field)) => handle_text_field(app, field, key),
        Some(FocusTarget::Button(button)) => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                activate_button(app, button);
            }
        }
        _ => {}
    }
    app.sync_focus();
}

fn handle_priority(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => app.form.cycle_priority(true),
        KeyCode::Left | KeyCode::Char('h') => app.form.cycle_priority(false),
        KeyCode::Up => app.form_modal.focus_prev(),
        KeyCode::Down => app.form_modal.focus_next(),
        KeyCode::Enter => app.submit_form(),
        _ => {}
    }
}

fn handle_text_field(app: &mut App, field: FormField, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Enter) => app.submit_form(),
        (_, KeyCode::Up) if field == FormField::Category => {
            let known = app.store.categories().to_vec();
            app.form.cycle_category(&known, false);
        }
        (_, KeyCode::Down) if field == FormField::Category => {
            let known = app.store.categories().to_vec();
            app.form.cycle_category(&known, true);
        }
        (_, KeyCode::Up) => {
            app.form.touch(field);
            app.form_modal.focus_prev();
        }
        (_, KeyCode::Down) => {
            app.form.touch(field);
            app.form_modal.focus_next();
        }
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
            if field == FormField::DueDate {
                app.form.clear_due_date();
            } else if let Some(input) = app.form.input_mut(field) {
                input.clear();
            }
        }
        _ => {
            let Some(input) = app.form.input_mut(field) else {
                return;
            };
            match (key.modifiers, key.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('w')) => {
                    input.delete_word_left();
                }
                (KeyModifiers::CONTROL, KeyCode::Char('a')) | (_, KeyCode::Home) => input.home(),
                (KeyModifiers::CONTROL, KeyCode::Char('e')) | (_, KeyCode::End) => input.end(),
                (_, KeyCode::Backspace) => {
                    input.backspace();
                }
                (_, KeyCode::Delete) => {
                    input.delete();
                }
                (_, KeyCode::Left) => input.left(),
                (_, KeyCode::Right) => input.right(),
                (_, KeyCode::Char(c)) if is_text_key(&key) => {
                    input.insert_char(c);
                }
                _ => {}
            }
        }
    }
}

pub(super) fn paste_into_form(app: &mut App, text: &str) {
    if let Some(FocusTarget::Field(field)) = app.form_modal.focused()
        && let Some(input) = app.form.input_mut(field)
    {
        input.insert_str(text);
    }
}
