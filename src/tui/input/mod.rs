mod common;
mod confirm;
mod form;
mod mouse;
mod navigate;
mod search;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Dialog, Mode};

use common::*;
use confirm::*;
use form::*;
use navigate::*;
use search::*;

pub use mouse::handle_mouse;

/// Handle a key event for whichever dialog or mode owns input
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    let key = normalize_key(key);
    match app.active_dialog() {
        Some(Dialog::Delete) => handle_confirm(app, key),
        Some(Dialog::Form) => handle_form(app, key),
        Some(Dialog::Help) => handle_help(app, key),
        None => match app.mode {
            Mode::Navigate => handle_navigate(app, key),
            Mode::Search => handle_search(app, key),
        },
    }
}

/// Bracketed paste goes to the focused text field or the search term
pub fn handle_paste(app: &mut App, text: &str) {
    match app.active_dialog() {
        Some(Dialog::Form) => paste_into_form(app, text),
        Some(_) => {}
        None if app.mode == Mode::Search => {
            let mut term = app.store.search_term().to_string();
            term.push_str(&text.replace(['\n', '\t'], " "));
            app.set_search_term(term);
        }
        None => {}
    }
}

fn handle_help(app: &mut App, key: KeyEvent) {
    if app.help_modal.handle_key(key, app.now) {
        return;
    }
    if matches!(key.code, KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Enter) {
        app.close_help();
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
    use ratatui::layout::Rect;

    use super::*;
    use crate::model::{Priority, StatusFilter};
    use crate::tui::app::{Button, FocusTarget};
    use crate::tui::form::{FieldError, FormField, SUBMIT_DELAY};
    use crate::tui::modal::{ENTER_DELAY, EXIT_DELAY};
    use crate::tui::render::test_helpers::*;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App, c: char) {
        handle_key(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    /// Advance the app clock by `d` and tick
    fn wait(app: &mut App, d: std::time::Duration) {
        let next = app.now + d;
        app.tick(next);
    }

    fn three() -> App {
        app_with_todos(&[
            ("Alpha", Priority::High, false),
            ("Beta", Priority::Medium, true),
            ("Gamma", Priority::Low, false),
        ])
    }

    #[test]
    fn navigate_moves_and_toggles() {
        let mut app = three();
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.cursor, 1);
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.cursor, 2);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.store.todos()[1].completed);
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn number_keys_switch_filters() {
        let mut app = three();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.store.filter(), StatusFilter::Completed);
        assert_eq!(app.store.filtered_len(), 1);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.store.filter(), StatusFilter::All);
    }

    #[test]
    fn shifted_letters_run_bulk_actions() {
        let mut app = three();
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('a'), KeyModifiers::SHIFT),
        );
        assert!(app.store.todos().iter().all(|t| t.completed));
        press(&mut app, KeyCode::Char('C'));
        assert!(app.store.todos().is_empty());
    }

    #[test]
    fn search_updates_live_and_escape_clears() {
        let mut app = three();
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.mode, Mode::Search);
        assert_eq!(app.focus, FocusTarget::Search);
        type_str(&mut app, "gam");
        assert_eq!(app.store.filtered_len(), 1);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.store.search_term(), "ga");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.store.search_term(), "");
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.store.filtered_len(), 3);
    }

    #[test]
    fn add_dialog_by_keyboard() {
        let mut app = three();
        press(&mut app, KeyCode::Char('a'));
        // Keys are ignored until the dialog is open
        press(&mut app, KeyCode::Char('x'));
        wait(&mut app, ENTER_DELAY);
        type_str(&mut app, "Buy milk");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "two litres");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.form.priority, Priority::High);
        press(&mut app, KeyCode::Enter);
        assert!(app.form.is_submitting());
        wait(&mut app, SUBMIT_DELAY);

        let added = app.store.todos().last().unwrap();
        assert_eq!(added.title, "Buy milk");
        assert_eq!(added.description, "two litres");
        assert_eq!(added.priority, Priority::High);
        wait(&mut app, EXIT_DELAY);
        assert_eq!(app.focus, FocusTarget::List);
    }

    #[test]
    fn leaving_a_field_reveals_its_error() {
        let mut app = three();
        press(&mut app, KeyCode::Char('a'));
        wait(&mut app, ENTER_DELAY);
        type_str(&mut app, "ab");
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, FocusTarget::Field(FormField::Description));
        assert_eq!(
            app.form.visible_error(FormField::Title),
            Some(FieldError::TooShort { min: 3 })
        );
        // Invalid submit sends focus back to the title
        ctrl(&mut app, 's');
        assert!(!app.form.is_submitting());
        assert_eq!(app.focus, FocusTarget::Field(FormField::Title));
    }

    #[test]
    fn escape_cancels_form_and_restores_focus() {
        let mut app = three();
        press(&mut app, KeyCode::Char('e'));
        wait(&mut app, ENTER_DELAY);
        assert_eq!(app.form.title.value(), "Alpha");
        ctrl(&mut app, 'u');
        type_str(&mut app, "Changed");
        press(&mut app, KeyCode::Esc);
        wait(&mut app, EXIT_DELAY);
        assert_eq!(app.store.todos()[0].title, "Alpha");
        assert_eq!(app.focus, FocusTarget::List);
        assert_eq!(app.editing, None);
    }

    #[test]
    fn delete_confirmation_keys() {
        let mut app = three();
        press(&mut app, KeyCode::Char('d'));
        wait(&mut app, ENTER_DELAY);
        // Enter on the default (cancel) button keeps the todo
        press(&mut app, KeyCode::Enter);
        wait(&mut app, EXIT_DELAY);
        assert_eq!(app.store.todos().len(), 3);

        press(&mut app, KeyCode::Char('d'));
        wait(&mut app, ENTER_DELAY);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, FocusTarget::Button(Button::ConfirmDelete));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store.todos().len(), 2);
    }

    #[test]
    fn due_date_clears_with_ctrl_u() {
        let mut app = three();
        press(&mut app, KeyCode::Char('a'));
        wait(&mut app, ENTER_DELAY);
        app.form_modal.set_focus(FocusTarget::Field(FormField::DueDate));
        type_str(&mut app, "2025-01-02");
        assert_eq!(app.form.due_date.value(), "2025-01-02");
        ctrl(&mut app, 'u');
        assert!(app.form.due_date.is_empty());
    }

    #[test]
    fn backdrop_click_closes_help_but_not_form() {
        let mut app = three();
        let area = Rect::new(10, 5, 20, 5);
        let outside = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };

        press(&mut app, KeyCode::Char('?'));
        wait(&mut app, ENTER_DELAY);
        app.dialog_area = Some(area);
        handle_mouse(&mut app, outside);
        assert!(!app.help_modal.is_open());
        wait(&mut app, EXIT_DELAY);

        press(&mut app, KeyCode::Char('a'));
        wait(&mut app, ENTER_DELAY);
        app.dialog_area = Some(area);
        handle_mouse(&mut app, outside);
        assert!(app.form_modal.is_open());
    }

    #[test]
    fn close_button_click_closes_help() {
        let mut app = three();
        press(&mut app, KeyCode::Char('?'));
        wait(&mut app, ENTER_DELAY);
        let close = Rect::new(40, 3, 3, 1);
        app.dialog_area = Some(Rect::new(10, 3, 40, 10));
        app.hit_targets = vec![(close, FocusTarget::Button(Button::Close))];

        handle_mouse(
            &mut app,
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: 41,
                row: 3,
                modifiers: KeyModifiers::NONE,
            },
        );
        assert!(!app.help_modal.is_open());
    }
}
