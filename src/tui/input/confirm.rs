use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, FocusTarget};

use super::*;

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    if !app.delete_modal.is_open() {
        return;
    }
    if app.delete_modal.handle_key(key, app.now) {
        app.sync_focus();
        return;
    }
    match (key.modifiers, key.code) {
        // Confirm: y
        (KeyModifiers::NONE, KeyCode::Char('y')) => app.confirm_delete(),
        // Cancel: n
        (KeyModifiers::NONE, KeyCode::Char('n')) => app.close_delete_modal(),
        (_, KeyCode::Left | KeyCode::Char('h')) => app.delete_modal.focus_prev(),
        (_, KeyCode::Right | KeyCode::Char('l')) => app.delete_modal.focus_next(),
        (_, KeyCode::Enter | KeyCode::Char(' ')) => {
            if let Some(FocusTarget::Button(button)) = app.delete_modal.focused() {
                activate_button(app, button);
            }
        }
        _ => {}
    }
    app.sync_focus();
}
