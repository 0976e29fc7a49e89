use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Button, Dialog};

/// Shifted letters arrive as `Char('A')` on some terminals and as
/// `Char('a')` + SHIFT on others; fold both to the uppercase form.
pub(super) fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
        && c.is_ascii_lowercase()
    {
        key.code = KeyCode::Char(c.to_ascii_uppercase());
    }
    key
}

/// True for plain text input (no Ctrl/Alt chords)
pub(super) fn is_text_key(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char(_))
        && !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

/// Run the action behind a dialog button
pub(super) fn activate_button(app: &mut App, button: Button) {
    match button {
        Button::Submit => app.submit_form(),
        Button::Cancel => app.cancel_form(),
        Button::Close => match app.active_dialog() {
            Some(Dialog::Help) => app.close_help(),
            Some(Dialog::Delete) => app.close_delete_modal(),
            _ => app.cancel_form(),
        },
        Button::ConfirmDelete => app.confirm_delete(),
        Button::CancelDelete => app.close_delete_modal(),
    }
}
