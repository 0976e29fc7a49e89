use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, FocusTarget, Mode};
use crate::util::unicode;

use super::*;

/// Search bar input. The term is applied to the store on every keystroke.
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Cancel search
        (_, KeyCode::Esc) => {
            app.set_search_term(String::new());
            leave_search(app);
        }
        // Keep the term, return to the list
        (_, KeyCode::Enter | KeyCode::Down | KeyCode::Tab) => leave_search(app),
        (_, KeyCode::Backspace) => {
            let mut term = app.store.search_term().to_string();
            if let Some(prev) = unicode::prev_grapheme_boundary(&term, term.len()) {
                term.truncate(prev);
                app.set_search_term(term);
            }
        }
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => app.set_search_term(String::new()),
        (_, KeyCode::Char(c)) if is_text_key(&key) => {
            let mut term = app.store.search_term().to_string();
            term.push(c);
            app.set_search_term(term);
        }
        _ => {}
    }
}

pub(super) fn enter_search(app: &mut App) {
    app.mode = Mode::Search;
    app.focus = FocusTarget::Search;
}

fn leave_search(app: &mut App) {
    app.mode = Mode::Navigate;
    app.focus = FocusTarget::List;
}
