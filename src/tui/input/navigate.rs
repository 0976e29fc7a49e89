use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::StatusFilter;
use crate::tui::app::App;

use super::*;

const PAGE: isize = 10;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    app.status_message = None;

    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) => app.should_quit = true,

        // Movement
        (_, KeyCode::Char('j') | KeyCode::Down) => app.move_cursor(1),
        (_, KeyCode::Char('k') | KeyCode::Up) => app.move_cursor(-1),
        (_, KeyCode::PageDown) => app.move_cursor(PAGE),
        (_, KeyCode::PageUp) => app.move_cursor(-PAGE),
        (_, KeyCode::Char('g') | KeyCode::Home) => app.move_cursor(isize::MIN / 2),
        (_, KeyCode::Char('G') | KeyCode::End) => app.move_cursor(isize::MAX / 2),

        // Single-todo actions
        (_, KeyCode::Char(' ')) => app.toggle_selected(),
        (KeyModifiers::NONE, KeyCode::Char('a')) => app.open_add_modal(),
        (KeyModifiers::NONE, KeyCode::Char('e')) | (_, KeyCode::Enter) => {
            if let Some(id) = app.selected_id() {
                app.open_edit_modal(id);
            }
        }
        (KeyModifiers::NONE, KeyCode::Char('d')) | (_, KeyCode::Delete) => {
            if let Some(id) = app.selected_id() {
                app.open_delete_confirm(id);
            }
        }
        (KeyModifiers::NONE, KeyCode::Char('y')) => app.duplicate_selected(),

        // Bulk actions
        (_, KeyCode::Char('A')) => app.mark_all_completed(),
        (_, KeyCode::Char('C')) => app.clear_completed(),

        // Filters
        (_, KeyCode::Char(c @ '1'..='4')) => {
            let index = c as usize - '1' as usize;
            app.set_filter(StatusFilter::ALL[index]);
        }
        (_, KeyCode::Char('/')) => enter_search(app),
        (_, KeyCode::Esc) if !app.store.search_term().is_empty() => {
            app.set_search_term(String::new());
        }
        (KeyModifiers::NONE, KeyCode::Char('s')) => app.cycle_sort(),

        (_, KeyCode::Char('?')) => app.open_help(),
        _ => {}
    }
}
