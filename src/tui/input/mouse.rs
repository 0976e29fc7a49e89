use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::tui::app::{App, Button, FocusTarget};

use super::*;

pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => click(app, Position::new(mouse.column, mouse.row)),
        // move_cursor is a no-op while a dialog holds the scroll lock
        MouseEventKind::ScrollDown => app.move_cursor(1),
        MouseEventKind::ScrollUp => app.move_cursor(-1),
        _ => {}
    }
}

fn click(app: &mut App, pos: Position) {
    if let Some(dialog) = app.active_dialog() {
        let inside = app.dialog_area.is_some_and(|area| area.contains(pos));
        let now = app.now;
        if !inside {
            app.dialog_mut(dialog).backdrop_click(now);
            return;
        }
        let hit = app
            .hit_targets
            .iter()
            .find(|(area, _)| area.contains(pos))
            .map(|(_, target)| *target);
        let Some(target) = hit else {
            return;
        };
        let focused = app.dialog_mut(dialog).set_focus(target);
        // The close button works even in dialogs with nothing focusable
        if let FocusTarget::Button(button) = target
            && (focused || button == Button::Close)
        {
            activate_button(app, button);
        }
        app.sync_focus();
        return;
    }

    if let Some(area) = app.list_area
        && area.contains(pos)
    {
        let index = app.scroll_offset + (pos.y - area.y) as usize;
        if index < app.store.filtered_len() {
            app.cursor = index;
        }
    }
}
