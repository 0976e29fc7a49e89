use chrono::{DateTime, Duration, TimeZone, Utc};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::storage::LogStorage;
use crate::model::config::Config;
use crate::model::todo::{Priority, Todo};
use crate::ops::store::TodoStore;
use crate::tui::app::App;
use crate::util::clock::ManualClock;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Render the whole app at the standard test size
pub fn render_app(app: &mut App) -> String {
    render_to_string(TERM_W, TERM_H, |frame, _| super::render(frame, app))
}

/// Wall-clock "now" for stores built here: Tuesday 2025-06-10 12:00 UTC
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap()
}

/// A store on a fixed clock holding `(title, priority, completed)` todos in order
pub fn store_with(items: &[(&str, Priority, bool)]) -> TodoStore {
    let now = test_now();
    let mut store = TodoStore::new(Box::new(LogStorage), Box::new(ManualClock::new(now)));
    let todos = items
        .iter()
        .enumerate()
        .map(|(i, (title, priority, completed))| Todo {
            id: i as u64 + 1,
            title: title.to_string(),
            description: String::new(),
            completed: *completed,
            created_at: now - Duration::hours(items.len() as i64 - i as i64),
            updated_at: completed.then_some(now),
            priority: *priority,
            category: None,
            due_date: None,
        })
        .collect();
    store.set_items(todos);
    store
}

pub fn app_with_todos(items: &[(&str, Priority, bool)]) -> App {
    App::new(store_with(items), &Config::default())
}
