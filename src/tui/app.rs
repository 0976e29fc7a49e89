use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use regex::Regex;

use crate::model::config::Config;
use crate::model::filter::{SortMode, StatusFilter};
use crate::model::todo::{Todo, TodoDraft, TodoId};
use crate::ops::store::TodoStore;

use super::form::{FormEvent, FormField, TodoForm};
use super::input;
use super::modal::{Modal, ModalAnimation, ModalConfig, ModalEvent, ModalSize};
use super::render;
use super::theme::Theme;

/// How often derived views are recomputed while idle (overdue status is time-based)
const REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Event loop poll timeout; bounds how late a transition completes
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Current list-level interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Search,
}

/// Buttons inside dialogs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Close,
    Cancel,
    Submit,
    ConfirmDelete,
    CancelDelete,
}

/// Everything that can hold keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    List,
    Search,
    Field(FormField),
    Button(Button),
}

/// The three dialogs the shell can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    Form,
    Delete,
    Help,
}

/// Whether the form dialog creates or edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit,
}

/// Main application state
pub struct App {
    pub store: TodoStore,
    pub theme: Theme,
    pub show_key_hints: bool,
    pub mode: Mode,
    pub focus: FocusTarget,
    pub should_quit: bool,
    /// Cursor index into the filtered view
    pub cursor: usize,
    /// First visible row of the list
    pub scroll_offset: usize,
    /// Last sort applied from the list view
    pub sort_mode: Option<SortMode>,
    pub form_modal: Modal<FocusTarget>,
    pub form: TodoForm,
    pub form_mode: FormMode,
    /// Todo being edited in the form dialog
    pub editing: Option<TodoId>,
    pub delete_modal: Modal<FocusTarget>,
    /// Todo awaiting delete confirmation
    pub deleting: Option<TodoId>,
    pub help_modal: Modal<FocusTarget>,
    pub status_message: Option<String>,
    /// Time of the latest tick; renderers read transitions against it
    pub now: Instant,
    last_refresh: Instant,
    /// Screen area of the visible dialog (set during render, used for backdrop clicks)
    pub dialog_area: Option<Rect>,
    /// Clickable regions inside the dialog (set during render)
    pub hit_targets: Vec<(Rect, FocusTarget)>,
    /// Screen area of the list rows (set during render)
    pub list_area: Option<Rect>,
}

impl App {
    pub fn new(store: TodoStore, config: &Config) -> Self {
        let now = Instant::now();
        let mut app = App {
            store,
            theme: Theme::from_config(&config.ui),
            show_key_hints: config.ui.show_key_hints,
            mode: Mode::Navigate,
            focus: FocusTarget::List,
            should_quit: false,
            cursor: 0,
            scroll_offset: 0,
            sort_mode: None,
            form_modal: Modal::new(form_modal_config()),
            form: TodoForm::new(),
            form_mode: FormMode::Add,
            editing: None,
            delete_modal: Modal::new(delete_modal_config()),
            deleting: None,
            help_modal: Modal::new(help_modal_config()),
            status_message: None,
            now,
            last_refresh: now,
            dialog_area: None,
            hit_targets: Vec::new(),
            list_area: None,
        };
        if let Some(raw) = &config.ui.default_sort {
            match raw.parse::<SortMode>() {
                Ok(mode) => app.apply_sort(mode),
                Err(e) => tracing::warn!(error = %e, "ignoring ui.default_sort"),
            }
        }
        app
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    pub fn selected_todo(&self) -> Option<&Todo> {
        self.store.filtered_at(self.cursor)
    }

    pub fn selected_id(&self) -> Option<TodoId> {
        self.selected_todo().map(|t| t.id)
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.store.filtered_len();
        if len == 0 {
            self.cursor = 0;
        } else {
            self.cursor = self.cursor.min(len - 1);
        }
    }

    /// Put the cursor on `id` if it is visible
    pub fn select_id(&mut self, id: TodoId) {
        if let Some(pos) = self.store.filtered().iter().position(|t| t.id == id) {
            self.cursor = pos;
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.scroll_locked() {
            return;
        }
        let len = self.store.filtered_len();
        if len == 0 {
            return;
        }
        let next = self.cursor as isize + delta;
        self.cursor = next.clamp(0, len as isize - 1) as usize;
    }

    /// A dialog has locked list scrolling
    pub fn scroll_locked(&self) -> bool {
        self.form_modal.scroll_locked()
            || self.delete_modal.scroll_locked()
            || self.help_modal.scroll_locked()
    }

    /// The dialog that owns input, topmost first
    pub fn active_dialog(&self) -> Option<Dialog> {
        if self.delete_modal.is_rendered() {
            Some(Dialog::Delete)
        } else if self.form_modal.is_rendered() {
            Some(Dialog::Form)
        } else if self.help_modal.is_rendered() {
            Some(Dialog::Help)
        } else {
            None
        }
    }

    pub fn dialog_mut(&mut self, dialog: Dialog) -> &mut Modal<FocusTarget> {
        match dialog {
            Dialog::Form => &mut self.form_modal,
            Dialog::Delete => &mut self.delete_modal,
            Dialog::Help => &mut self.help_modal,
        }
    }

    /// Case-insensitive highlight pattern for the current search term
    pub fn search_re(&self) -> Option<Regex> {
        let term = self.store.search_term();
        if term.is_empty() {
            return None;
        }
        Regex::new(&format!("(?i){}", regex::escape(term))).ok()
    }

    // -----------------------------------------------------------------------
    // List operations
    // -----------------------------------------------------------------------

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.store.toggle(id);
            self.clamp_cursor();
        }
    }

    pub fn duplicate_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if let Some(copy) = self.store.duplicate(id) {
            self.status_message = Some(format!("duplicated as \"{}\"", copy.title));
            self.select_id(copy.id);
        }
    }

    pub fn mark_all_completed(&mut self) {
        self.store.mark_all_completed();
        self.status_message = Some("marked all completed".into());
        self.clamp_cursor();
    }

    pub fn clear_completed(&mut self) {
        let removed = self.store.clear_completed();
        self.status_message = Some(format!("cleared {} completed", removed));
        self.clamp_cursor();
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.store.set_filter(filter);
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    pub fn apply_sort(&mut self, mode: SortMode) {
        let selected = self.selected_id();
        self.store.sort(mode);
        self.sort_mode = Some(mode);
        if let Some(id) = selected {
            self.select_id(id);
        }
    }

    pub fn cycle_sort(&mut self) {
        let next = self.sort_mode.map_or_else(SortMode::default, SortMode::next);
        self.apply_sort(next);
        self.status_message = Some(format!("sorted: {}", next.label()));
    }

    pub fn set_search_term(&mut self, term: String) {
        self.store.set_search_term(term);
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    // -----------------------------------------------------------------------
    // Form dialog
    // -----------------------------------------------------------------------

    pub fn open_add_modal(&mut self) {
        self.form_mode = FormMode::Add;
        self.editing = None;
        self.form.reset();
        self.form_modal.config_mut().title = Some("New todo".into());
        self.form_modal
            .open(self.focus, form_focusables(), self.now);
    }

    pub fn open_edit_modal(&mut self, id: TodoId) {
        let Some(todo) = self.store.get(id) else {
            return;
        };
        self.form_mode = FormMode::Edit;
        self.editing = Some(id);
        self.form.reset();
        self.form.sync_source(Some(todo));
        self.form_modal.config_mut().title = Some("Edit todo".into());
        self.form_modal
            .open(self.focus, form_focusables(), self.now);
    }

    pub fn close_form_modal(&mut self) {
        self.form_modal.close(self.now);
    }

    /// Route the form's normalized output to the store, then close
    pub fn on_form_submit(&mut self, draft: TodoDraft) {
        match (self.form_mode, self.editing) {
            (FormMode::Edit, Some(id)) => {
                if self.store.update(id, draft.into_patch()) {
                    self.status_message = Some("todo updated".into());
                }
            }
            (FormMode::Edit, None) => {}
            (FormMode::Add, _) => {
                let todo = self.store.add(draft);
                self.status_message = Some(format!("added \"{}\"", todo.title));
                self.select_id(todo.id);
            }
        }
        self.clamp_cursor();
        self.close_form_modal();
    }

    pub fn submit_form(&mut self) {
        if self.form.is_submitting() {
            return;
        }
        if !self.form.submit(self.now) {
            self.form_modal.set_focus(FocusTarget::Field(FormField::Title));
        }
    }

    pub fn cancel_form(&mut self) {
        self.form.cancel();
        self.close_form_modal();
    }

    // -----------------------------------------------------------------------
    // Delete confirmation dialog
    // -----------------------------------------------------------------------

    pub fn open_delete_confirm(&mut self, id: TodoId) {
        if self.store.get(id).is_none() {
            return;
        }
        self.deleting = Some(id);
        self.delete_modal
            .open(self.focus, delete_focusables(), self.now);
    }

    pub fn close_delete_modal(&mut self) {
        self.delete_modal.close(self.now);
    }

    pub fn confirm_delete(&mut self) {
        if let Some(id) = self.deleting
            && let Some(title) = self.store.get(id).map(|t| t.title.clone())
            && self.store.delete(id)
        {
            self.status_message = Some(format!("deleted \"{}\"", title));
            self.clamp_cursor();
        }
        self.close_delete_modal();
    }

    pub fn open_help(&mut self) {
        self.help_modal.open(self.focus, Vec::new(), self.now);
    }

    pub fn close_help(&mut self) {
        self.help_modal.close(self.now);
    }

    // -----------------------------------------------------------------------
    // Timers
    // -----------------------------------------------------------------------

    /// Advance timers: form submit delay and dialog transitions
    pub fn tick(&mut self, now: Instant) {
        self.now = now;

        if let Some(id) = self.editing
            && self.form_modal.is_open()
        {
            let todo = self.store.get(id).cloned();
            self.form.sync_source(todo.as_ref());
        }

        if let Some(FormEvent::Submit(draft)) = self.form.tick(now) {
            self.on_form_submit(draft);
        }

        for event in self.form_modal.tick(now) {
            match event {
                ModalEvent::Opened => {
                    self.focus = self
                        .form_modal
                        .focused()
                        .unwrap_or(FocusTarget::Field(FormField::Title));
                }
                ModalEvent::Closed { restore_focus } => self.restore_focus(restore_focus),
                ModalEvent::CloseRequested => {
                    self.editing = None;
                    self.form_mode = FormMode::Add;
                }
            }
        }

        for event in self.delete_modal.tick(now) {
            match event {
                ModalEvent::Opened => {
                    self.focus = self
                        .delete_modal
                        .focused()
                        .unwrap_or(FocusTarget::Button(Button::CancelDelete));
                }
                ModalEvent::Closed { restore_focus } => self.restore_focus(restore_focus),
                ModalEvent::CloseRequested => self.deleting = None,
            }
        }

        for event in self.help_modal.tick(now) {
            if let ModalEvent::Closed { restore_focus } = event {
                self.restore_focus(restore_focus);
            }
        }

        if now.saturating_duration_since(self.last_refresh) >= REFRESH_INTERVAL {
            self.store.refresh();
            self.clamp_cursor();
            self.last_refresh = now;
        }
    }

    /// Keep `focus` in step with whichever dialog owns it
    pub fn sync_focus(&mut self) {
        if let Some(f) = self.delete_modal.focused() {
            self.focus = f;
        } else if let Some(f) = self.form_modal.focused() {
            self.focus = f;
        }
    }

    fn restore_focus(&mut self, target: Option<FocusTarget>) {
        self.focus = match target {
            Some(FocusTarget::Search) if self.mode == Mode::Search => FocusTarget::Search,
            _ => FocusTarget::List,
        };
    }
}

fn form_modal_config() -> ModalConfig {
    ModalConfig {
        title: None,
        size: ModalSize::Medium,
        close_on_backdrop_click: false,
        close_on_escape: true,
        show_close_button: true,
        custom_class: None,
        animation: ModalAnimation::Fade,
    }
}

fn help_modal_config() -> ModalConfig {
    ModalConfig {
        title: Some("Keys".into()),
        size: ModalSize::Large,
        animation: ModalAnimation::Slide,
        ..ModalConfig::default()
    }
}

fn delete_modal_config() -> ModalConfig {
    ModalConfig {
        title: Some("Delete todo".into()),
        size: ModalSize::Small,
        close_on_backdrop_click: false,
        close_on_escape: true,
        show_close_button: false,
        custom_class: Some("danger".into()),
        animation: ModalAnimation::Zoom,
    }
}

/// Tab order of the form dialog
pub fn form_focusables() -> Vec<FocusTarget> {
    let mut targets: Vec<FocusTarget> = FormField::ALL
        .iter()
        .map(|f| FocusTarget::Field(*f))
        .collect();
    targets.push(FocusTarget::Button(Button::Cancel));
    targets.push(FocusTarget::Button(Button::Submit));
    targets.push(FocusTarget::Button(Button::Close));
    targets
}

/// Tab order of the delete confirmation
pub fn delete_focusables() -> Vec<FocusTarget> {
    vec![
        FocusTarget::Button(Button::CancelDelete),
        FocusTarget::Button(Button::ConfirmDelete),
    ]
}

/// Run the TUI application
pub fn run(store: TodoStore, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(store, config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::todo::Priority;
    use crate::tui::modal::{ENTER_DELAY, EXIT_DELAY};
    use crate::tui::form::SUBMIT_DELAY;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn add_flow_creates_todo_after_submit_delay() {
        let mut app = app_with_todos(&[]);
        let t0 = app.now;
        app.open_add_modal();
        app.tick(t0 + ENTER_DELAY);
        assert!(app.form_modal.is_open());
        assert_eq!(app.focus, FocusTarget::Field(FormField::Title));

        app.form.input_mut(FormField::Title).unwrap().insert_str("New thing");
        app.submit_form();
        assert!(app.store.todos().is_empty());

        let t1 = t0 + ENTER_DELAY + SUBMIT_DELAY;
        app.tick(t1);
        assert_eq!(app.store.todos().len(), 1);
        assert_eq!(app.store.todos()[0].title, "New thing");
        assert!(!app.form_modal.is_open());

        app.tick(t1 + EXIT_DELAY);
        assert!(!app.form_modal.is_rendered());
        assert_eq!(app.focus, FocusTarget::List);
    }

    #[test]
    fn edit_flow_updates_existing_todo() {
        let mut app = app_with_todos(&[("Old title", Priority::Low, false)]);
        let id = app.store.todos()[0].id;
        let t0 = app.now;
        app.open_edit_modal(id);
        assert_eq!(app.form.title.value(), "Old title");
        app.tick(t0 + ENTER_DELAY);

        app.form.title.set("New title");
        app.form.priority = Priority::High;
        app.submit_form();
        app.tick(t0 + ENTER_DELAY + SUBMIT_DELAY);

        let todo = app.store.get(id).unwrap();
        assert_eq!(todo.title, "New title");
        assert_eq!(todo.priority, Priority::High);
        assert!(todo.updated_at.is_some());
        assert_eq!(app.store.todos().len(), 1);

        app.tick(t0 + ENTER_DELAY + SUBMIT_DELAY + EXIT_DELAY);
        assert_eq!(app.editing, None);
        assert_eq!(app.form_mode, FormMode::Add);
    }

    #[test]
    fn delete_goes_through_confirmation() {
        let mut app = app_with_todos(&[("Doomed", Priority::Medium, false)]);
        let id = app.store.todos()[0].id;
        let t0 = app.now;
        app.open_delete_confirm(id);
        app.tick(t0 + ENTER_DELAY);
        assert_eq!(app.focus, FocusTarget::Button(Button::CancelDelete));
        assert_eq!(app.store.todos().len(), 1);

        app.confirm_delete();
        assert!(app.store.todos().is_empty());
        app.tick(t0 + ENTER_DELAY + EXIT_DELAY);
        assert_eq!(app.deleting, None);
    }

    #[test]
    fn list_scroll_is_locked_while_dialog_open() {
        let mut app = app_with_todos(&[
            ("One", Priority::Low, false),
            ("Two", Priority::Low, false),
        ]);
        let t0 = app.now;
        app.open_add_modal();
        app.tick(t0 + ENTER_DELAY);
        app.move_cursor(1);
        assert_eq!(app.cursor, 0);
        app.close_form_modal();
        app.move_cursor(1);
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn help_dialog_closes_on_backdrop_click() {
        let mut app = app_with_todos(&[]);
        let t0 = app.now;
        app.open_help();
        app.tick(t0 + ENTER_DELAY);
        assert_eq!(app.active_dialog(), Some(Dialog::Help));
        assert!(app.scroll_locked());
        app.help_modal.backdrop_click(t0 + ENTER_DELAY);
        assert!(!app.scroll_locked());
        app.tick(t0 + ENTER_DELAY + EXIT_DELAY);
        assert_eq!(app.active_dialog(), None);
    }

    #[test]
    fn default_sort_from_config_applies_on_start() {
        let mut config = Config::default();
        config.ui.default_sort = Some("title-asc".into());
        let store = store_with(&[
            ("beta", Priority::Low, false),
            ("alpha", Priority::Low, false),
        ]);
        let app = App::new(store, &config);
        assert_eq!(app.store.todos()[0].title, "alpha");
        assert_eq!(app.sort_mode, Some("title-asc".parse().unwrap()));
    }
}
