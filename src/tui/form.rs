//! The todo form: editable fields, validation and the delayed submit.

use std::fmt;
use std::time::{Duration, Instant};

use chrono::{DateTime, NaiveDate, Utc};

use crate::model::todo::{DATE_FORMAT, Priority, Todo, TodoDraft, TodoId, parse_due};
use crate::ops::stats::relative_day_label;
use crate::util::unicode;

pub const TITLE_MIN: usize = 3;
pub const TITLE_MAX: usize = 100;
pub const DESCRIPTION_MAX: usize = 500;
pub const CATEGORY_MAX: usize = 50;
/// `YYYY-MM-DD`
pub const DATE_MAX: usize = 10;

/// Pause between a valid submit and the submit event
pub const SUBMIT_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Title,
    Description,
    Priority,
    Category,
    DueDate,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Title,
        FormField::Description,
        FormField::Priority,
        FormField::Category,
        FormField::DueDate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Description => "Description",
            FormField::Priority => "Priority",
            FormField::Category => "Category",
            FormField::DueDate => "Due date",
        }
    }

    fn index(self) -> usize {
        match self {
            FormField::Title => 0,
            FormField::Description => 1,
            FormField::Priority => 2,
            FormField::Category => 3,
            FormField::DueDate => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    TooShort { min: usize },
    InvalidDate,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Required => f.write_str("title is required"),
            FieldError::TooShort { min } => write!(f, "title must be at least {} characters", min),
            FieldError::InvalidDate => f.write_str("use YYYY-MM-DD"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Submit(TodoDraft),
    Cancel,
}

/// Single-line text buffer with a grapheme-aware cursor and a length cap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    /// Byte offset, always on a grapheme boundary
    cursor: usize,
    max_len: usize,
}

impl TextInput {
    pub fn new(max_len: usize) -> Self {
        TextInput {
            value: String::new(),
            cursor: 0,
            max_len,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn len(&self) -> usize {
        unicode::grapheme_count(&self.value)
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Replace the contents (truncated to the cap), cursor at end
    pub fn set(&mut self, value: &str) {
        self.value.clear();
        self.cursor = 0;
        self.insert_str(value);
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) -> bool {
        if c.is_control() || self.len() >= self.max_len {
            return false;
        }
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        true
    }

    pub fn insert_str(&mut self, s: &str) {
        for c in s.chars() {
            let c = if c == '\n' || c == '\t' { ' ' } else { c };
            if !self.insert_char(c) && self.len() >= self.max_len {
                break;
            }
        }
    }

    pub fn backspace(&mut self) -> bool {
        match unicode::prev_grapheme_boundary(&self.value, self.cursor) {
            Some(prev) => {
                self.value.replace_range(prev..self.cursor, "");
                self.cursor = prev;
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self) -> bool {
        match unicode::next_grapheme_boundary(&self.value, self.cursor) {
            Some(next) => {
                self.value.replace_range(self.cursor..next, "");
                true
            }
            None => false,
        }
    }

    pub fn delete_word_left(&mut self) -> bool {
        let start = unicode::word_boundary_left(&self.value, self.cursor);
        if start == self.cursor {
            return false;
        }
        self.value.replace_range(start..self.cursor, "");
        self.cursor = start;
        true
    }

    pub fn left(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.value, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn right(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.value, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }
}

/// The form's editable state
#[derive(Debug, Clone)]
pub struct TodoForm {
    pub title: TextInput,
    pub description: TextInput,
    pub priority: Priority,
    pub category: TextInput,
    pub due_date: TextInput,
    touched: [bool; 5],
    submit_attempted: bool,
    pending: Option<(Instant, TodoDraft)>,
    /// Identity of the todo the fields were last populated from
    source: Option<(TodoId, Option<DateTime<Utc>>)>,
}

impl Default for TodoForm {
    fn default() -> Self {
        TodoForm::new()
    }
}

impl TodoForm {
    pub fn new() -> Self {
        TodoForm {
            title: TextInput::new(TITLE_MAX),
            description: TextInput::new(DESCRIPTION_MAX),
            priority: Priority::Medium,
            category: TextInput::new(CATEGORY_MAX),
            due_date: TextInput::new(DATE_MAX),
            touched: [false; 5],
            submit_attempted: false,
            pending: None,
            source: None,
        }
    }

    /// Back to an empty form
    pub fn reset(&mut self) {
        *self = TodoForm::new();
    }

    /// Re-populate every field when the supplied todo differs from the one
    /// the form was last filled from. Returns true if fields were replaced.
    pub fn sync_source(&mut self, todo: Option<&Todo>) -> bool {
        let Some(todo) = todo else {
            self.source = None;
            return false;
        };
        let key = (todo.id, todo.updated_at);
        if self.source == Some(key) {
            return false;
        }
        self.populate(todo);
        self.source = Some(key);
        true
    }

    fn populate(&mut self, todo: &Todo) {
        self.title.set(&todo.title);
        self.description.set(&todo.description);
        self.priority = todo.priority;
        self.category.set(todo.category.as_deref().unwrap_or(""));
        match todo.due_date {
            Some(due) => self.due_date.set(&due.format(DATE_FORMAT).to_string()),
            None => self.due_date.clear(),
        }
        self.touched = [false; 5];
        self.submit_attempted = false;
        self.pending = None;
    }

    pub fn input(&self, field: FormField) -> Option<&TextInput> {
        match field {
            FormField::Title => Some(&self.title),
            FormField::Description => Some(&self.description),
            FormField::Category => Some(&self.category),
            FormField::DueDate => Some(&self.due_date),
            FormField::Priority => None,
        }
    }

    /// Text buffer for a field (None for the priority selector).
    /// Editing through this marks the field touched.
    pub fn input_mut(&mut self, field: FormField) -> Option<&mut TextInput> {
        self.touch(field);
        match field {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::Category => Some(&mut self.category),
            FormField::DueDate => Some(&mut self.due_date),
            FormField::Priority => None,
        }
    }

    pub fn touch(&mut self, field: FormField) {
        self.touched[field.index()] = true;
    }

    pub fn cycle_priority(&mut self, forward: bool) {
        self.priority = if forward {
            self.priority.next()
        } else {
            self.priority.prev()
        };
    }

    /// Step the category through `suggestions` (the store's known categories)
    pub fn cycle_category(&mut self, suggestions: &[String], forward: bool) {
        if suggestions.is_empty() {
            return;
        }
        let current = self.category.value().trim();
        let pos = suggestions.iter().position(|s| s == current);
        let next = match (pos, forward) {
            (Some(i), true) => (i + 1) % suggestions.len(),
            (Some(i), false) => (i + suggestions.len() - 1) % suggestions.len(),
            (None, true) => 0,
            (None, false) => suggestions.len() - 1,
        };
        self.category.set(&suggestions[next]);
        self.touch(FormField::Category);
    }

    /// Known categories that start with what has been typed so far
    pub fn category_matches<'a>(&self, suggestions: &'a [String]) -> Vec<&'a str> {
        let typed = self.category.value().trim().to_lowercase();
        suggestions
            .iter()
            .filter(|s| typed.is_empty() || s.to_lowercase().starts_with(&typed))
            .map(String::as_str)
            .collect()
    }

    pub fn clear_due_date(&mut self) {
        self.due_date.clear();
        self.touch(FormField::DueDate);
    }

    /// Validation result for a field, regardless of whether it was touched
    pub fn field_error(&self, field: FormField) -> Option<FieldError> {
        match field {
            FormField::Title => {
                let title = self.title.value().trim();
                if title.is_empty() {
                    Some(FieldError::Required)
                } else if unicode::grapheme_count(title) < TITLE_MIN {
                    Some(FieldError::TooShort { min: TITLE_MIN })
                } else {
                    None
                }
            }
            FormField::DueDate => match parse_due(self.due_date.value()) {
                Err(_) => Some(FieldError::InvalidDate),
                Ok(_) => None,
            },
            _ => None,
        }
    }

    /// Error to show inline: only after the field was touched or a submit was tried
    pub fn visible_error(&self, field: FormField) -> Option<FieldError> {
        if self.touched[field.index()] || self.submit_attempted {
            self.field_error(field)
        } else {
            None
        }
    }

    pub fn is_valid(&self) -> bool {
        FormField::ALL.iter().all(|f| self.field_error(*f).is_none())
    }

    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    /// The trimmed, parsed field values
    pub fn normalized(&self) -> Option<TodoDraft> {
        if !self.is_valid() {
            return None;
        }
        let category = self.category.value().trim();
        Some(TodoDraft {
            title: self.title.value().trim().to_string(),
            description: self.description.value().trim().to_string(),
            priority: self.priority,
            category: (!category.is_empty()).then(|| category.to_string()),
            due_date: parse_due(self.due_date.value()).ok().flatten(),
        })
    }

    /// Start a submit. With a valid form and no submit in flight, the draft is
    /// held until `tick` emits it after `SUBMIT_DELAY`. Returns true if started.
    pub fn submit(&mut self, now: Instant) -> bool {
        self.submit_attempted = true;
        if self.pending.is_some() {
            return false;
        }
        match self.normalized() {
            Some(draft) => {
                self.pending = Some((now, draft));
                true
            }
            None => false,
        }
    }

    /// Emit the held submit once its delay has passed
    pub fn tick(&mut self, now: Instant) -> Option<FormEvent> {
        let (since, _) = self.pending.as_ref()?;
        if now.saturating_duration_since(*since) < SUBMIT_DELAY {
            return None;
        }
        self.pending.take().map(|(_, draft)| FormEvent::Submit(draft))
    }

    /// Abandon the form. Any submit in flight is dropped.
    pub fn cancel(&mut self) -> FormEvent {
        self.pending = None;
        FormEvent::Cancel
    }

    /// "in 3 days" style preview of the entered due date
    pub fn due_preview(&self, today: NaiveDate) -> Option<String> {
        let due = parse_due(self.due_date.value()).ok().flatten()?;
        let days = (due.date_naive() - today).num_days();
        Some(relative_day_label(days))
    }
}
