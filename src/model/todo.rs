use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable identifier of a todo within one store
pub type TodoId = u64;

/// Due dates are entered and shown as `YYYY-MM-DD`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Todo priority. Ordering follows importance: `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Weight used by priority sorting (high > medium > low)
    pub fn weight(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Next priority in the form selector, wrapping
    pub fn next(self) -> Priority {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }

    pub fn prev(self) -> Priority {
        match self {
            Priority::Low => Priority::High,
            Priority::Medium => Priority::Low,
            Priority::High => Priority::Medium,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "l" => Ok(Priority::Low),
            "medium" | "med" | "m" => Ok(Priority::Medium),
            "high" | "h" => Ok(Priority::High),
            other => Err(format!("unknown priority '{}' (low, medium, high)", other)),
        }
    }
}

/// A single todo record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

impl Todo {
    /// Not completed and due strictly before `now`
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < now)
    }

    /// Case-insensitive substring match over title, description and category.
    /// `needle` must already be lowercased.
    pub fn matches_search(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self
                .category
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(needle))
    }

    /// Apply a partial update. Does not touch `updated_at`.
    pub fn apply(&mut self, patch: &TodoPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
    }
}

/// Field data for a new todo (also the form's normalized output)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

impl TodoDraft {
    pub fn new(title: impl Into<String>) -> Self {
        TodoDraft {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn due(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// A patch that overwrites every editable field with this draft's values
    pub fn into_patch(self) -> TodoPatch {
        TodoPatch {
            title: Some(self.title),
            description: Some(self.description),
            completed: None,
            priority: Some(self.priority),
            category: Some(self.category),
            due_date: Some(self.due_date),
        }
    }
}

/// Parse a `YYYY-MM-DD` date to UTC midnight. Empty input is `Ok(None)`.
pub fn parse_due(input: &str) -> Result<Option<DateTime<Utc>>, chrono::ParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(input, DATE_FORMAT)?;
    Ok(Some(date.and_time(NaiveTime::MIN).and_utc()))
}

/// Partial update. `None` leaves a field alone; for the optional fields,
/// `Some(None)` clears them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    pub category: Option<Option<String>>,
    pub due_date: Option<Option<DateTime<Utc>>>,
}

impl TodoPatch {
    pub fn completed(completed: bool) -> Self {
        TodoPatch {
            completed: Some(completed),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == TodoPatch::default()
    }
}
