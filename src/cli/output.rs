use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{DATE_FORMAT, Priority, Todo};
use crate::ops::stats::{Insights, TodoStats, due_label};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

/// A todo plus the values derived from the current time
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoJson<'a> {
    #[serde(flatten)]
    pub todo: &'a Todo,
    pub overdue: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_label: Option<String>,
}

#[derive(Serialize)]
pub struct CategoryJson {
    pub name: String,
    pub total: usize,
    pub active: usize,
}

pub fn todo_to_json(todo: &Todo, now: DateTime<Utc>) -> TodoJson<'_> {
    TodoJson {
        todo,
        overdue: todo.is_overdue(now),
        due_label: todo.due_date.map(|d| due_label(d, now)),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

fn check_char(todo: &Todo) -> char {
    if todo.completed { 'x' } else { ' ' }
}

fn priority_tag(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "!!!",
        Priority::Medium => "!! ",
        Priority::Low => "!  ",
    }
}

/// One-line summary: `  3 [ ] !!  Title  #Category  due 2025-06-13 (in 3 days)`
pub fn format_todo_line(todo: &Todo, now: DateTime<Utc>) -> String {
    let mut line = format!(
        "{:>3} [{}] {} {}",
        todo.id,
        check_char(todo),
        priority_tag(todo.priority),
        todo.title
    );
    if let Some(category) = &todo.category {
        line.push_str(&format!("  #{}", category));
    }
    if let Some(due) = todo.due_date {
        line.push_str(&format!(
            "  due {} ({})",
            due.format(DATE_FORMAT),
            due_label(due, now)
        ));
    }
    line
}

pub fn format_todo_detail(todo: &Todo, now: DateTime<Utc>) -> Vec<String> {
    let mut lines = vec![format!("[{}] {} {}", check_char(todo), todo.id, todo.title)];
    lines.push(format!("priority: {}", todo.priority));
    if let Some(category) = &todo.category {
        lines.push(format!("category: {}", category));
    }
    if let Some(due) = todo.due_date {
        lines.push(format!(
            "due: {} ({})",
            due.format(DATE_FORMAT),
            due_label(due, now)
        ));
    }
    lines.push(format!("created: {}", todo.created_at.format("%Y-%m-%d %H:%M")));
    if let Some(updated) = todo.updated_at {
        lines.push(format!("updated: {}", updated.format("%Y-%m-%d %H:%M")));
    }
    if !todo.description.is_empty() {
        lines.push("description:".to_string());
        for line in todo.description.lines() {
            lines.push(format!("  {}", line));
        }
    }
    lines
}

pub fn format_stats(stats: &TodoStats) -> Vec<String> {
    let pct = (stats.completed * 100).checked_div(stats.total).unwrap_or(0);
    vec![
        format!("total:     {}", stats.total),
        format!("active:    {}", stats.active),
        format!("completed: {} ({}%)", stats.completed, pct),
        format!("overdue:   {}", stats.overdue),
    ]
}

pub fn format_insights(insights: &Insights) -> Vec<String> {
    let dist = &insights.priority_distribution;
    vec![
        format!("completed this week:     {}", insights.completed_this_week),
        format!(
            "average days to complete: {}",
            insights.average_completion_days
        ),
        format!(
            "most productive day:     {}",
            insights.most_productive_day.as_deref().unwrap_or("-")
        ),
        format!(
            "priorities:              high {}, medium {}, low {}",
            dist.high, dist.medium, dist.low
        ),
    ]
}
