use chrono::{DateTime, Duration, Utc};

use crate::model::todo::{Priority, Todo};

/// Starter todos shown when storage has nothing yet
pub fn sample_todos(now: DateTime<Utc>) -> Vec<Todo> {
    vec![
        Todo {
            id: 1,
            title: "Learn the keyboard shortcuts".into(),
            description: "Press ? in the list view to see every binding".into(),
            completed: false,
            created_at: now,
            updated_at: None,
            priority: Priority::High,
            category: Some("Learning".into()),
            due_date: Some(now + Duration::days(7)),
        },
        Todo {
            id: 2,
            title: "Set up the todo list".into(),
            description: "Pick a data directory and write a ticklist.toml".into(),
            completed: true,
            created_at: now - Duration::days(1),
            updated_at: Some(now),
            priority: Priority::Medium,
            category: Some("Setup".into()),
            due_date: None,
        },
        Todo {
            id: 3,
            title: "Try it in a narrow terminal".into(),
            description: "Check how the list and dialogs fit small window sizes".into(),
            completed: false,
            created_at: now - Duration::days(2),
            updated_at: None,
            priority: Priority::Low,
            category: Some("Testing".into()),
            due_date: Some(now + Duration::days(3)),
        },
    ]
}
