use std::collections::HashSet;

use serde_json::Value;

use crate::model::todo::{Todo, TodoId};

/// Error type for import/export
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("invalid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("expected a JSON array of todos")]
    NotAnArray,
    #[error("record {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },
    #[error("duplicate id {0}")]
    DuplicateId(u64),
    #[error("id {0} is too large (no room for new ids)")]
    IdTooLarge(u64),
    #[error("could not encode todos: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Serialize the full collection as pretty-printed JSON
pub fn export_todos(todos: &[Todo]) -> Result<String, TransferError> {
    serde_json::to_string_pretty(todos).map_err(TransferError::Encode)
}

/// Parse and validate an exported collection.
///
/// Every record needs a non-zero `id`, a non-blank `title` and a `createdAt`.
/// The first violation rejects the whole batch.
pub fn parse_import(json: &str) -> Result<Vec<Todo>, TransferError> {
    let value: Value = serde_json::from_str(json).map_err(TransferError::Parse)?;
    let records = match value {
        Value::Array(records) => records,
        _ => return Err(TransferError::NotAnArray),
    };

    let mut todos = Vec::with_capacity(records.len());
    let mut seen = HashSet::new();
    for (index, record) in records.into_iter().enumerate() {
        check_required_fields(&record).map_err(|reason| TransferError::InvalidRecord {
            index,
            reason: reason.to_string(),
        })?;
        let todo: Todo =
            serde_json::from_value(record).map_err(|e| TransferError::InvalidRecord {
                index,
                reason: e.to_string(),
            })?;
        if todo.id == TodoId::MAX {
            return Err(TransferError::IdTooLarge(todo.id));
        }
        if !seen.insert(todo.id) {
            return Err(TransferError::DuplicateId(todo.id));
        }
        todos.push(todo);
    }
    Ok(todos)
}

fn check_required_fields(record: &Value) -> Result<(), &'static str> {
    let obj = record.as_object().ok_or("not an object")?;
    match obj.get("id").and_then(Value::as_u64) {
        Some(0) | None => return Err("missing or invalid id"),
        Some(_) => {}
    }
    match obj.get("title").and_then(Value::as_str) {
        Some(t) if !t.trim().is_empty() => {}
        _ => return Err("missing title"),
    }
    match obj.get("createdAt") {
        Some(Value::String(s)) if !s.is_empty() => Ok(()),
        _ => Err("missing createdAt"),
    }
}
