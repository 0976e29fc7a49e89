use std::path::PathBuf;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::model::{Todo, TodoDraft, TodoPatch, parse_due};
use crate::tui::form::{TITLE_MAX, TITLE_MIN};
use crate::util::unicode;

use super::{CliError, Context};

/// Trim and check a title the way the form does
fn clean_title(raw: &str) -> Result<String, CliError> {
    let title = raw.trim();
    let len = unicode::grapheme_count(title);
    if len < TITLE_MIN {
        return Err(CliError::InvalidTitle(format!(
            "must be at least {} characters",
            TITLE_MIN
        )));
    }
    if len > TITLE_MAX {
        return Err(CliError::InvalidTitle(format!(
            "must be at most {} characters",
            TITLE_MAX
        )));
    }
    Ok(title.to_string())
}

fn due_arg(raw: &str) -> Result<Option<chrono::DateTime<chrono::Utc>>, CliError> {
    parse_due(raw).map_err(|_| CliError::InvalidDate(raw.to_string()))
}

/// Trimmed category; blank means none
fn category_arg(raw: &str) -> Option<String> {
    let c = raw.trim();
    (!c.is_empty()).then(|| c.to_string())
}

fn print_todo(ctx: &Context, todo: &Todo, json: bool, message: String) -> Result<(), CliError> {
    if json {
        let now = ctx.store.now();
        println!("{}", serde_json::to_string_pretty(&todo_to_json(todo, now))?);
    } else {
        println!("{}", message);
    }
    Ok(())
}

pub(super) fn cmd_add(ctx: &mut Context, args: AddArgs, json: bool) -> Result<(), CliError> {
    let mut draft = TodoDraft::new(clean_title(&args.title)?);
    if let Some(description) = args.description {
        draft.description = description.trim().to_string();
    }
    if let Some(priority) = args.priority {
        draft.priority = priority;
    }
    draft.category = args.category.as_deref().and_then(category_arg);
    if let Some(due) = args.due.as_deref() {
        draft.due_date = due_arg(due)?;
    }

    let todo = ctx.store.add(draft);
    print_todo(ctx, &todo, json, format!("added {}: {}", todo.id, todo.title))
}

pub(super) fn cmd_edit(ctx: &mut Context, args: EditArgs, json: bool) -> Result<(), CliError> {
    if ctx.store.get(args.id).is_none() {
        return Err(CliError::NotFound(args.id));
    }

    let mut patch = TodoPatch {
        title: args.title.as_deref().map(clean_title).transpose()?,
        description: args.description.map(|d| d.trim().to_string()),
        priority: args.priority,
        ..Default::default()
    };
    if args.clear_category {
        patch.category = Some(None);
    } else if let Some(category) = args.category.as_deref() {
        patch.category = Some(category_arg(category));
    }
    if args.clear_due {
        patch.due_date = Some(None);
    } else if let Some(due) = args.due.as_deref() {
        patch.due_date = Some(due_arg(due)?);
    }
    if patch.is_empty() {
        return Err(CliError::NothingToChange);
    }

    ctx.store.update(args.id, patch);
    let todo = ctx
        .store
        .get(args.id)
        .cloned()
        .ok_or(CliError::NotFound(args.id))?;
    print_todo(ctx, &todo, json, format!("updated {}", todo.id))
}

pub(super) fn cmd_toggle(ctx: &mut Context, args: IdArgs, json: bool) -> Result<(), CliError> {
    if !ctx.store.toggle(args.id) {
        return Err(CliError::NotFound(args.id));
    }
    let todo = ctx
        .store
        .get(args.id)
        .cloned()
        .ok_or(CliError::NotFound(args.id))?;
    let state = if todo.completed { "completed" } else { "active" };
    print_todo(ctx, &todo, json, format!("{} {}", todo.id, state))
}

pub(super) fn cmd_rm(ctx: &mut Context, args: IdArgs) -> Result<(), CliError> {
    if !ctx.store.delete(args.id) {
        return Err(CliError::NotFound(args.id));
    }
    println!("deleted {}", args.id);
    Ok(())
}

pub(super) fn cmd_dup(ctx: &mut Context, args: IdArgs, json: bool) -> Result<(), CliError> {
    let copy = ctx
        .store
        .duplicate(args.id)
        .ok_or(CliError::NotFound(args.id))?;
    print_todo(
        ctx,
        &copy,
        json,
        format!("duplicated {} as {}: {}", args.id, copy.id, copy.title),
    )
}

pub(super) fn cmd_complete_all(ctx: &mut Context) -> Result<(), CliError> {
    let newly = ctx.store.stats().active;
    ctx.store.mark_all_completed();
    println!("marked {} todo(s) completed", newly);
    Ok(())
}

pub(super) fn cmd_clear_completed(ctx: &mut Context) -> Result<(), CliError> {
    let removed = ctx.store.clear_completed();
    println!("cleared {} completed todo(s)", removed);
    Ok(())
}

pub(super) fn cmd_sort(ctx: &mut Context, args: SortArgs) -> Result<(), CliError> {
    ctx.store.sort(args.mode);
    println!("sorted by {}", args.mode);
    Ok(())
}

pub(super) fn cmd_import(ctx: &mut Context, args: ImportArgs) -> Result<(), CliError> {
    let path = PathBuf::from(&args.file);
    let body = std::fs::read_to_string(&path).map_err(|source| CliError::Read {
        path: path.clone(),
        source,
    })?;
    let count = ctx.store.import_json(&body)?;
    println!("imported {} todo(s)", count);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_are_trimmed_and_length_checked() {
        assert_eq!(clean_title("  Buy milk ").unwrap(), "Buy milk");
        assert!(matches!(clean_title(" ab "), Err(CliError::InvalidTitle(_))));
        assert!(clean_title(&"x".repeat(TITLE_MAX + 1)).is_err());
    }

    #[test]
    fn blank_category_is_none() {
        assert_eq!(category_arg("  "), None);
        assert_eq!(category_arg(" Home "), Some("Home".into()));
    }

    #[test]
    fn bad_due_date_is_reported() {
        let err = due_arg("next week").unwrap_err();
        assert_eq!(err.to_string(), "invalid due date 'next week' (use YYYY-MM-DD)");
    }
}
