mod write;

use std::io;
use std::path::PathBuf;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{self, ConfigError};
use crate::model::{Config, TodoId};
use crate::ops::store::{self, TodoStore};
use crate::ops::transfer::TransferError;
use crate::util::clock::SystemClock;

use write::*;

/// Errors surfaced by CLI commands. Printed as `error: {}` by `main`.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("todo not found: {0}")]
    NotFound(TodoId),
    #[error("invalid due date '{0}' (use YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("invalid title: {0}")]
    InvalidTitle(String),
    #[error("nothing to change (pass at least one field)")]
    NothingToChange,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Transfer(#[from] TransferError),
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything a command needs: the resolved data directory, its config and
/// the store opened on it
pub struct Context {
    pub dir: PathBuf,
    pub config: Config,
    pub store: TodoStore,
}

impl Context {
    pub fn open(dir: Option<&str>) -> Result<Self, CliError> {
        let dir = config_io::resolve_data_dir(dir)?;
        let config = config_io::read_config(&dir)?;
        let storage = config_io::open_storage(&dir, &config);
        let store = TodoStore::open(storage, Box::new(SystemClock), config.store.seed_samples);
        tracing::debug!(dir = %dir.display(), todos = store.todos().len(), "store opened");
        Ok(Context { dir, config, store })
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), CliError> {
    let json = cli.json;
    let Some(command) = cli.command else {
        return Ok(());
    };
    let mut ctx = Context::open(cli.dir.as_deref())?;

    match command {
        // Read commands
        Commands::List(args) => cmd_list(&mut ctx, args, json),
        Commands::Show(args) => cmd_show(&ctx, args, json),
        Commands::Stats => cmd_stats(&ctx, json),
        Commands::Insights => cmd_insights(&ctx, json),
        Commands::Categories => cmd_categories(&ctx, json),
        Commands::Export(args) => cmd_export(&ctx, args),

        // Write commands
        Commands::Add(args) => cmd_add(&mut ctx, args, json),
        Commands::Edit(args) => cmd_edit(&mut ctx, args, json),
        Commands::Toggle(args) => cmd_toggle(&mut ctx, args, json),
        Commands::Rm(args) => cmd_rm(&mut ctx, args),
        Commands::Dup(args) => cmd_dup(&mut ctx, args, json),
        Commands::CompleteAll => cmd_complete_all(&mut ctx),
        Commands::ClearCompleted => cmd_clear_completed(&mut ctx),
        Commands::Sort(args) => cmd_sort(&mut ctx, args),
        Commands::Import(args) => cmd_import(&mut ctx, args),
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(ctx: &mut Context, args: ListArgs, json: bool) -> Result<(), CliError> {
    ctx.store.set_filter(args.filter);
    if let Some(term) = args.search {
        ctx.store.set_search_term(term);
    }
    let now = ctx.store.now();
    let mut todos = ctx.store.filtered();
    if let Some(mode) = args.sort {
        todos.sort_by(|a, b| store::order(a, b, mode));
    }

    if json {
        let out: Vec<TodoJson> = todos.iter().map(|t| todo_to_json(t, now)).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for todo in todos {
            println!("{}", format_todo_line(todo, now));
        }
    }
    Ok(())
}

fn cmd_show(ctx: &Context, args: IdArgs, json: bool) -> Result<(), CliError> {
    let todo = ctx.store.get(args.id).ok_or(CliError::NotFound(args.id))?;
    let now = ctx.store.now();
    if json {
        println!("{}", serde_json::to_string_pretty(&todo_to_json(todo, now))?);
    } else {
        for line in format_todo_detail(todo, now) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_stats(ctx: &Context, json: bool) -> Result<(), CliError> {
    let stats = ctx.store.stats();
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        for line in format_stats(&stats) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_insights(ctx: &Context, json: bool) -> Result<(), CliError> {
    let insights = ctx.store.insights();
    if json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
    } else {
        for line in format_insights(&insights) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_categories(ctx: &Context, json: bool) -> Result<(), CliError> {
    let entries: Vec<CategoryJson> = ctx
        .store
        .categories()
        .iter()
        .map(|name| {
            let members = ctx
                .store
                .todos()
                .iter()
                .filter(|t| t.category.as_deref() == Some(name.as_str()));
            let (total, active) = members.fold((0, 0), |(total, active), t| {
                (total + 1, active + usize::from(!t.completed))
            });
            CategoryJson {
                name: name.clone(),
                total,
                active,
            }
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for entry in &entries {
            println!("{}  ({} active / {} total)", entry.name, entry.active, entry.total);
        }
    }
    Ok(())
}

fn cmd_export(ctx: &Context, args: ExportArgs) -> Result<(), CliError> {
    let body = ctx.store.export_json()?;
    match args.output {
        Some(file) => {
            let path = PathBuf::from(file);
            crate::io::storage::atomic_write(&path, body.as_bytes())
                .map_err(|source| CliError::Write { path: path.clone(), source })?;
            println!(
                "exported {} todo(s) to {}",
                ctx.store.todos().len(),
                path.display()
            );
        }
        None => println!("{}", body),
    }
    Ok(())
}
