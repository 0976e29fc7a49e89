use clap::{Args, Parser, Subcommand};

use crate::model::{Priority, SortMode, StatusFilter, TodoId};

#[derive(Parser)]
#[command(name = "tk", about = concat!("[x] ticklist v", env!("CARGO_PKG_VERSION"), " - todos in your terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Data directory holding todos.json and ticklist.toml
    /// (default: $TICKLIST_DIR, else the current directory)
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List todos
    List(ListArgs),
    /// Show one todo in full
    Show(IdArgs),
    /// Add a todo
    Add(AddArgs),
    /// Change fields of a todo
    Edit(EditArgs),
    /// Flip a todo between active and completed
    Toggle(IdArgs),
    /// Delete a todo
    Rm(IdArgs),
    /// Copy a todo (the copy starts active)
    Dup(IdArgs),
    /// Mark every todo completed
    CompleteAll,
    /// Delete every completed todo
    ClearCompleted,
    /// Reorder the stored collection
    Sort(SortArgs),
    /// Show counts
    Stats,
    /// Show productivity insights
    Insights,
    /// List categories in use
    Categories,
    /// Write all todos as JSON
    Export(ExportArgs),
    /// Replace all todos with the contents of a JSON export
    Import(ImportArgs),
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Status filter (all, active, completed, overdue)
    #[arg(long, default_value = "all")]
    pub filter: StatusFilter,
    /// Case-insensitive search over title, description and category
    #[arg(long)]
    pub search: Option<String>,
    /// Order the output, e.g. priority-desc (does not change stored order)
    #[arg(long)]
    pub sort: Option<SortMode>,
}

#[derive(Args)]
pub struct IdArgs {
    /// Todo ID
    pub id: TodoId,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Todo title
    pub title: String,
    #[arg(short, long)]
    pub description: Option<String>,
    /// low, medium or high
    #[arg(short, long)]
    pub priority: Option<Priority>,
    #[arg(short, long)]
    pub category: Option<String>,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Todo ID
    pub id: TodoId,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub description: Option<String>,
    #[arg(short, long)]
    pub priority: Option<Priority>,
    #[arg(short, long, conflicts_with = "clear_category")]
    pub category: Option<String>,
    /// Due date (YYYY-MM-DD)
    #[arg(long, conflicts_with = "clear_due")]
    pub due: Option<String>,
    /// Remove the category
    #[arg(long)]
    pub clear_category: bool,
    /// Remove the due date
    #[arg(long)]
    pub clear_due: bool,
}

#[derive(Args)]
pub struct SortArgs {
    /// criteria-order: title, priority, createdAt or dueDate; asc or desc
    pub mode: SortMode,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,
}

#[derive(Args)]
pub struct ImportArgs {
    /// JSON file produced by `export`
    pub file: String,
}
