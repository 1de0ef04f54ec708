use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tb", about = concat!("taskboard v", env!("CARGO_PKG_VERSION"), " - tasks on cards, in your terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Board file to use (default: tasks.json next to the executable)
    #[arg(short = 'f', long = "file", env = "TASKBOARD_FILE", global = true)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks (active by default)
    List(ListArgs),
    /// Add a task to the end of the active list
    Add(AddArgs),
    /// Mark an active task completed
    Done(PositionArgs),
    /// Move a completed item back to the end of the active list
    Restore(PositionArgs),
    /// Replace a task's text
    Edit(EditArgs),
    /// Delete a task
    Rm(RmArgs),
    /// Reorder an active task
    Mv(MvArgs),
    /// Show or clear the recovery log
    Log(LogArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// List completed items instead
    #[arg(long, conflicts_with = "all")]
    pub completed: bool,
    /// List both lists
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task text (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct PositionArgs {
    /// 1-based position in the list
    pub position: usize,
}

#[derive(Args)]
pub struct EditArgs {
    /// 1-based position in the list
    pub position: usize,
    /// New text (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
    /// Edit a completed item instead
    #[arg(long)]
    pub completed: bool,
}

#[derive(Args)]
pub struct RmArgs {
    /// 1-based position in the list
    pub position: usize,
    /// Delete a completed item instead
    #[arg(long)]
    pub completed: bool,
}

#[derive(Args)]
pub struct MvArgs {
    /// Current 1-based position
    pub from: usize,
    /// New 1-based position (past the end moves to the end)
    pub to: usize,
}

#[derive(Args)]
pub struct LogArgs {
    /// Remove all entries
    #[arg(long)]
    pub clear: bool,
    /// Show at most this many entries, newest first
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}
