//! Command-line front end for the task board.
//!
//! Each subcommand drives the same [`TaskStore`](crate::tasks::TaskStore) and
//! gateway services a graphical client would, and renders the result with the
//! embedded templates.

mod run;


pub use run::{run, CliContext, CliOutput};

use crate::tasks::{CategoryId, TaskId, TaskPriority, TaskStatus};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Task board client - list, create, edit, and track tasks on a task API.
#[derive(Parser, Debug)]
#[command(name = "taskboard")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base URL of the task API (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Directory holding config.yaml and saved preferences
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List tasks passing the saved filter.
    ///
    /// Any filter flag updates the saved filter before listing; it stays in
    /// effect for later runs. Pass `any` to drop a status or priority
    /// constraint.
    List {
        /// Only show tasks with this status (TODO, IN_PROGRESS, DONE, any)
        #[arg(short, long)]
        status: Option<String>,

        /// Only show tasks with this priority (LOW, MEDIUM, HIGH, any)
        #[arg(short, long)]
        priority: Option<String>,

        /// Case-insensitive text to look for in title or description
        #[arg(long)]
        search: Option<String>,

        /// Reset the saved filter before applying other flags
        #[arg(long)]
        clear: bool,
    },

    /// Show a task with its category.
    Show {
        /// Task ID
        id: TaskId,
    },

    /// Create a new task.
    ///
    /// New tasks default to priority MEDIUM, status TODO, and category 1.
    Create {
        /// Title, at least 3 characters
        #[arg(short, long)]
        title: String,

        /// Description with more details
        #[arg(short, long, default_value = "")]
        description: String,

        /// Priority: LOW, MEDIUM, HIGH
        #[arg(short, long, default_value = "MEDIUM")]
        priority: TaskPriority,

        /// Initial status: TODO, IN_PROGRESS, DONE
        #[arg(short, long, default_value = "TODO")]
        status: TaskStatus,

        /// Category ID
        #[arg(short, long, default_value = "1")]
        category: CategoryId,

        /// Due date (YYYY-MM-DD), today or later
        #[arg(long)]
        due: String,
    },

    /// Edit a task's fields.
    ///
    /// Only specified fields change; the task is submitted whole.
    Edit {
        /// Task ID
        id: TaskId,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New priority
        #[arg(short, long)]
        priority: Option<TaskPriority>,

        /// New status
        #[arg(short, long)]
        status: Option<TaskStatus>,

        /// New category ID
        #[arg(short, long)]
        category: Option<CategoryId>,

        /// New due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },

    /// Set a task's status.
    Status {
        /// Task ID
        id: TaskId,

        /// New status: TODO, IN_PROGRESS, DONE
        status: TaskStatus,
    },

    /// Move a task to its next status (TODO, IN_PROGRESS, DONE, then TODO).
    Advance {
        /// Task ID
        id: TaskId,
    },

    /// Delete a task.
    Delete {
        /// Task ID
        id: TaskId,
    },

    /// List categories.
    Categories,

    /// Show task counts per status.
    Summary,

    /// Show the saved filter.
    Filter,
}
