use std::path::PathBuf;

use clap::{Parser, Subcommand};
use todo_client::StoreConfig;
use todo_core::{InputOnFailure, Reconcile, TaskId, ViewPolicy};

#[derive(Parser, Debug)]
#[command(name = "todo")]
#[command(about = "Task list backed by a hosted Postgres table", long_about = None)]
pub struct Cli {
    /// Project URL of the hosted database
    #[arg(long, env = "SUPABASE_URL")]
    pub url: Option<String>,

    /// Anon (public) API key
    #[arg(long, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Table holding the tasks
    #[arg(long, env = "TODO_TABLE", default_value = "tasks")]
    pub table: String,

    /// Per-request timeout in seconds (none by default)
    #[arg(long, env = "TODO_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Keep tasks in this process instead of talking to the server
    #[arg(long)]
    pub memory: bool,

    /// How to bring the list up to date after a change: refetch or patch
    #[arg(long, default_value_t = Reconcile::Refetch)]
    pub reconcile: Reconcile,

    /// Leave the typed text in place when adding a task fails
    #[arg(long)]
    pub keep_input_on_failure: bool,

    /// Directory for the TUI log file (defaults to the temp dir)
    #[arg(long, env = "TODO_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive screen (default)
    Tui,
    /// Print all tasks
    List,
    /// Add a task
    Add {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Mark a task as completed
    Done { id: TaskId },
    /// Mark a task as not completed
    Undo { id: TaskId },
    /// Delete a task
    Delete { id: TaskId },
}

impl Cli {
    pub fn policy(&self) -> ViewPolicy {
        ViewPolicy {
            reconcile: self.reconcile,
            input_on_add_failure: if self.keep_input_on_failure {
                InputOnFailure::Retain
            } else {
                InputOnFailure::Clear
            },
        }
    }

    /// Flags win over the environment; anything not exposed as a flag
    /// (the `SUPABASE_KEY` fallback) is read from the environment.
    pub fn store_config(&self) -> Result<StoreConfig, todo_client::ClientError> {
        StoreConfig::from_lookup(|key| match key {
            "SUPABASE_URL" => self.url.clone(),
            "SUPABASE_ANON_KEY" => self.key.clone(),
            "TODO_TABLE" => Some(self.table.clone()),
            "TODO_TIMEOUT_SECS" => self.timeout_secs.map(|s| s.to_string()),
            other => std::env::var(other).ok(),
        })
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}
