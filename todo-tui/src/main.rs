mod app;
mod cli;
mod commands;
mod logging;
mod tui;
mod ui;

use std::sync::Arc;

use clap::Parser;
use todo_client::{MemoryTaskStore, RestTaskStore, TaskController, TaskService, TaskStore};

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.clone().unwrap_or(Command::Tui);

    let _log_guard = if command == Command::Tui {
        Some(logging::init_file(&cli.log_dir())?)
    } else {
        logging::init_stderr();
        None
    };

    let store: Arc<dyn TaskStore> = if cli.memory {
        Arc::new(MemoryTaskStore::new())
    } else {
        Arc::new(RestTaskStore::new(cli.store_config()?)?)
    };
    let service = TaskService::new(store);
    tracing::info!(backend = %service.backend(), "task store ready");

    match command {
        Command::Tui => {
            let controller = TaskController::new(service, cli.policy());
            tui::run(controller).await
        }
        Command::List => commands::list(&service).await,
        Command::Add { text } => commands::add(&service, &text).await,
        Command::Done { id } => commands::set_completion(&service, id, true).await,
        Command::Undo { id } => commands::set_completion(&service, id, false).await,
        Command::Delete { id } => commands::delete(&service, id).await,
    }
}
