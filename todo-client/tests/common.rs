use std::sync::Arc;

use todo_client::{MemoryTaskStore, TaskController, TaskService};
use todo_core::{Task, TaskId, ViewPolicy};

/// Controller over a shared in-memory store, so tests can inspect calls.
#[allow(dead_code)]
pub fn controller_with(store: &Arc<MemoryTaskStore>, policy: ViewPolicy) -> TaskController {
    TaskController::new(TaskService::new(store.clone()), policy)
}

#[allow(dead_code)]
pub fn task(id: TaskId, text: &str, completed: bool) -> Task {
    Task {
        id,
        task: text.to_string(),
        completed,
    }
}
