use std::sync::Arc;

use todo_core::{CompletionPatch, DeleteReceipt, NewTask, Task, TaskError, TaskId, TaskResult};

use crate::store::TaskStore;

/// The four task operations, each mapping store failures onto the matching
/// [`TaskError`] variant. No validation, no retries.
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    pub fn backend(&self) -> String {
        self.store.describe()
    }

    pub async fn list_tasks(&self) -> TaskResult<Vec<Task>> {
        let tasks = self.store.select_all().await.map_err(TaskError::Retrieval)?;
        tracing::debug!(count = tasks.len(), "fetched tasks");
        Ok(tasks)
    }

    /// Returns the inserted row, or `None` if the store did not echo it.
    pub async fn add_task(&self, text: &str) -> TaskResult<Option<Task>> {
        let rows = self
            .store
            .insert(&NewTask::new(text))
            .await
            .map_err(TaskError::Insert)?;
        let task = rows.into_iter().next();
        tracing::info!(id = ?task.as_ref().map(|t| t.id), "task added");
        Ok(task)
    }

    /// Returns the updated row, or `None` when no row has this id.
    pub async fn set_completion(&self, id: TaskId, completed: bool) -> TaskResult<Option<Task>> {
        let rows = self
            .store
            .update_completion(id, CompletionPatch { completed })
            .await
            .map_err(TaskError::Update)?;
        tracing::info!(id, completed, matched = rows.len(), "task completion set");
        Ok(rows.into_iter().find(|t| t.id == id))
    }

    pub async fn delete_task(&self, id: TaskId) -> TaskResult<DeleteReceipt> {
        let rows = self.store.delete(id).await.map_err(TaskError::Delete)?;
        tracing::info!(id, affected = rows.len(), "task deleted");
        Ok(DeleteReceipt {
            id,
            affected: rows.len(),
        })
    }
}
