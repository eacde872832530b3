use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use strum::Display;
use todo_core::{CompletionPatch, NewTask, StoreError, Task, TaskId};

use crate::store::TaskStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum StoreOp {
    Select,
    Insert,
    Update,
    Delete,
}

#[derive(Debug, Default)]
struct Inner {
    rows: Vec<Task>,
    last_id: TaskId,
    calls: HashMap<StoreOp, usize>,
    failures: HashMap<StoreOp, StoreError>,
    delays: HashMap<StoreOp, Duration>,
}

/// In-process stand-in for the hosted table: rows kept in insertion order,
/// ids counting up from 1.
///
/// Failures and delays are one-shot and armed per operation, which lets
/// tests drive the error paths and out-of-order completions.
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    inner: Mutex<Inner>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks<'a>(tasks: impl IntoIterator<Item = (&'a str, bool)>) -> Self {
        let store = Self::new();
        {
            let mut inner = store.lock();
            for (text, completed) in tasks {
                inner.last_id += 1;
                let id = inner.last_id;
                inner.rows.push(Task {
                    id,
                    task: text.to_string(),
                    completed,
                });
            }
        }
        store
    }

    pub fn snapshot(&self) -> Vec<Task> {
        self.lock().rows.clone()
    }

    /// Number of requests of this kind received so far, failed ones included.
    pub fn calls(&self, op: StoreOp) -> usize {
        self.lock().calls.get(&op).copied().unwrap_or(0)
    }

    pub fn fail_next(&self, op: StoreOp, error: StoreError) {
        self.lock().failures.insert(op, error);
    }

    /// Hold the next response of this kind back. The rows it returns are
    /// read before the delay, like a server answering late.
    pub fn delay_next(&self, op: StoreOp, delay: Duration) {
        self.lock().delays.insert(op, delay);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A panicked test thread must not wedge the others.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Count the call and take any armed failure or delay for it.
    fn begin(&self, op: StoreOp) -> Result<Option<Duration>, StoreError> {
        let mut inner = self.lock();
        *inner.calls.entry(op).or_insert(0) += 1;
        let delay = inner.delays.remove(&op);
        match inner.failures.remove(&op) {
            Some(err) => Err(err),
            None => Ok(delay),
        }
    }
}

async fn settle<T>(delay: Option<Duration>, value: T) -> T {
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    value
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn select_all(&self) -> Result<Vec<Task>, StoreError> {
        let delay = self.begin(StoreOp::Select)?;
        let rows = self.snapshot();
        Ok(settle(delay, rows).await)
    }

    async fn insert(&self, task: &NewTask) -> Result<Vec<Task>, StoreError> {
        let delay = self.begin(StoreOp::Insert)?;
        let row = {
            let mut inner = self.lock();
            inner.last_id += 1;
            let row = Task {
                id: inner.last_id,
                task: task.task.clone(),
                completed: task.completed,
            };
            inner.rows.push(row.clone());
            row
        };
        Ok(settle(delay, vec![row]).await)
    }

    async fn update_completion(
        &self,
        id: TaskId,
        patch: CompletionPatch,
    ) -> Result<Vec<Task>, StoreError> {
        let delay = self.begin(StoreOp::Update)?;
        let touched: Vec<Task> = {
            let mut inner = self.lock();
            inner
                .rows
                .iter_mut()
                .filter(|t| t.id == id)
                .map(|t| {
                    t.completed = patch.completed;
                    t.clone()
                })
                .collect()
        };
        Ok(settle(delay, touched).await)
    }

    async fn delete(&self, id: TaskId) -> Result<Vec<Task>, StoreError> {
        let delay = self.begin(StoreOp::Delete)?;
        let removed: Vec<Task> = {
            let mut inner = self.lock();
            let (removed, kept): (Vec<Task>, Vec<Task>) = std::mem::take(&mut inner.rows)
                .into_iter()
                .partition(|t| t.id == id);
            inner.rows = kept;
            removed
        };
        Ok(settle(delay, removed).await)
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}
