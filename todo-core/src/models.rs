use serde::{Deserialize, Serialize};

/// Server-assigned task identifier.
pub type TaskId = i64;

/// A row of the remote `tasks` table, exactly as the server returned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub task: String,
    pub completed: bool,
}

/// Insert payload. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub task: String,
    pub completed: bool,
}

impl NewTask {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            task: text.into(),
            completed: false,
        }
    }
}

/// Partial record sent with an update-by-match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionPatch {
    pub completed: bool,
}

/// Result of a delete-by-match. Zero affected rows is still a success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteReceipt {
    pub id: TaskId,
    pub affected: usize,
}
