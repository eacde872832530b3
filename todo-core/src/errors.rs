use thiserror::Error;

/// Failure reported by the remote task store (or a stand-in for it).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// One variant per adapter operation. The wrapped store error is opaque to
/// callers; they log it and carry on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TaskError {
    #[error("Failed to retrieve tasks: {0}")]
    Retrieval(#[source] StoreError),

    #[error("Failed to insert task: {0}")]
    Insert(#[source] StoreError),

    #[error("Failed to update task: {0}")]
    Update(#[source] StoreError),

    #[error("Failed to delete task: {0}")]
    Delete(#[source] StoreError),
}

impl TaskError {
    /// Short operation label used in log fields.
    pub fn operation(&self) -> &'static str {
        match self {
            TaskError::Retrieval(_) => "list",
            TaskError::Insert(_) => "insert",
            TaskError::Update(_) => "update",
            TaskError::Delete(_) => "delete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_error_messages_include_store_error() {
        let err = TaskError::Insert(StoreError::Rejected {
            status: 409,
            message: "duplicate key".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Failed to insert task: Request rejected with status 409: duplicate key"
        );
        assert_eq!(err.operation(), "insert");
    }

    #[test]
    fn test_serde_error_converts_to_serialization() {
        let err: StoreError = serde_json::from_str::<Vec<u8>>("not json").unwrap_err().into();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
