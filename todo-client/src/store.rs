use async_trait::async_trait;
use todo_core::{CompletionPatch, NewTask, StoreError, Task, TaskId};

use crate::config::StoreConfig;
use crate::errors::ClientError;
use crate::rest::RestClient;

/// The remote task table as seen by the service adapter.
///
/// Every method returns the rows the operation touched, so an update or
/// delete that matched nothing yields an empty vector rather than an error.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn select_all(&self) -> Result<Vec<Task>, StoreError>;

    async fn insert(&self, task: &NewTask) -> Result<Vec<Task>, StoreError>;

    async fn update_completion(
        &self,
        id: TaskId,
        patch: CompletionPatch,
    ) -> Result<Vec<Task>, StoreError>;

    async fn delete(&self, id: TaskId) -> Result<Vec<Task>, StoreError>;

    /// Human readable backend name for status lines.
    fn describe(&self) -> String;
}

/// [`TaskStore`] backed by the hosted table over PostgREST.
#[derive(Debug, Clone)]
pub struct RestTaskStore {
    client: RestClient,
}

impl RestTaskStore {
    pub fn new(config: StoreConfig) -> Result<Self, ClientError> {
        Ok(Self {
            client: RestClient::new(config)?,
        })
    }

    fn table(&self) -> &str {
        &self.client.config().table
    }
}

#[async_trait]
impl TaskStore for RestTaskStore {
    async fn select_all(&self) -> Result<Vec<Task>, StoreError> {
        self.client.from(self.table()).select("*").execute().await
    }

    async fn insert(&self, task: &NewTask) -> Result<Vec<Task>, StoreError> {
        self.client.from(self.table()).insert(task).execute().await
    }

    async fn update_completion(
        &self,
        id: TaskId,
        patch: CompletionPatch,
    ) -> Result<Vec<Task>, StoreError> {
        self.client
            .from(self.table())
            .update(&patch)
            .match_eq("id", id)
            .execute()
            .await
    }

    async fn delete(&self, id: TaskId) -> Result<Vec<Task>, StoreError> {
        self.client
            .from(self.table())
            .delete()
            .match_eq("id", id)
            .execute()
            .await
    }

    fn describe(&self) -> String {
        let config = self.client.config();
        format!(
            "{} ({})",
            config.table,
            config.base_url.host_str().unwrap_or("remote")
        )
    }
}
