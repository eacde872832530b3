use std::time::Duration;

use reqwest::Url;

use crate::errors::ClientError;

pub const DEFAULT_TABLE: &str = "tasks";

/// Connection settings for the hosted task table.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub base_url: Url,
    pub api_key: String,
    pub table: String,
    pub timeout: Option<Duration>,
}

impl StoreConfig {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ClientError::Config(format!("invalid store URL {base_url:?}: {e}")))?;
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ClientError::Config("API key is empty".to_string()));
        }

        Ok(Self {
            base_url,
            api_key,
            table: DEFAULT_TABLE.to_string(),
            timeout: None,
        })
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Reads `SUPABASE_URL`, `SUPABASE_ANON_KEY` (or `SUPABASE_KEY`),
    /// `TODO_TABLE` and `TODO_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("SUPABASE_URL")
            .ok_or_else(|| ClientError::Config("SUPABASE_URL is not set".to_string()))?;
        let key = lookup("SUPABASE_ANON_KEY")
            .or_else(|| lookup("SUPABASE_KEY"))
            .ok_or_else(|| ClientError::Config("SUPABASE_ANON_KEY is not set".to_string()))?;

        let mut config = Self::new(&url, key)?;
        if let Some(table) = lookup("TODO_TABLE").filter(|t| !t.is_empty()) {
            config = config.with_table(table);
        }
        if let Some(secs) = lookup("TODO_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                ClientError::Config(format!("TODO_TIMEOUT_SECS must be whole seconds, got {secs:?}"))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// `{base}/rest/v1/{table}`
    pub fn endpoint(&self, table: &str) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url.as_str().trim_end_matches('/'),
            table
        )
    }
}
