use std::fmt::Display;

use reqwest::{header, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use todo_core::StoreError;

use crate::config::StoreConfig;
use crate::errors::ClientError;

/// PostgREST query client covering select, insert, update-by-match and
/// delete-by-match, each returning the affected rows.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    config: StoreConfig,
}

impl RestClient {
    pub fn new(config: StoreConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Start a query against `table`.
    pub fn from(&self, table: &str) -> TableQuery<'_> {
        TableQuery {
            client: self,
            table: table.to_string(),
        }
    }
}

pub struct TableQuery<'a> {
    client: &'a RestClient,
    table: String,
}

impl<'a> TableQuery<'a> {
    pub fn select(self, columns: &str) -> Request<'a> {
        self.request(Method::GET, Ok(None), false)
            .param("select", columns)
    }

    pub fn insert<T: Serialize>(self, record: &T) -> Request<'a> {
        let body = serde_json::to_value(record).map(Some).map_err(StoreError::from);
        self.request(Method::POST, body, true)
    }

    pub fn update<T: Serialize>(self, partial: &T) -> Request<'a> {
        let body = serde_json::to_value(partial).map(Some).map_err(StoreError::from);
        self.request(Method::PATCH, body, true)
    }

    pub fn delete(self) -> Request<'a> {
        self.request(Method::DELETE, Ok(None), true)
    }

    fn request(
        self,
        method: Method,
        body: Result<Option<Value>, StoreError>,
        returning: bool,
    ) -> Request<'a> {
        Request {
            client: self.client,
            table: self.table,
            method,
            params: Vec::new(),
            body,
            returning,
        }
    }
}

/// A query ready to send. Filters are added with [`Request::match_eq`].
pub struct Request<'a> {
    client: &'a RestClient,
    table: String,
    method: Method,
    params: Vec<(String, String)>,
    body: Result<Option<Value>, StoreError>,
    returning: bool,
}

impl<'a> Request<'a> {
    /// Exact-match filter, `column=eq.value`.
    pub fn match_eq(self, column: &str, value: impl Display) -> Self {
        self.param(column, format!("eq.{value}"))
    }

    fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.push((key.to_string(), value.into()));
        self
    }

    /// Send the request and decode the returned rows.
    pub async fn execute<R: DeserializeOwned>(self) -> Result<Vec<R>, StoreError> {
        let body = self.body?;
        let config = &self.client.config;
        let url = config.endpoint(&self.table);

        tracing::debug!(method = %self.method, table = %self.table, params = ?self.params, "store request");

        let mut request = self
            .client
            .http
            .request(self.method.clone(), &url)
            .query(&self.params)
            .header("apikey", &config.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", config.api_key))
            .header(header::ACCEPT, "application/json");
        if self.returning {
            request = request.header("Prefer", "return=representation");
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = error_message(status, &bytes);
            tracing::debug!(status = status.as_u16(), %message, "store rejected request");
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// PostgREST error body.
#[derive(Debug, Deserialize)]
struct ApiError {
    message: Option<String>,
    code: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

fn error_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(err) = serde_json::from_slice::<ApiError>(body) {
        if let Some(message) = err.message {
            let mut out = message;
            if let Some(code) = err.code {
                out = format!("{out} ({code})");
            }
            for extra in [err.details, err.hint].into_iter().flatten() {
                out.push_str("; ");
                out.push_str(&extra);
            }
            return out;
        }
    }

    let text = String::from_utf8_lossy(body).trim().to_string();
    if text.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_postgrest_body() {
        let body = br#"{"message":"permission denied for table tasks","code":"42501","details":null,"hint":"check policies"}"#;
        assert_eq!(
            error_message(StatusCode::UNAUTHORIZED, body),
            "permission denied for table tasks (42501); check policies"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_text_then_reason() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, b"upstream down\n"),
            "upstream down"
        );
        assert_eq!(error_message(StatusCode::NOT_FOUND, b""), "Not Found");
    }
}
