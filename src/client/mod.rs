//! Search service client (impure).
//!
//! [`SearchBackend`] is the opaque request/response boundary the rest of
//! the crate talks to. [`HttpSearchClient`] implements it with a blocking
//! `reqwest` client that POSTs stored-template requests; tests substitute
//! in-memory fakes. The same client registers the stored templates
//! through [`ScriptStore`].

pub mod dispatcher;
pub mod response;

pub use dispatcher::{SearchDispatcher, SearchOutcome};
pub use response::SearchResponse;

use crate::config::ResolvedConfig;
use crate::model::SearchError;
use crate::query::SearchRequest;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Executes one search request.
pub trait SearchBackend: Send + Sync {
    /// Send `request` and decode the response body.
    fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError>;
}

/// Stored-script registry of the search service (`/_scripts/{id}`).
pub trait ScriptStore {
    /// Delete script `id`. `Ok(false)` when it did not exist.
    fn delete_script(&self, id: &str) -> Result<bool, SearchError>;

    /// Create or replace script `id` with `body`.
    fn put_script(&self, id: &str, body: &serde_json::Value) -> Result<(), SearchError>;
}

// ===== ClientSettings =====

/// Connection settings for [`HttpSearchClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Base URL, e.g. `https://search.example.com`.
    pub host: String,
    /// Index the templates run against.
    pub index: String,
    /// Basic auth user; empty disables auth.
    pub username: String,
    /// Basic auth password.
    pub password: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl From<&ResolvedConfig> for ClientSettings {
    fn from(config: &ResolvedConfig) -> Self {
        Self {
            host: config.host.clone(),
            index: config.index.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

// ===== Probe responses =====

/// `GET /_cluster/health` body (fields we print).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClusterHealth {
    /// Cluster name.
    #[serde(default)]
    pub cluster_name: String,
    /// `green`, `yellow` or `red`.
    pub status: String,
    /// Node count, when reported.
    #[serde(default)]
    pub number_of_nodes: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct CountResponse {
    count: u64,
}

// ===== HttpSearchClient =====

/// Blocking HTTP implementation of [`SearchBackend`].
#[derive(Debug, Clone)]
pub struct HttpSearchClient {
    http: Client,
    settings: ClientSettings,
}

impl HttpSearchClient {
    /// Build a client with the configured timeout.
    pub fn new(settings: ClientSettings) -> Result<Self, SearchError> {
        let http = Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("clearcheck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(transport)?;
        Ok(Self { http, settings })
    }

    /// Search-template endpoint.
    pub fn search_url(&self) -> String {
        format!("{}/{}/_search/template", self.base(), self.settings.index)
    }

    /// Query cluster health.
    pub fn cluster_health(&self) -> Result<ClusterHealth, SearchError> {
        let url = format!("{}/_cluster/health", self.base());
        let body = self.send(self.http.get(&url))?;
        serde_json::from_slice(&body).map_err(|e| SearchError::Decode(e.to_string()))
    }

    /// Count every document in the index.
    pub fn document_count(&self) -> Result<u64, SearchError> {
        let url = format!("{}/{}/_count", self.base(), self.settings.index);
        let query = serde_json::json!({ "query": { "match_all": {} } });
        let body = self.send(self.http.post(&url).json(&query))?;
        let parsed: CountResponse =
            serde_json::from_slice(&body).map_err(|e| SearchError::Decode(e.to_string()))?;
        Ok(parsed.count)
    }

    /// Stored-script endpoint for template `id`.
    pub fn script_url(&self, id: &str) -> String {
        format!("{}/_scripts/{}", self.base(), id)
    }

    fn base(&self) -> &str {
        self.settings.host.trim_end_matches('/')
    }

    fn send(&self, request: RequestBuilder) -> Result<Vec<u8>, SearchError> {
        let (status, body) = self.send_raw(request)?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "Search service returned error status");
            return Err(status_error(status, &body));
        }
        Ok(body)
    }

    fn send_raw(&self, request: RequestBuilder) -> Result<(StatusCode, Vec<u8>), SearchError> {
        let request = if self.settings.username.is_empty() {
            request
        } else {
            request.basic_auth(&self.settings.username, self.settings.password.as_deref())
        };

        let response = request.send().map_err(transport)?;
        let status = response.status();
        let body = response.bytes().map_err(transport)?;
        Ok((status, body.to_vec()))
    }
}

impl ScriptStore for HttpSearchClient {
    fn delete_script(&self, id: &str) -> Result<bool, SearchError> {
        let url = self.script_url(id);
        debug!(%url, "DELETE stored script");
        let (status, body) = self.send_raw(self.http.delete(&url))?;
        match status {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => Err(status_error(status, &body)),
        }
    }

    fn put_script(&self, id: &str, body: &serde_json::Value) -> Result<(), SearchError> {
        let url = self.script_url(id);
        debug!(%url, "PUT stored script");
        self.send(self.http.put(&url).json(body)).map(|_| ())
    }
}

impl SearchBackend for HttpSearchClient {
    fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        let url = self.search_url();
        debug!(%url, template = request.mode().template_id(), "POST search template");
        let body = self.send(self.http.post(&url).json(&request.payload()))?;
        SearchResponse::from_slice(&body)
    }
}

fn status_error(status: StatusCode, body: &[u8]) -> SearchError {
    SearchError::Status {
        status: status.as_u16(),
        body: String::from_utf8_lossy(body).into_owned(),
    }
}

fn transport(err: reqwest::Error) -> SearchError {
    if err.is_timeout() {
        SearchError::Transport(format!("request timed out: {err}"))
    } else {
        SearchError::Transport(err.to_string())
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
