//! ArangoDB query engine client
//!
//! - Parse: `POST {db_url}/_api/query` with `{"query": <text>}`
//! - Health: `GET {db_url}/_admin/cluster/health`
//!
//! The parse reply is decoded regardless of HTTP status: a syntax error comes
//! back as a 400 carrying `{"error": true, "errorMessage": ...}`.

use std::collections::BTreeSet;
use std::thread;
use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;

use super::errors::{EngineError, EngineResult};
use super::{Introspection, QueryEngine};
use crate::observability::Event;

/// Parse endpoint reply
#[derive(Debug, Deserialize)]
struct ParseReply {
    #[serde(default)]
    error: bool,
    #[serde(rename = "errorMessage", default)]
    error_message: Option<String>,
    #[serde(rename = "bindVars", default)]
    bind_vars: Vec<String>,
}

/// HTTP client for an ArangoDB-compatible server.
pub struct ArangoEngine {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl ArangoEngine {
    /// Creates a client with basic-auth credentials.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        request_timeout: Option<Duration>,
    ) -> EngineResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| EngineError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            username: username.into(),
            password: password.into(),
        })
    }

    /// Returns the server base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn query_url(&self) -> String {
        format!("{}/_api/query", self.base_url)
    }

    fn health_url(&self) -> String {
        format!("{}/_admin/cluster/health", self.base_url)
    }

    /// Performs one health request; any non-success status is an error.
    pub fn check_health(&self) -> EngineResult<()> {
        let url = self.health_url();
        self.client
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .and_then(|resp| resp.error_for_status())
            .map(|_| ())
            .map_err(|e| EngineError::Transport {
                url,
                message: e.to_string(),
            })
    }

    /// Polls the health endpoint until it succeeds or `timeout` elapses.
    pub fn wait_until_ready(&self, timeout: Duration, interval: Duration) -> EngineResult<()> {
        let started = Instant::now();
        loop {
            match self.check_health() {
                Ok(()) => {
                    tracing::info!(event = %Event::EngineReady, url = %self.base_url);
                    return Ok(());
                }
                Err(e) => {
                    if started.elapsed() >= timeout {
                        return Err(EngineError::NotReady {
                            waited_secs: started.elapsed().as_secs(),
                            last_error: e.to_string(),
                        });
                    }
                    tracing::warn!(
                        event = %Event::EngineWait,
                        url = %self.base_url,
                        error = %e,
                        "waiting for query engine to come online"
                    );
                    thread::sleep(interval);
                }
            }
        }
    }
}

impl QueryEngine for ArangoEngine {
    fn introspect(&self, query: &str) -> EngineResult<Introspection> {
        let url = self.query_url();
        let body = self
            .client
            .post(&url)
            .basic_auth(&self.username, Some(&self.password))
            .json(&json!({ "query": query }))
            .send()
            .and_then(|resp| resp.text())
            .map_err(|e| EngineError::Transport {
                url: url.clone(),
                message: e.to_string(),
            })?;

        decode_parse_reply(&url, &body)
    }
}

/// Decodes a parse endpoint reply body.
fn decode_parse_reply(url: &str, body: &str) -> EngineResult<Introspection> {
    let reply: ParseReply = serde_json::from_str(body).map_err(|e| EngineError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    if reply.error {
        return Ok(Introspection::Rejected {
            message: reply
                .error_message
                .unwrap_or_else(|| "query rejected without a message".to_string()),
        });
    }

    Ok(Introspection::Parsed {
        bind_vars: reply.bind_vars.into_iter().collect::<BTreeSet<_>>(),
    })
}
