//! Shared HTTP plumbing for the service adapters.

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client as HttpClient, Response, StatusCode};
use serde::Deserialize;

use crate::error::{Error, Result};

/// Timeouts applied to every outbound request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

const fn default_timeout_ms() -> u64 {
    30_000
}

const fn default_connect_timeout_ms() -> u64 {
    10_000
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

/// Build a client carrying `headers` on every request.
pub(crate) fn build_client(config: &HttpConfig, headers: HeaderMap) -> Result<HttpClient> {
    let client = HttpClient::builder()
        .timeout(Duration::from_millis(config.timeout_ms))
        .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
        .default_headers(headers)
        .build()?;
    Ok(client)
}

/// Map a status code to the oracle error taxonomy.
pub(crate) fn status_error(url: &str, status: StatusCode) -> Error {
    let message = format!("{url} returned {status}");
    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        Error::OracleTransient(message)
    } else {
        Error::Oracle(message)
    }
}

/// Pass successful responses through, classify the rest.
pub(crate) fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() || status == StatusCode::NOT_MODIFIED {
        Ok(response)
    } else {
        Err(status_error(response.url().as_str(), status))
    }
}
