//! Mainland topology lookup service.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Client as HttpClient;
use serde::Deserialize;

use super::http::{build_client, check_status, HttpConfig};
use super::retry::{with_retry, RetryConfig};
use crate::error::{Error, Result};
use crate::port::TopologyOracle;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MainlandDto {
    /// Absent when the service does not know the system.
    #[serde(default)]
    is_mainland: bool,
}

pub struct MainlandClient {
    http: HttpClient,
    base_url: String,
    retry: RetryConfig,
}

impl MainlandClient {
    pub fn new(base_url: &str, http: &HttpConfig, retry: RetryConfig) -> Result<Self> {
        Ok(Self {
            http: build_client(http, HeaderMap::new())?,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry,
        })
    }
}

#[async_trait]
impl TopologyOracle for MainlandClient {
    async fn is_mainland_connected(&self, system_name: &str) -> Result<bool> {
        let url = format!("{}/mainland", self.base_url);
        let http = &self.http;
        let url = url.as_str();
        let dto = with_retry(&self.retry, "mainland", || async move {
            let response = check_status(
                http.get(url)
                    .query(&[("systemName", system_name)])
                    .send()
                    .await?,
            )?;
            Ok::<_, Error>(response.json::<MainlandDto>().await?)
        })
        .await?;
        Ok(dto.is_mainland)
    }
}
