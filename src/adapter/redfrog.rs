//! Red Frog route calculator.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;
use tracing::debug;

use super::http::{build_client, check_status, HttpConfig};
use super::retry::{with_retry, RetryConfig};
use crate::domain::{Hub, RouteInfo};
use crate::error::{Error, Result};
use crate::port::RoutingOracle;

#[derive(Debug, Deserialize)]
struct RouteDto {
    jumps: Option<i64>,
}

/// Public calculator endpoint; no credentials.
pub struct RedFrogClient {
    http: HttpClient,
    calculator_url: String,
    retry: RetryConfig,
}

impl RedFrogClient {
    pub fn new(calculator_url: &str, http: &HttpConfig, retry: RetryConfig) -> Result<Self> {
        Ok(Self {
            http: build_client(http, HeaderMap::new())?,
            calculator_url: calculator_url.to_string(),
            retry,
        })
    }
}

fn to_route(dto: RouteDto, origin: &str, hub: &Hub) -> Option<RouteInfo> {
    let jumps = dto.jumps.filter(|j| *j >= 0)?;
    Some(RouteInfo {
        origin_system: origin.to_string(),
        destination_system: hub.system_name.clone(),
        destination_label: hub.label.clone(),
        jumps,
    })
}

#[async_trait]
impl RoutingOracle for RedFrogClient {
    async fn route(&self, origin_system: &str, hub: &Hub) -> Result<Option<RouteInfo>> {
        let http = &self.http;
        let url = self.calculator_url.as_str();
        let query = [("origin", origin_system), ("destination", hub.system_name.as_str())];

        let dto = with_retry(&self.retry, "route", || async move {
            let response = http.get(url).query(&query).send().await?;
            if response.status() == StatusCode::NOT_FOUND {
                return Ok::<_, Error>(None);
            }
            Ok::<_, Error>(Some(check_status(response)?.json::<RouteDto>().await?))
        })
        .await?;

        let route = dto.and_then(|dto| to_route(dto, origin_system, hub));
        debug!(
            origin = origin_system,
            destination = %hub.system_name,
            jumps = route.as_ref().map(|r| r.jumps),
            "Route lookup"
        );
        Ok(route)
    }
}
