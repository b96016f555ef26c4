//! Janice appraisal service: bulk pricing and shareable appraisals.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::http::{build_client, check_status, HttpConfig};
use super::retry::{with_retry, RetryConfig};
use crate::domain::{AppraisalLine, TypeId, ValuationTotals};
use crate::error::{ConfigError, Error, Result};
use crate::port::PricingOracle;

const USER_AGENT_VALUE: &str = "couriers (corp hangar classifier)";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PricerEntry {
    item_type: PricedType,
    immediate_prices: ImmediatePrices,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PricedType {
    eid: i64,
    #[serde(default)]
    packaged_volume: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImmediatePrices {
    #[serde(default)]
    buy_price: f64,
    #[serde(default)]
    sell_price: f64,
}

#[derive(Debug, Deserialize)]
struct AppraisalDto {
    code: String,
}

/// Sum quantities per type.
fn amounts_per_type(items: &[(TypeId, i64)]) -> HashMap<TypeId, i64> {
    let mut amounts = HashMap::new();
    for &(type_id, quantity) in items {
        *amounts.entry(type_id).or_insert(0) += quantity;
    }
    amounts
}

/// Multiply unit prices by the held amount of each type.
fn totals_from_prices(entries: &[PricerEntry], amounts: &HashMap<TypeId, i64>) -> ValuationTotals {
    let mut totals = ValuationTotals::default();
    for entry in entries {
        let amount = amounts
            .get(&TypeId::new(entry.item_type.eid))
            .copied()
            .unwrap_or(0) as f64;
        totals.buy += entry.immediate_prices.buy_price * amount;
        totals.sell += entry.immediate_prices.sell_price * amount;
        totals.volume += entry.item_type.packaged_volume * amount;
    }
    totals.sanitized()
}

/// Client for the pricing REST API.
pub struct JaniceClient {
    http: HttpClient,
    api_url: String,
    /// Site root that appraisal codes are appended to.
    public_url: String,
    retry: RetryConfig,
}

impl JaniceClient {
    pub fn new(
        api_url: &str,
        public_url: &str,
        api_key: &str,
        http: &HttpConfig,
        retry: RetryConfig,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(api_key).map_err(|e| ConfigError::InvalidValue {
            field: "JANICE_API_KEY",
            reason: e.to_string(),
        })?;
        headers.insert("X-ApiKey", key);
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));

        Ok(Self {
            http: build_client(http, headers)?,
            api_url: api_url.trim_end_matches('/').to_string(),
            public_url: public_url.trim_end_matches('/').to_string(),
            retry,
        })
    }

    async fn post_text<T: DeserializeOwned>(&self, path: &str, body: String) -> Result<T> {
        let url = format!("{}{path}", self.api_url);
        let http = &self.http;
        with_retry(&self.retry, path, || {
            let url = url.clone();
            let body = body.clone();
            async move {
                let response = check_status(http.post(url).body(body).send().await?)?;
                Ok::<T, Error>(response.json::<T>().await?)
            }
        })
        .await
    }
}

#[async_trait]
impl PricingOracle for JaniceClient {
    async fn appraise(&self, items: &[(TypeId, i64)]) -> Result<ValuationTotals> {
        if items.is_empty() {
            return Ok(ValuationTotals::default());
        }
        let amounts = amounts_per_type(items);
        let body = amounts
            .keys()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");

        let entries: Vec<PricerEntry> = self.post_text("/v2/pricer", body).await?;
        debug!(types = amounts.len(), priced = entries.len(), "Priced bundle");
        Ok(totals_from_prices(&entries, &amounts))
    }

    async fn appraisal_link(&self, lines: &[AppraisalLine]) -> Result<String> {
        let body = lines
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        let appraisal: AppraisalDto = self.post_text("/v2/appraisal", body).await?;
        Ok(format!("{}/a/{}", self.public_url, appraisal.code))
    }
}
