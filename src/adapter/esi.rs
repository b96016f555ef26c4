//! EVE Swagger Interface client: corporation assets and universe catalog.

use async_trait::async_trait;
use futures_util::future::try_join_all;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use super::http::{build_client, check_status, HttpConfig};
use super::retry::{with_retry, RetryConfig};
use crate::domain::{InventoryItem, ItemTypeInfo, LocationInfo, StationId, SystemId, TypeId};
use crate::error::{ConfigError, Error, Result};
use crate::port::{CatalogOracle, InventorySource};

/// Which corporation's hangar is scanned and which records are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InventoryConfig {
    #[serde(default = "default_corporation_id")]
    pub corporation_id: i64,
    /// Location flags whose records never count as hangar contents.
    #[serde(default = "default_excluded_flags")]
    pub excluded_flags: Vec<String>,
}

const fn default_corporation_id() -> i64 {
    98_649_014
}

fn default_excluded_flags() -> Vec<String> {
    ["Unlocked", "Wardrobe", "AssetSafety", "Implant", "Skill"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            corporation_id: default_corporation_id(),
            excluded_flags: default_excluded_flags(),
        }
    }
}

/// Category id of ships in the universe catalog.
const SHIP_CATEGORY_ID: i64 = 6;

#[derive(Debug, Deserialize)]
struct AssetDto {
    item_id: i64,
    location_id: i64,
    location_flag: String,
    quantity: i64,
    type_id: i64,
    #[serde(default)]
    is_singleton: bool,
}

impl AssetDto {
    fn into_item(self) -> InventoryItem {
        let item = InventoryItem::new(self.item_id, self.location_id, self.type_id, self.quantity);
        if self.is_singleton {
            item.singleton()
        } else {
            item
        }
    }
}

#[derive(Debug, Deserialize)]
struct StationDto {
    name: String,
    system_id: i64,
}

#[derive(Debug, Deserialize)]
struct StructureDto {
    name: String,
    solar_system_id: i64,
}

#[derive(Debug, Deserialize)]
struct SystemDto {
    name: String,
    security_status: f64,
    constellation_id: i64,
}

#[derive(Debug, Deserialize)]
struct ConstellationDto {
    region_id: i64,
}

#[derive(Debug, Deserialize)]
struct RegionDto {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TypeDto {
    name: String,
    group_id: i64,
}

#[derive(Debug, Deserialize)]
struct GroupDto {
    category_id: i64,
}

/// Drop records stored under excluded location flags.
fn filter_assets(assets: Vec<AssetDto>, excluded: &[String]) -> Vec<InventoryItem> {
    assets
        .into_iter()
        .filter(|asset| !excluded.iter().any(|flag| *flag == asset.location_flag))
        .map(AssetDto::into_item)
        .collect()
}

fn page_count(headers: &HeaderMap) -> u32 {
    headers
        .get("x-pages")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(1)
}

/// Authenticated ESI client.
pub struct EsiClient {
    http: HttpClient,
    base_url: String,
    inventory: InventoryConfig,
    /// Location ids above this are player structures.
    npc_station_max_id: i64,
    retry: RetryConfig,
}

impl EsiClient {
    /// Build a client that authenticates with `access_token`.
    pub fn new(
        base_url: &str,
        access_token: &str,
        inventory: InventoryConfig,
        npc_station_max_id: i64,
        http: &HttpConfig,
        retry: RetryConfig,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {access_token}")).map_err(|e| {
            ConfigError::InvalidValue {
                field: "ESI_ACCESS_TOKEN",
                reason: e.to_string(),
            }
        })?;
        headers.insert(AUTHORIZATION, bearer);

        Ok(Self {
            http: build_client(http, headers)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            inventory,
            npc_station_max_id,
            retry,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let http = &self.http;
        with_retry(&self.retry, path, || {
            let url = url.clone();
            async move {
                let response = check_status(http.get(url).send().await?)?;
                Ok::<T, Error>(response.json::<T>().await?)
            }
        })
        .await
    }

    /// Verify the API is up before a snapshot is taken.
    pub async fn ping(&self) -> Result<()> {
        let url = self.url("/v2/status/");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::SourceUnavailable(e.to_string()))?;
        check_status(response)
            .map(drop)
            .map_err(|e| Error::SourceUnavailable(e.to_string()))
    }

    fn assets_path(&self) -> String {
        format!("/v5/corporations/{}/assets/", self.inventory.corporation_id)
    }

    async fn fetch_page_count(&self) -> Result<u32> {
        let url = self.url(&self.assets_path());
        let http = &self.http;
        with_retry(&self.retry, "assets head", || {
            let url = url.clone();
            async move {
                let response = check_status(http.head(url).send().await?)?;
                Ok::<u32, Error>(page_count(response.headers()))
            }
        })
        .await
    }

    async fn fetch_page(&self, page: u32) -> Result<Vec<AssetDto>> {
        let assets: Vec<AssetDto> = self
            .get_json(&format!("{}?page={page}", self.assets_path()))
            .await?;
        debug!(page, records = assets.len(), "Fetched asset page");
        Ok(assets)
    }

    async fn fetch_snapshot(&self) -> Result<Vec<InventoryItem>> {
        self.ping().await?;
        let pages = self.fetch_page_count().await?;
        let fetched = try_join_all((1..=pages).map(|page| self.fetch_page(page))).await?;
        let assets: Vec<AssetDto> = fetched.into_iter().flatten().collect();
        let raw = assets.len();
        let items = filter_assets(assets, &self.inventory.excluded_flags);
        info!(pages, raw, kept = items.len(), "Fetched inventory snapshot");
        Ok(items)
    }
}

#[async_trait]
impl InventorySource for EsiClient {
    async fn fetch_all_items(&self) -> Result<Vec<InventoryItem>> {
        self.fetch_snapshot().await.map_err(|err| match err {
            Error::SourceUnavailable(_) => err,
            other => Error::SourceUnavailable(other.to_string()),
        })
    }
}

#[async_trait]
impl CatalogOracle for EsiClient {
    async fn lookup_location(&self, station_id: StationId) -> Result<LocationInfo> {
        let id = station_id.get();
        let (station_name, system_id) = if id > self.npc_station_max_id {
            let structure: StructureDto = self
                .get_json(&format!("/v2/universe/structures/{id}/"))
                .await?;
            (structure.name, structure.solar_system_id)
        } else {
            let station: StationDto = self
                .get_json(&format!("/v2/universe/stations/{id}/"))
                .await?;
            (station.name, station.system_id)
        };

        let system: SystemDto = self
            .get_json(&format!("/v4/universe/systems/{system_id}/"))
            .await?;
        let constellation: ConstellationDto = self
            .get_json(&format!(
                "/v1/universe/constellations/{}/",
                system.constellation_id
            ))
            .await?;
        let region: RegionDto = self
            .get_json(&format!("/v1/universe/regions/{}/", constellation.region_id))
            .await?;

        Ok(LocationInfo {
            station_id,
            system_id: SystemId::new(system_id),
            station_name,
            system_name: system.name,
            region_name: region.name,
            security_status: system.security_status,
        })
    }

    async fn lookup_item_type(&self, type_id: TypeId) -> Result<ItemTypeInfo> {
        let item_type: TypeDto = self
            .get_json(&format!("/v3/universe/types/{type_id}/"))
            .await?;
        let group: GroupDto = self
            .get_json(&format!("/v1/universe/groups/{}/", item_type.group_id))
            .await?;
        Ok(ItemTypeInfo {
            type_id,
            name: item_type.name,
            is_ship: group.category_id == SHIP_CATEGORY_ID,
        })
    }
}
