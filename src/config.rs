//! Application configuration.
//!
//! Loaded from a TOML file; every section is optional and defaults to the
//! production values. Credentials come from the environment only.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

use crate::adapter::{HttpConfig, InventoryConfig, RetryConfig};
use crate::domain::{ClassifierConfig, GroupingConfig, Hub, StationId, SystemId};
use crate::error::{ConfigError, Result};

const ESI_TOKEN_ENV: &str = "ESI_ACCESS_TOKEN";
const JANICE_KEY_ENV: &str = "JANICE_API_KEY";

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `pretty` or `json`.
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Install the global subscriber. `RUST_LOG` overrides `level`.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

/// Lifetimes of stored values, in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_valuation_ttl_secs")]
    pub valuation_ttl_secs: u64,
    #[serde(default = "default_result_ttl_secs")]
    pub result_ttl_secs: u64,
    /// A completed run younger than this is not repeated.
    #[serde(default = "default_status_freshness_secs")]
    pub status_freshness_secs: u64,
}

const fn default_valuation_ttl_secs() -> u64 {
    7 * 24 * 3600
}

const fn default_result_ttl_secs() -> u64 {
    24 * 3600
}

const fn default_status_freshness_secs() -> u64 {
    3600
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            valuation_ttl_secs: default_valuation_ttl_secs(),
            result_ttl_secs: default_result_ttl_secs(),
            status_freshness_secs: default_status_freshness_secs(),
        }
    }
}

impl CacheConfig {
    #[must_use]
    pub fn valuation_ttl(&self) -> Duration {
        Duration::from_secs(self.valuation_ttl_secs)
    }

    #[must_use]
    pub fn result_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.result_ttl_secs as i64)
    }

    #[must_use]
    pub fn status_freshness(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.status_freshness_secs as i64)
    }
}

/// Base URLs of the external services.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EndpointsConfig {
    #[serde(default = "default_esi")]
    pub esi: String,
    #[serde(default = "default_janice_api")]
    pub janice_api: String,
    /// Site root appraisal links point at.
    #[serde(default = "default_janice_public")]
    pub janice_public: String,
    #[serde(default = "default_redfrog")]
    pub redfrog: String,
    #[serde(default = "default_mainland")]
    pub mainland: String,
}

fn default_esi() -> String {
    "https://esi.evetech.net".into()
}

fn default_janice_api() -> String {
    "https://janice.e-351.com/api/rest".into()
}

fn default_janice_public() -> String {
    "https://janice.e-351.com".into()
}

fn default_redfrog() -> String {
    "https://red-frog.org/api/public/v1/calculator/red/".into()
}

fn default_mainland() -> String {
    "https://bl8q6dawb3.execute-api.us-east-1.amazonaws.com/prod".into()
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            esi: default_esi(),
            janice_api: default_janice_api(),
            janice_public: default_janice_public(),
            redfrog: default_redfrog(),
            mainland: default_mainland(),
        }
    }
}

impl EndpointsConfig {
    fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("endpoints.esi", &self.esi),
            ("endpoints.janice_api", &self.janice_api),
            ("endpoints.janice_public", &self.janice_public),
            ("endpoints.redfrog", &self.redfrog),
            ("endpoints.mainland", &self.mainland),
        ]
    }
}

fn hub(label: &str, system_name: &str, system_id: i64, station_id: i64) -> Hub {
    Hub {
        label: label.into(),
        system_name: system_name.into(),
        system_id: SystemId::new(system_id),
        station_id: StationId::new(station_id),
    }
}

fn default_hubs() -> Vec<Hub> {
    vec![
        hub("Jita IV - Moon 4 - Caldari Navy Assembly Plant", "Jita", 30_000_142, 60_003_760),
        hub("Hek VIII - Moon 12 - Boundless Creation Factory", "Hek", 30_002_053, 60_005_686),
        hub("Rens VI - Moon 8 - Brutor Tribe Treasury", "Rens", 30_002_510, 60_004_588),
        hub("Amarr VIII (Oris) - Emperor Family Academy", "Amarr", 30_002_187, 60_008_494),
        hub("Dodixie IX - Moon 20 - Federation Navy Assembly Plant", "Dodixie", 30_002_659, 60_011_866),
    ]
}

/// Credentials read from the environment, never from the file.
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    pub esi_access_token: Option<String>,
    pub janice_api_key: Option<String>,
}

impl Secrets {
    fn from_env() -> Self {
        Self {
            esi_access_token: std::env::var(ESI_TOKEN_ENV).ok(),
            janice_api_key: std::env::var(JANICE_KEY_ENV).ok(),
        }
    }

    #[allow(clippy::result_large_err)]
    pub fn esi_access_token(&self) -> Result<&str> {
        self.esi_access_token
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnv { name: ESI_TOKEN_ENV }.into())
    }

    #[allow(clippy::result_large_err)]
    pub fn janice_api_key(&self) -> Result<&str> {
        self.janice_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnv { name: JANICE_KEY_ENV }.into())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub inventory: InventoryConfig,
    #[serde(default)]
    pub grouping: GroupingConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default = "default_hubs")]
    pub hubs: Vec<Hub>,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    #[serde(skip)]
    pub secrets: Secrets,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            inventory: InventoryConfig::default(),
            grouping: GroupingConfig::default(),
            classifier: ClassifierConfig::default(),
            hubs: default_hubs(),
            cache: CacheConfig::default(),
            retry: RetryConfig::default(),
            http: HttpConfig::default(),
            endpoints: EndpointsConfig::default(),
            secrets: Secrets::default(),
        }
    }
}

impl Config {
    /// Read, parse and validate `path`, then pick up credentials from the
    /// environment.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let mut config = Self::parse(&content)?;
        config.secrets = Secrets::from_env();
        Ok(config)
    }

    /// Parse and validate TOML without touching the environment.
    #[allow(clippy::result_large_err)]
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.hubs.is_empty() {
            return Err(ConfigError::MissingField { field: "hubs" }.into());
        }
        let primary = &self.classifier.primary_hub_system;
        if !self.hubs.iter().any(|h| &h.system_name == primary) {
            return Err(ConfigError::InvalidValue {
                field: "classifier.primary_hub_system",
                reason: format!("{primary} is not one of the configured hubs"),
            }
            .into());
        }
        if !(-1.0..=1.0).contains(&self.classifier.min_security) {
            return Err(ConfigError::InvalidValue {
                field: "classifier.min_security",
                reason: "must be within -1.0 and 1.0".into(),
            }
            .into());
        }
        self.validate_thresholds()?;
        for (field, value) in self.endpoints.entries() {
            Url::parse(value).map_err(|e| ConfigError::InvalidValue {
                field,
                reason: e.to_string(),
            })?;
        }
        if self.cache.valuation_ttl_secs == 0 || self.cache.result_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "cache",
                reason: "ttl must be positive".into(),
            }
            .into());
        }
        Ok(())
    }

    #[allow(clippy::result_large_err)]
    fn validate_thresholds(&self) -> Result<()> {
        let t = &self.classifier.thresholds;
        let amounts = [
            ("thresholds.min_collateral", t.min_collateral),
            ("thresholds.logistics_min_buy", t.logistics_min_buy),
            ("thresholds.small_volume_max", t.small_volume_max),
            ("thresholds.high_value_sell", t.high_value_sell),
            ("thresholds.freighter_capacity", t.freighter_capacity),
            ("thresholds.long_haul_min_volume", t.long_haul_min_volume),
            ("thresholds.long_haul_min_sell", t.long_haul_min_sell),
            ("thresholds.freighter_min_sell", t.freighter_min_sell),
            ("thresholds.freighter_max_sell", t.freighter_max_sell),
            ("thresholds.collateral_cap", t.collateral_cap),
            ("thresholds.fee_per_jump", t.fee_per_jump),
            ("thresholds.express_min_fee", t.express_min_fee),
            ("thresholds.max_fee_ratio", t.max_fee_ratio),
        ];
        for (field, value) in amounts {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("must be positive, got {value}"),
                }
                .into());
            }
        }
        if t.freighter_min_sell > t.freighter_max_sell {
            return Err(ConfigError::InvalidValue {
                field: "thresholds.freighter_min_sell",
                reason: "exceeds freighter_max_sell".into(),
            }
            .into());
        }
        Ok(())
    }

    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn empty_file_yields_production_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.hubs.len(), 5);
        assert_eq!(config.hubs[0].system_name, "Jita");
        assert_eq!(config.grouping.min_station_id, 60_000_000);
        assert_eq!(config.classifier.npc_station_max_id, 61_000_000);
        assert_eq!(config.classifier.thresholds.high_count_items, 500);
        assert_eq!(config.inventory.excluded_flags.len(), 5);
        assert_eq!(config.cache.valuation_ttl(), Duration::from_secs(604_800));
        assert_eq!(config.retry.max_retries, 3);
        assert!(config.secrets.esi_access_token.is_none());
    }

    #[test]
    fn sections_override_defaults() {
        let config = Config::parse(
            r#"
            [logging]
            format = "json"

            [classifier]
            min_security = 0.5

            [classifier.thresholds]
            high_count_items = 800

            [cache]
            result_ttl_secs = 60
            "#,
        )
        .unwrap();
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.classifier.min_security, 0.5);
        assert_eq!(config.classifier.thresholds.high_count_items, 800);
        assert_eq!(config.classifier.thresholds.min_collateral, 100_000_000.0);
        assert_eq!(config.cache.result_ttl(), chrono::Duration::seconds(60));
    }

    #[test]
    fn primary_hub_must_be_configured() {
        let err = Config::parse(
            r#"
            [[hubs]]
            label = "Amarr VIII (Oris) - Emperor Family Academy"
            system_name = "Amarr"
            system_id = 30002187
            station_id = 60008494
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "classifier.primary_hub_system",
                ..
            })
        ));
    }

    #[test]
    fn non_positive_threshold_is_rejected() {
        let err = Config::parse("[classifier.thresholds]\nfee_per_jump = 0.0\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "thresholds.fee_per_jump",
                ..
            })
        ));
    }

    #[test]
    fn malformed_endpoint_is_rejected() {
        let err = Config::parse("[endpoints]\nredfrog = \"not a url\"\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "endpoints.redfrog",
                ..
            })
        ));
    }

    #[test]
    fn missing_secrets_are_reported_by_name() {
        let secrets = Secrets::default();
        assert!(matches!(
            secrets.janice_api_key(),
            Err(Error::Config(ConfigError::MissingEnv { name: "JANICE_API_KEY" }))
        ));
    }
}
