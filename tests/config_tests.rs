use std::fs;

use couriers::config::Config;
use couriers::error::{ConfigError, Error};
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn full_config_file_loads() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_config(
        &dir,
        r#"
[logging]
level = "debug"
format = "json"

[inventory]
corporation_id = 98000001
excluded_flags = ["Unlocked", "AssetSafety"]

[grouping]
min_station_id = 60000000
ignored_stations = [60003760]

[classifier]
min_security = 0.5
primary_hub_system = "Amarr"
primary_hub_station = "Amarr VIII (Oris) - Emperor Family Academy"

[classifier.thresholds]
high_count_items = 750
fee_per_jump = 1200000.0

[classifier.providers]
public = "Public Contract"

[[hubs]]
label = "Amarr VIII (Oris) - Emperor Family Academy"
system_name = "Amarr"
system_id = 30002187
station_id = 60008494

[[hubs]]
label = "Jita IV - Moon 4 - Caldari Navy Assembly Plant"
system_name = "Jita"
system_id = 30000142
station_id = 60003760

[cache]
valuation_ttl_secs = 3600

[retry]
max_retries = 5
initial_delay_ms = 100

[endpoints]
esi = "http://localhost:8080"
"#,
    );

    let config = Config::load(&path).unwrap();

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.inventory.corporation_id, 98_000_001);
    assert_eq!(config.inventory.excluded_flags.len(), 2);
    assert_eq!(config.grouping.ignored_stations, vec![60_003_760]);
    assert_eq!(config.classifier.primary_hub_system, "Amarr");
    assert_eq!(config.classifier.thresholds.high_count_items, 750);
    assert_eq!(config.classifier.thresholds.fee_per_jump, 1_200_000.0);
    assert_eq!(config.classifier.providers.public, "Public Contract");
    assert_eq!(config.classifier.providers.express, "Push Industries");
    assert_eq!(config.hubs.len(), 2);
    assert_eq!(config.cache.valuation_ttl_secs, 3_600);
    assert_eq!(config.cache.result_ttl_secs, 86_400);
    assert_eq!(config.retry.max_retries, 5);
    assert_eq!(config.retry.backoff_multiplier, 2.0);
    assert_eq!(config.endpoints.esi, "http://localhost:8080");
    assert_eq!(config.endpoints.janice_public, "https://janice.e-351.com");
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result = Config::load(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_config(&dir, "[logging\nlevel = ");
    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}

#[test]
fn empty_hub_list_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_config(&dir, "hubs = []\n");
    match Config::load(&path) {
        Err(Error::Config(ConfigError::MissingField { field: "hubs" })) => {}
        Err(err) => panic!("expected missing hubs, got {err}"),
        Ok(config) => panic!("expected rejection, got {} hubs", config.hubs.len()),
    }
}

#[test]
fn inverted_freighter_band_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_config(
        &dir,
        "[classifier.thresholds]\nfreighter_min_sell = 2000000000.0\n",
    );
    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::InvalidValue {
            field: "thresholds.freighter_min_sell",
            ..
        }))
    ));
}
