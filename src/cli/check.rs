//! Handler for the `check-config` command.

use std::path::Path;

use crate::cli::output;
use crate::config::Config;
use crate::error::Result;

/// Validate a configuration file without running.
#[allow(clippy::result_large_err)]
pub fn execute<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    println!("Checking configuration: {}", path.display());

    let config = Config::load(path)?;
    output::ok("Configuration file is valid");

    output::section("Summary");
    output::key_value("Corporation", config.inventory.corporation_id);
    output::key_value(
        "Hubs",
        config
            .hubs
            .iter()
            .map(|h| h.system_name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    );
    output::key_value("Primary hub", &config.classifier.primary_hub_system);
    output::key_value("Min security", config.classifier.min_security);
    output::key_value("Retries", config.retry.max_retries);
    println!();

    let mut ready = true;
    if config.secrets.esi_access_token().is_ok() {
        output::ok("ESI_ACCESS_TOKEN found");
    } else {
        output::warn("ESI_ACCESS_TOKEN is not set");
        ready = false;
    }
    if config.secrets.janice_api_key().is_ok() {
        output::ok("JANICE_API_KEY found");
    } else {
        output::warn("JANICE_API_KEY is not set");
        ready = false;
    }

    println!();
    if ready {
        println!("Configuration is ready to use.");
    } else {
        println!("Set the missing environment variables before running.");
    }
    Ok(())
}
