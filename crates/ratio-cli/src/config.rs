use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use ratio_analysis::{ExtractionConfig, InventorySource};
use yahoo_finance_client::{ClientConfig, Credentials, DEFAULT_BASE_URL};

#[derive(Debug, Clone)]
pub struct CliConfig {
    // RapidAPI
    pub keys_file: Option<PathBuf>,    // RAPIDAPI_KEYS_FILE, wins over RAPIDAPI_KEY/HOST
    pub base_url: String,              // YAHOO_FINANCE_BASE_URL
    pub timeout_secs: u64,             // YAHOO_FINANCE_TIMEOUT_SECS

    // Pipeline
    pub inventory_source: InventorySource, // RATIO_INVENTORY_SOURCE
    pub default_region: String,            // DEFAULT_REGION
}

impl CliConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config = Self {
            keys_file: var("RAPIDAPI_KEYS_FILE").map(PathBuf::from),
            base_url: var("YAHOO_FINANCE_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout_secs: var("YAHOO_FINANCE_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .parse()
                .context("YAHOO_FINANCE_TIMEOUT_SECS must be a whole number of seconds")?,
            inventory_source: var("RATIO_INVENTORY_SOURCE")
                .unwrap_or_else(|| "inventory".to_string())
                .parse()
                .map_err(|e: String| anyhow!(e))?,
            default_region: var("DEFAULT_REGION").unwrap_or_else(|| "US".to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(anyhow!("YAHOO_FINANCE_TIMEOUT_SECS must be greater than zero"));
        }
        if self.default_region.trim().is_empty() {
            return Err(anyhow!("DEFAULT_REGION must not be empty"));
        }
        Ok(())
    }

    pub fn credentials(&self) -> Result<Credentials> {
        match &self.keys_file {
            Some(path) => Credentials::from_file(path)
                .with_context(|| format!("Failed to read RapidAPI keys from {}", path.display())),
            None => Credentials::from_env().context("RapidAPI credentials not configured"),
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    pub fn extraction_config(&self) -> ExtractionConfig {
        ExtractionConfig {
            inventory_source: self.inventory_source,
        }
    }
}
