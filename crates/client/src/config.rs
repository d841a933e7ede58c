use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/receipts.toml";
const ENV_PREFIX: &str = "RECEIPTS";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Demo-mode toggle. `"1"` and `"true"` (any case) enable it; anything
    /// else leaves remote mode on.
    pub demo_mode: String,
    /// Base URL of the remote service (e.g. http://127.0.0.1:8000). Required
    /// unless demo mode is enabled.
    pub base_url: String,
    /// Path of the durable local slot.
    pub state_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            demo_mode: String::new(),
            base_url: String::new(),
            state_path: engine::default_state_path().to_string(),
        }
    }
}

impl AppConfig {
    pub fn demo_enabled(&self) -> bool {
        matches!(self.demo_mode.trim().to_lowercase().as_str(), "1" | "true")
    }
}

/// Loads configuration from the default file location layered with
/// `RECEIPTS_`-prefixed environment variables.
pub fn load() -> Result<AppConfig> {
    load_from(DEFAULT_CONFIG_PATH)
}

pub fn load_from(config_path: &str) -> Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(config_path).required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX))
        .build()?
        .try_deserialize()?;
    Ok(settings)
}
