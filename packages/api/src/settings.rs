//! Server-side configuration, read once from `proximity.toml`.

use std::sync::OnceLock;

use store::ProximityConfig;

static SETTINGS: OnceLock<ProximityConfig> = OnceLock::new();

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "PROXIMITY_CONFIG";

/// The loaded configuration. A missing file means defaults; an unreadable
/// one is logged and also means defaults.
pub fn settings() -> &'static ProximityConfig {
    SETTINGS.get_or_init(|| {
        dotenvy::dotenv().ok();
        let path = std::env::var(CONFIG_ENV)
            .unwrap_or_else(|_| ProximityConfig::filename().to_string());

        match std::fs::read_to_string(&path) {
            Ok(text) => ProximityConfig::from_toml(&text).unwrap_or_else(|e| {
                tracing::warn!(%path, "ignoring malformed config: {}", e);
                ProximityConfig::default()
            }),
            Err(_) => {
                tracing::debug!(%path, "no config file, using defaults");
                ProximityConfig::default()
            }
        }
    })
}
