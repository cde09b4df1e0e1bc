//! # Application configuration — `proximity.toml`
//!
//! Tunables shared by the server and the client. The server reads the file
//! named by `PROXIMITY_CONFIG` (falling back to [`ProximityConfig::filename`]
//! in the working directory); the client uses the defaults.
//!
//! ## Structure
//!
//! ```toml
//! [session]
//! ttl_minutes = 30          # sliding session lifetime
//!
//! [nearby]
//! radius_meters = 10000     # users-near search radius
//!
//! [map]
//! default_zoom = 1
//! tile_url = "https://tile.openstreetmap.org/{z}/{x}/{y}.png"
//! ```
//!
//! Every field has a serde default, so a missing or empty file is equivalent
//! to [`ProximityConfig::default`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `proximity.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProximityConfig {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub nearby: NearbyConfig,
    #[serde(default)]
    pub map: MapConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NearbyConfig {
    /// Maximum distance for a user to count as near.
    #[serde(default = "default_radius_meters")]
    pub radius_meters: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_zoom")]
    pub default_zoom: u8,
    /// Slippy-map tile template.
    #[serde(default = "default_tile_url")]
    pub tile_url: String,
}

fn default_ttl_minutes() -> u64 {
    30
}

fn default_radius_meters() -> f64 {
    10_000.0
}

fn default_zoom() -> u8 {
    1
}

fn default_tile_url() -> String {
    "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_ttl_minutes(),
        }
    }
}

impl Default for NearbyConfig {
    fn default() -> Self {
        Self {
            radius_meters: default_radius_meters(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_zoom: default_zoom(),
            tile_url: default_tile_url(),
        }
    }
}

impl SessionConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_minutes * 60)
    }
}

impl ProximityConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "proximity.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = ProximityConfig::from_toml("").unwrap();
        assert_eq!(config, ProximityConfig::default());
        assert_eq!(config.session.ttl(), Duration::from_secs(1800));
        assert_eq!(config.nearby.radius_meters, 10_000.0);
        assert_eq!(config.map.default_zoom, 1);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = ProximityConfig::from_toml("[nearby]\nradius_meters = 1000.0\n").unwrap();
        assert_eq!(config.nearby.radius_meters, 1000.0);
        assert_eq!(config.session.ttl_minutes, 30);
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = ProximityConfig::default();
        config.nearby.radius_meters = 2500.0;
        let text = config.to_toml().unwrap();
        assert_eq!(ProximityConfig::from_toml(&text).unwrap(), config);
    }
}
