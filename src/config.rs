//! Application settings, read from a RON file.
//!
//! ```ron
//! (
//!     pokeapi_base_url: "https://pokeapi.co/api/v2",
//!     data_dir: "~/.local/share/champion-dex",
//!     listing_ttl_days: 30,
//! )
//! ```
//!
//! Every field is optional; missing fields fall back to [`AppConfig::default`].

use crate::errors::ConfigError;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "champion-dex.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root of the general Pokemon data API.
    pub pokeapi_base_url: String,
    /// Directory holding the battle-reference JSON documents.
    pub showdown_base_url: String,
    /// Where the persisted key-value store lives.
    pub data_dir: PathBuf,
    /// Validity window for generation and game-title listings.
    pub listing_ttl_days: i64,
    /// Validity window for the battle-reference datasets.
    pub battle_data_ttl_days: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pokeapi_base_url: "https://pokeapi.co/api/v2".to_string(),
            showdown_base_url: "https://play.pokemonshowdown.com/data".to_string(),
            data_dir: PathBuf::from(".champion-dex"),
            listing_ttl_days: 30,
            battle_data_ttl_days: 7,
        }
    }
}

impl AppConfig {
    pub fn from_ron_str(text: &str, origin: &str) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    /// Load settings from `path`. A missing file is not an error: defaults are used instead.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron_str(&text, &path.display().to_string())
    }

    pub fn listing_ttl(&self) -> Duration {
        Duration::days(self.listing_ttl_days)
    }

    pub fn battle_data_ttl(&self) -> Duration {
        Duration::days(self.battle_data_ttl_days)
    }
}
