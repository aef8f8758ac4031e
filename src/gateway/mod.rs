//! Remote data gateway: fetches Pokemon data and battle-reference datasets, normalizes them
//! into schema records and caches them in two tiers.
//!
//! Tier 1 lives in this struct for the lifetime of the process (raw response bodies keyed by
//! URL, decoded battle datasets). Tier 2 is the persisted [`CacheStore`] with per-dataset
//! validity windows.

pub mod detail;
pub mod listing;
pub mod pokeapi;
pub mod showdown;
pub mod transport;

use crate::cache::{CacheStore, ClearScope, LISTING_PREFIX};
use crate::config::AppConfig;
use crate::errors::{GatewayError, GatewayResult, StorageResult};
use serde::de::DeserializeOwned;
use showdown::BattleDataCache;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use transport::HttpTransport;

pub use showdown::{AbilityOption, HeldItem, LegalMove};

pub struct PokemonGateway {
    transport: Arc<dyn HttpTransport>,
    cache: Arc<CacheStore>,
    config: AppConfig,
    responses: Mutex<HashMap<String, Arc<str>>>,
    battle_data: BattleDataCache,
}

impl PokemonGateway {
    pub fn new(transport: Arc<dyn HttpTransport>, cache: Arc<CacheStore>, config: AppConfig) -> Self {
        Self {
            transport,
            cache,
            config,
            responses: Mutex::new(HashMap::new()),
            battle_data: BattleDataCache::default(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn pokeapi_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.pokeapi_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn showdown_url(&self, file: &str) -> String {
        format!(
            "{}/{}",
            self.config.showdown_base_url.trim_end_matches('/'),
            file
        )
    }

    /// GET `url` and decode it, reusing a body already fetched during this session.
    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> GatewayResult<T> {
        let cached = self
            .responses
            .lock()
            .ok()
            .and_then(|responses| responses.get(url).cloned());

        let body = match cached {
            Some(body) => body,
            None => {
                let body: Arc<str> = self.transport.get_text(url).await?.into();
                if let Ok(mut responses) = self.responses.lock() {
                    responses.insert(url.to_string(), body.clone());
                }
                body
            }
        };

        serde_json::from_str(&body).map_err(|source| GatewayError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// Forget every response fetched during this session.
    pub fn clear_session(&self) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.clear();
        }
    }

    /// Drop persisted generation/game listings so the next browse refetches them.
    pub fn clear_listings(&self) -> StorageResult<usize> {
        self.clear_session();
        self.cache.clear(ClearScope::Prefix(LISTING_PREFIX))
    }
}
