//! Browsable roster lists: single Pokemon, dex ranges, generations and game titles.

use super::pokeapi::{ApiPokedex, ApiPokemon, ApiSpecies, ResourceList};
use super::PokemonGateway;
use crate::cache::{game_listing_key, generation_listing_key};
use crate::errors::GatewayResult;
use crate::forms::is_form_available;
use futures::future::join_all;
use schema::{FormName, GameTitle, Generation, PokemonSummary};
use std::collections::HashSet;
use std::ops::RangeInclusive;

/// Summaries gathered by a fan-out, plus how many lookups failed along the way.
struct Batch {
    summaries: Vec<PokemonSummary>,
    dropped: usize,
}

impl PokemonGateway {
    /// Fetch one Pokemon by national id or API name.
    pub async fn pokemon(&self, id_or_name: &str) -> GatewayResult<PokemonSummary> {
        let key = id_or_name.trim().to_lowercase();
        let url = self.pokeapi_url(&format!("pokemon/{}", key));
        let pokemon: ApiPokemon = self.fetch_json(&url).await?;
        pokemon.to_summary()
    }

    /// Resolve every key concurrently. Items that fail are logged, counted and left out.
    async fn summaries(&self, keys: Vec<String>) -> Batch {
        let results = join_all(keys.iter().map(|key| self.pokemon(key))).await;

        let mut batch = Batch {
            summaries: Vec::with_capacity(keys.len()),
            dropped: 0,
        };
        for (key, result) in keys.iter().zip(results) {
            match result {
                Ok(summary) => batch.summaries.push(summary),
                Err(err) => {
                    log::warn!("dropping {} from the list: {}", key, err);
                    batch.dropped += 1;
                }
            }
        }
        batch
    }

    /// Every Pokemon whose national id falls in `range`, in dex order.
    pub async fn list_by_range(
        &self,
        range: RangeInclusive<u32>,
    ) -> GatewayResult<Vec<PokemonSummary>> {
        Ok(self.range_batch(range).await?.summaries)
    }

    async fn range_batch(&self, range: RangeInclusive<u32>) -> GatewayResult<Batch> {
        let (start, end) = (*range.start(), *range.end());
        if end < start || start == 0 {
            return Ok(Batch {
                summaries: Vec::new(),
                dropped: 0,
            });
        }

        let url = self.pokeapi_url(&format!(
            "pokemon?limit={}&offset={}",
            end - start + 1,
            start - 1
        ));
        let page: ResourceList = self.fetch_json(&url).await?;

        let keys = page
            .results
            .iter()
            .map(|entry| match entry.id() {
                Some(id) => id.to_string(),
                None => entry.name.clone(),
            })
            .collect();
        Ok(self.summaries(keys).await)
    }

    /// The roster introduced in `generation`, served from the listing cache when fresh.
    pub async fn list_generation(
        &self,
        generation: Generation,
    ) -> GatewayResult<Vec<PokemonSummary>> {
        let key = generation_listing_key(generation.number());
        if let Some(cached) = self.cache.read(&key, self.config.listing_ttl()) {
            return Ok(cached);
        }

        let batch = self.range_batch(generation.dex_range()).await?;
        log::info!("loaded {} Pokemon for {}", batch.summaries.len(), generation);
        self.store_listing(&key, &batch);
        Ok(batch.summaries)
    }

    /// The roster of a game title: the species of its regional dexes, plus the alternate forms
    /// available in that title for the titles that have them.
    pub async fn list_game(&self, game: GameTitle) -> GatewayResult<Vec<PokemonSummary>> {
        let key = game_listing_key(game.slug());
        if let Some(cached) = self.cache.read(&key, self.config.listing_ttl()) {
            return Ok(cached);
        }

        let species_ids = self.game_species(game).await?;
        let (keys, missing_varieties) = if game.requires_varieties() {
            self.available_varieties(game, &species_ids).await
        } else {
            (species_ids.iter().map(u32::to_string).collect(), 0)
        };

        let mut batch = self.summaries(keys).await;
        batch.dropped += missing_varieties;
        let mut seen = HashSet::new();
        batch.summaries.retain(|summary| seen.insert(summary.id));

        log::info!("loaded {} Pokemon for {}", batch.summaries.len(), game);
        self.store_listing(&key, &batch);
        Ok(batch.summaries)
    }

    /// Species ids across all of the title's regional dexes, first appearance wins.
    async fn game_species(&self, game: GameTitle) -> GatewayResult<Vec<u32>> {
        let mut seen = HashSet::new();
        let mut species_ids = Vec::new();

        for pokedex_name in game.pokedexes() {
            let url = self.pokeapi_url(&format!("pokedex/{}", pokedex_name));
            let pokedex: ApiPokedex = self.fetch_json(&url).await?;
            for entry in &pokedex.pokemon_entries {
                if let Some(id) = entry.pokemon_species.id() {
                    if seen.insert(id) {
                        species_ids.push(id);
                    }
                }
            }
        }
        Ok(species_ids)
    }

    /// Pokemon ids (as lookup keys) of every variety of `species_ids` available in `game`.
    /// A species whose variety list cannot be fetched falls back to its default Pokemon and is
    /// counted in the returned total.
    async fn available_varieties(
        &self,
        game: GameTitle,
        species_ids: &[u32],
    ) -> (Vec<String>, usize) {
        let lookups = species_ids.iter().map(|&id| async move {
            let url = self.pokeapi_url(&format!("pokemon-species/{}/", id));
            (id, self.fetch_json::<ApiSpecies>(&url).await)
        });

        let mut keys = Vec::new();
        let mut missing = 0;
        for (id, result) in join_all(lookups).await {
            let species = match result {
                Ok(species) => species,
                Err(err) => {
                    log::warn!("no variety list for species {}: {}", id, err);
                    keys.push(id.to_string());
                    missing += 1;
                    continue;
                }
            };

            for variety in &species.varieties {
                let form = FormName::for_species(&species.name, &variety.pokemon.name);
                if variety.is_default || is_form_available(&form, game) {
                    keys.push(match variety.pokemon.id() {
                        Some(pokemon_id) => pokemon_id.to_string(),
                        None => variety.pokemon.name.clone(),
                    });
                }
            }
        }
        (keys, missing)
    }

    /// Only complete listings are cached; a degraded one is served once and refetched next time.
    fn store_listing(&self, key: &str, batch: &Batch) {
        if batch.dropped > 0 || batch.summaries.is_empty() {
            log::warn!(
                "not caching {}: {} lookups failed, {} entries loaded",
                key,
                batch.dropped,
                batch.summaries.len()
            );
            return;
        }
        if let Err(err) = self.cache.write(key, batch.summaries.as_slice()) {
            log::warn!("could not cache {}: {}", key, err);
        }
    }
}
