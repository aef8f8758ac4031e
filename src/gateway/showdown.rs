//! Battle-reference datasets (moves, learnsets, pokedex, items, abilities).
//!
//! Each dataset is one JSON document keyed by battle-reference id. Documents are loaded whole,
//! kept decoded in memory for the session and persisted for a week.

use super::PokemonGateway;
use crate::cache::{
    ClearScope, SHOWDOWN_ABILITIES_KEY, SHOWDOWN_ITEMS_KEY, SHOWDOWN_KEYS,
    SHOWDOWN_LEARNSETS_KEY, SHOWDOWN_MOVES_KEY, SHOWDOWN_POKEDEX_KEY,
};
use crate::errors::{GatewayResult, StorageResult};
use crate::moveset::{NO_ITEM, POPULAR_ITEMS};
use schema::{
    format_display_name, to_showdown_id, AbilityRecord, ItemRecord, LearnsetRecord, MoveRecord,
    PokedexRecord,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

pub type Table<T> = Arc<HashMap<String, T>>;

type Slot<T> = RwLock<Option<Table<T>>>;

/// Decoded datasets held for the lifetime of the gateway.
#[derive(Default)]
pub struct BattleDataCache {
    moves: Slot<MoveRecord>,
    learnsets: Slot<LearnsetRecord>,
    pokedex: Slot<PokedexRecord>,
    items: Slot<ItemRecord>,
    abilities: Slot<AbilityRecord>,
}

fn take<T>(slot: &Slot<T>) -> Option<Table<T>> {
    slot.read().ok().and_then(|table| table.clone())
}

fn fill<T>(slot: &Slot<T>, table: Table<T>) {
    if let Ok(mut current) = slot.write() {
        *current = Some(table);
    }
}

fn empty<T>(slot: &Slot<T>) {
    if let Ok(mut current) = slot.write() {
        *current = None;
    }
}

impl BattleDataCache {
    fn clear(&self) {
        empty(&self.moves);
        empty(&self.learnsets);
        empty(&self.pokedex);
        empty(&self.items);
        empty(&self.abilities);
    }
}

/// A move a Pokemon can legally learn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalMove {
    pub id: String,
    pub display_name: String,
    pub record: MoveRecord,
}

/// One of a Pokemon's ability slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityOption {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub is_hidden: bool,
}

/// An entry of the held-item picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldItem {
    pub name: String,
    /// Empty for items the reference data does not know.
    pub description: String,
}

impl PokemonGateway {
    /// Tier 1, then tier 2, then the network. A freshly downloaded document is persisted.
    async fn dataset<T>(&self, slot: &Slot<T>, key: &str, file: &str) -> GatewayResult<Table<T>>
    where
        T: DeserializeOwned + Serialize,
    {
        if let Some(table) = take(slot) {
            return Ok(table);
        }

        let table = match self
            .cache
            .read::<HashMap<String, T>>(key, self.config.battle_data_ttl())
        {
            Some(table) => Arc::new(table),
            None => {
                log::info!("downloading battle data: {}", file);
                let table: HashMap<String, T> = self.fetch_json(&self.showdown_url(file)).await?;
                if let Err(err) = self.cache.write(key, &table) {
                    log::warn!("could not cache {}: {}", key, err);
                }
                Arc::new(table)
            }
        };

        fill(slot, table.clone());
        Ok(table)
    }

    pub async fn moves(&self) -> GatewayResult<Table<MoveRecord>> {
        self.dataset(&self.battle_data.moves, SHOWDOWN_MOVES_KEY, "moves.json")
            .await
    }

    pub async fn learnsets(&self) -> GatewayResult<Table<LearnsetRecord>> {
        self.dataset(
            &self.battle_data.learnsets,
            SHOWDOWN_LEARNSETS_KEY,
            "learnsets.json",
        )
        .await
    }

    pub async fn pokedex(&self) -> GatewayResult<Table<PokedexRecord>> {
        self.dataset(&self.battle_data.pokedex, SHOWDOWN_POKEDEX_KEY, "pokedex.json")
            .await
    }

    pub async fn items(&self) -> GatewayResult<Table<ItemRecord>> {
        self.dataset(&self.battle_data.items, SHOWDOWN_ITEMS_KEY, "items.json")
            .await
    }

    pub async fn abilities(&self) -> GatewayResult<Table<AbilityRecord>> {
        self.dataset(
            &self.battle_data.abilities,
            SHOWDOWN_ABILITIES_KEY,
            "abilities.json",
        )
        .await
    }

    /// Moves in the Pokemon's learnset that the moves dataset knows about, sorted by display
    /// name. A Pokemon without a learnset has no legal moves.
    pub async fn legal_moves(&self, pokemon: &str) -> GatewayResult<Vec<LegalMove>> {
        let (learnsets, moves) = futures::try_join!(self.learnsets(), self.moves())?;

        let learnset = match learnsets
            .get(&to_showdown_id(pokemon))
            .and_then(|record| record.learnset.as_ref())
        {
            Some(learnset) => learnset,
            None => {
                log::warn!("no learnset found for {}", pokemon);
                return Ok(Vec::new());
            }
        };

        let mut legal: Vec<LegalMove> = learnset
            .keys()
            .filter_map(|id| {
                moves.get(id).map(|record| LegalMove {
                    id: id.clone(),
                    display_name: format_display_name(&record.name),
                    record: record.clone(),
                })
            })
            .collect();
        legal.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        Ok(legal)
    }

    /// Regular abilities first, then the hidden one labelled "(Hidden)".
    pub async fn pokemon_abilities(&self, pokemon: &str) -> GatewayResult<Vec<AbilityOption>> {
        let (pokedex, abilities) = futures::try_join!(self.pokedex(), self.abilities())?;

        let Some(record) = pokedex.get(&to_showdown_id(pokemon)) else {
            return Ok(Vec::new());
        };

        let slots = [
            (record.abilities.primary.as_ref(), false),
            (record.abilities.secondary.as_ref(), false),
            (record.abilities.hidden.as_ref(), true),
        ];

        Ok(slots
            .into_iter()
            .filter_map(|(name, is_hidden)| {
                let name = name?;
                let description = abilities
                    .get(&to_showdown_id(name))
                    .map(|ability| ability.description().to_string())
                    .unwrap_or_default();
                let mut display_name = format_display_name(name);
                if is_hidden {
                    display_name.push_str(" (Hidden)");
                }
                Some(AbilityOption {
                    name: name.clone(),
                    display_name,
                    description,
                    is_hidden,
                })
            })
            .collect())
    }

    pub async fn move_details(&self, name: &str) -> GatewayResult<Option<MoveRecord>> {
        Ok(self.moves().await?.get(&to_showdown_id(name)).cloned())
    }

    pub async fn showdown_species(&self, name: &str) -> GatewayResult<Option<PokedexRecord>> {
        Ok(self.pokedex().await?.get(&to_showdown_id(name)).cloned())
    }

    pub async fn item_details(&self, name: &str) -> GatewayResult<Option<ItemRecord>> {
        Ok(self.items().await?.get(&to_showdown_id(name)).cloned())
    }

    /// The curated picker items in picker order, described from the items dataset. The "None"
    /// entry has nothing to describe and is left out.
    pub async fn held_items(&self) -> GatewayResult<Vec<HeldItem>> {
        let items = self.items().await?;
        Ok(POPULAR_ITEMS
            .iter()
            .filter(|&&name| name != NO_ITEM)
            .map(|&name| HeldItem {
                name: name.to_string(),
                description: items
                    .get(&to_showdown_id(name))
                    .map(|item| item.description().to_string())
                    .unwrap_or_default(),
            })
            .collect())
    }

    /// Drop every battle dataset from both cache tiers.
    pub fn clear_battle_data(&self) -> StorageResult<usize> {
        self.battle_data.clear();
        self.clear_session();
        let removed = self.cache.clear(ClearScope::Keys(&SHOWDOWN_KEYS))?;
        log::info!("battle data cache cleared");
        Ok(removed)
    }
}
