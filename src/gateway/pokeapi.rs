//! Wire model of the general Pokemon data API and its conversion into schema records.
//!
//! Raw responses never leave this module: the gateway narrows them into
//! `PokemonSummary`/`PokemonDetail` records before handing anything back.

use crate::errors::{GatewayError, GatewayResult};
use schema::{BaseStats, EvolutionStep, MegaEvolution, PokemonSummary, PokemonType};
use serde::Deserialize;
use std::str::FromStr;

const SPRITE_ROOT: &str = "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

// --- Wire types ---

#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

impl NamedResource {
    pub fn id(&self) -> Option<u32> {
        resource_id(&self.url)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UrlResource {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceList {
    pub results: Vec<NamedResource>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtworkSet {
    pub front_default: Option<String>,
    pub front_shiny: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<ArtworkSet>,
    #[serde(default)]
    pub home: Option<ArtworkSet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiSprites {
    pub front_default: Option<String>,
    pub front_shiny: Option<String>,
    #[serde(default)]
    pub other: Option<OtherSprites>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub type_ref: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatEntry {
    pub base_stat: u16,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiPokemon {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub sprites: ApiSprites,
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    pub species: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Variety {
    pub is_default: bool,
    pub pokemon: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSpecies {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub evolution_chain: Option<UrlResource>,
    #[serde(default)]
    pub varieties: Vec<Variety>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChainLink {
    pub species: NamedResource,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiEvolutionChain {
    pub chain: ChainLink,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokedexEntry {
    pub entry_number: u32,
    pub pokemon_species: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiPokedex {
    pub pokemon_entries: Vec<PokedexEntry>,
}

// --- Normalization ---

/// Trailing numeric segment of a resource URL: `.../pokemon-species/25/` → 25.
pub fn resource_id(url: &str) -> Option<u32> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
}

pub fn official_artwork_url(id: u32) -> String {
    format!("{}/other/official-artwork/{}.png", SPRITE_ROOT, id)
}

pub fn default_sprite_url(id: u32, shiny: bool) -> String {
    if shiny {
        format!("{}/shiny/{}.png", SPRITE_ROOT, id)
    } else {
        format!("{}/{}.png", SPRITE_ROOT, id)
    }
}

/// Order in which artwork sources are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpritePolicy {
    /// Official artwork, then HOME render, then the small front sprite.
    HighestFidelity,
    /// HOME render first, so normal and shiny megas come from the same source.
    MegaForm,
}

impl ApiSprites {
    fn artwork(&self) -> Option<&ArtworkSet> {
        self.other.as_ref()?.official_artwork.as_ref()
    }

    fn home(&self) -> Option<&ArtworkSet> {
        self.other.as_ref()?.home.as_ref()
    }

    /// Pick the best available sprite; always returns a URL.
    pub fn select(&self, id: u32, shiny: bool, policy: SpritePolicy) -> String {
        let pick = |set: Option<&ArtworkSet>| -> Option<String> {
            let set = set?;
            if shiny {
                set.front_shiny.clone()
            } else {
                set.front_default.clone()
            }
        };
        let front = if shiny {
            self.front_shiny.clone()
        } else {
            self.front_default.clone()
        };

        let candidates = match policy {
            SpritePolicy::HighestFidelity => [pick(self.artwork()), pick(self.home()), front],
            SpritePolicy::MegaForm => [pick(self.home()), pick(self.artwork()), front],
        };

        candidates
            .into_iter()
            .flatten()
            .find(|url| !url.is_empty())
            .unwrap_or_else(|| default_sprite_url(id, shiny))
    }
}

impl ApiPokemon {
    /// Types in slot order.
    pub fn parsed_types(&self) -> GatewayResult<Vec<PokemonType>> {
        let mut slots = self.types.clone();
        slots.sort_by_key(|slot| slot.slot);
        slots
            .iter()
            .map(|slot| {
                PokemonType::from_str(&slot.type_ref.name).map_err(|_| {
                    GatewayError::MalformedData(format!(
                        "{} has unknown type '{}'",
                        self.name, slot.type_ref.name
                    ))
                })
            })
            .collect()
    }

    pub fn base_stats(&self) -> BaseStats {
        let stat = |name: &str| -> u8 {
            self.stats
                .iter()
                .find(|entry| entry.stat.name == name)
                .map(|entry| entry.base_stat.min(u16::from(u8::MAX)) as u8)
                .unwrap_or(0)
        };
        BaseStats {
            hp: stat("hp"),
            attack: stat("attack"),
            defense: stat("defense"),
            sp_attack: stat("special-attack"),
            sp_defense: stat("special-defense"),
            speed: stat("speed"),
        }
    }

    pub fn to_summary(&self) -> GatewayResult<PokemonSummary> {
        Ok(PokemonSummary {
            id: self.id,
            name: self.name.clone(),
            sprite: self
                .sprites
                .front_default
                .clone()
                .unwrap_or_else(|| default_sprite_url(self.id, false)),
            types: self.parsed_types()?,
        })
    }

    pub fn to_mega(&self) -> GatewayResult<MegaEvolution> {
        Ok(MegaEvolution {
            id: self.id,
            name: self.name.clone(),
            image: self.sprites.select(self.id, false, SpritePolicy::MegaForm),
            types: self.parsed_types()?,
        })
    }
}

// --- Evolution tree ---

/// A species and everything it can evolve into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvolutionNode {
    pub species_id: u32,
    pub name: String,
    pub evolves_to: Vec<EvolutionNode>,
}

impl EvolutionNode {
    pub fn from_link(link: &ChainLink) -> GatewayResult<EvolutionNode> {
        let species_id = link.species.id().ok_or_else(|| {
            GatewayError::MalformedData(format!("bad species url '{}'", link.species.url))
        })?;
        Ok(EvolutionNode {
            species_id,
            name: link.species.name.clone(),
            evolves_to: link
                .evolves_to
                .iter()
                .map(EvolutionNode::from_link)
                .collect::<GatewayResult<_>>()?,
        })
    }

    /// The line obtained by always taking the first listed evolution. Branching families
    /// (Eevee, Tyrogue, ...) therefore only show one path.
    pub fn primary_path(&self) -> Vec<EvolutionStep> {
        let mut steps = Vec::new();
        let mut current = Some(self);
        while let Some(node) = current {
            steps.push(EvolutionStep {
                id: node.species_id,
                name: node.name.clone(),
                image: official_artwork_url(node.species_id),
            });
            current = node.evolves_to.first();
        }
        steps
    }

    /// Number of species anywhere in the family, across all branches.
    pub fn species_count(&self) -> usize {
        1 + self
            .evolves_to
            .iter()
            .map(EvolutionNode::species_count)
            .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn eevee_chain() -> ApiEvolutionChain {
        serde_json::from_value(json!({
            "chain": {
                "species": {"name": "eevee", "url": "https://pokeapi.co/api/v2/pokemon-species/133/"},
                "evolves_to": [
                    {"species": {"name": "vaporeon", "url": "https://pokeapi.co/api/v2/pokemon-species/134/"}, "evolves_to": []},
                    {"species": {"name": "jolteon", "url": "https://pokeapi.co/api/v2/pokemon-species/135/"}, "evolves_to": []}
                ]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_resource_id() {
        assert_eq!(
            resource_id("https://pokeapi.co/api/v2/pokemon-species/25/"),
            Some(25)
        );
        assert_eq!(resource_id("https://pokeapi.co/api/v2/pokemon/25"), Some(25));
        assert_eq!(resource_id("https://pokeapi.co/api/v2/pokemon/"), None);
    }

    #[test]
    fn test_primary_path_follows_first_branch() {
        let tree = EvolutionNode::from_link(&eevee_chain().chain).unwrap();
        assert_eq!(tree.species_count(), 3);

        let path = tree.primary_path();
        let names: Vec<&str> = path.iter().map(|step| step.name.as_str()).collect();
        assert_eq!(names, vec!["eevee", "vaporeon"]);
        assert_eq!(path[1].image, official_artwork_url(134));
    }

    #[test]
    fn test_sprite_fallbacks() {
        let sprites: ApiSprites = serde_json::from_value(json!({
            "front_default": "front.png",
            "front_shiny": null,
            "other": {
                "official-artwork": {"front_default": "art.png", "front_shiny": null},
                "home": {"front_default": "home.png", "front_shiny": "home-shiny.png"}
            }
        }))
        .unwrap();

        assert_eq!(sprites.select(6, false, SpritePolicy::HighestFidelity), "art.png");
        assert_eq!(sprites.select(6, true, SpritePolicy::HighestFidelity), "home-shiny.png");
        assert_eq!(sprites.select(6, false, SpritePolicy::MegaForm), "home.png");

        let bare = ApiSprites::default();
        assert_eq!(
            bare.select(6, true, SpritePolicy::HighestFidelity),
            default_sprite_url(6, true)
        );
    }

    #[test]
    fn test_types_follow_slot_order_and_stats_map() {
        let pokemon: ApiPokemon = serde_json::from_value(json!({
            "id": 6,
            "name": "charizard",
            "sprites": {"front_default": "6.png"},
            "types": [
                {"slot": 2, "type": {"name": "flying", "url": "https://pokeapi.co/api/v2/type/3/"}},
                {"slot": 1, "type": {"name": "fire", "url": "https://pokeapi.co/api/v2/type/10/"}}
            ],
            "stats": [
                {"base_stat": 78, "stat": {"name": "hp", "url": ""}},
                {"base_stat": 109, "stat": {"name": "special-attack", "url": ""}},
                {"base_stat": 100, "stat": {"name": "speed", "url": ""}}
            ],
            "species": {"name": "charizard", "url": "https://pokeapi.co/api/v2/pokemon-species/6/"}
        }))
        .unwrap();

        let summary = pokemon.to_summary().unwrap();
        assert_eq!(summary.types, vec![PokemonType::Fire, PokemonType::Flying]);
        assert_eq!(summary.sprite, "6.png");

        let stats = pokemon.base_stats();
        assert_eq!(stats.hp, 78);
        assert_eq!(stats.sp_attack, 109);
        assert_eq!(stats.defense, 0);
    }
}
