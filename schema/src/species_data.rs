use crate::{FormName, PokemonType};
use serde::{Deserialize, Serialize};

/// One entry in a browsable roster list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub id: u32,
    pub name: String,
    pub sprite: String,
    pub types: Vec<PokemonType>,
}

impl PokemonSummary {
    pub fn primary_type(&self) -> Option<PokemonType> {
        self.types.first().copied()
    }

    pub fn form(&self) -> FormName {
        FormName::parse(&self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseStats {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub sp_attack: u8,
    pub sp_defense: u8,
    pub speed: u8,
}

impl BaseStats {
    pub fn total(&self) -> u16 {
        [
            self.hp,
            self.attack,
            self.defense,
            self.sp_attack,
            self.sp_defense,
            self.speed,
        ]
        .iter()
        .map(|&stat| u16::from(stat))
        .sum()
    }
}

/// One stage of an evolution line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionStep {
    pub id: u32,
    pub name: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MegaEvolution {
    pub id: u32,
    pub name: String,
    pub image: String,
    pub types: Vec<PokemonType>,
}

/// A variety listed for the species (regional form, forme change, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormVariant {
    pub name: String,
    pub label: String,
    pub is_default: bool,
}

/// Everything the detail view shows for one Pokemon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    pub sprite: String,
    pub normal_artwork: String,
    pub shiny_artwork: String,
    pub types: Vec<PokemonType>,
    pub base_stats: BaseStats,
    pub evolutions: Vec<EvolutionStep>,
    pub mega_evolutions: Vec<MegaEvolution>,
    pub forms: Vec<FormVariant>,
}

impl PokemonDetail {
    pub fn summary(&self) -> PokemonSummary {
        PokemonSummary {
            id: self.id,
            name: self.name.clone(),
            sprite: self.sprite.clone(),
            types: self.types.clone(),
        }
    }
}
