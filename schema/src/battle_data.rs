//! Records from the battle-reference datasets (moves, learnsets, abilities, items, pokedex).
//!
//! Only the fields the team builder reads are modelled; everything else in the documents is
//! ignored during deserialization.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Move accuracy: either a percentage or `true` for moves that never miss.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Accuracy {
    Percent(f32),
    AlwaysHits(bool),
}

impl Default for Accuracy {
    fn default() -> Self {
        Accuracy::AlwaysHits(true)
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accuracy::Percent(value) => write!(f, "{}%", value),
            Accuracy::AlwaysHits(_) => write!(f, "--"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRecord {
    #[serde(default)]
    pub num: i32,
    pub name: String,
    #[serde(default)]
    pub accuracy: Accuracy,
    #[serde(default)]
    pub base_power: u16,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub pp: u8,
    #[serde(default)]
    pub priority: i8,
    #[serde(rename = "type", default)]
    pub move_type: String,
    #[serde(default)]
    pub short_desc: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnsetRecord {
    /// Move id → learn sources (e.g. `"9M"`, `"8L1"`).
    #[serde(default)]
    pub learnset: Option<HashMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityRecord {
    #[serde(default)]
    pub num: i32,
    pub name: String,
    #[serde(default)]
    pub short_desc: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
}

impl AbilityRecord {
    pub fn description(&self) -> &str {
        self.short_desc
            .as_deref()
            .or(self.desc.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    #[serde(default)]
    pub num: i32,
    pub name: String,
    #[serde(default)]
    pub short_desc: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
}

impl ItemRecord {
    pub fn description(&self) -> &str {
        self.short_desc
            .as_deref()
            .or(self.desc.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowdownStats {
    pub hp: u8,
    pub atk: u8,
    pub def: u8,
    pub spa: u8,
    pub spd: u8,
    pub spe: u8,
}

/// Ability slots as keyed in the pokedex document: `"0"`, `"1"`, `"H"` (hidden), `"S"` (special).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySlots {
    #[serde(rename = "0", default)]
    pub primary: Option<String>,
    #[serde(rename = "1", default)]
    pub secondary: Option<String>,
    #[serde(rename = "H", default)]
    pub hidden: Option<String>,
    #[serde(rename = "S", default)]
    pub special: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokedexRecord {
    #[serde(default)]
    pub num: i32,
    pub name: String,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub base_stats: ShowdownStats,
    #[serde(default)]
    pub abilities: AbilitySlots,
    #[serde(default)]
    pub weightkg: f32,
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub prevo: Option<String>,
    #[serde(default)]
    pub evos: Vec<String>,
}
