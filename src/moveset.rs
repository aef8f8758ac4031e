//! Per-member battle configuration and its battle-simulator text form.
//!
//! A configured member renders as:
//!
//! ```text
//! Sparky (Pikachu) @ Light Ball
//! Ability: Lightning Rod
//! Shiny: Yes
//! Tera Type: Electric
//! Timid Nature
//! - Thunderbolt
//! - Volt Switch
//! ```
//!
//! The item line is left out when no item is held and the shiny line only appears for shiny
//! members. [`parse_set`] reads the same layout back.

use crate::errors::MovesetError;
use schema::{format_display_name, to_slug, Nature, PokemonType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Write;
use std::str::FromStr;

pub const MAX_MOVES: usize = 4;
pub const MAX_NICKNAME_CHARS: usize = 12;
pub const NO_ITEM: &str = "None";

/// Held items offered by the item picker. The last entry clears the slot.
pub const POPULAR_ITEMS: &[&str] = &[
    "Leftovers",
    "Choice Band",
    "Choice Scarf",
    "Choice Specs",
    "Life Orb",
    "Focus Sash",
    "Assault Vest",
    "Heavy-Duty Boots",
    "Sitrus Berry",
    "Rocky Helmet",
    "Air Balloon",
    "Expert Belt",
    "Mental Herb",
    "Weakness Policy",
    "Covert Cloak",
    "Safety Goggles",
    "Scope Lens",
    "Muscle Band",
    "Wise Glasses",
    "Blunder Policy",
    "White Herb",
    "Power Herb",
    "Eject Button",
    "Red Card",
    "Eviolite",
    "Black Sludge",
    "Absorb Bulb",
    "Cell Battery",
    "Luminous Moss",
    "Snowball",
    NO_ITEM,
];

fn default_item() -> String {
    NO_ITEM.to_string()
}

/// Moves, ability and cosmetics chosen for one team member.
///
/// Moves and the ability are stored as hyphenated identifiers (`"volt-switch"`); the item is
/// stored as its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovesetConfig {
    pub moves: Vec<String>,
    pub ability: String,
    #[serde(default = "default_item")]
    pub item: String,
    #[serde(default)]
    pub nature: Nature,
    pub tera_type: PokemonType,
    #[serde(default)]
    pub shiny: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

impl MovesetConfig {
    /// Defaults for a Pokemon of the given types: no moves, no item, Hardy nature and a Tera
    /// type matching its first type.
    pub fn for_types(types: &[PokemonType]) -> Self {
        Self {
            moves: Vec::new(),
            ability: String::new(),
            item: default_item(),
            nature: Nature::default(),
            tera_type: types.first().copied().unwrap_or(PokemonType::Normal),
            shiny: false,
            nickname: None,
        }
    }

    pub fn has_item(&self) -> bool {
        let item = self.item.trim();
        !item.is_empty() && item != NO_ITEM
    }

    /// Clean up picker input and check the limits.
    ///
    /// Blank move entries are dropped, a blank nickname becomes `None` and a blank item becomes
    /// "None". At most four moves, no repeats, nicknames up to 12 characters.
    pub fn validate(mut self) -> Result<Self, MovesetError> {
        self.moves = self
            .moves
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        if self.moves.len() > MAX_MOVES {
            return Err(MovesetError::TooManyMoves(self.moves.len()));
        }
        let mut seen = HashSet::new();
        for name in &self.moves {
            if !seen.insert(to_slug(name)) {
                return Err(MovesetError::DuplicateMove(name.clone()));
            }
        }

        self.nickname = self
            .nickname
            .map(|nickname| nickname.trim().to_string())
            .filter(|nickname| !nickname.is_empty());
        if let Some(nickname) = &self.nickname {
            if nickname.chars().count() > MAX_NICKNAME_CHARS {
                return Err(MovesetError::NicknameTooLong(nickname.clone()));
            }
        }

        self.ability = self.ability.trim().to_string();
        if self.item.trim().is_empty() {
            self.item = default_item();
        }
        Ok(self)
    }

    /// The set in battle-simulator import syntax, for a member whose API name is `species`.
    pub fn export_block(&self, species: &str) -> String {
        let species = format_display_name(species);
        let mut block = match &self.nickname {
            Some(nickname) => format!("{} ({})", nickname, species),
            None => species,
        };
        if self.has_item() {
            let _ = write!(block, " @ {}", self.item.trim());
        }
        let _ = write!(block, "\nAbility: {}", format_display_name(&self.ability));
        if self.shiny {
            block.push_str("\nShiny: Yes");
        }
        let _ = write!(block, "\nTera Type: {}", self.tera_type.display_name());
        let _ = write!(block, "\n{} Nature", self.nature);
        for name in &self.moves {
            let _ = write!(block, "\n- {}", format_display_name(name));
        }
        block
    }
}

/// A set read back from import text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSet {
    /// Hyphenated species identifier, e.g. `"iron-valiant"`.
    pub species: String,
    pub config: MovesetConfig,
    /// False when the text had no "Tera Type:" line and `config.tera_type` is a placeholder.
    pub explicit_tera: bool,
}

fn split_header(header: &str) -> (Option<String>, String, Option<String>) {
    let (names, item) = match header.split_once(" @ ") {
        Some((names, item)) => (names.trim(), Some(item.trim().to_string())),
        None => (header.trim(), None),
    };

    // "Nickname (Species)"; a trailing "(M)"/"(F)" is a gender marker, not a species.
    let names = names
        .strip_suffix(" (M)")
        .or_else(|| names.strip_suffix(" (F)"))
        .unwrap_or(names);
    match names.rsplit_once(" (") {
        // "Charizard (#6)" from a member exported without a moveset.
        Some((species, marker)) if marker.starts_with('#') => (None, species.to_string(), item),
        Some((nickname, species)) if species.ends_with(')') => (
            Some(nickname.trim().to_string()),
            species.trim_end_matches(')').to_string(),
            item,
        ),
        _ => (None, names.to_string(), item),
    }
}

/// Parse one set in battle-simulator import syntax. Lines the team builder has no field for
/// (EVs, IVs, level, ...) are skipped.
pub fn parse_set(text: &str) -> Result<ParsedSet, MovesetError> {
    let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());
    let header = lines
        .next()
        .ok_or_else(|| MovesetError::Unparseable("empty set".to_string()))?;
    let (nickname, species, item) = split_header(header);
    if species.is_empty() {
        return Err(MovesetError::Unparseable(header.to_string()));
    }

    let mut config = MovesetConfig::for_types(&[]);
    config.nickname = nickname;
    config.item = item.unwrap_or_else(default_item);
    let mut tera_type = None;

    for line in lines {
        if let Some(name) = line.strip_prefix('-') {
            config.moves.push(to_slug(name));
        } else if let Some(ability) = line.strip_prefix("Ability:") {
            config.ability = to_slug(ability);
        } else if let Some(shiny) = line.strip_prefix("Shiny:") {
            config.shiny = shiny.trim().eq_ignore_ascii_case("yes");
        } else if let Some(raw) = line.strip_prefix("Tera Type:") {
            let parsed = PokemonType::from_str(raw.trim())
                .map_err(|_| MovesetError::Unparseable(line.to_string()))?;
            tera_type = Some(parsed);
        } else if let Some(raw) = line.strip_suffix(" Nature") {
            config.nature = Nature::from_str(raw.trim())
                .map_err(|_| MovesetError::Unparseable(line.to_string()))?;
        } else {
            log::debug!("ignoring set line: {}", line);
        }
    }

    if let Some(tera_type) = tera_type {
        config.tera_type = tera_type;
    }
    Ok(ParsedSet {
        species: to_slug(&species),
        config: config.validate()?,
        explicit_tera: tera_type.is_some(),
    })
}

/// Split team text into per-member blocks on blank lines and parse each.
pub fn parse_team(text: &str) -> Result<Vec<ParsedSet>, MovesetError> {
    let mut sets = Vec::new();
    let mut block = String::new();
    for line in text.lines().chain(std::iter::once("")) {
        if line.trim().is_empty() {
            if !block.trim().is_empty() && !block.trim_start().starts_with("===") {
                sets.push(parse_set(&block)?);
            }
            block.clear();
        } else {
            block.push_str(line);
            block.push('\n');
        }
    }
    Ok(sets)
}
