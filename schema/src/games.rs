use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use strum::EnumIter;

/// A main-series generation, identified by its national dex range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Generation(u8);

impl Generation {
    pub const FIRST: u8 = 1;
    pub const LATEST: u8 = 9;

    pub fn new(number: u8) -> Option<Self> {
        (Self::FIRST..=Self::LATEST)
            .contains(&number)
            .then_some(Self(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// National dex ids introduced in this generation.
    pub fn dex_range(self) -> RangeInclusive<u32> {
        match self.0 {
            1 => 1..=151,
            2 => 152..=251,
            3 => 252..=386,
            4 => 387..=493,
            5 => 494..=649,
            6 => 650..=721,
            7 => 722..=809,
            8 => 810..=905,
            _ => 906..=1025,
        }
    }

    pub fn all() -> impl Iterator<Item = Generation> {
        (Self::FIRST..=Self::LATEST).map(Generation)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gen {}", self.0)
    }
}

/// Game titles a roster can be browsed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum GameTitle {
    RedBlue,
    GoldSilver,
    RubySapphire,
    DiamondPearl,
    Platinum,
    HeartGoldSoulSilver,
    BlackWhite,
    Black2White2,
    XY,
    OmegaRubyAlphaSapphire,
    SunMoon,
    UltraSunUltraMoon,
    LetsGo,
    SwordShield,
    BrilliantDiamondShiningPearl,
    LegendsArceus,
    ScarletViolet,
}

/// Slugs and common shorthands accepted when parsing a title.
static GAME_TITLE_SLUGS: phf::Map<&'static str, GameTitle> = phf::phf_map! {
    "red-blue" => GameTitle::RedBlue,
    "rb" => GameTitle::RedBlue,
    "gold-silver" => GameTitle::GoldSilver,
    "gs" => GameTitle::GoldSilver,
    "ruby-sapphire" => GameTitle::RubySapphire,
    "rs" => GameTitle::RubySapphire,
    "diamond-pearl" => GameTitle::DiamondPearl,
    "dp" => GameTitle::DiamondPearl,
    "platinum" => GameTitle::Platinum,
    "heartgold-soulsilver" => GameTitle::HeartGoldSoulSilver,
    "hgss" => GameTitle::HeartGoldSoulSilver,
    "black-white" => GameTitle::BlackWhite,
    "bw" => GameTitle::BlackWhite,
    "black-2-white-2" => GameTitle::Black2White2,
    "b2w2" => GameTitle::Black2White2,
    "x-y" => GameTitle::XY,
    "xy" => GameTitle::XY,
    "omega-ruby-alpha-sapphire" => GameTitle::OmegaRubyAlphaSapphire,
    "oras" => GameTitle::OmegaRubyAlphaSapphire,
    "sun-moon" => GameTitle::SunMoon,
    "sm" => GameTitle::SunMoon,
    "ultra-sun-ultra-moon" => GameTitle::UltraSunUltraMoon,
    "usum" => GameTitle::UltraSunUltraMoon,
    "lets-go-pikachu-lets-go-eevee" => GameTitle::LetsGo,
    "lets-go" => GameTitle::LetsGo,
    "sword-shield" => GameTitle::SwordShield,
    "swsh" => GameTitle::SwordShield,
    "brilliant-diamond-shining-pearl" => GameTitle::BrilliantDiamondShiningPearl,
    "bdsp" => GameTitle::BrilliantDiamondShiningPearl,
    "legends-arceus" => GameTitle::LegendsArceus,
    "pla" => GameTitle::LegendsArceus,
    "scarlet-violet" => GameTitle::ScarletViolet,
    "sv" => GameTitle::ScarletViolet,
};

impl GameTitle {
    /// Parse a slug or shorthand (`"scarlet-violet"`, `"sv"`), ignoring case.
    pub fn from_slug(raw: &str) -> Option<GameTitle> {
        GAME_TITLE_SLUGS.get(raw.trim().to_lowercase().as_str()).copied()
    }

    pub fn slug(self) -> &'static str {
        match self {
            GameTitle::RedBlue => "red-blue",
            GameTitle::GoldSilver => "gold-silver",
            GameTitle::RubySapphire => "ruby-sapphire",
            GameTitle::DiamondPearl => "diamond-pearl",
            GameTitle::Platinum => "platinum",
            GameTitle::HeartGoldSoulSilver => "heartgold-soulsilver",
            GameTitle::BlackWhite => "black-white",
            GameTitle::Black2White2 => "black-2-white-2",
            GameTitle::XY => "x-y",
            GameTitle::OmegaRubyAlphaSapphire => "omega-ruby-alpha-sapphire",
            GameTitle::SunMoon => "sun-moon",
            GameTitle::UltraSunUltraMoon => "ultra-sun-ultra-moon",
            GameTitle::LetsGo => "lets-go-pikachu-lets-go-eevee",
            GameTitle::SwordShield => "sword-shield",
            GameTitle::BrilliantDiamondShiningPearl => "brilliant-diamond-shining-pearl",
            GameTitle::LegendsArceus => "legends-arceus",
            GameTitle::ScarletViolet => "scarlet-violet",
        }
    }

    /// Regional pokedexes (PokeAPI `pokedex` resource names) that make up the title's roster.
    pub fn pokedexes(self) -> &'static [&'static str] {
        match self {
            GameTitle::RedBlue => &["kanto"],
            GameTitle::GoldSilver => &["original-johto"],
            GameTitle::RubySapphire => &["hoenn"],
            GameTitle::DiamondPearl => &["original-sinnoh"],
            GameTitle::Platinum => &["extended-sinnoh"],
            GameTitle::HeartGoldSoulSilver => &["updated-johto"],
            GameTitle::BlackWhite => &["original-unova"],
            GameTitle::Black2White2 => &["updated-unova"],
            GameTitle::XY => &["kalos-central", "kalos-coastal", "kalos-mountain"],
            GameTitle::OmegaRubyAlphaSapphire => &["updated-hoenn"],
            GameTitle::SunMoon => &["original-alola"],
            GameTitle::UltraSunUltraMoon => &["updated-alola"],
            GameTitle::LetsGo => &["letsgo-kanto"],
            GameTitle::SwordShield => &["galar", "isle-of-armor", "crown-tundra"],
            GameTitle::BrilliantDiamondShiningPearl => &["original-sinnoh"],
            GameTitle::LegendsArceus => &["hisui"],
            GameTitle::ScarletViolet => &["paldea", "kitakami", "blueberry"],
        }
    }

    /// Titles whose rosters contain megas, regional variants or other alternate forms, so each
    /// species' variety list has to be expanded and filtered.
    pub fn requires_varieties(self) -> bool {
        matches!(
            self,
            GameTitle::XY
                | GameTitle::OmegaRubyAlphaSapphire
                | GameTitle::SunMoon
                | GameTitle::UltraSunUltraMoon
                | GameTitle::LetsGo
                | GameTitle::SwordShield
                | GameTitle::BrilliantDiamondShiningPearl
                | GameTitle::LegendsArceus
                | GameTitle::ScarletViolet
        )
    }
}

impl fmt::Display for GameTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            GameTitle::RedBlue => "Red / Blue",
            GameTitle::GoldSilver => "Gold / Silver",
            GameTitle::RubySapphire => "Ruby / Sapphire",
            GameTitle::DiamondPearl => "Diamond / Pearl",
            GameTitle::Platinum => "Platinum",
            GameTitle::HeartGoldSoulSilver => "HeartGold / SoulSilver",
            GameTitle::BlackWhite => "Black / White",
            GameTitle::Black2White2 => "Black 2 / White 2",
            GameTitle::XY => "X / Y",
            GameTitle::OmegaRubyAlphaSapphire => "Omega Ruby / Alpha Sapphire",
            GameTitle::SunMoon => "Sun / Moon",
            GameTitle::UltraSunUltraMoon => "Ultra Sun / Ultra Moon",
            GameTitle::LetsGo => "Let's Go Pikachu / Eevee",
            GameTitle::SwordShield => "Sword / Shield",
            GameTitle::BrilliantDiamondShiningPearl => "Brilliant Diamond / Shining Pearl",
            GameTitle::LegendsArceus => "Legends: Arceus",
            GameTitle::ScarletViolet => "Scarlet / Violet",
        };
        write!(f, "{}", display_name)
    }
}
