use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoStaticStr};
use std::fmt;

/// The eighteen elemental types. Serialized and parsed as the lowercase identifiers
/// used by PokeAPI (`"fire"`, `"dark"`, ...).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PokemonType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl PokemonType {
    /// Lowercase identifier, e.g. `"fire"`.
    pub fn id(self) -> &'static str {
        self.into()
    }

    /// Capitalized label, e.g. `"Fire"`.
    pub fn display_name(self) -> String {
        let id = self.id();
        let mut chars = id.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }

    /// Row of the matchup matrix for this type as a *defender*: every attacking type whose
    /// multiplier differs from 1, paired with that multiplier (0, 0.5 or 2).
    pub fn defensive_matchups(self) -> &'static [(PokemonType, f32)] {
        use PokemonType::*;

        match self {
            Normal => &[(Fighting, 2.0), (Ghost, 0.0)],
            Fire => &[
                (Water, 2.0),
                (Ground, 2.0),
                (Rock, 2.0),
                (Fire, 0.5),
                (Grass, 0.5),
                (Ice, 0.5),
                (Bug, 0.5),
                (Steel, 0.5),
                (Fairy, 0.5),
            ],
            Water => &[
                (Electric, 2.0),
                (Grass, 2.0),
                (Fire, 0.5),
                (Water, 0.5),
                (Ice, 0.5),
                (Steel, 0.5),
            ],
            Electric => &[
                (Ground, 2.0),
                (Electric, 0.5),
                (Flying, 0.5),
                (Steel, 0.5),
            ],
            Grass => &[
                (Fire, 2.0),
                (Ice, 2.0),
                (Poison, 2.0),
                (Flying, 2.0),
                (Bug, 2.0),
                (Water, 0.5),
                (Electric, 0.5),
                (Grass, 0.5),
                (Ground, 0.5),
            ],
            Ice => &[
                (Fire, 2.0),
                (Fighting, 2.0),
                (Rock, 2.0),
                (Steel, 2.0),
                (Ice, 0.5),
            ],
            Fighting => &[
                (Flying, 2.0),
                (Psychic, 2.0),
                (Fairy, 2.0),
                (Bug, 0.5),
                (Rock, 0.5),
                (Dark, 0.5),
            ],
            Poison => &[
                (Ground, 2.0),
                (Psychic, 2.0),
                (Fighting, 0.5),
                (Poison, 0.5),
                (Bug, 0.5),
                (Grass, 0.5),
                (Fairy, 0.5),
            ],
            Ground => &[
                (Water, 2.0),
                (Ice, 2.0),
                (Grass, 2.0),
                (Poison, 0.5),
                (Rock, 0.5),
                (Electric, 0.0),
            ],
            Flying => &[
                (Electric, 2.0),
                (Ice, 2.0),
                (Rock, 2.0),
                (Fighting, 0.5),
                (Bug, 0.5),
                (Grass, 0.5),
                (Ground, 0.0),
            ],
            Psychic => &[
                (Bug, 2.0),
                (Ghost, 2.0),
                (Dark, 2.0),
                (Fighting, 0.5),
                (Psychic, 0.5),
            ],
            Bug => &[
                (Fire, 2.0),
                (Flying, 2.0),
                (Rock, 2.0),
                (Fighting, 0.5),
                (Grass, 0.5),
                (Ground, 0.5),
            ],
            Rock => &[
                (Water, 2.0),
                (Grass, 2.0),
                (Fighting, 2.0),
                (Ground, 2.0),
                (Steel, 2.0),
                (Normal, 0.5),
                (Fire, 0.5),
                (Poison, 0.5),
                (Flying, 0.5),
            ],
            Ghost => &[
                (Ghost, 2.0),
                (Dark, 2.0),
                (Poison, 0.5),
                (Bug, 0.5),
                (Normal, 0.0),
                (Fighting, 0.0),
            ],
            Dragon => &[
                (Ice, 2.0),
                (Dragon, 2.0),
                (Fairy, 2.0),
                (Fire, 0.5),
                (Water, 0.5),
                (Electric, 0.5),
                (Grass, 0.5),
            ],
            Dark => &[
                (Fighting, 2.0),
                (Bug, 2.0),
                (Fairy, 2.0),
                (Ghost, 0.5),
                (Dark, 0.5),
                (Psychic, 0.0),
            ],
            Steel => &[
                (Fire, 2.0),
                (Fighting, 2.0),
                (Ground, 2.0),
                (Normal, 0.5),
                (Grass, 0.5),
                (Ice, 0.5),
                (Flying, 0.5),
                (Psychic, 0.5),
                (Bug, 0.5),
                (Rock, 0.5),
                (Dragon, 0.5),
                (Steel, 0.5),
                (Fairy, 0.5),
                (Poison, 0.0),
            ],
            Fairy => &[
                (Poison, 2.0),
                (Steel, 2.0),
                (Fighting, 0.5),
                (Bug, 0.5),
                (Dark, 0.5),
                (Dragon, 0.0),
            ],
        }
    }

    /// Multiplier of an `attacking` type against a single `defending` type.
    /// Returns: 2.0 = Super Effective, 1.0 = Normal, 0.5 = Not Very Effective, 0.0 = No Effect
    pub fn type_effectiveness(attacking: PokemonType, defending: PokemonType) -> f32 {
        defending
            .defensive_matchups()
            .iter()
            .find(|(attacker, _)| *attacker == attacking)
            .map(|(_, multiplier)| *multiplier)
            .unwrap_or(1.0)
    }

    /// Simplified one-directional weakness list used for team-level warnings.
    ///
    /// This is intentionally coarser than [`PokemonType::defensive_matchups`]: it only lists the
    /// headline weaknesses of each type and ignores immunities entirely.
    pub fn common_weaknesses(self) -> &'static [PokemonType] {
        use PokemonType::*;

        match self {
            Fire => &[Water, Ground, Rock],
            Water => &[Electric, Grass],
            Grass => &[Fire, Ice, Poison, Flying, Bug],
            Electric => &[Ground],
            Psychic => &[Bug, Ghost, Dark],
            Normal => &[Fighting],
            Fighting => &[Flying, Psychic, Fairy],
            Flying => &[Electric, Ice, Rock],
            Poison => &[Ground, Psychic],
            Ground => &[Water, Grass, Ice],
            Rock => &[Water, Grass, Fighting, Ground, Steel],
            Bug => &[Fire, Flying, Rock],
            Ghost => &[Ghost, Dark],
            Steel => &[Fire, Fighting, Ground],
            Dragon => &[Ice, Dragon, Fairy],
            Dark => &[Fighting, Bug, Fairy],
            Fairy => &[Poison, Steel],
            Ice => &[Fire, Fighting, Rock, Steel],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_all_eighteen_types_iterate() {
        assert_eq!(PokemonType::iter().count(), 18);
    }

    #[rstest]
    #[case("fire", PokemonType::Fire)]
    #[case("Dark", PokemonType::Dark)]
    #[case("FAIRY", PokemonType::Fairy)]
    fn test_parse_type_ids(#[case] raw: &str, #[case] expected: PokemonType) {
        assert_eq!(PokemonType::from_str(raw).unwrap(), expected);
    }

    #[test]
    fn test_unknown_type_fails_to_parse() {
        assert!(PokemonType::from_str("shadow").is_err());
    }

    #[rstest]
    #[case(PokemonType::Water, PokemonType::Fire, 2.0)]
    #[case(PokemonType::Fire, PokemonType::Water, 0.5)]
    #[case(PokemonType::Normal, PokemonType::Ghost, 0.0)]
    #[case(PokemonType::Psychic, PokemonType::Dark, 0.0)]
    #[case(PokemonType::Dragon, PokemonType::Fairy, 0.0)]
    #[case(PokemonType::Normal, PokemonType::Normal, 1.0)]
    fn test_single_type_effectiveness(
        #[case] attacking: PokemonType,
        #[case] defending: PokemonType,
        #[case] expected: f32,
    ) {
        assert_eq!(
            PokemonType::type_effectiveness(attacking, defending),
            expected
        );
    }

    #[test]
    fn test_matrix_only_uses_known_multipliers() {
        for defending in PokemonType::iter() {
            for (_, multiplier) in defending.defensive_matchups() {
                assert!(
                    [0.0, 0.5, 2.0].contains(multiplier),
                    "{} has unexpected multiplier {}",
                    defending,
                    multiplier
                );
            }
        }
    }

    #[test]
    fn test_display_name_is_capitalized() {
        assert_eq!(PokemonType::Electric.display_name(), "Electric");
        assert_eq!(PokemonType::Electric.to_string(), "electric");
    }
}
