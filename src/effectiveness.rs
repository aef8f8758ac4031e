//! Per-Pokemon type matchups computed from the defending-type matrix.

use ordered_float::OrderedFloat;
use schema::PokemonType;
use std::collections::HashMap;
use strum::IntoEnumIterator;

/// Weaknesses, resistances and offensive advantages of one type combination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeMatchupReport {
    /// Attacking types that land above 1x, with their combined multiplier (2 or 4).
    pub weaknesses: HashMap<PokemonType, f32>,
    /// Attacking types that land below 1x, including immunities at 0.
    pub resistances: HashMap<PokemonType, f32>,
    /// Defending types this Pokemon's own types hit super effectively, with the best multiplier.
    pub advantages: HashMap<PokemonType, f32>,
}

/// Combined multiplier of `attacking` against every type in `defending`.
///
/// The per-type multipliers are multiplied together, so an immunity (0) on either type wins
/// over a weakness on the other, and a weakness on one type cancels a resistance on the other.
pub fn combined_multiplier(attacking: PokemonType, defending: &[PokemonType]) -> f32 {
    defending
        .iter()
        .map(|&defender| PokemonType::type_effectiveness(attacking, defender))
        .product()
}

pub fn analyze(types: &[PokemonType]) -> TypeMatchupReport {
    let mut report = TypeMatchupReport::default();

    for attacking in PokemonType::iter() {
        let multiplier = combined_multiplier(attacking, types);
        if multiplier > 1.0 {
            report.weaknesses.insert(attacking, multiplier);
        } else if multiplier < 1.0 {
            report.resistances.insert(attacking, multiplier);
        }
    }

    for defender in PokemonType::iter() {
        for &own in types {
            let multiplier = PokemonType::type_effectiveness(own, defender);
            if multiplier > 1.0 {
                let best = report.advantages.entry(defender).or_insert(multiplier);
                *best = best.max(multiplier);
            }
        }
    }

    report
}

/// Entries ordered for display: strongest effect first, then type order.
fn ranked(entries: &HashMap<PokemonType, f32>, strongest_is_high: bool) -> Vec<(PokemonType, f32)> {
    let mut ranked: Vec<(PokemonType, f32)> = entries.iter().map(|(&t, &m)| (t, m)).collect();
    ranked.sort_by_key(|&(pokemon_type, multiplier)| {
        let key = if strongest_is_high {
            -multiplier
        } else {
            multiplier
        };
        (OrderedFloat(key), pokemon_type)
    });
    ranked
}

impl TypeMatchupReport {
    pub fn for_types(types: &[PokemonType]) -> Self {
        analyze(types)
    }

    /// 4x weaknesses before 2x.
    pub fn ranked_weaknesses(&self) -> Vec<(PokemonType, f32)> {
        ranked(&self.weaknesses, true)
    }

    /// Immunities before quarter and half resistances.
    pub fn ranked_resistances(&self) -> Vec<(PokemonType, f32)> {
        ranked(&self.resistances, false)
    }

    pub fn ranked_advantages(&self) -> Vec<(PokemonType, f32)> {
        ranked(&self.advantages, true)
    }

    pub fn immunities(&self) -> Vec<PokemonType> {
        self.ranked_resistances()
            .into_iter()
            .filter(|&(_, multiplier)| multiplier == 0.0)
            .map(|(pokemon_type, _)| pokemon_type)
            .collect()
    }
}

/// "4x", "2x", "0.5x", "0.25x", "0x".
pub fn format_multiplier(multiplier: f32) -> String {
    format!("{}x", multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use PokemonType::*;

    #[test]
    fn test_ghost_dark_is_immune_to_psychic() {
        let report = analyze(&[Ghost, Dark]);

        assert!(!report.weaknesses.contains_key(&Psychic));
        assert_eq!(report.resistances.get(&Psychic), Some(&0.0));
        assert_eq!(report.ranked_weaknesses(), vec![(Fairy, 2.0)]);
        assert_eq!(report.immunities(), vec![Normal, Fighting, Psychic]);
    }

    #[test]
    fn test_immunity_survives_in_either_order() {
        assert_eq!(combined_multiplier(Fighting, &[Ghost, Dark]), 0.0);
        assert_eq!(combined_multiplier(Fighting, &[Dark, Ghost]), 0.0);
        assert_eq!(combined_multiplier(Ground, &[Flying, Electric]), 0.0);
        assert_eq!(combined_multiplier(Ground, &[Electric, Flying]), 0.0);
    }

    #[rstest]
    #[case(&[Grass, Flying], Ice, 4.0, "double weakness compounds")]
    #[case(&[Bug, Steel], Fire, 4.0, "Scizor's only weakness")]
    #[case(&[Water, Ground], Grass, 4.0, "Swampert")]
    #[case(&[Fire], Water, 2.0, "single type")]
    fn test_weakness_multipliers(
        #[case] types: &[PokemonType],
        #[case] attacking: PokemonType,
        #[case] expected: f32,
        #[case] desc: &str,
    ) {
        let report = analyze(types);
        assert_eq!(report.weaknesses.get(&attacking), Some(&expected), "{}", desc);
    }

    #[test]
    fn test_opposite_effects_cancel_out() {
        // Water resists fire, grass is weak to it.
        let report = analyze(&[Water, Grass]);
        assert!(!report.weaknesses.contains_key(&Fire));
        assert!(!report.resistances.contains_key(&Fire));
        assert_eq!(report.resistances.get(&Water), Some(&0.25));
    }

    #[test]
    fn test_weaknesses_and_resistances_never_overlap() {
        for first in PokemonType::iter() {
            for second in PokemonType::iter() {
                let types: Vec<PokemonType> = if first == second {
                    vec![first]
                } else {
                    vec![first, second]
                };
                let report = analyze(&types);
                for attacking in report.weaknesses.keys() {
                    assert!(
                        !report.resistances.contains_key(attacking),
                        "{:?} both weak and resistant to {:?}",
                        types,
                        attacking
                    );
                }
            }
        }
    }

    #[test]
    fn test_advantages_keep_the_best_own_type() {
        let report = analyze(&[Fire, Ground]);
        assert_eq!(
            report.ranked_advantages(),
            vec![
                (Fire, 2.0),
                (Electric, 2.0),
                (Grass, 2.0),
                (Ice, 2.0),
                (Poison, 2.0),
                (Bug, 2.0),
                (Rock, 2.0),
                (Steel, 2.0),
            ]
        );
    }

    #[test]
    fn test_resistances_rank_immunities_first() {
        let report = analyze(&[Steel, Flying]);
        let ranked = report.ranked_resistances();
        assert_eq!(ranked[0], (Poison, 0.0));
        assert_eq!(ranked[1], (Ground, 0.0));
        assert_eq!(ranked[2], (Grass, 0.25));
        assert_eq!(ranked[3], (Bug, 0.25));
    }

    #[rstest]
    #[case(4.0, "4x")]
    #[case(0.5, "0.5x")]
    #[case(0.25, "0.25x")]
    #[case(0.0, "0x")]
    fn test_format_multiplier(#[case] multiplier: f32, #[case] expected: &str) {
        assert_eq!(format_multiplier(multiplier), expected);
    }
}
