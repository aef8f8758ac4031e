//! Which alternate forms belong in a game title's roster.

use schema::{FormName, FormTag, GameTitle};

use GameTitle::*;

const MEGA_TITLES: &[GameTitle] = &[XY, OmegaRubyAlphaSapphire, SunMoon, UltraSunUltraMoon, LetsGo];

const ALOLAN_TITLES: &[GameTitle] = &[SunMoon, UltraSunUltraMoon, LetsGo, SwordShield, ScarletViolet];

const GALARIAN_TITLES: &[GameTitle] = &[SwordShield, ScarletViolet];

const HISUIAN_TITLES: &[GameTitle] = &[LegendsArceus, ScarletViolet];

const PALDEAN_TITLES: &[GameTitle] = &[ScarletViolet];

const GMAX_TITLES: &[GameTitle] = &[SwordShield];

const PRIMAL_TITLES: &[GameTitle] = &[OmegaRubyAlphaSapphire, SunMoon, UltraSunUltraMoon];

const ORIGIN_TITLES: &[GameTitle] = &[
    Platinum,
    HeartGoldSoulSilver,
    BlackWhite,
    Black2White2,
    XY,
    OmegaRubyAlphaSapphire,
    SunMoon,
    UltraSunUltraMoon,
    SwordShield,
    BrilliantDiamondShiningPearl,
    LegendsArceus,
    ScarletViolet,
];

const SKY_TITLES: &[GameTitle] = &[
    Platinum,
    HeartGoldSoulSilver,
    BlackWhite,
    Black2White2,
    XY,
    OmegaRubyAlphaSapphire,
    SunMoon,
    UltraSunUltraMoon,
    BrilliantDiamondShiningPearl,
];

const THERIAN_TITLES: &[GameTitle] = &[
    Black2White2,
    XY,
    OmegaRubyAlphaSapphire,
    SunMoon,
    UltraSunUltraMoon,
    SwordShield,
    LegendsArceus,
    ScarletViolet,
];

const KYUREM_FUSION_TITLES: &[GameTitle] = &[
    Black2White2,
    XY,
    OmegaRubyAlphaSapphire,
    SunMoon,
    UltraSunUltraMoon,
    SwordShield,
    ScarletViolet,
];

/// Titles a tagged form appears in. `None` means the form is not restricted.
fn eligible_titles(tag: FormTag) -> Option<&'static [GameTitle]> {
    match tag {
        FormTag::None | FormTag::Other => None,
        FormTag::Mega | FormTag::MegaX | FormTag::MegaY => Some(MEGA_TITLES),
        FormTag::Alolan => Some(ALOLAN_TITLES),
        FormTag::Galarian => Some(GALARIAN_TITLES),
        FormTag::Hisuian => Some(HISUIAN_TITLES),
        FormTag::Paldean => Some(PALDEAN_TITLES),
        FormTag::Gmax => Some(GMAX_TITLES),
        FormTag::Primal => Some(PRIMAL_TITLES),
        FormTag::Origin => Some(ORIGIN_TITLES),
        FormTag::Sky => Some(SKY_TITLES),
        FormTag::Therian => Some(THERIAN_TITLES),
        FormTag::Black | FormTag::White => Some(KYUREM_FUSION_TITLES),
    }
}

/// Whether `form` should be listed for `game`.
///
/// Base forms are always available. Forms without a dedicated tag (`FormTag::Other`) are let
/// through as well, which can over-include a few cosmetic or battle-only varieties.
pub fn is_form_available(form: &FormName, game: GameTitle) -> bool {
    match eligible_titles(form.tag) {
        Some(titles) => titles.contains(&game),
        None => {
            if form.tag == FormTag::Other {
                log::debug!("no availability rule for {}, keeping it", form);
            }
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("charizard-mega-x", XY, true, "mega X in its debut title")]
    #[case("charizard-mega-y", SwordShield, false, "megas were cut from Galar")]
    #[case("venusaur-mega", LetsGo, true, "Let's Go keeps megas")]
    #[case("raichu-alola", SunMoon, true, "Alolan form at home")]
    #[case("raichu-alola", XY, false, "Alolan form before Alola")]
    #[case("meowth-galar", SwordShield, true, "Galarian form in Galar")]
    #[case("meowth-galar", BrilliantDiamondShiningPearl, false, "no regional forms in BDSP")]
    #[case("growlithe-hisui", LegendsArceus, true, "Hisuian form in Hisui")]
    #[case("tauros-paldea-combat-breed", ScarletViolet, true, "Paldean form with extra suffix")]
    #[case("charizard-gmax", SwordShield, true, "Gigantamax only in Galar")]
    #[case("charizard-gmax", ScarletViolet, false, "no Gigantamax in Paldea")]
    #[case("kyogre-primal", OmegaRubyAlphaSapphire, true, "primal reversion")]
    #[case("giratina-origin", Platinum, true, "Origin Forme debut")]
    #[case("giratina-origin", DiamondPearl, false, "Origin Forme before Platinum")]
    #[case("shaymin-sky", Platinum, true, "Sky Forme debut")]
    #[case("landorus-therian", BlackWhite, false, "Therian Forme came with B2W2")]
    #[case("kyurem-black", Black2White2, true, "fusion debut")]
    #[case("kyurem-white", BlackWhite, false, "fusion before B2W2")]
    fn test_form_rules(
        #[case] name: &str,
        #[case] game: GameTitle,
        #[case] expected: bool,
        #[case] desc: &str,
    ) {
        assert_eq!(
            is_form_available(&FormName::parse(name), game),
            expected,
            "{}",
            desc
        );
    }

    #[test]
    fn test_base_forms_are_always_available() {
        for game in [RedBlue, XY, ScarletViolet] {
            assert!(is_form_available(&FormName::parse("pikachu"), game));
        }
    }

    #[test]
    fn test_unmodelled_suffix_falls_back_to_available() {
        let form = FormName::for_species("deoxys", "deoxys-attack");
        assert_eq!(form.tag, FormTag::Other);
        assert!(is_form_available(&form, RubySapphire));
    }

    #[test]
    fn test_every_restricted_tag_has_a_title() {
        use FormTag::*;
        for tag in [
            Mega, MegaX, MegaY, Alolan, Galarian, Hisuian, Paldean, Gmax, Primal, Origin, Sky,
            Therian, Black, White,
        ] {
            let titles = eligible_titles(tag).unwrap_or_default();
            assert!(!titles.is_empty(), "{:?} has no eligible titles", tag);
        }
    }
}
