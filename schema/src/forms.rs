use crate::names::format_display_name;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which variant of a species a Pokemon record represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormTag {
    None,
    Mega,
    MegaX,
    MegaY,
    Alolan,
    Galarian,
    Hisuian,
    Paldean,
    Gmax,
    Primal,
    Origin,
    Sky,
    Therian,
    Black,
    White,
    /// A non-default variety whose suffix has no dedicated tag (e.g. `deoxys-attack`).
    Other,
}

/// Name tokens that identify a form, checked against each hyphen-separated token.
static FORM_TOKENS: phf::Map<&'static str, FormTag> = phf::phf_map! {
    "mega" => FormTag::Mega,
    "alola" => FormTag::Alolan,
    "galar" => FormTag::Galarian,
    "hisui" => FormTag::Hisuian,
    "paldea" => FormTag::Paldean,
    "gmax" => FormTag::Gmax,
    "primal" => FormTag::Primal,
    "origin" => FormTag::Origin,
    "sky" => FormTag::Sky,
    "therian" => FormTag::Therian,
    "black" => FormTag::Black,
    "white" => FormTag::White,
};

impl FormTag {
    pub fn is_mega(self) -> bool {
        matches!(self, FormTag::Mega | FormTag::MegaX | FormTag::MegaY)
    }

    fn from_tokens(tokens: &[&str]) -> Option<FormTag> {
        let (first, rest) = tokens.split_first()?;
        let tag = FORM_TOKENS.get(*first).copied()?;
        match (tag, rest.first().copied()) {
            (FormTag::Mega, Some("x")) => Some(FormTag::MegaX),
            (FormTag::Mega, Some("y")) => Some(FormTag::MegaY),
            // Kyurem fusions are always the final token; `basculin-white-striped` is not one.
            (FormTag::Black | FormTag::White, Some(_)) => None,
            (tag, _) => Some(tag),
        }
    }
}

/// A Pokemon name split into its base species and form.
///
/// `"charizard-mega-x"` → base `charizard`, tag [`FormTag::MegaX`], suffix `mega-x`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormName {
    pub base: String,
    pub tag: FormTag,
    pub suffix: Option<String>,
}

impl FormName {
    /// Parse a bare PokeAPI pokemon name. Without the species name at hand, an unknown suffix
    /// cannot be told apart from a hyphenated species (`mr-mime`), so such names parse as base
    /// forms.
    pub fn parse(name: &str) -> FormName {
        let tokens: Vec<&str> = name.split('-').collect();
        for index in 1..tokens.len() {
            if let Some(tag) = FormTag::from_tokens(&tokens[index..]) {
                return FormName {
                    base: tokens[..index].join("-"),
                    tag,
                    suffix: Some(tokens[index..].join("-")),
                };
            }
        }
        FormName {
            base: name.to_string(),
            tag: FormTag::None,
            suffix: None,
        }
    }

    /// Classify a variety of a known species. Any non-empty suffix without a dedicated tag
    /// becomes [`FormTag::Other`].
    pub fn for_species(species: &str, variety: &str) -> FormName {
        let suffix = variety
            .strip_prefix(species)
            .and_then(|rest| rest.strip_prefix('-'))
            .filter(|rest| !rest.is_empty());

        match suffix {
            None if variety == species => FormName {
                base: species.to_string(),
                tag: FormTag::None,
                suffix: None,
            },
            None => FormName::parse(variety),
            Some(suffix) => {
                let tokens: Vec<&str> = suffix.split('-').collect();
                let tag = (0..tokens.len())
                    .find_map(|index| FormTag::from_tokens(&tokens[index..]))
                    .unwrap_or(FormTag::Other);
                FormName {
                    base: species.to_string(),
                    tag,
                    suffix: Some(suffix.to_string()),
                }
            }
        }
    }

    pub fn is_base(&self) -> bool {
        self.tag == FormTag::None
    }

    /// Human readable label, e.g. "Alolan Raichu" or "Giratina (Origin Forme)".
    pub fn label(&self) -> String {
        let base = format_display_name(&self.base);
        match self.tag {
            FormTag::None => base,
            FormTag::Mega => format!("Mega {}", base),
            FormTag::MegaX => format!("Mega {} X", base),
            FormTag::MegaY => format!("Mega {} Y", base),
            FormTag::Alolan => format!("Alolan {}", base),
            FormTag::Galarian => format!("Galarian {}", base),
            FormTag::Hisuian => format!("Hisuian {}", base),
            FormTag::Paldean => format!("Paldean {}", base),
            FormTag::Gmax => format!("Gigantamax {}", base),
            FormTag::Primal => format!("Primal {}", base),
            FormTag::Origin => format!("{} (Origin Forme)", base),
            FormTag::Sky => format!("{} (Sky Forme)", base),
            FormTag::Therian => format!("{} (Therian Forme)", base),
            FormTag::Black => format!("Black {}", base),
            FormTag::White => format!("White {}", base),
            FormTag::Other => match &self.suffix {
                Some(suffix) => format!("{} ({})", base, format_display_name(suffix)),
                None => base,
            },
        }
    }
}

impl fmt::Display for FormName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.suffix {
            Some(suffix) => write!(f, "{}-{}", self.base, suffix),
            None => write!(f, "{}", self.base),
        }
    }
}
