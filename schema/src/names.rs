/// Turn a hyphenated identifier into a display label: `"mr-mime"` → `"Mr Mime"`.
pub fn format_display_name(raw: &str) -> String {
    raw.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize any name to the battle-reference id format: lowercase ASCII alphanumerics only.
/// `"Mr. Mime"` and `"mr-mime"` both become `"mrmime"`.
pub fn to_showdown_id(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Inverse of [`format_display_name`] for user-entered labels: `"Choice Band"` → `"choice-band"`.
pub fn to_slug(raw: &str) -> String {
    raw.split(|c: char| c.is_whitespace() || c == '-')
        .filter(|word| !word.is_empty())
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("pikachu", "Pikachu")]
    #[case("mr-mime", "Mr Mime")]
    #[case("swords-dance", "Swords Dance")]
    #[case("charizard-mega-x", "Charizard Mega X")]
    #[case("", "")]
    fn test_format_display_name(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(format_display_name(raw), expected);
    }

    #[rstest]
    #[case("Mr. Mime", "mrmime")]
    #[case("mr-mime", "mrmime")]
    #[case("Swords Dance", "swordsdance")]
    #[case("Porygon-Z", "porygonz")]
    fn test_to_showdown_id(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(to_showdown_id(raw), expected);
    }

    #[test]
    fn test_slug_round_trips_display_name() {
        assert_eq!(to_slug("Swords Dance"), "swords-dance");
        assert_eq!(to_slug(&format_display_name("u-turn")), "u-turn");
    }
}
