//! Derived display values, computed at read time and never persisted.

/// Shown in place of the type list when a creature has no type labels.
pub const UNKNOWN_TYPES: &str = "Unknown";
const TYPES_SEPARATOR: &str = " / ";

/// Reverses a name character by character (`"bulbasaur"` → `"ruasablub"`).
pub fn reversed_name(name: &str) -> String {
    name.chars().rev().collect()
}

/// Renders type labels as a human-readable, title-cased list
/// (`["grass", "poison"]` → `"Grass / Poison"`).
pub fn types_display(types: &[String]) -> String {
    if types.is_empty() {
        return UNKNOWN_TYPES.to_string();
    }
    types.iter().map(|t| title_case(t)).collect::<Vec<_>>().join(TYPES_SEPARATOR)
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the
/// rest, so `"mr-mime"` becomes `"Mr-Mime"`.
fn title_case(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut previous_alphabetic = false;
    for c in label.chars() {
        if previous_alphabetic {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        previous_alphabetic = c.is_alphabetic();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("bulbasaur", "ruasablub")]
    #[case("mr-mime", "emim-rm")]
    #[case("nidoran♀", "♀narodin")]
    #[case("", "")]
    fn test_reversed_name(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(reversed_name(input), expected);
    }

    #[rstest]
    #[case(&["grass", "poison"], "Grass / Poison")]
    #[case(&["fire"], "Fire")]
    #[case(&["FLYING"], "Flying")]
    #[case(&["mr-mime"], "Mr-Mime")]
    #[case(&[], "Unknown")]
    fn test_types_display(#[case] types: &[&str], #[case] expected: &str) {
        let types = types.iter().map(|t| t.to_string()).collect::<Vec<_>>();
        assert_eq!(types_display(&types), expected);
    }
}
