//! Eco-point rewards derived from a disposal category.

/// Map a disposal category to the eco points it earns.
///
/// Case-insensitive; stored casing is inconsistent. Categories outside the
/// known table earn 1 point, while an explicit `unknown` earns none.
pub fn points_for_category(category: &str) -> u32 {
    match category.to_lowercase().as_str() {
        "recyclable" => 10,
        "biodegradable" => 5,
        "hazardous" => 2,
        "non-recyclable" => 1,
        "unknown" => 0,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories() {
        assert_eq!(points_for_category("recyclable"), 10);
        assert_eq!(points_for_category("biodegradable"), 5);
        assert_eq!(points_for_category("hazardous"), 2);
        assert_eq!(points_for_category("non-recyclable"), 1);
        assert_eq!(points_for_category("unknown"), 0);
    }

    #[test]
    fn category_match_ignores_case() {
        assert_eq!(points_for_category("Recyclable"), 10);
        assert_eq!(points_for_category("HAZARDOUS"), 2);
    }

    #[test]
    fn unrecognized_category_earns_one_point() {
        assert_eq!(points_for_category("compostable"), 1);
        assert_eq!(points_for_category(""), 1);
    }
}
