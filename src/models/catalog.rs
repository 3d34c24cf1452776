#[derive(Debug, Clone, Copy)]
pub struct TravelCategory {
    pub slug: &'static str,
    pub name: &'static str,
    pub tint: &'static str,
}

pub const CATEGORIES: [TravelCategory; 4] = [
    TravelCategory {
        slug: "sea",
        name: "Sea Travel",
        tint: "#d9f7f5",
    },
    TravelCategory {
        slug: "mountain",
        name: "Mountain tourism",
        tint: "#cce5ff",
    },
    TravelCategory {
        slug: "urban",
        name: "Urban tourism",
        tint: "#ffe5f2",
    },
    TravelCategory {
        slug: "rural",
        name: "Rural tourism",
        tint: "#d9d9ff",
    },
];

pub fn find_category(slug: &str) -> Option<&'static TravelCategory> {
    CATEGORIES.iter().find(|category| category.slug == slug)
}

pub fn places(slug: &str) -> &'static [&'static str] {
    match slug {
        "sea" => &["Coral Island", "Phuket Beach", "Samet Island", "Similan"],
        "mountain" => &["Doi Inthanon", "Chiang Dao", "Phu Chi Fa", "Khao Kho"],
        "urban" => &["Bangkok", "Singapore", "Tokyo", "New York"],
        "rural" => &["Pai Village", "Sukhothai", "Ubon Retreat", "Nan Fields"],
        _ => &[],
    }
}

// Linear, case-insensitive substring filter; an empty query matches all.
pub fn search_places(slug: &str, query: &str) -> Vec<&'static str> {
    let needle = query.trim().to_lowercase();
    places(slug)
        .iter()
        .filter(|place| needle.is_empty() || place.to_lowercase().contains(&needle))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_places() {
        for category in &CATEGORIES {
            assert!(!places(category.slug).is_empty(), "{}", category.slug);
        }
    }

    #[test]
    fn unknown_slug_has_no_category_and_no_places() {
        assert!(find_category("space").is_none());
        assert!(places("space").is_empty());
    }

    #[test]
    fn search_is_case_insensitive() {
        assert_eq!(search_places("sea", "coral"), ["Coral Island"]);
        assert_eq!(search_places("urban", "TOK"), ["Tokyo"]);
    }

    #[test]
    fn empty_query_returns_everything() {
        assert_eq!(search_places("rural", ""), places("rural"));
        assert_eq!(search_places("rural", "   "), places("rural"));
    }

    #[test]
    fn unmatched_query_returns_nothing() {
        assert!(search_places("sea", "volcano").is_empty());
    }
}
