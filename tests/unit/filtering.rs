// tests/unit/filtering.rs
//! Unit tests for the live filter over accumulated items

use catalog_scroll::{filter_items, no_results_found, Item};
use pretty_assertions::assert_eq;

fn catalog() -> Vec<Item> {
    ["The Birds", "Rear Window", "Family Pot", "Rear Window", "Window Shopping"]
        .into_iter()
        .map(Item::new)
        .collect()
}

fn names(items: &[Item]) -> Vec<&str> {
    items.iter().map(|i| i.name.as_str()).collect()
}

#[cfg(test)]
mod query_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_query_keeps_everything_in_order() {
        let items = catalog();
        assert_eq!(filter_items(&items, ""), items);
    }

    #[test]
    fn match_ignores_case_and_position() {
        let items = catalog();

        assert_eq!(
            names(&filter_items(&items, "WiNdOw")),
            vec!["Rear Window", "Rear Window", "Window Shopping"]
        );
        assert_eq!(names(&filter_items(&items, "pot")), vec!["Family Pot"]);
    }

    #[test]
    fn duplicates_are_both_kept() {
        let items = catalog();
        assert_eq!(filter_items(&items, "rear").len(), 2);
    }

    #[test]
    fn filtering_is_idempotent() {
        let items = catalog();
        let once = filter_items(&items, "w");
        assert_eq!(filter_items(&once, "w"), once);
    }
}

#[cfg(test)]
mod no_results_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn no_results_needs_a_query() {
        let items = catalog();

        let filtered = filter_items(&items, "zzz");
        assert!(filtered.is_empty());
        assert!(no_results_found(&filtered, "zzz"));

        assert!(!no_results_found(&[], ""));
        assert!(!no_results_found(&filter_items(&items, "bird"), "bird"));
    }
}
