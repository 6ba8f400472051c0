// tests/unit/api_parsing.rs
//! Unit tests for page response parsing

use catalog_scroll::api::responses::{PageEnvelope, ToDomain};
use catalog_scroll::{parse_page_body, FetchErrorKind, Item, PageIndex};
use pretty_assertions::assert_eq;

fn index(n: u32) -> PageIndex {
    PageIndex::new(n).expect("page indices start at 1")
}

#[cfg(test)]
mod page_parsing_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_fixture_page_one() {
        let json = include_str!("../fixtures/catalog/page1.json");

        let envelope: PageEnvelope =
            serde_json::from_str(json).expect("Failed to parse PageEnvelope");
        let page = envelope.to_domain();

        assert_eq!(page.title, "Romantic Comedy");
        assert_eq!(
            page.items,
            vec![
                Item::new("The Birds").with_poster("poster1.jpg"),
                Item::new("Rear Window").with_poster("poster2.jpg"),
                Item::new("Family Pot").with_poster("poster3.jpg"),
            ]
        );
    }

    #[test]
    fn parse_page_with_missing_poster() {
        let json = include_str!("../fixtures/catalog/page2.json");

        let page = parse_page_body(json, index(2), "page2.json").expect("page 2 should parse");

        assert_eq!(page.items.len(), 3);
        assert_eq!(page.items[2], Item::new("Rear Window"));
    }

    #[test]
    fn empty_poster_string_counts_as_missing() {
        let json = r#"{
            "page": {
                "title": "Thriller",
                "content-items": { "content": [ { "name": "Vertigo", "poster-image": "" } ] }
            }
        }"#;

        let page = parse_page_body(json, index(1), "inline").expect("page should parse");

        assert_eq!(page.items, vec![Item::new("Vertigo")]);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let json = r#"{
            "page": {
                "title": "Thriller",
                "total-content-items": "54",
                "page-num-requested": "1",
                "content-items": {
                    "content": [ { "name": "Psycho", "rating": 5, "poster-image": "p.jpg" } ]
                }
            },
            "served-by": "edge-1"
        }"#;

        let page = parse_page_body(json, index(1), "inline").expect("page should parse");

        assert_eq!(page.title, "Thriller");
        assert_eq!(page.items, vec![Item::new("Psycho").with_poster("p.jpg")]);
    }
}

#[cfg(test)]
mod malformed_page_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn non_json_body_is_a_decode_failure() {
        let error = parse_page_body("<html>502 Bad Gateway</html>", index(3), "inline")
            .expect_err("HTML is not a page");

        assert_eq!(error.kind, FetchErrorKind::Decode);
        assert_eq!(error.page_index, index(3));
        assert!(error.message.contains("502 Bad Gateway"));
    }

    #[test]
    fn missing_page_object_is_a_decode_failure() {
        let error = parse_page_body(r#"{"title": "flat"}"#, index(1), "inline")
            .expect_err("the envelope is required");

        assert_eq!(error.kind, FetchErrorKind::Decode);
    }
}
