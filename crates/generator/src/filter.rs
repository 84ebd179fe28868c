//! Search filtering over the blog listing.
//!
//! The browser runs the same algorithm in `site.js`; this version backs the
//! `search` command and the preview server's search endpoint.

use blogkit_core::{DisplayableItem, Visibility};

/// Whether `item` matches `query` (case-insensitive substring of title or excerpt)
pub fn matches(item: &DisplayableItem, query: &str) -> bool {
    matches_lowercase(item, &query.to_lowercase())
}

fn matches_lowercase(item: &DisplayableItem, query: &str) -> bool {
    item.title.to_lowercase().contains(query) || item.excerpt.to_lowercase().contains(query)
}

/// Show the items matching `query` and hide the rest.
///
/// An empty query shows everything.
pub fn apply_filter(items: &mut [DisplayableItem], query: &str) {
    let query = query.to_lowercase();
    for item in items.iter_mut() {
        item.visibility = if matches_lowercase(item, &query) {
            Visibility::Shown
        } else {
            Visibility::Hidden
        };
    }
}

/// Items currently shown
pub fn visible(items: &[DisplayableItem]) -> impl Iterator<Item = &DisplayableItem> {
    items.iter().filter(|item| item.is_visible())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<DisplayableItem> {
        vec![
            DisplayableItem::new("neural-nets", "Neural Nets", "ml"),
            DisplayableItem::new("jazz", "Jazz", "music"),
        ]
    }

    fn visible_slugs(items: &[DisplayableItem]) -> Vec<&str> {
        visible(items).map(|i| i.slug.as_str()).collect()
    }

    #[test]
    fn test_query_matches_title() {
        let mut items = items();
        apply_filter(&mut items, "jaz");
        assert_eq!(visible_slugs(&items), vec!["jazz"]);
        assert_eq!(items[0].visibility, Visibility::Hidden);
    }

    #[test]
    fn test_query_matches_excerpt() {
        let mut items = items();
        apply_filter(&mut items, "ML");
        assert_eq!(visible_slugs(&items), vec!["neural-nets"]);
    }

    #[test]
    fn test_empty_query_shows_all() {
        let mut items = items();
        apply_filter(&mut items, "zzz");
        assert!(visible_slugs(&items).is_empty());

        apply_filter(&mut items, "");
        assert_eq!(visible_slugs(&items), vec!["neural-nets", "jazz"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let mut once = items();
        apply_filter(&mut once, "n");
        let mut twice = once.clone();
        apply_filter(&mut twice, "n");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_missing_text_treated_as_empty() {
        let mut items = vec![DisplayableItem::new("blank", "", "")];
        apply_filter(&mut items, "");
        assert!(items[0].is_visible());

        apply_filter(&mut items, "a");
        assert!(!items[0].is_visible());
    }

    #[test]
    fn test_mixed_case_item_text() {
        let item = DisplayableItem {
            slug: "x".to_string(),
            title: "Jazz Theory".to_string(),
            excerpt: String::new(),
            visibility: Visibility::Hidden,
        };
        assert!(matches(&item, "THEORY"));
        assert!(!matches(&item, "nets"));
    }

    #[test]
    fn test_visibility_matches_predicate_for_every_query() {
        for query in ["", "n", "ne", "jazz", "MUSIC", "xyz", " "] {
            let mut filtered = items();
            apply_filter(&mut filtered, query);
            for item in &filtered {
                assert_eq!(item.is_visible(), matches(item, query), "query {:?}", query);
            }
        }
    }
}
