//! Section and title indexing over the article collection.
//!
//! Sections are never stored: they are derived from the collection every time
//! the navigation bar renders, so the lists can never drift from the data.

use std::collections::BTreeSet;

use crate::model::Article;

/// Section key for a title: its first character, uppercased.
///
/// Returns `None` for an empty title. Uppercasing can produce more than one
/// character (`ß` becomes `SS`), so the key is a `String`.
pub fn section_of(title: &str) -> Option<String> {
    title.chars().next().map(|c| c.to_uppercase().collect())
}

/// Sorted, duplicate-free section keys present in `collection`.
pub fn section_keys(collection: &[Article]) -> Vec<String> {
    collection
        .iter()
        .filter_map(Article::section)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Articles belonging to `section`, ordered by title (ties broken by id).
///
/// An absent or empty key selects nothing.
pub fn titles_for_section<'a>(
    collection: &'a [Article],
    section: Option<&str>,
) -> Vec<&'a Article> {
    let Some(section) = section.filter(|s| !s.is_empty()) else {
        return Vec::new();
    };

    let mut titles: Vec<&Article> = collection
        .iter()
        .filter(|article| article.section().as_deref() == Some(section))
        .collect();
    titles.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
    titles
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn article(id: i64, title: &str) -> Article {
        let mut a = Article::draft(title, format!("extract for {title}"));
        a.id = Some(id);
        a
    }

    fn samples() -> Vec<Article> {
        vec![
            article(4, "Alpha Centauri"),
            article(16, "Dominators"),
            article(7, "Cybermen"),
            article(42, "Autons"),
            article(25, "Daleks"),
        ]
    }

    #[test]
    fn test_section_of() {
        assert_eq!(section_of("daleks").as_deref(), Some("D"));
        assert_eq!(section_of("321").as_deref(), Some("3"));
        assert_eq!(section_of("ßeta").as_deref(), Some("SS"));
        assert_eq!(section_of(""), None);
    }

    #[test]
    fn test_section_keys_sorted_and_unique() {
        assert_eq!(section_keys(&samples()), vec!["A", "C", "D"]);
    }

    #[test]
    fn test_section_keys_empty_collection() {
        assert!(section_keys(&[]).is_empty());
    }

    #[test]
    fn test_section_keys_fold_case() {
        let collection = vec![article(1, "apple"), article(2, "Avocado")];
        assert_eq!(section_keys(&collection), vec!["A"]);
    }

    #[test]
    fn test_section_keys_skip_empty_titles() {
        let collection = vec![article(1, ""), article(2, "Zygons")];
        assert_eq!(section_keys(&collection), vec!["Z"]);
    }

    #[test]
    fn test_titles_for_section_sorted_by_title() {
        let collection = samples();
        let titles: Vec<&str> = titles_for_section(&collection, Some("D"))
            .into_iter()
            .map(|a| a.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Daleks", "Dominators"]);
    }

    #[test]
    fn test_titles_for_absent_or_empty_section() {
        let collection = samples();
        assert!(titles_for_section(&collection, None).is_empty());
        assert!(titles_for_section(&collection, Some("")).is_empty());
        assert!(titles_for_section(&collection, Some("Q")).is_empty());
    }

    #[test]
    fn test_titles_for_section_matches_lowercase_titles() {
        let collection = vec![article(1, "daleks"), article(2, "Davros")];
        assert_eq!(titles_for_section(&collection, Some("D")).len(), 2);
    }

    #[test]
    fn test_titles_tie_break_by_id() {
        let collection = vec![article(9, "Ood"), article(3, "Ood")];
        let ids: Vec<_> = titles_for_section(&collection, Some("O"))
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec![Some(3), Some(9)]);
    }

    fn arb_collection() -> impl Strategy<Value = Vec<Article>> {
        prop::collection::vec("[a-zA-Z0-9ß]{0,6}", 0..20).prop_map(|titles| {
            titles
                .iter()
                .enumerate()
                .map(|(i, t)| article(i as i64, t))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_section_keys_sorted_unique_and_complete(collection in arb_collection()) {
            let keys = section_keys(&collection);

            for pair in keys.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }

            let expected: BTreeSet<String> = collection
                .iter()
                .filter_map(|a| a.title.chars().next())
                .map(|c| c.to_uppercase().collect())
                .collect();
            prop_assert_eq!(keys, expected.into_iter().collect::<Vec<_>>());
        }

        #[test]
        fn prop_titles_for_section_exact_membership(
            collection in arb_collection(),
            key in "[A-Z0-9]",
        ) {
            let titles = titles_for_section(&collection, Some(key.as_str()));
            let expected = collection
                .iter()
                .filter(|a| section_of(&a.title).as_deref() == Some(key.as_str()))
                .count();

            prop_assert_eq!(titles.len(), expected);
            for a in titles {
                prop_assert_eq!(section_of(&a.title), Some(key.clone()));
            }
        }
    }
}
