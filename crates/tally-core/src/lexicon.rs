//! Category and cuisine lexicon
//!
//! Static mapping tables from free-text question keywords to canonical
//! category labels and cuisine tokens, plus the restaurant-indicative
//! description substrings used as a last-resort restaurant check.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

/// Cuisine tokens matched as plain substrings of the question
pub const CUISINE_KEYWORDS: &[&str] = &[
    "mexican",
    "italian",
    "indian",
    "japanese",
    "chinese",
    "thai",
    "sushi",
    "korean",
    "mediterranean",
    "greek",
    "vietnamese",
    "american",
    "pizza",
    "burger",
    "coffee",
    "bakery",
];

/// Question keyword -> canonical category label
pub const CATEGORY_MAP: &[(&str, &str)] = &[
    ("professional", "Professional Services"),
    ("shopping", "Shopping"),
    ("fee", "Fees & Adjustments"),
    ("education", "Education"),
    ("personal", "Personal"),
    ("food", "Food & Drink"),
    ("restaurant", "Food & Drink"),
    ("dining", "Food & Drink"),
    ("automotive", "Automotive"),
    ("entertainment", "Entertainment"),
    ("travel", "Travel"),
    ("donation", "Gifts & Donations"),
    ("gift", "Gifts & Donations"),
    ("grocery", "Groceries"),
    ("supermarket", "Groceries"),
    ("gas", "Gas"),
    ("fuel", "Gas"),
    ("home", "Home"),
    ("bill", "Bills & Utilities"),
    ("utility", "Bills & Utilities"),
    ("electric", "Bills & Utilities"),
    ("water", "Bills & Utilities"),
    ("health", "Health & Wellness"),
    ("pharmacy", "Health & Wellness"),
    ("wellness", "Health & Wellness"),
    ("gym", "Health & Wellness"),
];

/// Description substrings that mark a transaction as restaurant-like
/// when neither the category nor the enrichment labels settle it
pub const RESTAURANT_TERMS: &[&str] = &[
    "restaurant",
    "cafe",
    "bar",
    "grill",
    "taco",
    "pizza",
    "pizzeria",
    "kitchen",
    "eatery",
    "burger",
    "bbq",
    "brunch",
    "bistro",
    "brew",
    "donut",
    "doughnut",
];

fn word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\w+\b").expect("valid regex"))
}

/// Lower-cased word set of the question
fn question_words(text: &str) -> HashSet<String> {
    let q = text.to_lowercase();
    word_regex()
        .find_iter(&q)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Canonical categories requested by the question
///
/// Word-boundary matching with naive plural handling: a keyword matches
/// itself or itself + "s" ("gift" matches "gifts", but "grocery" does not
/// match "groceries"). First-seen order of the keyword table is preserved,
/// deduplicated by canonical label.
pub fn requested_categories(text: &str) -> Vec<&'static str> {
    let words = question_words(text);
    let mut cats: Vec<&'static str> = Vec::new();

    for (keyword, label) in CATEGORY_MAP {
        let plural = format!("{}s", keyword);
        if (words.contains(*keyword) || words.contains(&plural)) && !cats.contains(label) {
            cats.push(label);
        }
    }

    cats
}

/// Cuisine tokens mentioned in the question, substring matched
pub fn requested_cuisines(text: &str) -> Vec<&'static str> {
    let q = text.to_lowercase();
    CUISINE_KEYWORDS
        .iter()
        .filter(|c| q.contains(**c))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_categories_word_boundary() {
        let cats = requested_categories("How much did I spend on shopping in June?");
        assert_eq!(cats, vec!["Shopping"]);

        // "gas" must not fire inside "gasket" - category detection is
        // word-boundary based, unlike the router's substring scoring
        let cats = requested_categories("did the gasket repair cost much");
        assert!(cats.is_empty());
    }

    #[test]
    fn test_requested_categories_plural() {
        let cats = requested_categories("total on gifts and bills please");
        assert_eq!(cats, vec!["Gifts & Donations", "Bills & Utilities"]);
    }

    #[test]
    fn test_requested_categories_dedupes_canonical_label() {
        // "food" and "dining" both map to Food & Drink
        let cats = requested_categories("food and dining spend");
        assert_eq!(cats, vec!["Food & Drink"]);
    }

    #[test]
    fn test_requested_cuisines_substring() {
        let cuisines = requested_cuisines("How much Thai and sushi did I eat?");
        assert_eq!(cuisines, vec!["thai", "sushi"]);

        assert!(requested_cuisines("overall spend in June").is_empty());
    }
}
