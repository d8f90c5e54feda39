//! Intent router
//!
//! Scores each question against per-intent keyword lists and picks the
//! highest-scoring intent. Scoring is deliberately simple substring
//! counting, not token-boundary-aware: "gas" matches inside "gasket".
//! That looseness is observed upstream behavior and is pinned by a test
//! rather than silently corrected.

use tracing::debug;

use crate::models::Intent;

/// Registration table: intent + keyword list, in registration order.
/// Ties keep the earliest entry because only a strictly greater score
/// replaces the leader. Fallback carries no keywords and wins only when
/// nothing scores.
const REGISTRATIONS: &[(Intent, &[&str])] = &[
    (
        Intent::OverallSpend,
        &["overall", "total", "all", "everything", "spend"],
    ),
    (
        Intent::CategorySpend,
        &[
            "category",
            "categories",
            "shopping",
            "groceries",
            "grocery",
            "gas",
            "fuel",
            "bills",
            "utilities",
            "entertainment",
            "travel",
        ],
    ),
    (
        Intent::RestaurantSpend,
        &[
            "restaurant",
            "restaurants",
            "dining",
            "dine",
            "food",
            "meal",
            "meals",
            "eat",
            "ate",
            "eating",
            "cuisine",
            "cuisines",
            "lunch",
            "dinner",
            "breakfast",
        ],
    ),
    (
        Intent::MonthlySummary,
        &["summary", "breakdown", "overview", "snapshot", "monthly"],
    ),
    (Intent::CompareMonths, &["compare", "vs", "difference"]),
    (
        Intent::TopMerchants,
        &[
            "top merchants",
            "top merchant",
            "largest merchants",
            "biggest merchants",
            "favorite merchants",
            "top spend",
        ],
    ),
    (
        Intent::RecurringMerchants,
        &["recurring", "repeat", "subscription"],
    ),
    (
        Intent::LargePurchases,
        &["large", "big", "expensive", "high value"],
    ),
    (Intent::Fallback, &[]),
];

/// Keyword-scoring intent classifier over a static registration table
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentRouter;

impl IntentRouter {
    pub fn new() -> Self {
        Self
    }

    /// The single best-matching intent for the question
    pub fn detect(&self, question: &str) -> Intent {
        let q = question.to_lowercase();

        let mut best_intent = Intent::Fallback;
        let mut best_score = 0usize;

        for (intent, keywords) in REGISTRATIONS {
            let score = keywords.iter().filter(|kw| q.contains(**kw)).count();
            if score > best_score {
                best_intent = *intent;
                best_score = score;
            }
        }

        debug!(intent = %best_intent, score = best_score, "Intent detected");
        best_intent
    }

    /// Registered keyword list for one intent
    pub fn keywords(&self, intent: Intent) -> &'static [&'static str] {
        REGISTRATIONS
            .iter()
            .find(|(i, _)| *i == intent)
            .map(|(_, kw)| *kw)
            .unwrap_or(&[])
    }
}
