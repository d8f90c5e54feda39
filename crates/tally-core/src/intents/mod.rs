//! Intent handlers
//!
//! One module per intent, all sharing a single fixed contract:
//! `handle(question, &AgentContext) -> Result<IntentReply>`. Handlers call
//! the retriever (once, or twice for month comparison), turn the
//! aggregation into an answer sentence, a details object, and an optional
//! bar chart. No handler mutates shared state.

pub mod category_spend;
pub mod compare_months;
pub mod fallback;
pub mod large_purchases;
pub mod monthly_summary;
pub mod overall_spend;
pub mod recurring_merchants;
pub mod restaurant_spend;
pub mod top_merchants;

use serde_json::Value;

use crate::error::Result;
use crate::models::{ranked_objects, round2, Aggregation, Intent, IntentReply};
use crate::retriever::Retriever;

/// Shared context threaded through every handler
///
/// Constructed explicitly at startup; there is no module-level state.
pub struct AgentContext {
    pub retriever: Retriever,
}

impl AgentContext {
    pub fn new(retriever: Retriever) -> Self {
        Self { retriever }
    }
}

/// Dispatch a question to the handler registered for the intent
pub async fn dispatch(intent: Intent, question: &str, ctx: &AgentContext) -> Result<IntentReply> {
    match intent {
        Intent::OverallSpend => overall_spend::handle(question, ctx).await,
        Intent::CategorySpend => category_spend::handle(question, ctx).await,
        Intent::RestaurantSpend => restaurant_spend::handle(question, ctx).await,
        Intent::MonthlySummary => monthly_summary::handle(question, ctx).await,
        Intent::CompareMonths => compare_months::handle(question, ctx).await,
        Intent::TopMerchants => top_merchants::handle(question, ctx).await,
        Intent::RecurringMerchants => recurring_merchants::handle(question, ctx).await,
        Intent::LargePurchases => large_purchases::handle(question, ctx).await,
        Intent::Fallback => fallback::handle(question, ctx).await,
    }
}

/// Dollar amount with thousands separators, e.g. `$1,234.56`
pub fn usd(amount: f64) -> String {
    let cents = format!("{:.2}", amount.abs());
    let (int_part, fraction) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let int_grouped: String = grouped.chars().rev().collect();

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, int_grouped, fraction)
}

/// Details block shared by the spend-summary handlers
///
/// The UI reuses its `top_restaurants` slot for merchants on
/// non-restaurant intents.
pub fn standard_details(agg: &Aggregation) -> Value {
    serde_json::json!({
        "matches": agg.matches,
        "total_spend": round2(agg.total_spend),
        "top_restaurants": ranked_objects(&agg.top_merchants, "merchant"),
        "top_categories": ranked_objects(&agg.top_categories, "category"),
        "top_cuisines": ranked_objects(&agg.top_cuisines, "cuisine"),
    })
}

/// Full data payload: the query data plus the UI's merchant slot
pub fn full_data(question: &str, agg: &Aggregation) -> Value {
    let mut data = agg.to_query_data(question);
    if let Some(map) = data.as_object_mut() {
        map.insert(
            "top_restaurants".to_string(),
            Value::Array(ranked_objects(&agg.top_merchants, "merchant")),
        );
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usd_formatting() {
        assert_eq!(usd(0.0), "$0.00");
        assert_eq!(usd(12.5), "$12.50");
        assert_eq!(usd(1234.56), "$1,234.56");
        assert_eq!(usd(1234567.891), "$1,234,567.89");
        assert_eq!(usd(-42.0), "-$42.00");
    }

    #[test]
    fn test_standard_details_shape() {
        let agg = Aggregation {
            matches: 2,
            total_spend: 20.0,
            top_merchants: vec![crate::models::RankedSpend::new("Cafe X", 20.0)],
            ..Default::default()
        };
        let details = standard_details(&agg);
        assert_eq!(details["matches"], 2);
        assert_eq!(details["top_restaurants"][0]["merchant"], "Cafe X");
        assert_eq!(details["top_restaurants"][0]["total_spend"], 20.0);
    }
}
