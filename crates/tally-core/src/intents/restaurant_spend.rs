//! Restaurant spend intent
//!
//! Examples:
//!   "How much did I spend at restaurants in June?"
//!   "What did Thai food cost me this year?"

use crate::error::Result;
use crate::models::{ranked_objects, round2, ChartSpec, Intent, IntentReply};

use super::{usd, AgentContext};

pub async fn handle(question: &str, ctx: &AgentContext) -> Result<IntentReply> {
    let agg = ctx.retriever.restaurant_spend(question).await?;

    let answer = format!(
        "You spent {} at restaurants across {} visits.",
        usd(agg.total_spend),
        agg.matches
    );

    let details = serde_json::json!({
        "total_restaurant_spend": round2(agg.total_spend),
        "total_visits": agg.matches,
        "top_restaurants": ranked_objects(&agg.top_merchants, "merchant"),
        "top_cuisines": ranked_objects(&agg.top_cuisines, "cuisine"),
        "top_categories": ranked_objects(&agg.top_categories, "category"),
    });

    let chart = if !agg.top_merchants.is_empty() {
        Some(ChartSpec::bar("Top restaurants by spend", &agg.top_merchants))
    } else {
        None
    };

    Ok(IntentReply {
        intent: Intent::RestaurantSpend,
        answer,
        details,
        chart,
        data: agg.to_restaurant_data(question),
    })
}
