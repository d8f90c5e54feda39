//! Fallback intent
//!
//! Runs when no other intent scores. Answers with a plain summary of
//! whatever the default query pipeline finds.

use crate::error::Result;
use crate::models::{ranked_objects, Intent, IntentReply};

use super::{full_data, usd, AgentContext};

pub async fn handle(question: &str, ctx: &AgentContext) -> Result<IntentReply> {
    let agg = ctx.retriever.query(question).await?;

    let answer = format!(
        "You spent {} across {} transactions.",
        usd(agg.total_spend),
        agg.matches
    );

    let details = serde_json::json!({
        "matches": agg.matches,
        "top_merchants": ranked_objects(&agg.top_merchants, "merchant"),
        "top_categories": ranked_objects(&agg.top_categories, "category"),
        "top_cuisines": ranked_objects(&agg.top_cuisines, "cuisine"),
    });

    Ok(IntentReply {
        intent: Intent::Fallback,
        answer,
        details,
        chart: None,
        data: full_data(question, &agg),
    })
}
