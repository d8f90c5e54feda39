//! Recurring merchants intent
//!
//! Examples:
//!   "What recurring charges do I have?"
//!   "Show my subscriptions"

use crate::error::Result;
use crate::models::{Intent, IntentReply};

use super::{full_data, standard_details, usd, AgentContext};

pub async fn handle(question: &str, ctx: &AgentContext) -> Result<IntentReply> {
    let agg = ctx.retriever.query(question).await?;

    let answer = if !agg.top_merchants.is_empty() {
        let names: Vec<&str> = agg
            .top_merchants
            .iter()
            .take(3)
            .map(|m| m.name.as_str())
            .collect();
        format!(
            "Likely recurring merchants include {}, totaling {} across {} transactions.",
            names.join(", "),
            usd(agg.total_spend),
            agg.matches
        )
    } else {
        "I couldn't find any recurring merchants for that period.".to_string()
    };

    Ok(IntentReply {
        intent: Intent::RecurringMerchants,
        answer,
        details: standard_details(&agg),
        chart: None,
        data: full_data(question, &agg),
    })
}
