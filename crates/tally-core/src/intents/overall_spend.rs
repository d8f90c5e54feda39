//! Overall spend intent
//!
//! Examples:
//!   "How much did I spend overall in June?"
//!   "Total FY25 spend"
//!   "How much did I spend in August?"

use crate::error::Result;
use crate::models::{ChartSpec, Intent, IntentReply};

use super::{full_data, standard_details, usd, AgentContext};

pub async fn handle(question: &str, ctx: &AgentContext) -> Result<IntentReply> {
    let agg = ctx.retriever.query(question).await?;

    let answer = format!(
        "You spent {} overall across {} transactions.",
        usd(agg.total_spend),
        agg.matches
    );

    // Prefer the category breakdown; fall back to merchants
    let chart = if !agg.top_categories.is_empty() {
        Some(ChartSpec::bar(
            "Overall spend by category",
            &agg.top_categories,
        ))
    } else if !agg.top_merchants.is_empty() {
        Some(ChartSpec::bar(
            "Overall spend by merchant",
            &agg.top_merchants,
        ))
    } else {
        None
    };

    Ok(IntentReply {
        intent: Intent::OverallSpend,
        answer,
        details: standard_details(&agg),
        chart,
        data: full_data(question, &agg),
    })
}
