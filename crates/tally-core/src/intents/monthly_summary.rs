//! Monthly summary intent
//!
//! Examples:
//!   "Give me a summary for June"
//!   "What is my August breakdown?"
//!   "Monthly overview for September?"

use crate::error::Result;
use crate::models::{ChartSpec, Intent, IntentReply};
use crate::period;

use super::{full_data, standard_details, usd, AgentContext};

pub async fn handle(question: &str, ctx: &AgentContext) -> Result<IntentReply> {
    let agg = ctx.retriever.query(question).await?;

    let month_label = period::mentioned_months(question)
        .first()
        .map(|m| period::month_name(*m))
        .unwrap_or_else(|| "this period".to_string());

    let answer = format!(
        "In {}, you spent {} across {} transactions. Here's a breakdown by category and merchant.",
        month_label,
        usd(agg.total_spend),
        agg.matches
    );

    let chart = if !agg.top_categories.is_empty() {
        Some(ChartSpec::bar(
            format!("{} spend by category", month_label),
            &agg.top_categories,
        ))
    } else if !agg.top_merchants.is_empty() {
        Some(ChartSpec::bar(
            format!("{} spend by merchant", month_label),
            &agg.top_merchants,
        ))
    } else {
        None
    };

    Ok(IntentReply {
        intent: Intent::MonthlySummary,
        answer,
        details: standard_details(&agg),
        chart,
        data: full_data(question, &agg),
    })
}
