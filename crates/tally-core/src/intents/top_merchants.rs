//! Top merchants intent
//!
//! Examples:
//!   "What are my top merchants in FY25?"
//!   "Top merchants in August?"
//!   "Who did I spend the most with in June?"

use crate::error::Result;
use crate::models::{ChartSpec, Intent, IntentReply};

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
            "Your top merchants by spend are {}, with a total of {} across {} transactions.",
            names.join(", "),
            usd(agg.total_spend),
            agg.matches
        )
    } else {
        format!(
            "I found {} in spend across {} transactions, but could not identify distinct top merchants.",
            usd(agg.total_spend),
            agg.matches
        )
    };

    let chart = if !agg.top_merchants.is_empty() {
        Some(ChartSpec::bar("Top merchants by spend", &agg.top_merchants))
    } else {
        None
    };

    Ok(IntentReply {
        intent: Intent::TopMerchants,
        answer,
        details: standard_details(&agg),
        chart,
        data: full_data(question, &agg),
    })
}
