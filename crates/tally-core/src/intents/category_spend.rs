//! Category spend intent
//!
//! Examples:
//!   "How much did I spend on Shopping in June?"
//!   "Gas spend in August?"
//!   "What did I spend on Groceries in May?"

use crate::error::Result;
use crate::lexicon;
use crate::models::{ChartSpec, Intent, IntentReply};

use super::{full_data, standard_details, usd, AgentContext};

pub async fn handle(question: &str, ctx: &AgentContext) -> Result<IntentReply> {
    // Same query pipeline; the retriever applies the category filter
    // based on the question itself
    let agg = ctx.retriever.query(question).await?;

    let requested = lexicon::requested_categories(question);
    let category_label = if !requested.is_empty() {
        requested.join(", ")
    } else if let Some(top) = agg.top_categories.first() {
        top.name.clone()
    } else {
        "the selected category".to_string()
    };

    let answer = format!(
        "You spent {} in {} across {} transactions.",
        usd(agg.total_spend),
        category_label,
        agg.matches
    );

    // For a single category the merchant breakdown is usually the more
    // interesting chart
    let chart = if !agg.top_merchants.is_empty() {
        Some(ChartSpec::bar(
            format!("Spend by merchant in {}", category_label),
            &agg.top_merchants,
        ))
    } else if !agg.top_categories.is_empty() {
        Some(ChartSpec::bar(
            format!("{} category breakdown", category_label),
            &agg.top_categories,
        ))
    } else {
        None
    };

    Ok(IntentReply {
        intent: Intent::CategorySpend,
        answer,
        details: standard_details(&agg),
        chart,
        data: full_data(question, &agg),
    })
}
