//! Month comparison intent
//!
//! Examples:
//!   "Compare June vs August"
//!   "What's the difference between May and September spend?"
//!
//! Issues one aggregation per detected month by synthesizing an
//! overall-spend sub-question for each, then states the signed difference.

use crate::error::Result;
use crate::models::{ChartSpec, Intent, IntentReply};
use crate::period;

use super::{full_data, standard_details, usd, AgentContext};

pub async fn handle(question: &str, ctx: &AgentContext) -> Result<IntentReply> {
    let months = period::mentioned_months(question);

    // Fewer than two months: degrade to a single-summary answer
    if months.len() < 2 {
        let agg = ctx.retriever.query(question).await?;
        let answer = format!(
            "I couldn't clearly detect two months to compare. Here's what I found: {} from {} transactions.",
            usd(agg.total_spend),
            agg.matches
        );
        return Ok(IntentReply {
            intent: Intent::CompareMonths,
            answer,
            details: standard_details(&agg),
            chart: None,
            data: full_data(question, &agg),
        });
    }

    let year = ctx.retriever.config().window.year;
    let (m1, m2) = (months[0], months[1]);
    let (name1, name2) = (period::month_name(m1), period::month_name(m2));

    // Two independent aggregations through the normal query path
    let q1 = format!("How much did I spend overall in {} {}?", name1, year);
    let q2 = format!("How much did I spend overall in {} {}?", name2, year);
    let agg1 = ctx.retriever.query(&q1).await?;
    let agg2 = ctx.retriever.query(&q2).await?;

    let (t1, t2) = (agg1.total_spend, agg2.total_spend);
    let mut answer = format!(
        "In {} {} you spent {}, and in {} {} you spent {}. ",
        name1,
        year,
        usd(t1),
        name2,
        year,
        usd(t2)
    );
    if t1 > t2 {
        answer.push_str(&format!("You spent {} more in {}.", usd(t1 - t2), name1));
    } else if t2 > t1 {
        answer.push_str(&format!("You spent {} more in {}.", usd(t2 - t1), name2));
    } else {
        answer.push_str("Your spending was the same in both months.");
    }

    let label1 = format!("{} {}", name1, year);
    let label2 = format!("{} {}", name2, year);

    let details = serde_json::json!({
        "matches": agg1.matches + agg2.matches,
        "top_merchants": [],
        "top_categories": [],
        "top_cuisines": [],
    });

    let chart = ChartSpec {
        chart_type: "bar".to_string(),
        labels: vec![label1.clone(), label2.clone()],
        values: vec![t1, t2],
        title: "Month-over-Month Spend Comparison".to_string(),
    };

    let data = serde_json::json!({
        "month1": { "name": label1, "total_spend": t1 },
        "month2": { "name": label2, "total_spend": t2 },
    });

    Ok(IntentReply {
        intent: Intent::CompareMonths,
        answer,
        details,
        chart: Some(chart),
        data,
    })
}
