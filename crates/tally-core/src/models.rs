//! Domain models for Tally

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Cuisine labels attached to a record by the offline merchant enrichment.
///
/// Upstream metadata serializes this field as a string, a list of strings,
/// or null, so deserialization has to accept all three shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CuisineLabels {
    One(String),
    Many(Vec<String>),
}

impl CuisineLabels {
    /// Normalized, non-empty labels
    pub fn labels(&self) -> Vec<&str> {
        match self {
            Self::One(s) => {
                let s = s.trim();
                if s.is_empty() {
                    vec![]
                } else {
                    vec![s]
                }
            }
            Self::Many(list) => list
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

/// A single enriched transaction from the upstream source
///
/// Field names mirror the metadata file written by the index builder,
/// which in turn mirrors the upstream transactions API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(default)]
    pub id: Option<i64>,
    /// Raw date string, e.g. "2025-06-01" or "2025-06-01T00:00:00".
    /// Kept unparsed: records with malformed dates are skipped at query
    /// time, never rejected at load time.
    #[serde(rename = "transactionDate", default)]
    pub transaction_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "merchantName", default)]
    pub merchant_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(rename = "restaurantType", default)]
    pub restaurant_type: Option<CuisineLabels>,
    #[serde(default)]
    pub amount: Option<f64>,
}

impl TransactionRecord {
    /// Parse the calendar date, tolerating a trailing time component
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let raw = self.transaction_date.as_deref()?;
        let date_part = raw.split('T').next()?;
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }

    /// Cuisine labels, empty when the enrichment left none
    pub fn cuisine_labels(&self) -> Vec<&str> {
        self.restaurant_type
            .as_ref()
            .map(|rt| rt.labels())
            .unwrap_or_default()
    }

    /// Display name for grouping: merchant, else description, else "Unknown"
    pub fn display_name(&self) -> &str {
        self.merchant_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.description.as_deref())
            .filter(|s| !s.is_empty())
            .unwrap_or("Unknown")
    }
}

/// The classified purpose of a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    OverallSpend,
    CategorySpend,
    RestaurantSpend,
    MonthlySummary,
    CompareMonths,
    TopMerchants,
    RecurringMerchants,
    LargePurchases,
    Fallback,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OverallSpend => "overall_spend",
            Self::CategorySpend => "category_spend",
            Self::RestaurantSpend => "restaurant_spend",
            Self::MonthlySummary => "monthly_summary",
            Self::CompareMonths => "compare_months",
            Self::TopMerchants => "top_merchants",
            Self::RecurringMerchants => "recurring_merchants",
            Self::LargePurchases => "large_purchases",
            Self::Fallback => "fallback",
        }
    }
}

impl std::str::FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "overall_spend" => Ok(Self::OverallSpend),
            "category_spend" => Ok(Self::CategorySpend),
            "restaurant_spend" => Ok(Self::RestaurantSpend),
            "monthly_summary" => Ok(Self::MonthlySummary),
            "compare_months" => Ok(Self::CompareMonths),
            "top_merchants" => Ok(Self::TopMerchants),
            "recurring_merchants" => Ok(Self::RecurringMerchants),
            "large_purchases" => Ok(Self::LargePurchases),
            "fallback" => Ok(Self::Fallback),
            _ => Err(format!("Unknown intent: {}", s)),
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of a top-N spend breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSpend {
    pub name: String,
    pub total_spend: f64,
}

impl RankedSpend {
    pub fn new(name: impl Into<String>, total_spend: f64) -> Self {
        Self {
            name: name.into(),
            total_spend,
        }
    }
}

/// Result of one filtered aggregation pass over the store
///
/// Created fresh per query, never persisted. Top-N lists are sorted
/// descending by amount and truncated to five entries; ties keep
/// first-seen order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Aggregation {
    pub matches: usize,
    pub total_spend: f64,
    pub top_merchants: Vec<RankedSpend>,
    pub top_categories: Vec<RankedSpend>,
    pub top_cuisines: Vec<RankedSpend>,
}

impl Aggregation {
    /// Data payload in the shape the UI expects for general queries
    pub fn to_query_data(&self, question: &str) -> Value {
        serde_json::json!({
            "query": question,
            "matches": self.matches,
            "total_spend": round2(self.total_spend),
            "top_merchants": ranked_objects(&self.top_merchants, "merchant"),
            "top_categories": ranked_objects(&self.top_categories, "category"),
            "top_cuisines": ranked_objects(&self.top_cuisines, "cuisine"),
        })
    }

    /// Data payload in the shape the UI expects for restaurant queries
    pub fn to_restaurant_data(&self, question: &str) -> Value {
        serde_json::json!({
            "query": question,
            // legacy fields
            "matches": self.matches,
            "total": round2(self.total_spend),
            // normalized fields for the UI
            "total_restaurant_spend": round2(self.total_spend),
            "total_visits": self.matches,
            "top_restaurants": ranked_objects(&self.top_merchants, "merchant"),
            "top_categories": ranked_objects(&self.top_categories, "category"),
            "top_cuisines": ranked_objects(&self.top_cuisines, "cuisine"),
        })
    }
}

/// Convert ranked entries into `[{<key>, total_spend}, ...]` objects
pub fn ranked_objects(entries: &[RankedSpend], key: &str) -> Vec<Value> {
    entries
        .iter()
        .map(|e| {
            serde_json::json!({
                key: e.name,
                "total_spend": round2(e.total_spend),
            })
        })
        .collect()
}

/// Round to cents for display and payloads
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Bar chart descriptor for the UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub chart_type: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub title: String,
}

impl ChartSpec {
    /// Bar chart with labels and values taken from ranked entries
    pub fn bar(title: impl Into<String>, entries: &[RankedSpend]) -> Self {
        Self {
            chart_type: "bar".to_string(),
            labels: entries.iter().map(|e| e.name.clone()).collect(),
            values: entries.iter().map(|e| round2(e.total_spend)).collect(),
            title: title.into(),
        }
    }
}

/// What an intent handler hands back to the orchestrator
#[derive(Debug, Clone)]
pub struct IntentReply {
    pub intent: Intent,
    pub answer: String,
    pub details: Value,
    pub chart: Option<ChartSpec>,
    pub data: Value,
}

/// The structured response returned for every question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    pub intent: String,
    pub answer: String,
    pub details: Value,
    pub chart: Option<ChartSpec>,
    pub data: Value,
}
