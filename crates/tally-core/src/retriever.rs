//! Filtered aggregation retriever
//!
//! The retrieval-and-aggregation step behind every intent: select candidate
//! records (nearest-K by vector similarity, or a full-table scan for
//! restaurant queries), run them through the date/category/cuisine filter
//! pipeline, then reduce the survivors into totals and top-N breakdowns.

use std::path::Path;

use chrono::Datelike;
use tracing::{debug, info};

use crate::config::RetrieverConfig;
use crate::embed::{Embedder, EmbeddingClient};
use crate::error::Result;
use crate::index::VectorIndex;
use crate::lexicon::{self, RESTAURANT_TERMS};
use crate::models::{Aggregation, RankedSpend, TransactionRecord};
use crate::period;
use crate::store::{IndexPaths, TransactionStore};

/// Filters derived from the question text, computed once per query
#[derive(Debug)]
struct QueryFilters {
    month: Option<u32>,
    year: Option<i32>,
    ytd: bool,
    cuisines: Vec<&'static str>,
    categories: Vec<&'static str>,
}

impl QueryFilters {
    fn from_question(question: &str, fiscal_year: i32) -> Self {
        let (month, mut year) = period::parse_month_year(question);

        // A bare month is assumed to mean the fiscal year
        if month.is_some() && year.is_none() {
            year = Some(fiscal_year);
        }

        Self {
            month,
            year,
            ytd: period::is_ytd(question),
            cuisines: lexicon::requested_cuisines(question),
            categories: lexicon::requested_categories(question),
        }
    }
}

/// Semantic candidate selection + filter pipeline + aggregation
pub struct Retriever {
    store: TransactionStore,
    index: VectorIndex,
    embedder: EmbeddingClient,
    config: RetrieverConfig,
}

impl Retriever {
    pub fn new(
        store: TransactionStore,
        index: VectorIndex,
        embedder: EmbeddingClient,
        config: RetrieverConfig,
    ) -> Self {
        Self {
            store,
            index,
            embedder,
            config,
        }
    }

    /// Load the index and metadata files from an index directory
    pub fn open(dir: &Path, embedder: EmbeddingClient, config: RetrieverConfig) -> Result<Self> {
        let paths = IndexPaths::resolve(dir)?;
        let store = TransactionStore::load(&paths.metadata)?;
        let index = VectorIndex::load(&paths.index)?;
        Ok(Self::new(store, index, embedder, config))
    }

    pub fn store(&self) -> &TransactionStore {
        &self.store
    }

    pub fn config(&self) -> &RetrieverConfig {
        &self.config
    }

    pub fn embedder_name(&self) -> &'static str {
        self.embedder.backend_name()
    }

    /// General aggregation over the nearest-K candidates for the question
    pub async fn query(&self, question: &str) -> Result<Aggregation> {
        self.aggregate(question, false).await
    }

    /// Restaurant-only aggregation
    ///
    /// Scans the whole store instead of prefiltering through the vector
    /// index: restaurant counts have to match the upstream ledger exactly,
    /// and similarity search can rank true matches below the cutoff.
    pub async fn restaurant_spend(&self, question: &str) -> Result<Aggregation> {
        self.aggregate(question, true).await
    }

    async fn aggregate(&self, question: &str, restaurant_only: bool) -> Result<Aggregation> {
        let filters = QueryFilters::from_question(question, self.config.window.year);
        debug!(?filters, restaurant_only, "Derived query filters");

        let candidates = if restaurant_only {
            (0..self.store.len()).collect()
        } else {
            let embedding = self.embedder.embed(question).await?;
            let k = self.config.top_k.min(self.store.len());
            self.index.search(&embedding, k)
        };

        let mut tally = Tally::default();
        for idx in candidates {
            let Some(record) = self.store.get(idx) else {
                continue;
            };
            if self.passes_filters(record, &filters, restaurant_only) {
                tally.add(record);
            }
        }

        let aggregation = tally.finish();
        info!(
            matches = aggregation.matches,
            total = aggregation.total_spend,
            restaurant_only,
            "Aggregation complete"
        );
        Ok(aggregation)
    }

    /// The filter pipeline; short-circuits on the first failing predicate
    fn passes_filters(
        &self,
        record: &TransactionRecord,
        filters: &QueryFilters,
        restaurant_only: bool,
    ) -> bool {
        // 1. Parseable date; malformed dates are skipped silently
        let Some(date) = record.parsed_date() else {
            return false;
        };

        // 2. Fiscal reporting window
        if !self.config.window.contains(date) {
            return false;
        }

        // 3. Month from the question, unless the query is year-to-date
        if let Some(month) = filters.month {
            if !filters.ytd && date.month() != month {
                return false;
            }
        }

        // 4. Year from the question
        if let Some(year) = filters.year {
            if date.year() != year {
                return false;
            }
        }

        // 5. Restaurant detection for restaurant-only queries
        if restaurant_only && !is_restaurant(record) {
            return false;
        }

        // 6. Category filter for non-restaurant queries
        if !restaurant_only && !filters.categories.is_empty() {
            let record_cat = record
                .category
                .as_deref()
                .unwrap_or_default()
                .to_lowercase();
            if !filters
                .categories
                .iter()
                .any(|c| record_cat.contains(&c.to_lowercase()))
            {
                return false;
            }
        }

        // 7. Cuisine filter
        if !filters.cuisines.is_empty() && !matches_cuisine(record, &filters.cuisines) {
            return false;
        }

        true
    }
}

/// Restaurant detection: category text, then enrichment labels, then
/// restaurant-indicative description substrings
fn is_restaurant(record: &TransactionRecord) -> bool {
    let cat = record
        .category
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();
    if cat.contains("food") || cat.contains("drink") {
        return true;
    }

    if !record.cuisine_labels().is_empty() {
        return true;
    }

    let desc = record
        .description
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();
    RESTAURANT_TERMS.iter().any(|t| desc.contains(t))
}

/// Cuisine match by description substring or enrichment-label substring
fn matches_cuisine(record: &TransactionRecord, cuisines: &[&str]) -> bool {
    let desc = record
        .description
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();
    if cuisines.iter().any(|c| desc.contains(c)) {
        return true;
    }

    let labels: Vec<String> = record
        .cuisine_labels()
        .iter()
        .map(|l| l.to_lowercase())
        .collect();
    cuisines
        .iter()
        .any(|c| labels.iter().any(|label| label.contains(c)))
}

/// Running reduction over filtered records
///
/// Grouping vectors keep first-seen order so the final descending stable
/// sort breaks ties by original iteration order.
#[derive(Default)]
struct Tally {
    total: f64,
    count: usize,
    by_merchant: Vec<(String, f64)>,
    by_category: Vec<(String, f64)>,
    by_cuisine: Vec<(String, f64)>,
}

impl Tally {
    fn add(&mut self, record: &TransactionRecord) {
        let Some(amount) = record.amount else {
            return;
        };
        // Only negative amounts are spend; refunds and income never count
        if amount >= 0.0 {
            return;
        }
        let amount = -amount;

        self.total += amount;
        self.count += 1;

        bump(&mut self.by_merchant, record.display_name(), amount);
        bump(
            &mut self.by_category,
            record.category.as_deref().unwrap_or("Uncategorized"),
            amount,
        );
        // Multi-valued cuisine labels each contribute independently
        for label in record.cuisine_labels() {
            bump(&mut self.by_cuisine, label, amount);
        }
    }

    fn finish(self) -> Aggregation {
        Aggregation {
            matches: self.count,
            total_spend: self.total,
            top_merchants: top_five(self.by_merchant),
            top_categories: top_five(self.by_category),
            top_cuisines: top_five(self.by_cuisine),
        }
    }
}

fn bump(tally: &mut Vec<(String, f64)>, key: &str, amount: f64) {
    match tally.iter_mut().find(|(name, _)| name == key) {
        Some((_, total)) => *total += amount,
        None => tally.push((key.to_string(), amount)),
    }
}

fn top_five(mut tally: Vec<(String, f64)>) -> Vec<RankedSpend> {
    // Stable sort: equal amounts keep first-seen order
    tally.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    tally.truncate(5);
    tally
        .into_iter()
        .map(|(name, total)| RankedSpend::new(name, total))
        .collect()
}
