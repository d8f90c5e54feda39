//! Offline index builder
//!
//! Batch job run before serving begins, never interleaved with it: fetch
//! transactions from the upstream API (or a local JSON file), render each
//! record into a text block, embed it, and write the vector index plus the
//! index-aligned metadata file to the index directory.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::embed::{Embedder, EmbeddingClient};
use crate::error::{Error, Result};
use crate::index::VectorIndex;
use crate::models::TransactionRecord;
use crate::store::{INDEX_FILE, METADATA_FILE};

/// Text block embedded for one transaction
pub fn format_record(record: &TransactionRecord) -> String {
    let cuisines = record.cuisine_labels().join(", ");
    let amount = record
        .amount
        .map(|a| a.to_string())
        .unwrap_or_default();
    format!(
        "Description: {} | Category: {} | Merchant: {} | Restaurant Type: {} | Amount: {} | Date: {}",
        record.description.as_deref().unwrap_or_default(),
        record.category.as_deref().unwrap_or_default(),
        record.merchant_name.as_deref().unwrap_or_default(),
        cuisines,
        amount,
        record.transaction_date.as_deref().unwrap_or_default(),
    )
}

pub struct IndexBuilder {
    embedder: EmbeddingClient,
}

impl IndexBuilder {
    pub fn new(embedder: EmbeddingClient) -> Self {
        Self { embedder }
    }

    /// Fetch transactions from the upstream transactions API
    pub async fn fetch_transactions(url: &str) -> Result<Vec<TransactionRecord>> {
        info!(url, "Fetching transactions");
        let records: Vec<TransactionRecord> = reqwest::get(url)
            .await?
            .error_for_status()?
            .json()
            .await?;
        info!(count = records.len(), "Retrieved transactions");
        Ok(records)
    }

    /// Read transactions from a local JSON file
    pub fn load_transactions(path: &Path) -> Result<Vec<TransactionRecord>> {
        let raw = fs::read_to_string(path)?;
        let records: Vec<TransactionRecord> = serde_json::from_str(&raw)?;
        Ok(records)
    }

    /// Embed every record into an index aligned with the record order
    pub async fn build(&self, records: &[TransactionRecord]) -> Result<VectorIndex> {
        if records.is_empty() {
            return Err(Error::InvalidData(
                "no transactions to index".to_string(),
            ));
        }

        let first = self.embedder.embed(&format_record(&records[0])).await?;
        let mut index = VectorIndex::new(first.len());
        index.add(first)?;

        for record in &records[1..] {
            let vector = self.embedder.embed(&format_record(record)).await?;
            index.add(vector)?;
        }

        info!(vectors = index.len(), dimension = index.dimension(), "Built vector index");
        Ok(index)
    }

    /// Build and persist the index + metadata pair into a directory
    pub async fn build_and_write(
        &self,
        records: &[TransactionRecord],
        dir: &Path,
    ) -> Result<usize> {
        let index = self.build(records).await?;

        fs::create_dir_all(dir)?;
        index.save(&dir.join(INDEX_FILE))?;
        fs::write(
            dir.join(METADATA_FILE),
            serde_json::to_string_pretty(records)?,
        )?;

        info!(count = records.len(), dir = %dir.display(), "Wrote index and metadata");
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetrieverConfig;
    use crate::embed::MockEmbedder;
    use crate::retriever::Retriever;

    fn records() -> Vec<TransactionRecord> {
        serde_json::from_value(serde_json::json!([
            {
                "description": "CAFE X",
                "merchantName": "Cafe X",
                "category": "Food & Drink",
                "restaurantType": ["Coffee"],
                "amount": -12.50,
                "transactionDate": "2025-06-01"
            },
            {
                "description": "TARGET",
                "merchantName": "Target",
                "category": "Shopping",
                "amount": -40.0,
                "transactionDate": "2025-06-02"
            }
        ]))
        .unwrap()
    }

    #[test]
    fn test_format_record() {
        let text = format_record(&records()[0]);
        assert_eq!(
            text,
            "Description: CAFE X | Category: Food & Drink | Merchant: Cafe X | \
             Restaurant Type: Coffee | Amount: -12.5 | Date: 2025-06-01"
        );
    }

    #[tokio::test]
    async fn test_build_rejects_empty_input() {
        let builder = IndexBuilder::new(EmbeddingClient::Mock(MockEmbedder::new()));
        assert!(builder.build(&[]).await.is_err());
    }

    #[tokio::test]
    async fn test_build_write_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let builder = IndexBuilder::new(EmbeddingClient::Mock(MockEmbedder::new()));
        let records = records();

        let count = builder.build_and_write(&records, dir.path()).await.unwrap();
        assert_eq!(count, 2);

        let retriever = Retriever::open(
            dir.path(),
            EmbeddingClient::Mock(MockEmbedder::new()),
            RetrieverConfig::default(),
        )
        .unwrap();
        assert_eq!(retriever.store().len(), 2);

        let agg = retriever.query("shopping spend in June").await.unwrap();
        assert_eq!(agg.matches, 1);
        assert_eq!(agg.top_merchants[0].name, "Target");
    }
}
