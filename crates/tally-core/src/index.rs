//! Flat vector similarity index
//!
//! Brute-force nearest-K over L2 distance, index-aligned with the
//! transaction store. Persisted as JSON next to the metadata file so the
//! whole index directory stays inspectable. Rebuilds are an offline batch
//! step; the serving path only ever reads.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorIndex {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
}

impl VectorIndex {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vectors: Vec::new(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Append a vector; position must stay aligned with the store
    pub fn add(&mut self, vector: Vec<f32>) -> Result<()> {
        if vector.len() != self.dimension {
            return Err(Error::Index(format!(
                "vector dimension {} does not match index dimension {}",
                vector.len(),
                self.dimension
            )));
        }
        self.vectors.push(vector);
        Ok(())
    }

    /// Indices of the nearest k vectors by L2 distance, nearest first
    pub fn search(&self, query: &[f32], k: usize) -> Vec<usize> {
        if query.len() != self.dimension {
            return Vec::new();
        }

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(i, v)| (i, l2_squared(query, v)))
            .collect();

        // Stable sort keeps insertion order on equal distances
        scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k.min(scored.len()));
        scored.into_iter().map(|(i, _)| i).collect()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let index: Self = serde_json::from_str(&raw)?;
        info!(
            vectors = index.len(),
            dimension = index.dimension,
            path = %path.display(),
            "Loaded vector index"
        );
        Ok(index)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let raw = serde_json::to_string(self)?;
        fs::write(path, raw)?;
        Ok(())
    }
}

fn l2_squared(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_rejects_dimension_mismatch() {
        let mut index = VectorIndex::new(3);
        assert!(index.add(vec![1.0, 2.0, 3.0]).is_ok());
        assert!(index.add(vec![1.0, 2.0]).is_err());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_search_orders_by_distance() {
        let mut index = VectorIndex::new(2);
        index.add(vec![10.0, 10.0]).unwrap();
        index.add(vec![0.0, 0.0]).unwrap();
        index.add(vec![1.0, 1.0]).unwrap();

        let hits = index.search(&[0.5, 0.5], 2);
        assert_eq!(hits, vec![1, 2]);
    }

    #[test]
    fn test_search_k_larger_than_index() {
        let mut index = VectorIndex::new(1);
        index.add(vec![1.0]).unwrap();
        assert_eq!(index.search(&[0.0], 300), vec![0]);
    }

    #[test]
    fn test_search_wrong_dimension_is_empty() {
        let mut index = VectorIndex::new(2);
        index.add(vec![1.0, 2.0]).unwrap();
        assert!(index.search(&[1.0], 5).is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");

        let mut index = VectorIndex::new(2);
        index.add(vec![1.0, 0.0]).unwrap();
        index.save(&path).unwrap();

        let loaded = VectorIndex::load(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.dimension(), 2);
    }
}
