//! Top-N lookup over a precomputed similarity row.

use crate::{Catalog, Product, RecommendContext};
use serde::Serialize;
use std::cmp::Ordering;
use std::sync::Arc;

/// Number of results when the caller does not ask for a specific count.
pub const DEFAULT_COUNT: usize = 10;

/// A ranked hit: catalog position, score against the query, and the row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation<'a> {
    pub index: usize,
    pub score: f64,
    pub product: &'a Product,
}

/// Answers "what is most like this product" from a loaded context.
#[derive(Debug, Clone)]
pub struct Recommender {
    context: Arc<RecommendContext>,
}

impl Recommender {
    pub fn new(context: Arc<RecommendContext>) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &RecommendContext {
        &self.context
    }

    pub fn catalog(&self) -> &Catalog {
        self.context.catalog()
    }

    /// Up to `count` products most similar to `name`, best first.
    ///
    /// Unknown names yield an empty list.
    pub fn recommend(&self, name: &str, count: usize) -> Vec<&Product> {
        self.rank(name, count).into_iter().map(|r| r.product).collect()
    }

    /// Same ordering as [`recommend`](Self::recommend), keeping scores and positions.
    ///
    /// Ties keep column order. The query product is dropped by index, so a
    /// malformed diagonal cannot leak it into the output.
    pub fn rank(&self, name: &str, count: usize) -> Vec<Recommendation<'_>> {
        let catalog = self.context.catalog();
        let Some(self_index) = catalog.lookup(name) else {
            return Vec::new();
        };
        let Some(row) = self.context.matrix().row(self_index) else {
            return Vec::new();
        };

        // Scores are finite, so partial_cmp never fails; -0.0 and 0.0 tie.
        let mut scores: Vec<(usize, f64)> = row.collect();
        scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        scores
            .into_iter()
            .filter(|&(peer, _)| peer != self_index)
            .take(count)
            .filter_map(|(index, score)| {
                catalog.row_at(index).map(|product| Recommendation { index, score, product })
            })
            .collect()
    }
}
