use crate::{Catalog, Error, Recommender, Result, SimilarityMatrix};
use std::sync::Arc;
use tracing::warn;

/// Catalog and matrix, validated against each other and loaded as one unit.
#[derive(Debug, Clone)]
pub struct RecommendContext {
    catalog: Catalog,
    matrix: SimilarityMatrix,
}

impl RecommendContext {
    pub fn new(catalog: Catalog, matrix: SimilarityMatrix) -> Result<Self> {
        if catalog.is_empty() {
            return Err(Error::EmptyCatalog);
        }
        if catalog.len() != matrix.dim() {
            return Err(Error::SizeMismatch {
                catalog: catalog.len(),
                matrix: matrix.dim(),
            });
        }

        if let Some((i, j, diff)) = matrix.max_asymmetry() {
            warn!(row = i, col = j, diff, "similarity matrix is not symmetric");
        }

        Ok(Self { catalog, matrix })
    }

    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[inline]
    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }
}

/// Whether the service can answer recommendation requests.
///
/// Built once at startup and shared read-only by every request.
#[derive(Debug, Clone)]
pub enum ServiceState {
    Ready(Arc<Recommender>),
    NotReady { reason: String },
}

impl ServiceState {
    pub fn ready(context: RecommendContext) -> Self {
        ServiceState::Ready(Arc::new(Recommender::new(Arc::new(context))))
    }

    pub fn not_ready(reason: impl Into<String>) -> Self {
        ServiceState::NotReady { reason: reason.into() }
    }

    /// Ready when the load succeeded, otherwise not ready with the error text.
    pub fn from_load(result: Result<RecommendContext>) -> Self {
        match result {
            Ok(context) => Self::ready(context),
            Err(e) => Self::not_ready(e.to_string()),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ServiceState::Ready(_))
    }

    pub fn recommender(&self) -> Option<&Recommender> {
        match self {
            ServiceState::Ready(recommender) => Some(recommender),
            ServiceState::NotReady { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Product;

    fn catalog(n: usize) -> Catalog {
        Catalog::new((0..n).map(|i| Product::named("product_name", format!("p{i}"))).collect())
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0, 0.5], vec![0.5, 1.0]]).unwrap();
        let err = RecommendContext::new(catalog(3), matrix).unwrap_err();
        assert!(matches!(err, Error::SizeMismatch { catalog: 3, matrix: 2 }));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let matrix = SimilarityMatrix::from_rows(Vec::new()).unwrap();
        let err = RecommendContext::new(catalog(0), matrix).unwrap_err();
        assert!(matches!(err, Error::EmptyCatalog));
    }

    #[test]
    fn test_state_from_failed_load() {
        let state = ServiceState::from_load(Err(Error::SizeMismatch { catalog: 3, matrix: 2 }));
        assert!(!state.is_ready());
        assert!(state.recommender().is_none());
        match state {
            ServiceState::NotReady { reason } => assert!(reason.contains("3 rows")),
            ServiceState::Ready(_) => panic!("expected not ready"),
        }
    }

    #[test]
    fn test_state_from_good_load() {
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0, 0.5], vec![0.5, 1.0]]).unwrap();
        let state = ServiceState::from_load(RecommendContext::new(catalog(2), matrix));
        assert!(state.is_ready());
        assert_eq!(state.recommender().unwrap().catalog().len(), 2);
    }
}
