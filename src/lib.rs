//! # prodsim
//!
//! Product recommendations served from a precomputed item-to-item
//! similarity matrix.
//!
//! An offline step writes two artifacts: an N×N similarity matrix (`.npy`)
//! and a product table (`.csv`) whose row order matches the matrix. prodsim
//! loads both once at startup and answers "what is most like this product"
//! by ranking the product's row, dropping the product itself, and returning
//! the top hits with their catalog fields.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! prodsim --assets-dir ./model_assets --http-port 5000
//! curl -d 'product_name=Green Tea&count=3' http://localhost:5000/recommend
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use prodsim::prelude::*;
//!
//! let state = AssetLoader::new(AssetPaths::default()).load_state();
//! if let Some(recommender) = state.recommender() {
//!     for product in recommender.recommend("Green Tea", DEFAULT_COUNT) {
//!         println!("{}", product.name);
//!     }
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - `prodsim-core` - Catalog, similarity matrix, recommender, readiness state
//! - `prodsim-storage` - CSV and NumPy artifact loading
//! - `prodsim-api` - Request handler and REST endpoints
//!
//! If the artifacts are missing or disagree with each other the service
//! still starts, reports `degraded` on `/health`, and answers every
//! recommendation request with an unavailable error.

// Re-export core types
pub use prodsim_core::{
    Catalog, Product, SimilarityMatrix,
    RecommendContext, ServiceState,
    Recommender, Recommendation, DEFAULT_COUNT,
    Error, Result,
};

// Re-export storage
pub use prodsim_storage::{AssetLoader, AssetPaths, CatalogLoader};

// Re-export API
pub use prodsim_api::{AppState, HandlerConfig, RestApi, RestConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Catalog, Product, SimilarityMatrix,
        RecommendContext, ServiceState,
        Recommender, Recommendation, DEFAULT_COUNT,
        Error, Result,
        AssetLoader, AssetPaths, CatalogLoader,
        AppState, HandlerConfig, RestApi, RestConfig,
    };
}
