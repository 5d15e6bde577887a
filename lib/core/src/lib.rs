//! # prodsim Core
//!
//! Core library for the prodsim recommendation service.
//!
//! This crate provides the in-memory data structures and the lookup:
//!
//! - [`Product`] / [`Catalog`] - Product table with an exact-match name index
//! - [`SimilarityMatrix`] - Dense N×N item-to-item scores
//! - [`RecommendContext`] - Catalog and matrix validated as one unit
//! - [`ServiceState`] - Ready or not-ready, decided once at startup
//! - [`Recommender`] - Top-N most similar products, self excluded
//!
//! ## Example
//!
//! ```rust
//! use prodsim_core::{Catalog, Product, RecommendContext, ServiceState, SimilarityMatrix};
//!
//! let catalog = Catalog::new(vec![
//!     Product::named("product_name", "A"),
//!     Product::named("product_name", "B"),
//!     Product::named("product_name", "C"),
//! ]);
//! let matrix = SimilarityMatrix::from_rows(vec![
//!     vec![1.0, 0.8, 0.3],
//!     vec![0.8, 1.0, 0.5],
//!     vec![0.3, 0.5, 1.0],
//! ]).unwrap();
//!
//! let state = ServiceState::from_load(RecommendContext::new(catalog, matrix));
//! let recommender = state.recommender().unwrap();
//! let names: Vec<_> = recommender.recommend("A", 2).iter().map(|p| p.name.as_str()).collect();
//! assert_eq!(names, ["B", "C"]);
//! ```

pub mod catalog;
pub mod context;
pub mod error;
pub mod matrix;
pub mod recommender;

pub use catalog::{Catalog, Product};
pub use context::{RecommendContext, ServiceState};
pub use error::{Error, Result};
pub use matrix::{SimilarityMatrix, SYMMETRY_TOLERANCE};
pub use recommender::{Recommendation, Recommender, DEFAULT_COUNT};
