//! Startup loading of the offline artifacts: a CSV product table and a
//! NumPy similarity matrix.

pub mod assets;
pub mod catalog;
pub mod matrix;

pub use assets::{AssetLoader, AssetPaths, DEFAULT_ASSETS_DIR, DEFAULT_CATALOG_FILE, DEFAULT_MATRIX_FILE};
pub use catalog::{CatalogLoader, DEFAULT_NAME_COLUMN};
pub use matrix::{load_matrix, read_matrix};
