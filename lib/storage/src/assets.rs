use crate::catalog::{CatalogLoader, DEFAULT_NAME_COLUMN};
use crate::matrix::load_matrix;
use prodsim_core::{RecommendContext, Result, ServiceState};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, warn};

pub const DEFAULT_ASSETS_DIR: &str = "./model_assets";
pub const DEFAULT_MATRIX_FILE: &str = "cosine_sim_matrix.npy";
pub const DEFAULT_CATALOG_FILE: &str = "products.csv";

/// Locations of the two artifacts produced by the offline step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    pub matrix: PathBuf,
    pub catalog: PathBuf,
}

impl AssetPaths {
    pub fn new<M: Into<PathBuf>, C: Into<PathBuf>>(matrix: M, catalog: C) -> Self {
        Self {
            matrix: matrix.into(),
            catalog: catalog.into(),
        }
    }

    /// Resolve file names against a directory. Absolute names are kept as is.
    pub fn in_dir<D: AsRef<Path>>(dir: D, matrix_file: &str, catalog_file: &str) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(matrix_file), dir.join(catalog_file))
    }
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self::in_dir(DEFAULT_ASSETS_DIR, DEFAULT_MATRIX_FILE, DEFAULT_CATALOG_FILE)
    }
}

/// Loads the matrix and catalog together and checks them against each other.
#[derive(Debug, Clone)]
pub struct AssetLoader {
    paths: AssetPaths,
    catalog_loader: CatalogLoader,
}

impl AssetLoader {
    pub fn new(paths: AssetPaths) -> Self {
        Self {
            paths,
            catalog_loader: CatalogLoader::new(DEFAULT_NAME_COLUMN),
        }
    }

    pub fn with_name_column(mut self, name_column: impl Into<String>) -> Self {
        self.catalog_loader = CatalogLoader::new(name_column);
        self
    }

    pub fn paths(&self) -> &AssetPaths {
        &self.paths
    }

    /// Either every artifact loads and agrees, or nothing is returned.
    pub fn load(&self) -> Result<RecommendContext> {
        let matrix = load_matrix(&self.paths.matrix)?;
        let catalog = self.catalog_loader.load(&self.paths.catalog)?;

        if catalog.duplicate_names() > 0 {
            warn!(
                duplicates = catalog.duplicate_names(),
                "catalog has repeated product names; lookups resolve to the first row"
            );
        }
        if catalog.unnamed() > 0 {
            warn!(rows = catalog.unnamed(), "catalog rows without a product name cannot be queried");
        }

        RecommendContext::new(catalog, matrix)
    }

    /// Load and fold the outcome into a [`ServiceState`]. Never fails.
    pub fn load_state(&self) -> ServiceState {
        let started = Instant::now();
        match self.load() {
            Ok(context) => {
                info!(
                    products = context.catalog().len(),
                    names = context.catalog().indexed_names(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "model assets loaded"
                );
                ServiceState::ready(context)
            }
            Err(e) => {
                error!(
                    matrix = %self.paths.matrix.display(),
                    catalog = %self.paths.catalog.display(),
                    error = %e,
                    "model assets failed to load; recommendations unavailable"
                );
                ServiceState::not_ready(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray_npy::WriteNpyExt;
    use prodsim_core::Error;
    use std::fs;

    #[test]
    fn test_default_paths() {
        let paths = AssetPaths::default();
        assert_eq!(paths.matrix, Path::new("./model_assets/cosine_sim_matrix.npy"));
        assert_eq!(paths.catalog, Path::new("./model_assets/products.csv"));
    }

    #[test]
    fn test_missing_assets_not_ready() {
        let dir = tempfile::tempdir().unwrap();
        let loader = AssetLoader::new(AssetPaths::in_dir(dir.path(), DEFAULT_MATRIX_FILE, DEFAULT_CATALOG_FILE));

        assert!(matches!(loader.load().unwrap_err(), Error::MissingArtifact(_)));

        match loader.load_state() {
            ServiceState::NotReady { reason } => assert!(reason.contains("cosine_sim_matrix.npy")),
            ServiceState::Ready(_) => panic!("expected not ready"),
        }
    }

    #[test]
    fn test_missing_catalog_not_ready() {
        let dir = tempfile::tempdir().unwrap();
        let matrix_path = dir.path().join(DEFAULT_MATRIX_FILE);
        let matrix = ndarray::arr2(&[[1.0f64, 0.1], [0.1, 1.0]]);
        matrix.write_npy(fs::File::create(&matrix_path).unwrap()).unwrap();

        let loader = AssetLoader::new(AssetPaths::in_dir(dir.path(), DEFAULT_MATRIX_FILE, DEFAULT_CATALOG_FILE));
        let err = loader.load().unwrap_err();
        assert!(matches!(err, Error::MissingArtifact(ref p) if p.ends_with(DEFAULT_CATALOG_FILE)));
        assert!(!loader.load_state().is_ready());
    }
}
