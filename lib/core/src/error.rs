use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised while assembling the recommendation context.
///
/// All of these surface at startup. Request-time lookups never fail; an
/// unknown product is an empty result, not an error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Artifact not found: {}", .0.display())]
    MissingArtifact(PathBuf),

    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog {}: {message}", path.display())]
    MalformedCatalog { path: PathBuf, message: String },

    #[error("Catalog {} has no `{column}` column", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("Catalog is empty")]
    EmptyCatalog,

    #[error("Malformed similarity matrix {}: {message}", path.display())]
    MalformedMatrix { path: PathBuf, message: String },

    #[error("Similarity matrix is not square: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("Similarity matrix has a non-finite score at [{row}][{col}]")]
    NonFiniteScore { row: usize, col: usize },

    #[error("Catalog has {catalog} rows but similarity matrix is {matrix}x{matrix}")]
    SizeMismatch { catalog: usize, matrix: usize },
}
