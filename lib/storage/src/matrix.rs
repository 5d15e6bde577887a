// NumPy similarity matrix loading
use crate::catalog::open_error;
use ndarray::Array2;
use ndarray_npy::ReadNpyExt;
use prodsim_core::{Error, Result, SimilarityMatrix};
use std::path::Path;

/// Load a 2-D `.npy` array of `float64` or `float32` scores.
pub fn load_matrix<P: AsRef<Path>>(path: P) -> Result<SimilarityMatrix> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| open_error(path, e))?;
    read_matrix(&bytes, path)
}

/// Decode `.npy` bytes. `path` is only used in error messages.
///
/// `float64` is tried first since that is what NumPy writes by default;
/// `float32` arrays are widened.
pub fn read_matrix(bytes: &[u8], path: &Path) -> Result<SimilarityMatrix> {
    let data = match Array2::<f64>::read_npy(bytes) {
        Ok(wide) => wide,
        Err(wide_err) => Array2::<f32>::read_npy(bytes)
            .map(|narrow| narrow.mapv(f64::from))
            .map_err(|_| Error::MalformedMatrix {
                path: path.to_path_buf(),
                message: wide_err.to_string(),
            })?,
    };
    SimilarityMatrix::new(data)
}
