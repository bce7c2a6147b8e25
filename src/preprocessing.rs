use crate::error::{EigenfaceError, Result};
use crate::{Matrix, Vector};
use ndarray::{ArrayView1, Axis};

/// Component-wise arithmetic mean of the rows of `vectors`.
pub fn compute_mean(vectors: &Matrix) -> Result<Vector> {
    vectors.mean_axis(Axis(0)).ok_or_else(|| {
        EigenfaceError::EmptyInput("cannot average an empty set of vectors".to_string())
    })
}

/// Returns a new matrix with `mean` subtracted from every row.
pub fn center(vectors: &Matrix, mean: &Vector) -> Result<Matrix> {
    if vectors.ncols() != mean.len() {
        return Err(EigenfaceError::DimensionMismatch {
            expected: mean.len(),
            actual: vectors.ncols(),
        });
    }

    let mut result = vectors.clone();
    for mut row in result.axis_iter_mut(Axis(0)) {
        row -= mean;
    }

    Ok(result)
}

pub fn center_vector(vector: ArrayView1<f64>, mean: &Vector) -> Result<Vector> {
    if vector.len() != mean.len() {
        return Err(EigenfaceError::DimensionMismatch {
            expected: mean.len(),
            actual: vector.len(),
        });
    }
    Ok(&vector - mean)
}
