use super::EigenBasis;
use crate::error::{EigenfaceError, Result};
use crate::{Matrix, Vector};
use ndarray::{Axis, s};

/// Coordinates of an already-centered vector along every basis direction.
pub fn project(centered: &Vector, basis: &EigenBasis) -> Result<Vector> {
    if centered.len() != basis.dimension() {
        return Err(EigenfaceError::DimensionMismatch {
            expected: basis.dimension(),
            actual: centered.len(),
        });
    }
    Ok(basis.components.dot(centered))
}

/// Row-wise [`project`]: (n, d) centered rows to (n, k) coordinates.
pub fn project_all(centered: &Matrix, basis: &EigenBasis) -> Result<Matrix> {
    if centered.ncols() != basis.dimension() {
        return Err(EigenfaceError::DimensionMismatch {
            expected: basis.dimension(),
            actual: centered.ncols(),
        });
    }
    Ok(centered.dot(&basis.components.t()))
}

/// Maps coordinates back to the original space: `mean + sum_i c_i * basis_i`.
///
/// A coordinate shorter than the basis uses only the leading components, which
/// gives the best approximation with that many terms.
pub fn reconstruct(coordinate: &Vector, basis: &EigenBasis, mean: &Vector) -> Result<Vector> {
    let components = leading_components(coordinate.len(), basis, mean)?;
    Ok(mean + &coordinate.dot(&components))
}

/// Row-wise [`reconstruct`].
pub fn reconstruct_all(coordinates: &Matrix, basis: &EigenBasis, mean: &Vector) -> Result<Matrix> {
    let components = leading_components(coordinates.ncols(), basis, mean)?;
    Ok(coordinates.dot(&components) + &mean.view().insert_axis(Axis(0)))
}

fn leading_components(k: usize, basis: &EigenBasis, mean: &Vector) -> Result<Matrix> {
    if k > basis.n_components() {
        return Err(EigenfaceError::DimensionMismatch {
            expected: basis.n_components(),
            actual: k,
        });
    }
    if mean.len() != basis.dimension() {
        return Err(EigenfaceError::DimensionMismatch {
            expected: basis.dimension(),
            actual: mean.len(),
        });
    }
    Ok(basis.components.slice(s![..k, ..]).to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decomposition::compute_basis;
    use crate::metrics::mean_squared_error;
    use crate::preprocessing::{center, compute_mean};
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn fixture() -> (Matrix, Vector, Matrix) {
        let x = array![
            [0.12, 0.85, 0.33, 0.51, 0.27, 0.64, 0.09],
            [0.91, 0.18, 0.62, 0.07, 0.72, 0.35, 0.48],
            [0.44, 0.41, 0.97, 0.36, 0.13, 0.58, 0.81],
            [0.68, 0.73, 0.24, 0.88, 0.46, 0.02, 0.39],
            [0.29, 0.06, 0.55, 0.63, 0.94, 0.77, 0.21],
        ];
        let mean = compute_mean(&x).unwrap();
        let centered = center(&x, &mean).unwrap();
        (x, mean, centered)
    }

    #[test]
    fn test_full_rank_round_trip() {
        let (x, mean, centered) = fixture();
        // five samples: the centered rank is four
        let basis = compute_basis(&centered, 4).unwrap();

        for (i, row) in centered.rows().into_iter().enumerate() {
            let coordinate = project(&row.to_owned(), &basis).unwrap();
            assert_eq!(coordinate.len(), 4);
            let restored = reconstruct(&coordinate, &basis, &mean).unwrap();
            assert_abs_diff_eq!(restored, x.row(i).to_owned(), epsilon = 1e-4);
        }
    }

    #[test]
    fn test_batch_matches_single() {
        let (_, mean, centered) = fixture();
        let basis = compute_basis(&centered, 3).unwrap();

        let coordinates = project_all(&centered, &basis).unwrap();
        let restored = reconstruct_all(&coordinates, &basis, &mean).unwrap();
        for i in 0..centered.nrows() {
            let single = project(&centered.row(i).to_owned(), &basis).unwrap();
            assert_abs_diff_eq!(coordinates.row(i).to_owned(), single, epsilon = 1e-12);
            let back = reconstruct(&single, &basis, &mean).unwrap();
            assert_abs_diff_eq!(restored.row(i).to_owned(), back, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_reconstruction_error_monotonic_in_k() {
        let (x, mean, centered) = fixture();
        let basis = compute_basis(&centered, 4).unwrap();

        for i in 0..x.nrows() {
            let original = x.row(i).to_owned();
            let coordinate = project(&centered.row(i).to_owned(), &basis).unwrap();
            let mut previous = f64::INFINITY;
            for k in 0..=basis.n_components() {
                let partial = coordinate.slice(s![..k]).to_owned();
                let restored = reconstruct(&partial, &basis, &mean).unwrap();
                let mse = mean_squared_error(&original, &restored).unwrap();
                assert!(mse <= previous + 1e-12, "mse rose at k={}", k);
                previous = mse;
            }
        }
    }

    #[test]
    fn test_empty_coordinate_reconstructs_mean() {
        let (_, mean, centered) = fixture();
        let basis = compute_basis(&centered, 2).unwrap();
        let restored = reconstruct(&Vector::zeros(0), &basis, &mean).unwrap();
        assert_abs_diff_eq!(restored, mean, epsilon = 1e-12);
    }

    #[test]
    fn test_dimension_mismatch() {
        let (_, mean, centered) = fixture();
        let basis = compute_basis(&centered, 2).unwrap();

        assert_eq!(
            project(&Vector::zeros(3), &basis).unwrap_err(),
            EigenfaceError::DimensionMismatch { expected: 7, actual: 3 }
        );
        assert!(project_all(&Matrix::zeros((2, 6)), &basis).is_err());
        assert!(reconstruct(&Vector::zeros(3), &basis, &mean).is_err());
        assert!(reconstruct(&Vector::zeros(2), &basis, &Vector::zeros(5)).is_err());
    }
}
