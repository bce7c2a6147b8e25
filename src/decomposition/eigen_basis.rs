use crate::error::{EigenfaceError, Result};
use crate::{Matrix, Vector};
use nalgebra::DMatrix;
use ndarray::{ArrayView1, s};
use std::cmp::Ordering;

/// Orthonormal basis of the principal directions of a centered corpus.
///
/// Rows of `components` are unit-length and pairwise orthogonal, ordered by
/// non-increasing `eigenvalues`. The sign of each row is whatever the SVD
/// produced and carries no meaning.
#[derive(Clone, Debug)]
pub struct EigenBasis {
    /// Basis vectors, shape (k, d).
    pub components: Matrix,
    /// Covariance eigenvalues `s_i^2 / (n - 1)`, length k.
    pub eigenvalues: Vector,
    /// Singular values of the centered matrix, length k.
    pub singular_values: Vector,
    n_samples: usize,
    total_variance: f64,
}

/// Derives a basis of at most `n_components` directions from row vectors that
/// have already been centered.
///
/// The count is clamped to `min(n_components, n - 1, d)`: a centered matrix of
/// `n` rows has rank at most `n - 1`.
pub fn compute_basis(centered: &Matrix, n_components: usize) -> Result<EigenBasis> {
    if n_components == 0 {
        return Err(EigenfaceError::InvalidComponentCount);
    }

    let (n_samples, n_features) = (centered.nrows(), centered.ncols());
    if n_samples == 0 {
        return Err(EigenfaceError::EmptyInput(
            "cannot decompose an empty set of vectors".to_string(),
        ));
    }
    if centered.iter().any(|v| !v.is_finite()) {
        return Err(EigenfaceError::InvalidParameter(
            "centered data contains non-finite values".to_string(),
        ));
    }

    let k = n_components.min(n_samples - 1).min(n_features);
    if k == 0 {
        return Err(EigenfaceError::DegenerateCorpus {
            n_samples,
            dimension: n_features,
        });
    }
    if k < n_components {
        tracing::warn!(
            requested = n_components,
            effective = k,
            n_samples,
            n_features,
            "component count clamped to data rank"
        );
    }

    let (singular_values, vt) = singular_value_decomposition(centered)?;

    // X = U S V^T: principal directions are the rows of V^T
    let mut order: Vec<usize> = (0..singular_values.len()).collect();
    order.sort_by(|&a, &b| {
        singular_values[b]
            .partial_cmp(&singular_values[a])
            .unwrap_or(Ordering::Equal)
    });

    let dof = (n_samples - 1) as f64;
    let total_variance = singular_values.iter().map(|s| s * s).sum::<f64>() / dof;

    let mut components = Matrix::zeros((k, n_features));
    let mut selected = Vector::zeros(k);
    for (row, &idx) in order.iter().take(k).enumerate() {
        components.row_mut(row).assign(&vt.row(idx));
        selected[row] = singular_values[idx];
    }
    let eigenvalues = selected.mapv(|s| s * s / dof);

    tracing::debug!(
        n_samples,
        n_features,
        n_components = k,
        leading_eigenvalue = eigenvalues[0],
        "computed eigenbasis"
    );

    Ok(EigenBasis {
        components,
        eigenvalues,
        singular_values: selected,
        n_samples,
        total_variance,
    })
}

/// Thin SVD of `x` via nalgebra; returns the singular values and `V^T` with one
/// row per singular value.
fn singular_value_decomposition(x: &Matrix) -> Result<(Vector, Matrix)> {
    let (m, n) = (x.nrows(), x.ncols());
    let dense = DMatrix::from_fn(m, n, |i, j| x[[i, j]]);

    let svd = dense.svd(false, true);
    let vt = svd.v_t.ok_or_else(|| {
        EigenfaceError::InvalidParameter("SVD did not produce right singular vectors".to_string())
    })?;

    let singular_values: Vector = svd.singular_values.iter().copied().collect();
    let vt = Matrix::from_shape_fn((vt.nrows(), vt.ncols()), |(i, j)| vt[(i, j)]);

    Ok((singular_values, vt))
}

impl EigenBasis {
    pub fn n_components(&self) -> usize {
        self.components.nrows()
    }

    /// Dimension d of the vectors the basis lives in.
    pub fn dimension(&self) -> usize {
        self.components.ncols()
    }

    /// Number of samples the basis was derived from.
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    pub fn component(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        (index < self.n_components()).then(|| self.components.row(index))
    }

    /// Share of the corpus' total variance carried by each retained component.
    pub fn explained_variance_ratio(&self) -> Vector {
        if self.total_variance > 0.0 {
            &self.eigenvalues / self.total_variance
        } else {
            Vector::zeros(self.eigenvalues.len())
        }
    }

    /// Running sum of [`explained_variance_ratio`](Self::explained_variance_ratio).
    pub fn cumulative_variance(&self) -> Vector {
        let mut acc = 0.0;
        self.explained_variance_ratio().mapv(|r| {
            acc += r;
            acc
        })
    }

    /// Keeps the leading `n_components` directions (clamped to what is available).
    pub fn truncate(&self, n_components: usize) -> Result<EigenBasis> {
        if n_components == 0 {
            return Err(EigenfaceError::InvalidComponentCount);
        }
        let k = n_components.min(self.n_components());

        Ok(EigenBasis {
            components: self.components.slice(s![..k, ..]).to_owned(),
            eigenvalues: self.eigenvalues.slice(s![..k]).to_owned(),
            singular_values: self.singular_values.slice(s![..k]).to_owned(),
            n_samples: self.n_samples,
            total_variance: self.total_variance,
        })
    }
}
