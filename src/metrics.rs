use crate::decomposition::{EigenBasis, project, reconstruct};
use crate::error::{EigenfaceError, Result};
use crate::preprocessing::center_vector;
use crate::Vector;
use ndarray::s;

/// Reconstruction quality of one vector at a given component count.
#[derive(Clone, Debug, PartialEq)]
pub struct ReconstructionPoint {
    pub n_components: usize,
    pub mse: f64,
    /// PSNR in dB against a peak value of 1.0; infinite for a perfect match.
    pub psnr: f64,
}

pub fn mean_squared_error(original: &Vector, reconstructed: &Vector) -> Result<f64> {
    if original.len() != reconstructed.len() {
        return Err(EigenfaceError::DimensionMismatch {
            expected: original.len(),
            actual: reconstructed.len(),
        });
    }

    let diff = original - reconstructed;
    diff.mapv(|x| x * x)
        .mean()
        .ok_or_else(|| EigenfaceError::EmptyInput("cannot compare empty vectors".to_string()))
}

/// Peak signal-to-noise ratio `10 * log10(max_value^2 / mse)`.
pub fn signal_to_noise(mse: f64, max_value: f64) -> f64 {
    if mse == 0.0 {
        return f64::INFINITY;
    }
    10.0 * (max_value * max_value / mse).log10()
}

pub fn accuracy_score(y_true: &[usize], y_pred: &[usize]) -> Result<f64> {
    if y_true.len() != y_pred.len() {
        return Err(EigenfaceError::DimensionMismatch {
            expected: y_true.len(),
            actual: y_pred.len(),
        });
    }
    if y_true.is_empty() {
        return Err(EigenfaceError::EmptyInput("no predictions to score".to_string()));
    }

    let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
    Ok(correct as f64 / y_true.len() as f64)
}

/// Reconstruction error of `vector` for each requested component count.
///
/// Counts above the basis size are clamped; a count of zero reconstructs the mean.
pub fn reconstruction_curve(
    vector: &Vector,
    basis: &EigenBasis,
    mean: &Vector,
    n_components: &[usize],
) -> Result<Vec<ReconstructionPoint>> {
    let centered = center_vector(vector.view(), mean)?;
    let coordinate = project(&centered, basis)?;

    n_components
        .iter()
        .map(|&requested| {
            let k = requested.min(basis.n_components());
            let partial = coordinate.slice(s![..k]).to_owned();
            let restored = reconstruct(&partial, basis, mean)?;
            let mse = mean_squared_error(vector, &restored)?;
            Ok(ReconstructionPoint {
                n_components: k,
                mse,
                psnr: signal_to_noise(mse, 1.0),
            })
        })
        .collect()
}
