use crate::error::{EigenfaceError, Result};
use crate::{Matrix, Vector};
use ndarray::ArrayView1;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Distances closer than this are treated as ties.
const TIE_TOLERANCE: f64 = 1e-12;

#[cfg(feature = "parallel")]
const PAR_THRESHOLD: usize = 2_048;

/// Outcome of a nearest-neighbour query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Classification {
    pub label: usize,
    pub distance: f64,
    /// Row of the nearest training coordinate.
    pub index: usize,
}

pub fn euclidean_distance(a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Labels `query` with the label of its closest row in `training`.
///
/// Equidistant rows resolve to the lowest index, so the answer depends only on
/// the order of the training rows.
pub fn classify(query: &Vector, training: &Matrix, labels: &[usize]) -> Result<Classification> {
    if training.nrows() == 0 {
        return Err(EigenfaceError::EmptyTrainingSet);
    }
    if training.nrows() != labels.len() {
        return Err(EigenfaceError::DimensionMismatch {
            expected: training.nrows(),
            actual: labels.len(),
        });
    }
    if query.len() != training.ncols() {
        return Err(EigenfaceError::DimensionMismatch {
            expected: training.ncols(),
            actual: query.len(),
        });
    }

    let distances = distances_to(query, training);

    let mut best = 0;
    for (i, &distance) in distances.iter().enumerate().skip(1) {
        if distance < distances[best] - TIE_TOLERANCE {
            best = i;
        }
    }

    Ok(Classification {
        label: labels[best],
        distance: distances[best],
        index: best,
    })
}

#[cfg(not(feature = "parallel"))]
fn distances_to(query: &Vector, training: &Matrix) -> Vec<f64> {
    let q = query.view();
    training
        .rows()
        .into_iter()
        .map(|row| euclidean_distance(&row, &q))
        .collect()
}

#[cfg(feature = "parallel")]
fn distances_to(query: &Vector, training: &Matrix) -> Vec<f64> {
    let q = query.view();
    if training.nrows() >= PAR_THRESHOLD {
        // collect keeps row order
        (0..training.nrows())
            .into_par_iter()
            .map(|i| euclidean_distance(&training.row(i), &q))
            .collect()
    } else {
        training
            .rows()
            .into_iter()
            .map(|row| euclidean_distance(&row, &q))
            .collect()
    }
}
