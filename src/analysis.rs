//! Exploratory views on an eigenspace: per-class bases and distance separation.

use crate::dataset::Corpus;
use crate::decomposition::{EigenBasis, compute_basis};
use crate::error::{EigenfaceError, Result};
use crate::neighbors::euclidean_distance;
use crate::preprocessing::{center, compute_mean};
use crate::{Matrix, Vector};

const THRESHOLD_CANDIDATES: usize = 100;

/// Mean and basis fitted to the samples of a single class.
#[derive(Clone, Debug)]
pub struct ClassBasis {
    pub label: usize,
    pub mean: Vector,
    pub basis: EigenBasis,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceStats {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
}

/// How well pairwise distances separate same-class from different-class pairs.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceAnalysis {
    pub within_class: Option<DistanceStats>,
    pub between_class: Option<DistanceStats>,
    /// `between.mean / within.mean`, when both groups exist and the within mean is non-zero.
    pub separation_ratio: Option<f64>,
    /// Distance below which a pair is best declared "same class".
    pub best_threshold: f64,
    pub threshold_accuracy: f64,
}

/// Fits one basis per label, in ascending label order.
pub fn class_bases(corpus: &Corpus, n_components: usize) -> Result<Vec<ClassBasis>> {
    corpus
        .class_indices()
        .into_iter()
        .map(|(label, members)| {
            let class = corpus.subset(&members)?;
            let mean = compute_mean(&class.features)?;
            let centered = center(&class.features, &mean)?;
            let basis = compute_basis(&centered, n_components)?;
            tracing::debug!(label, n_samples = members.len(), n_components = basis.n_components(), "class basis");
            Ok(ClassBasis { label, mean, basis })
        })
        .collect()
}

/// Compares every unordered pair of coordinates.
pub fn distance_analysis(coordinates: &Matrix, labels: &[usize]) -> Result<DistanceAnalysis> {
    let n = coordinates.nrows();
    if n != labels.len() {
        return Err(EigenfaceError::DimensionMismatch {
            expected: n,
            actual: labels.len(),
        });
    }
    if n < 2 {
        return Err(EigenfaceError::EmptyInput(
            "distance analysis needs at least two coordinates".to_string(),
        ));
    }

    let mut pairs: Vec<(f64, bool)> = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            let distance = euclidean_distance(&coordinates.row(i), &coordinates.row(j));
            pairs.push((distance, labels[i] == labels[j]));
        }
    }

    let within: Vec<f64> = pairs.iter().filter(|p| p.1).map(|p| p.0).collect();
    let between: Vec<f64> = pairs.iter().filter(|p| !p.1).map(|p| p.0).collect();
    let within_class = summarize(&within);
    let between_class = summarize(&between);

    let separation_ratio = match (within_class, between_class) {
        (Some(w), Some(b)) if w.mean > 0.0 => Some(b.mean / w.mean),
        _ => None,
    };

    let (best_threshold, threshold_accuracy) = best_threshold(&pairs);

    Ok(DistanceAnalysis {
        within_class,
        between_class,
        separation_ratio,
        best_threshold,
        threshold_accuracy,
    })
}

fn summarize(distances: &[f64]) -> Option<DistanceStats> {
    if distances.is_empty() {
        return None;
    }
    let values = Vector::from(distances.to_vec());
    Some(DistanceStats {
        count: distances.len(),
        mean: values.mean()?,
        std: values.std(0.0),
    })
}

/// Scans evenly spaced thresholds between the smallest and largest distance and
/// keeps the first one with the highest accuracy.
fn best_threshold(pairs: &[(f64, bool)]) -> (f64, f64) {
    let min = pairs.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let max = pairs.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);

    let mut best = (min, f64::NEG_INFINITY);
    for threshold in Vector::linspace(min, max, THRESHOLD_CANDIDATES) {
        let correct = pairs
            .iter()
            .filter(|&&(distance, same)| (distance < threshold) == same)
            .count();
        let accuracy = correct as f64 / pairs.len() as f64;
        if accuracy > best.1 {
            best = (threshold, accuracy);
        }
    }
    best
}
