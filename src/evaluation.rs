//! Held-out evaluation of eigenspace nearest-neighbour recognition.
//!
//! The basis and mean are always fitted on the training rows alone; test rows are
//! only ever centered with the training mean and projected.

use crate::config::EngineConfig;
use crate::dataset::{Corpus, Split};
use crate::decomposition::{EigenBasis, compute_basis, project_all};
use crate::error::{EigenfaceError, Result};
use crate::neighbors::classify;
use crate::preprocessing::{center, compute_mean};
use crate::{Matrix, Vector};

/// One classified test instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Prediction {
    /// Row of the test instance in the evaluated corpus.
    pub index: usize,
    pub true_label: usize,
    pub predicted_label: usize,
    pub distance: f64,
    /// Row of the nearest training instance in the evaluated corpus.
    pub neighbor: usize,
}

impl Prediction {
    pub fn is_correct(&self) -> bool {
        self.true_label == self.predicted_label
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EvaluationReport {
    pub n_test: usize,
    pub n_correct: usize,
    pub accuracy: f64,
    /// Components actually used after clamping.
    pub n_components: usize,
    pub predictions: Vec<Prediction>,
}

impl EvaluationReport {
    pub fn true_labels(&self) -> Vec<usize> {
        self.predictions.iter().map(|p| p.true_label).collect()
    }

    pub fn predicted_labels(&self) -> Vec<usize> {
        self.predictions.iter().map(|p| p.predicted_label).collect()
    }
}

/// Training side of a split, centered and ready to be projected.
struct PreparedSplit {
    split: Split,
    train_centered: Matrix,
    test_centered: Matrix,
    train_labels: Vec<usize>,
    test_labels: Vec<usize>,
}

impl PreparedSplit {
    fn new(corpus: &Corpus, test_fraction: f64, seed: u64) -> Result<Self> {
        let split = corpus.stratified_split(test_fraction, seed)?;
        let train = corpus.subset(&split.train)?;
        let test = corpus.subset(&split.test)?;

        let mean: Vector = compute_mean(&train.features)?;
        let train_centered = center(&train.features, &mean)?;
        let test_centered = center(&test.features, &mean)?;

        Ok(Self {
            split,
            train_centered,
            test_centered,
            train_labels: train.labels,
            test_labels: test.labels,
        })
    }

    fn score(&self, basis: &EigenBasis) -> Result<EvaluationReport> {
        let train_coordinates = project_all(&self.train_centered, basis)?;
        let test_coordinates = project_all(&self.test_centered, basis)?;

        let mut predictions = Vec::with_capacity(self.test_labels.len());
        for (i, coordinate) in test_coordinates.rows().into_iter().enumerate() {
            let result = classify(&coordinate.to_owned(), &train_coordinates, &self.train_labels)?;
            predictions.push(Prediction {
                index: self.split.test[i],
                true_label: self.test_labels[i],
                predicted_label: result.label,
                distance: result.distance,
                neighbor: self.split.train[result.index],
            });
        }

        let n_test = predictions.len();
        let n_correct = predictions.iter().filter(|p| p.is_correct()).count();
        let accuracy = n_correct as f64 / n_test as f64;

        tracing::info!(
            n_components = basis.n_components(),
            n_test,
            n_correct,
            accuracy,
            "evaluated split"
        );

        Ok(EvaluationReport {
            n_test,
            n_correct,
            accuracy,
            n_components: basis.n_components(),
            predictions,
        })
    }
}

/// Splits `corpus`, fits a basis on the training rows and classifies every test row.
///
/// The same corpus and configuration always produce the same report.
#[tracing::instrument(level = "debug", skip(corpus, config), fields(k = config.n_components, seed = config.seed))]
pub fn evaluate(corpus: &Corpus, config: &EngineConfig) -> Result<EvaluationReport> {
    config.validate()?;

    let prepared = PreparedSplit::new(corpus, config.test_fraction, config.seed)?;
    let basis = compute_basis(&prepared.train_centered, config.n_components)?;
    prepared.score(&basis)
}

/// Evaluates several component counts against one split and one decomposition.
///
/// Reports come back in the order of `n_components`.
#[tracing::instrument(level = "debug", skip(corpus, n_components))]
pub fn sweep_components(
    corpus: &Corpus,
    n_components: &[usize],
    test_fraction: f64,
    seed: u64,
) -> Result<Vec<EvaluationReport>> {
    let max_k = *n_components.iter().max().ok_or_else(|| {
        EigenfaceError::EmptyInput("no component counts to evaluate".to_string())
    })?;
    if n_components.contains(&0) {
        return Err(EigenfaceError::InvalidComponentCount);
    }

    let prepared = PreparedSplit::new(corpus, test_fraction, seed)?;
    let full = compute_basis(&prepared.train_centered, max_k)?;

    n_components
        .iter()
        .map(|&k| prepared.score(&full.truncate(k)?))
        .collect()
}
