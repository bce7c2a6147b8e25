use crate::error::{EigenfaceError, Result};
use crate::Matrix;
use ndarray::Axis;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;

/// Labelled feature vectors, one per row of `features`.
#[derive(Clone, Debug)]
pub struct Corpus {
    pub features: Matrix,
    pub labels: Vec<usize>,
}

/// Row indices of a train/test partition, each sorted ascending.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

impl Corpus {
    pub fn new(features: Matrix, labels: Vec<usize>) -> Result<Self> {
        if features.nrows() == 0 {
            return Err(EigenfaceError::EmptyInput(
                "corpus must contain at least one vector".to_string(),
            ));
        }
        if features.ncols() == 0 {
            return Err(EigenfaceError::InvalidParameter(
                "feature vectors must have at least one component".to_string(),
            ));
        }
        if features.nrows() != labels.len() {
            return Err(EigenfaceError::DimensionMismatch {
                expected: features.nrows(),
                actual: labels.len(),
            });
        }
        if features.iter().any(|v| !v.is_finite()) {
            return Err(EigenfaceError::InvalidParameter(
                "feature values must be finite".to_string(),
            ));
        }

        Ok(Self { features, labels })
    }

    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// Number of classes C, taking labels to lie in `[0, C)`.
    pub fn n_classes(&self) -> usize {
        self.labels.iter().max().map_or(0, |&max| max + 1)
    }

    /// Row indices grouped by label, in ascending label order.
    pub fn class_indices(&self) -> BTreeMap<usize, Vec<usize>> {
        let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (i, &label) in self.labels.iter().enumerate() {
            groups.entry(label).or_default().push(i);
        }
        groups
    }

    /// Copies the given rows (in the given order) into a new corpus.
    pub fn subset(&self, indices: &[usize]) -> Result<Self> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.n_samples()) {
            return Err(EigenfaceError::InvalidParameter(format!(
                "row index {} out of range for {} samples",
                bad,
                self.n_samples()
            )));
        }
        let features = self.features.select(Axis(0), indices);
        let labels = indices.iter().map(|&i| self.labels[i]).collect();
        Corpus::new(features, labels)
    }

    /// Partitions rows so that every class appears on both sides.
    ///
    /// Each class holds out `round(count * test_fraction)` rows, clamped to
    /// `[1, count - 1]`. Classes are visited in ascending label order and shuffled
    /// with a single ChaCha8 stream seeded from `seed`.
    pub fn stratified_split(&self, test_fraction: f64, seed: u64) -> Result<Split> {
        if !(test_fraction > 0.0 && test_fraction < 1.0) {
            return Err(EigenfaceError::InvalidParameter(format!(
                "test_fraction must be in (0, 1), got {}",
                test_fraction
            )));
        }

        let groups = self.class_indices();
        if let Some((&label, members)) = groups.iter().find(|(_, members)| members.len() < 2) {
            return Err(EigenfaceError::InsufficientClassSamples {
                label,
                count: members.len(),
            });
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut train = Vec::with_capacity(self.n_samples());
        let mut test = Vec::new();

        for (_, mut members) in groups {
            let count = members.len();
            let n_test = ((count as f64 * test_fraction).round() as usize).clamp(1, count - 1);
            members.shuffle(&mut rng);
            test.extend_from_slice(&members[..n_test]);
            train.extend_from_slice(&members[n_test..]);
        }

        train.sort_unstable();
        test.sort_unstable();
        tracing::debug!(train = train.len(), test = test.len(), seed, "stratified split");

        Ok(Split { train, test })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};

    fn labelled(n_per_class: usize, n_classes: usize) -> Corpus {
        let n = n_per_class * n_classes;
        let features = Array2::from_shape_fn((n, 3), |(i, j)| (i * 3 + j) as f64 / (n * 3) as f64);
        let labels = (0..n).map(|i| i % n_classes).collect();
        Corpus::new(features, labels).unwrap()
    }

    #[test]
    fn test_corpus_creation() {
        let features = array![[0.1, 0.2], [0.3, 0.4], [0.5, 0.6]];
        let corpus = Corpus::new(features, vec![0, 1, 1]).unwrap();
        assert_eq!(corpus.n_samples(), 3);
        assert_eq!(corpus.n_features(), 2);
        assert_eq!(corpus.n_classes(), 2);
    }

    #[test]
    fn test_corpus_rejects_invalid_input() {
        let empty = Array2::<f64>::zeros((0, 4));
        assert!(matches!(
            Corpus::new(empty, vec![]),
            Err(EigenfaceError::EmptyInput(_))
        ));

        let features = array![[0.1, 0.2], [0.3, 0.4]];
        assert_eq!(
            Corpus::new(features.clone(), vec![0]).unwrap_err(),
            EigenfaceError::DimensionMismatch { expected: 2, actual: 1 }
        );

        let with_nan = array![[0.1, f64::NAN]];
        assert!(Corpus::new(with_nan, vec![0]).is_err());
    }

    #[test]
    fn test_subset_keeps_labels_aligned() {
        let corpus = labelled(2, 3);
        let sub = corpus.subset(&[5, 0]).unwrap();
        assert_eq!(sub.labels, vec![corpus.labels[5], corpus.labels[0]]);
        assert_eq!(sub.features.row(0), corpus.features.row(5));
        assert!(corpus.subset(&[6]).is_err());
    }

    #[test]
    fn test_stratified_split_sizes() {
        let corpus = labelled(10, 4);
        let split = corpus.stratified_split(0.2, 42).unwrap();
        assert_eq!(split.test.len(), 8);
        assert_eq!(split.train.len(), 32);

        for label in 0..4 {
            let in_test = split.test.iter().filter(|&&i| corpus.labels[i] == label).count();
            assert_eq!(in_test, 2);
        }
    }

    #[test]
    fn test_stratified_split_partitions_rows() {
        let corpus = labelled(5, 3);
        let split = corpus.stratified_split(0.4, 9).unwrap();
        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..15).collect::<Vec<_>>());
    }

    #[test]
    fn test_stratified_split_is_deterministic() {
        let corpus = labelled(6, 3);
        let a = corpus.stratified_split(0.3, 7).unwrap();
        let b = corpus.stratified_split(0.3, 7).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_stratified_split_keeps_one_train_sample() {
        // round(2 * 0.9) = 2 would empty the training side
        let corpus = labelled(2, 2);
        let split = corpus.stratified_split(0.9, 0).unwrap();
        assert_eq!(split.train.len(), 2);
        assert_eq!(split.test.len(), 2);
    }

    #[test]
    fn test_stratified_split_singleton_class() {
        let features = array![[0.1, 0.2], [0.3, 0.4], [0.5, 0.6]];
        let corpus = Corpus::new(features, vec![0, 0, 1]).unwrap();
        assert_eq!(
            corpus.stratified_split(0.5, 1).unwrap_err(),
            EigenfaceError::InsufficientClassSamples { label: 1, count: 1 }
        );
    }

    #[test]
    fn test_stratified_split_invalid_fraction() {
        let corpus = labelled(4, 2);
        assert!(corpus.stratified_split(0.0, 1).is_err());
        assert!(corpus.stratified_split(1.5, 1).is_err());
    }
}
