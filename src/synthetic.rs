use crate::dataset::Corpus;
use crate::error::{EigenfaceError, Result};
use crate::{Matrix, Vector};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Normal;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seeded generator of labelled "virtual face" vectors.
///
/// Every class gets a random template; each sample is its template plus smaller
/// per-sample variation, min-max normalized into `[0, 1]`.
#[derive(Clone, Debug)]
pub struct SyntheticCorpus {
    n_classes: usize,
    samples_per_class: usize,
    dimension: usize,
    template_scale: f64,
    variation_scale: f64,
    seed: u64,
}

impl SyntheticCorpus {
    pub fn new(n_classes: usize, samples_per_class: usize, dimension: usize) -> Self {
        Self {
            n_classes,
            samples_per_class,
            dimension,
            template_scale: 0.5,
            variation_scale: 0.1,
            seed: 42,
        }
    }

    pub fn template_scale(mut self, template_scale: f64) -> Self {
        self.template_scale = template_scale;
        self
    }

    pub fn variation_scale(mut self, variation_scale: f64) -> Self {
        self.variation_scale = variation_scale;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Rows are grouped by class: all samples of class 0 first, then class 1, ...
    pub fn generate(&self) -> Result<Corpus> {
        if self.n_classes == 0 || self.samples_per_class == 0 || self.dimension == 0 {
            return Err(EigenfaceError::InvalidParameter(format!(
                "synthetic corpus needs non-zero sizes, got {} classes x {} samples x {} dims",
                self.n_classes, self.samples_per_class, self.dimension
            )));
        }
        let template_dist = Normal::new(0.0, self.template_scale)
            .map_err(|e| EigenfaceError::InvalidParameter(format!("template scale: {}", e)))?;
        let variation_dist = Normal::new(0.0, self.variation_scale)
            .map_err(|e| EigenfaceError::InvalidParameter(format!("variation scale: {}", e)))?;

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let n_samples = self.n_classes * self.samples_per_class;
        let mut features = Matrix::zeros((n_samples, self.dimension));
        let mut labels = Vec::with_capacity(n_samples);

        for class in 0..self.n_classes {
            let template = Vector::random_using(self.dimension, template_dist, &mut rng);
            for sample in 0..self.samples_per_class {
                let variation = Vector::random_using(self.dimension, variation_dist, &mut rng);
                let row = class * self.samples_per_class + sample;
                features.row_mut(row).assign(&min_max_normalize(&template + &variation));
                labels.push(class);
            }
        }

        tracing::debug!(n_samples, dimension = self.dimension, seed = self.seed, "generated synthetic corpus");
        Corpus::new(features, labels)
    }
}

fn min_max_normalize(v: Vector) -> Vector {
    let min = v.fold(f64::INFINITY, |a, &b| a.min(b));
    let max = v.fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    let range = max - min;
    if range > 0.0 {
        v.mapv(|x| (x - min) / range)
    } else {
        Vector::zeros(v.len())
    }
}
