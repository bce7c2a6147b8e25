//! Eigenface-style dimensionality reduction and nearest-neighbour recognition.
//!
//! The crate is a pipeline of pure functions over `ndarray` values:
//!
//! 1. [`preprocessing::compute_mean`] / [`preprocessing::center`] centre a corpus
//! 2. [`compute_basis`] derives an orthonormal basis through an SVD
//! 3. [`project`] / [`reconstruct`] move vectors in and out of the basis
//! 4. [`classify`] labels a coordinate by its nearest training coordinate
//! 5. [`evaluate`] runs a stratified train/test split end to end
//!
//! # Examples
//! ```rust
//! use eigenface::{EngineConfig, SyntheticCorpus, evaluate};
//!
//! let corpus = SyntheticCorpus::new(4, 5, 12).seed(7).generate().unwrap();
//! let config = EngineConfig::new().n_components(3).test_fraction(0.2).seed(42);
//!
//! let report = evaluate(&corpus, &config).unwrap();
//! assert_eq!(report.n_test, 4);
//! assert!(report.accuracy >= 0.0 && report.accuracy <= 1.0);
//! ```

pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

pub mod analysis;
pub mod config;
pub mod dataset;
pub mod decomposition;
pub mod error;
pub mod evaluation;
pub mod metrics;
pub mod neighbors;
pub mod preprocessing;
pub mod synthetic;

pub type Vector = Array1<f64>;
pub type Matrix = Array2<f64>;

pub use config::EngineConfig;
pub use dataset::{Corpus, Split};
pub use decomposition::{EigenBasis, compute_basis, project, project_all, reconstruct, reconstruct_all};
pub use error::{EigenfaceError, Result};
pub use evaluation::{EvaluationReport, Prediction, evaluate, sweep_components};
pub use neighbors::{Classification, classify};
pub use synthetic::SyntheticCorpus;
