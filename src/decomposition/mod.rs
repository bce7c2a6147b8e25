//! Eigenbasis construction and movement in and out of the reduced space.
//!
//! This module provides:
//! - `compute_basis`: orthonormal principal directions of centered data via SVD
//! - `project` / `project_all`: coordinates of centered vectors in a basis
//! - `reconstruct` / `reconstruct_all`: approximate vectors back from coordinates
//!
//! # Examples
//!
//! ## Compress and restore
//! ```rust
//! use eigenface::decomposition::{compute_basis, project, reconstruct};
//! use eigenface::preprocessing::{center, compute_mean};
//! use ndarray::array;
//!
//! let x = array![
//!     [0.1, 0.9, 0.4],
//!     [0.8, 0.2, 0.5],
//!     [0.3, 0.6, 0.7],
//!     [0.6, 0.4, 0.1]
//! ];
//!
//! let mean = compute_mean(&x).unwrap();
//! let centered = center(&x, &mean).unwrap();
//! let basis = compute_basis(&centered, 2).unwrap();
//!
//! let coordinate = project(&centered.row(0).to_owned(), &basis).unwrap();
//! let approx = reconstruct(&coordinate, &basis, &mean).unwrap();
//! assert_eq!(approx.len(), 3);
//! ```

mod eigen_basis;
mod projection;

pub use eigen_basis::{EigenBasis, compute_basis};
pub use projection::{project, project_all, reconstruct, reconstruct_all};
