//! # Sure independence screening
//!
//! `fpml-selection` ranks fingerprint features by their univariate correlation with the target
//! and keeps the best ones. Two variants are provided:
//!
//! * [`Sis`] ranks all features once by the absolute Pearson correlation with the target and
//!   accepts the top `size`.
//! * [`IterativeSis`] accepts a few features at a time. After every round the target is replaced
//!   by the residual of a least squares fit on the accepted features, so that the next round
//!   looks for features explaining what is still missing. An optional cutoff discards features
//!   which are barely correlated with the residual.
//!
//! Both produce a [`FeatureSelection`] whose accepted and rejected indices partition the feature
//! range of the training records. Apply it to training and test records alike:
//!
//! ```rust
//! use fpml::traits::Fit;
//! use fpml::Dataset;
//! use fpml_selection::Sis;
//! use ndarray::array;
//!
//! let train = Dataset::new(
//!     array![[1., 0.3, 5.], [2., 0.1, 3.], [3., 0.4, 4.], [4., 0.2, 1.]],
//!     array![1., 2., 3., 4.],
//! );
//! let selection = Sis::params(1).fit(&train).unwrap();
//! assert_eq!(selection.accepted(), &[0]);
//!
//! let reduced = selection.reduce(&train).unwrap();
//! assert_eq!(reduced.records().ncols(), 1);
//! ```

mod error;
mod hyperparams;
mod iterative_sis;
mod selection;
mod sis;

pub use error::{Result, SelectionError};
pub use hyperparams::{IterativeSisParams, IterativeSisValidParams, SisParams, SisValidParams};
pub use selection::FeatureSelection;

/// Sure independence screening
///
/// Ranks features once by their absolute correlation with the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sis;

impl Sis {
    /// Parameters accepting the `size` features most correlated with the target
    pub fn params(size: usize) -> SisParams {
        SisParams::new(size)
    }
}

/// Iterative sure independence screening
///
/// Accepts `step` features per round and screens the remaining features against the residual of
/// the accepted ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterativeSis;

impl IterativeSis {
    /// Parameters accepting up to `size` features
    pub fn params<F: fpml::Float>(size: usize) -> IterativeSisParams<F> {
        IterativeSisParams::new(size)
    }
}
