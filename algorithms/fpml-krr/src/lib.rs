//! # Kernel ridge regression
//!
//! Kernel ridge regression predicts the target of a record as a weighted sum of kernel
//! similarities to the training records. The weights solve the regularized system
//!
//! ```text
//! (K + λ I) w = y
//! ```
//!
//! where `K` is the kernel matrix of the training records, `λ` the regularization and `y` the
//! training target. A prediction for a new record `x` is then `k(x, X) · w`.
//!
//! The individual steps are exposed on the checked parameters, so that an experiment can report
//! on each of them:
//!
//! * [`covariance`](KernelRidgeValidParams::covariance) builds `K + λ I`
//! * [`invert`](KernelRidgeValidParams::invert) inverts it with a Cholesky factorization
//! * [`predictions`](KernelRidgeValidParams::predictions) predicts test records and optionally
//!   reports training and validation errors
//!
//! Alternatively [`Fit`](fpml::traits::Fit) performs the first two steps and returns a
//! [`FittedKernelRidge`] model.
//!
//! ```rust
//! use fpml::traits::{Fit, Predict};
//! use fpml::Dataset;
//! use fpml_kernel::KernelMethod;
//! use fpml_krr::KernelRidge;
//! use ndarray::{array, Array1};
//!
//! let train = Dataset::new(array![[0.], [0.5], [1.], [1.5]], array![0., 0.25, 1., 2.25]);
//! let model = KernelRidge::params()
//!     .kernel(KernelMethod::Gaussian(0.5))
//!     .regularization(1e-3)
//!     .fit(&train)
//!     .unwrap();
//!
//! let prediction: Array1<f64> = model.predict(&array![[0.75]]);
//! assert!((prediction[0] - 0.5625).abs() < 0.15);
//! ```

mod algorithm;
mod error;
mod hyperparams;

pub use algorithm::{ErrorRequest, ErrorSummary, FittedKernelRidge, KrrPrediction};
pub use error::{KrrError, Result};
pub use hyperparams::{KernelRidgeParams, KernelRidgeValidParams};

/// Kernel ridge regression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelRidge;

impl KernelRidge {
    /// Default parameters: gaussian kernel of width 0.5 and a regularization of 0.001
    pub fn params<F: fpml::Float>() -> KernelRidgeParams<F> {
        KernelRidgeParams::new()
    }
}
