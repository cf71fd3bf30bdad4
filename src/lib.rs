//! `fpml` provides the building blocks to evaluate how well a set of descriptors (fingerprints)
//! describes a target property of atomic structures, e.g. the raw score of candidates found by a
//! genetic algorithm search.
//!
//! The root crate holds what every algorithm shares: the dataset container, the traits used to
//! fit models and transform records, hyperparameter checking and a couple of metrics.
//!
//! * [`DatasetBase`] stores fingerprint records, a single target per record and optional feature
//!   names
//! * [`traits::Fit`], [`traits::Transformer`] and [`traits::PredictInplace`] are implemented by
//!   the algorithm crates
//! * [`ParamGuard`] separates unchecked from verified hyperparameters
//! * [`metrics::Regression`] evaluates continuous predictions
//! * [`correlation`] ranks features by their correlation with the target
//!
//! The algorithms live in their own crates under `algorithms/`:
//!
//! | Name | Purpose |
//! | :--- | :--- |
//! | `fpml-fingerprint` | Particle and standard fingerprints of atomic structures |
//! | `fpml-preprocessing` | Normalization fitted on the training records |
//! | `fpml-reduction` | Principal component analysis |
//! | `fpml-selection` | Sure independence screening, iterative and one-shot |
//! | `fpml-kernel` | Dense kernel matrices |
//! | `fpml-krr` | Kernel ridge regression |
//!
//! `fpml-candidates` reads the candidates of a search from an ASE JSON database and
//! `descriptor-test` is the command line driver that runs a complete descriptor study.

pub mod correlation;
pub mod dataset;
pub mod error;
mod metrics_regression;
mod param_guard;
pub mod prelude;
pub mod traits;

pub use dataset::{Dataset, DatasetBase, DatasetView, Float};
pub use error::Error;
pub use param_guard::ParamGuard;

/// Common metrics functions for regression
pub mod metrics {
    pub use crate::metrics_regression::Regression;
}
