//! `fpml-reduction` aims to provide pure Rust implementations of dimensionality reduction
//! techniques for fingerprint records.
//!
//! The principal component analysis finds an orthogonal basis of the training records ordered by
//! the amount of variance each direction explains. Descriptor studies sweep the number of kept
//! components to see how many directions a kernel model actually needs.

mod error;
mod pca;

pub use error::{ReductionError, Result};
pub use pca::{Pca, PcaParams, PcaValidParams};
