//! # Descriptor experiments
//!
//! Evaluates how well fingerprint descriptors of a genetic algorithm search explain the raw
//! score of its candidates. The relaxed candidates of an ASE JSON database are split into a
//! random test set and a training set, fingerprinted and fed to kernel ridge regression after
//! several feature reductions:
//!
//! * principal component analysis for every number of components
//! * no reduction at all
//! * sure independence screening, plain and iterative, with and without cutoff
//!
//! The training and validation errors of every stage are written to stdout, see
//! [`sweep::run`]. All parameters live in an [`ExperimentConfig`]. Its defaults use 500 training
//! and 500 test candidates, a gaussian kernel of width 0.5 and screen 40 features.

pub mod cli;
pub mod config;
mod error;
pub mod report;
pub mod sweep;

pub use config::ExperimentConfig;
pub use error::{DriverError, Result};
pub use report::{PredictionReport, Stage};
