//! # Preprocessing
//! ## The Big Picture
//!
//! `fpml-preprocessing` is a crate in the `fpml` workspace, a set of tools to evaluate how well
//! fingerprints describe a property of atomic structures.
//!
//! ## Current state
//! Fingerprints mix quantities of very different magnitude (a total mass next to bond fractions),
//! so every kernel model starts from scaled features. This crate provides
//! [linear scaling](linear_scaling::LinearScaler): the scaling parameters are learned from the
//! training records only and then applied unchanged to every other set of records.

pub mod error;
pub mod linear_scaling;

pub use error::{PreprocessingError, Result};
pub use linear_scaling::{FittedLinearScaler, LinearScaler, ScalingMethod};
