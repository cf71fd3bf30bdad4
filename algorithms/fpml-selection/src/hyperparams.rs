#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use fpml::{Float, ParamGuard};

use crate::error::{Result, SelectionError};

/// A verified hyper-parameter set for sure independence screening
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SisValidParams {
    size: usize,
}

impl SisValidParams {
    pub fn size(&self) -> usize {
        self.size
    }
}

/// A hyper-parameter set for sure independence screening
///
/// # Parameters
/// | Name | Default | Purpose | Range |
/// | :--- | :--- | :---| :--- |
/// | size | - | Number of accepted features | `[1, inf)` |
///
/// Requesting more features than the records have accepts all of them.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SisParams(SisValidParams);

impl SisParams {
    pub fn new(size: usize) -> Self {
        Self(SisValidParams { size })
    }

    /// Set the number of accepted features
    pub fn size(mut self, size: usize) -> Self {
        self.0.size = size;
        self
    }
}

impl ParamGuard for SisParams {
    type Checked = SisValidParams;
    type Error = SelectionError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.size == 0 {
            Err(SelectionError::InvalidSize)
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

/// A verified hyper-parameter set for iterative sure independence screening
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct IterativeSisValidParams<F> {
    size: usize,
    step: Option<usize>,
    cutoff: Option<F>,
}

impl<F: Float> IterativeSisValidParams<F> {
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of features accepted per round, `max(1, round(size / 10))` if not set
    pub fn step(&self) -> usize {
        self.step
            .unwrap_or_else(|| ((self.size as f64 / 10.).round() as usize).max(1))
    }

    pub fn cutoff(&self) -> Option<F> {
        self.cutoff
    }
}

/// A hyper-parameter set for iterative sure independence screening
///
/// # Parameters
/// | Name | Default | Purpose | Range |
/// | :--- | :--- | :---| :--- |
/// | size | - | Maximal number of accepted features | `[1, nsamples)` |
/// | [step](Self::step) | `max(1, round(size / 10))` | Features accepted per round | `[1, inf)` |
/// | [cutoff](Self::cutoff) | `None` | Minimal absolute correlation with the residual | `[0, 1)` |
///
/// # Errors
///
/// Returns [`InvalidSize`](SelectionError::InvalidSize) for a zero size,
/// [`InvalidStep`](SelectionError::InvalidStep) for a zero step and
/// [`InvalidCutoff`](SelectionError::InvalidCutoff) for a cutoff outside of `[0, 1)`. Fitting
/// fails with [`TooFewSamples`](SelectionError::TooFewSamples) unless the records hold more
/// samples than `size`.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct IterativeSisParams<F>(IterativeSisValidParams<F>);

impl<F: Float> IterativeSisParams<F> {
    pub fn new(size: usize) -> Self {
        Self(IterativeSisValidParams {
            size,
            step: None,
            cutoff: None,
        })
    }

    /// Set the number of features accepted in every round
    pub fn step(mut self, step: usize) -> Self {
        self.0.step = Some(step);
        self
    }

    /// Reject remaining features whose absolute correlation with the residual falls below
    /// `cutoff`
    pub fn cutoff(mut self, cutoff: F) -> Self {
        self.0.cutoff = Some(cutoff);
        self
    }

    /// Set an optional cutoff
    pub fn with_cutoff(mut self, cutoff: Option<F>) -> Self {
        self.0.cutoff = cutoff;
        self
    }
}

impl<F: Float> ParamGuard for IterativeSisParams<F> {
    type Checked = IterativeSisValidParams<F>;
    type Error = SelectionError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.size == 0 {
            return Err(SelectionError::InvalidSize);
        }
        if let Some(step) = self.0.step {
            if step == 0 {
                return Err(SelectionError::InvalidStep(step));
            }
        }
        if let Some(cutoff) = self.0.cutoff {
            if cutoff.is_nan() || cutoff < F::zero() || cutoff >= F::one() {
                return Err(SelectionError::InvalidCutoff(
                    cutoff.to_f32().unwrap_or(f32::NAN),
                ));
            }
        }

        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
