#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use fpml::{Float, ParamGuard};
use fpml_kernel::KernelMethod;

use crate::error::{KrrError, Result};

/// A verified hyper-parameter set ready for kernel ridge regression
///
/// See [`KernelRidgeParams`] for more information.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct KernelRidgeValidParams<F> {
    pub(crate) kernel: KernelMethod<F>,
    pub(crate) regularization: F,
    pub(crate) standardize_target: bool,
}

impl<F: Float> KernelRidgeValidParams<F> {
    pub fn kernel(&self) -> &KernelMethod<F> {
        &self.kernel
    }

    pub fn regularization(&self) -> F {
        self.regularization
    }

    pub fn standardize_target(&self) -> bool {
        self.standardize_target
    }
}

/// A hyper-parameter set for kernel ridge regression
///
/// # Parameters
/// | Name | Default | Purpose | Range |
/// | :--- | :--- | :---| :--- |
/// | [kernel](Self::kernel) | `Gaussian(0.5)` | Similarity of two records | positive width or degree |
/// | [regularization](Self::regularization) | `1e-3` | Added to the diagonal of the kernel matrix | `[0, inf)` |
/// | [standardize_target](Self::standardize_target) | `false` | Fit the standardized target and rescale predictions | `false`, `true` |
///
/// # Errors
///
/// Returns [`InvalidRegularization`](KrrError::InvalidRegularization) for a negative or
/// non-finite regularization and [`Kernel`](KrrError::Kernel) for an invalid kernel.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct KernelRidgeParams<F>(KernelRidgeValidParams<F>);

impl<F: Float> Default for KernelRidgeParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> KernelRidgeParams<F> {
    pub fn new() -> Self {
        Self(KernelRidgeValidParams {
            kernel: KernelMethod::Gaussian(F::cast(0.5)),
            regularization: F::cast(1e-3),
            standardize_target: false,
        })
    }

    /// Set the inner product of two records
    pub fn kernel(mut self, kernel: KernelMethod<F>) -> Self {
        self.0.kernel = kernel;
        self
    }

    /// Set the ridge added to the diagonal of the kernel matrix
    pub fn regularization(mut self, regularization: F) -> Self {
        self.0.regularization = regularization;
        self
    }

    /// Standardize the training target before computing the weights
    pub fn standardize_target(mut self, standardize: bool) -> Self {
        self.0.standardize_target = standardize;
        self
    }
}

impl<F: Float> ParamGuard for KernelRidgeParams<F> {
    type Checked = KernelRidgeValidParams<F>;
    type Error = KrrError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        let regularization = self.0.regularization;
        if !regularization.is_finite() || regularization < F::zero() {
            return Err(KrrError::InvalidRegularization(
                regularization.to_f32().unwrap_or(f32::NAN),
            ));
        }
        self.0.kernel.validate()?;

        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
