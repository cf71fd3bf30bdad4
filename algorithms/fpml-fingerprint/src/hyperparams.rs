use fpml::ParamGuard;
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{FingerprintError, Result};

/// A verified hyper-parameter set of the particle descriptors
///
/// See [`ParticleParams`] for more information.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleValidParams {
    pub(crate) max_bonds: usize,
    pub(crate) dx: f64,
    pub(crate) nbin: usize,
    pub(crate) rmax: f64,
}

impl ParticleValidParams {
    pub fn max_bonds(&self) -> usize {
        self.max_bonds
    }

    pub fn dx(&self) -> f64 {
        self.dx
    }

    pub fn nbin(&self) -> usize {
        self.nbin
    }

    pub fn rmax(&self) -> f64 {
        self.rmax
    }
}

impl Default for ParticleValidParams {
    fn default() -> Self {
        ParticleParams::new().0
    }
}

/// Hyper-parameters of the particle descriptors
///
/// Two atoms are bonded when their distance is below the sum of their covalent radii plus `dx`.
///
/// # Parameters
/// | Name | Default | Purpose | Range |
/// | :--- | :--- | :---| :--- |
/// | [max_bonds](Self::max_bonds) | `13` | Largest resolved bond count | `[1, inf)` |
/// | [dx](Self::dx) | `0.2` | Tolerance added to the covalent bond length | `[0, inf)` |
/// | [nbin](Self::nbin) | `4` | Number of histogram bins | `[1, inf)` |
/// | [rmax](Self::rmax) | `8.0` | Cutoff radius of the radial distribution function | `(0, inf)` |
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleParams(ParticleValidParams);

impl Default for ParticleParams {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticleParams {
    pub fn new() -> Self {
        Self(ParticleValidParams {
            max_bonds: 13,
            dx: 0.2,
            nbin: 4,
            rmax: 8.0,
        })
    }

    pub fn max_bonds(mut self, max_bonds: usize) -> Self {
        self.0.max_bonds = max_bonds;
        self
    }

    pub fn dx(mut self, dx: f64) -> Self {
        self.0.dx = dx;
        self
    }

    pub fn nbin(mut self, nbin: usize) -> Self {
        self.0.nbin = nbin;
        self
    }

    pub fn rmax(mut self, rmax: f64) -> Self {
        self.0.rmax = rmax;
        self
    }
}

impl ParamGuard for ParticleParams {
    type Checked = ParticleValidParams;
    type Error = FingerprintError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.max_bonds == 0 {
            Err(FingerprintError::InvalidParams(
                "max_bonds has to be positive".into(),
            ))
        } else if self.0.nbin == 0 {
            Err(FingerprintError::InvalidParams(
                "nbin has to be positive".into(),
            ))
        } else if !self.0.dx.is_finite() || self.0.dx < 0.0 {
            Err(FingerprintError::InvalidParams(format!(
                "dx has to be non-negative, got {}",
                self.0.dx
            )))
        } else if !self.0.rmax.is_finite() || self.0.rmax <= 0.0 {
            Err(FingerprintError::InvalidParams(format!(
                "rmax has to be positive, got {}",
                self.0.rmax
            )))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
