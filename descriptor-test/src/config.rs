//! Experiment configuration
//!
//! Every field has a default, so a run without configuration file evaluates the seven study
//! descriptors of the search stored in the ASE JSON database `gadb.json`. A TOML file overrides
//! single values:
//!
//! ```toml
//! database = "gadb.json"
//! seed = 7
//!
//! [split]
//! train_size = 300
//!
//! [fingerprint]
//! descriptors = ["nearest_neighbour", "rdf", "eigenspectrum"]
//!
//! [selection]
//! pca_max_components = 20
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use fpml::ParamGuard;
use fpml_fingerprint::{Descriptor, ParticleParams, ParticleValidParams};
use fpml_kernel::KernelMethod;
use fpml_krr::{KernelRidge, KernelRidgeValidParams};
use fpml_selection::{IterativeSis, IterativeSisValidParams, Sis, SisValidParams};
use serde::Deserialize;

use crate::error::{DriverError, Result};

/// Selection of the training and test candidates
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SplitConfig {
    pub train_size: usize,
    pub test_size: usize,
    /// Key value pair used as regression target
    pub target_key: String,
    pub use_extinct: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        SplitConfig {
            train_size: 500,
            test_size: 500,
            target_key: "raw_score".to_string(),
            use_extinct: false,
        }
    }
}

/// Descriptors and parameters of the particle descriptors
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FingerprintConfig {
    /// Descriptor names in concatenation order
    pub descriptors: Vec<String>,
    pub max_bonds: usize,
    pub dx: f64,
    pub nbin: usize,
    pub rmax: f64,
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        FingerprintConfig {
            descriptors: [
                Descriptor::NearestNeighbour,
                Descriptor::BondCount,
                Descriptor::Distribution,
                Descriptor::Rdf,
                Descriptor::Mass,
                Descriptor::Eigenspectrum,
                Descriptor::Distance,
            ]
            .iter()
            .map(|d| d.to_string())
            .collect(),
            max_bonds: 13,
            dx: 0.2,
            nbin: 4,
            rmax: 8.0,
        }
    }
}

/// Kernel ridge regression
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegressionConfig {
    pub kernel_width: f64,
    pub regularization: f64,
}

impl Default for RegressionConfig {
    fn default() -> Self {
        RegressionConfig {
            kernel_width: 0.5,
            regularization: 0.001,
        }
    }
}

/// Feature reduction strategies of the sweep
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectionConfig {
    pub pca: bool,
    /// Largest number of principal components in the sweep, unbounded when missing
    pub pca_max_components: Option<usize>,
    pub sis_size: usize,
    pub iterative_step: usize,
    pub iterative_cutoff: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        SelectionConfig {
            pca: true,
            pca_max_components: None,
            sis_size: 40,
            iterative_step: 4,
            iterative_cutoff: 1e-2,
        }
    }
}

/// All parameters of a descriptor experiment
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExperimentConfig {
    /// ASE JSON database of the search
    pub database: PathBuf,
    /// Seed of the random test set
    pub seed: u64,
    pub split: SplitConfig,
    pub fingerprint: FingerprintConfig,
    pub regression: RegressionConfig,
    pub selection: SelectionConfig,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig {
            database: PathBuf::from("gadb.json"),
            seed: 42,
            split: SplitConfig::default(),
            fingerprint: FingerprintConfig::default(),
            regression: RegressionConfig::default(),
            selection: SelectionConfig::default(),
        }
    }
}

impl ExperimentConfig {
    pub fn from_toml_str(content: &str) -> Result<ExperimentConfig> {
        Ok(toml::from_str(content)?)
    }

    /// Read a TOML configuration file, missing values keep their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<ExperimentConfig> {
        let path = path.as_ref();
        log::debug!("reading configuration from {}", path.display());

        ExperimentConfig::from_toml_str(&fs::read_to_string(path)?)
    }

    pub fn descriptors(&self) -> Result<Vec<Descriptor>> {
        let descriptors = self
            .fingerprint
            .descriptors
            .iter()
            .map(|name| name.parse::<Descriptor>())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        if descriptors.is_empty() {
            return Err(DriverError::Config("no descriptors configured".into()));
        }

        Ok(descriptors)
    }

    pub fn particle_params(&self) -> Result<ParticleValidParams> {
        let fingerprint = &self.fingerprint;
        Ok(ParticleParams::new()
            .max_bonds(fingerprint.max_bonds)
            .dx(fingerprint.dx)
            .nbin(fingerprint.nbin)
            .rmax(fingerprint.rmax)
            .check()?)
    }

    pub fn krr_params(&self) -> Result<KernelRidgeValidParams<f64>> {
        Ok(KernelRidge::params()
            .kernel(KernelMethod::Gaussian(self.regression.kernel_width))
            .regularization(self.regression.regularization)
            .check()?)
    }

    pub fn sis_params(&self) -> Result<SisValidParams> {
        Ok(Sis::params(self.selection.sis_size).check()?)
    }

    /// Iterative screening without and with cutoff
    pub fn iterative_params(
        &self,
    ) -> Result<(IterativeSisValidParams<f64>, IterativeSisValidParams<f64>)> {
        let params = IterativeSis::params(self.selection.sis_size).step(self.selection.iterative_step);
        let with_cutoff = params.clone().cutoff(self.selection.iterative_cutoff);

        Ok((params.check()?, with_cutoff.check()?))
    }

    /// Check every parameter before any work is done
    pub fn validate(&self) -> Result<()> {
        if self.split.train_size < 2 {
            return Err(DriverError::Config(format!(
                "train_size has to be at least two, got {}",
                self.split.train_size
            )));
        }
        if self.split.test_size == 0 {
            return Err(DriverError::Config("test_size has to be positive".into()));
        }
        if self.selection.pca_max_components == Some(0) {
            return Err(DriverError::Config(
                "pca_max_components has to be positive".into(),
            ));
        }
        self.descriptors()?;
        self.particle_params()?;
        self.krr_params()?;
        self.sis_params()?;
        self.iterative_params()?;

        Ok(())
    }
}
