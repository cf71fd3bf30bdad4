use fpml::{Dataset, DatasetBase};
use fpml_candidates::{Atoms, Candidate, CandidateSet};
use ndarray::{s, Array1, Array2};

use crate::context::FingerprintContext;
use crate::descriptor::Descriptor;
use crate::error::{FingerprintError, Result};
use crate::hyperparams::ParticleValidParams;

/// An ordered list of descriptors
///
/// The fingerprint of a structure concatenates the descriptors in list order. All lengths are
/// fixed by the context, so every structure of the pool maps to a vector of the same width.
#[derive(Debug, Clone, PartialEq)]
pub struct FingerprintPipeline {
    descriptors: Vec<Descriptor>,
    context: FingerprintContext,
    particle: ParticleValidParams,
}

impl FingerprintPipeline {
    /// Pipeline with default particle parameters
    pub fn new(descriptors: Vec<Descriptor>, context: FingerprintContext) -> FingerprintPipeline {
        FingerprintPipeline {
            descriptors,
            context,
            particle: ParticleValidParams::default(),
        }
    }

    /// Replace the parameters of the particle descriptors
    pub fn particle_params(mut self, params: ParticleValidParams) -> FingerprintPipeline {
        self.particle = params;
        self
    }

    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }

    pub fn context(&self) -> &FingerprintContext {
        &self.context
    }

    /// Width of a fingerprint
    pub fn nfeatures(&self) -> usize {
        self.descriptors
            .iter()
            .map(|d| d.len(&self.context, &self.particle))
            .sum()
    }

    pub fn feature_names(&self) -> Vec<String> {
        self.descriptors
            .iter()
            .flat_map(|d| d.feature_names(&self.context, &self.particle))
            .collect()
    }

    /// Fingerprint of a single structure
    pub fn fingerprint(&self, atoms: &Atoms) -> Result<Array1<f64>> {
        let mut fingerprint = Array1::zeros(self.nfeatures());
        self.fill(atoms, &mut fingerprint)?;

        Ok(fingerprint)
    }

    fn fill(&self, atoms: &Atoms, fingerprint: &mut Array1<f64>) -> Result<()> {
        let mut offset = 0;
        for descriptor in &self.descriptors {
            let values = descriptor.extract(atoms, &self.context, &self.particle)?;
            fingerprint
                .slice_mut(s![offset..offset + values.len()])
                .assign(&values);
            offset += values.len();
        }

        Ok(())
    }

    /// Fingerprints of all candidates, one row per candidate
    pub fn transform(&self, candidates: &[Candidate]) -> Result<DatasetBase<Array2<f64>, ()>> {
        if self.descriptors.is_empty() {
            return Err(FingerprintError::NoDescriptors);
        }

        let mut records = Array2::zeros((candidates.len(), self.nfeatures()));
        for (candidate, mut row) in candidates.iter().zip(records.rows_mut()) {
            let mut fingerprint = Array1::zeros(row.len());
            self.fill(candidate.atoms(), &mut fingerprint)?;
            row.assign(&fingerprint);
        }

        log::debug!(
            "fingerprints of {} candidates with {} features",
            candidates.len(),
            records.ncols()
        );

        Ok(DatasetBase::from(records).with_feature_names(self.feature_names()))
    }

    /// Fingerprints of a candidate set together with its targets
    pub fn transform_set(&self, set: &CandidateSet) -> Result<Dataset<f64>> {
        let dataset = self.transform(&set.candidates)?;
        let dataset = dataset.with_targets(set.target.clone());
        dataset.check_shapes()?;

        Ok(dataset)
    }
}
