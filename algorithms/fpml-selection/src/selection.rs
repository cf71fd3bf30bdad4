use fpml::{DatasetBase, Float};
use ndarray::{Array1, Array2, ArrayBase, Data, Ix2};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{Result, SelectionError};

/// Outcome of a screening run
///
/// `accepted` and `rejected` partition the feature indices `0..nfeatures` of the screened
/// records. `sorted` lists the accepted features followed by the rejected ones and
/// `correlation[i]` is the absolute correlation of `sorted[i]` with the target. Plain screening
/// scores every feature, iterative screening only the accepted ones, each with the correlation
/// it had with the residual target when it was accepted.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSelection<F> {
    pub(crate) accepted: Vec<usize>,
    pub(crate) rejected: Vec<usize>,
    pub(crate) correlation: Array1<F>,
    pub(crate) sorted: Vec<usize>,
}

impl<F: Float> FeatureSelection<F> {
    /// Indices of the accepted features, best first
    pub fn accepted(&self) -> &[usize] {
        &self.accepted
    }

    /// Indices of the rejected features
    pub fn rejected(&self) -> &[usize] {
        &self.rejected
    }

    /// Absolute correlation scores, aligned with the leading entries of [`sorted`](Self::sorted)
    pub fn correlation(&self) -> &Array1<F> {
        &self.correlation
    }

    /// All feature indices in selection order
    pub fn sorted(&self) -> &[usize] {
        &self.sorted
    }

    /// Total number of screened features
    pub fn nfeatures(&self) -> usize {
        self.accepted.len() + self.rejected.len()
    }

    /// Removes the rejected features from a dataset
    ///
    /// The remaining features keep their original order, so training and test records reduced by
    /// the same selection stay aligned.
    pub fn reduce<D: Data<Elem = F>, T: Clone>(
        &self,
        dataset: &DatasetBase<ArrayBase<D, Ix2>, T>,
    ) -> Result<DatasetBase<Array2<F>, T>> {
        if dataset.records().ncols() != self.nfeatures() {
            return Err(SelectionError::MismatchedFeatures(
                dataset.records().ncols(),
                self.nfeatures(),
            ));
        }

        Ok(dataset.remove_features(&self.rejected)?)
    }
}
