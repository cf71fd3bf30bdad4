use super::{AsTargets, Dataset, DatasetBase, DatasetView, Float, Records};
use crate::error::{Error, Result};
use ndarray::{Array2, ArrayBase, Axis, Data, Ix1, Ix2};
use std::collections::HashSet;

/// Implementation without constraints on records and targets
///
/// This implementation block provides methods for the creation and mutation of datasets. This
/// includes swapping the targets or records and setting feature names.
impl<R: Records, S> DatasetBase<R, S> {
    /// Create a new dataset from records and targets
    ///
    /// # Example
    ///
    /// ```ignore
    /// let dataset = Dataset::new(records, targets);
    /// ```
    pub fn new(records: R, targets: S) -> DatasetBase<R, S> {
        DatasetBase {
            records,
            targets,
            feature_names: Vec::new(),
        }
    }

    /// Returns reference to targets
    pub fn targets(&self) -> &S {
        &self.targets
    }

    /// Returns feature names
    ///
    /// A feature name gives a human-readable string describing the purpose of a single feature.
    /// This allow the reader to understand its purpose while analysing results, for example
    /// which fingerprint a selected feature came from. If no names were set, generic names of
    /// the form `feature-i` are generated.
    pub fn feature_names(&self) -> Vec<String> {
        if !self.feature_names.is_empty() {
            self.feature_names.clone()
        } else {
            (0..self.records.nfeatures())
                .map(|idx| format!("feature-{}", idx))
                .collect()
        }
    }

    /// Return records of a dataset
    ///
    /// The records are data points from which predictions are made. This functions returns a
    /// reference to the record field.
    pub fn records(&self) -> &R {
        &self.records
    }

    /// Updates the records of a dataset
    ///
    /// This function overwrites the records in a dataset. It also invalidates the feature names.
    pub fn with_records<T: Records>(self, records: T) -> DatasetBase<T, S> {
        DatasetBase {
            records,
            targets: self.targets,
            feature_names: Vec::new(),
        }
    }

    /// Updates the targets of a dataset
    pub fn with_targets<T>(self, targets: T) -> DatasetBase<R, T> {
        DatasetBase {
            records: self.records,
            targets,
            feature_names: self.feature_names,
        }
    }

    /// Updates the feature names of a dataset
    pub fn with_feature_names<I: Into<String>>(mut self, names: Vec<I>) -> DatasetBase<R, S> {
        let feature_names = names.into_iter().map(|x| x.into()).collect();

        self.feature_names = feature_names;

        self
    }
}

impl<L, R: Records, T: AsTargets<Elem = L>> DatasetBase<R, T> {
    /// Checks that every record has exactly one target
    pub fn check_shapes(&self) -> Result<()> {
        let ntargets = self.targets.as_targets().len();
        if self.records.nsamples() != ntargets {
            return Err(Error::MismatchedShapes(self.records.nsamples(), ntargets));
        }

        Ok(())
    }
}

impl<F: Float> Dataset<F> {
    /// Creates a view of a dataset
    pub fn view(&self) -> DatasetView<'_, F> {
        DatasetBase::new(self.records.view(), self.targets.view())
            .with_feature_names(self.feature_names.clone())
    }
}

impl<'a, F: Float> DatasetView<'a, F> {
    /// Creates an owned copy of the view
    pub fn to_owned(&self) -> Dataset<F> {
        DatasetBase::new(self.records.to_owned(), self.targets.to_owned())
            .with_feature_names(self.feature_names.clone())
    }
}

impl<F: Float, D: Data<Elem = F>, T: Clone> DatasetBase<ArrayBase<D, Ix2>, T> {
    /// Keep only the features at `indices`, in the order given
    ///
    /// This is how an accepted feature set of a screening run is applied to a dataset.
    pub fn select_features(&self, indices: &[usize]) -> Result<DatasetBase<Array2<F>, T>> {
        let nfeatures = self.records.ncols();
        if let Some(idx) = indices.iter().find(|idx| **idx >= nfeatures) {
            return Err(Error::FeatureOutOfRange(*idx, nfeatures));
        }

        let names = self.feature_names();
        let records = self.records.select(Axis(1), indices);
        let feature_names = indices.iter().map(|idx| names[*idx].clone()).collect();

        Ok(DatasetBase {
            records,
            targets: self.targets.clone(),
            feature_names,
        })
    }

    /// Remove the features at `indices`, retaining the remaining ones in their original order
    ///
    /// This is how a rejected feature set of a screening run is applied to a dataset.
    pub fn remove_features(&self, indices: &[usize]) -> Result<DatasetBase<Array2<F>, T>> {
        let nfeatures = self.records.ncols();
        if let Some(idx) = indices.iter().find(|idx| **idx >= nfeatures) {
            return Err(Error::FeatureOutOfRange(*idx, nfeatures));
        }

        let removed = indices.iter().copied().collect::<HashSet<_>>();
        let kept = (0..nfeatures)
            .filter(|idx| !removed.contains(idx))
            .collect::<Vec<_>>();

        self.select_features(&kept)
    }
}

impl<F: Float, D: Data<Elem = F>> From<ArrayBase<D, Ix2>> for DatasetBase<ArrayBase<D, Ix2>, ()> {
    fn from(records: ArrayBase<D, Ix2>) -> Self {
        DatasetBase::new(records, ())
    }
}

impl<F: Float, D: Data<Elem = F>, E: Data<Elem = F>> From<(ArrayBase<D, Ix2>, ArrayBase<E, Ix1>)>
    for DatasetBase<ArrayBase<D, Ix2>, ArrayBase<E, Ix1>>
{
    fn from(rec_tar: (ArrayBase<D, Ix2>, ArrayBase<E, Ix1>)) -> Self {
        DatasetBase::new(rec_tar.0, rec_tar.1)
    }
}
