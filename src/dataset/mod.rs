//! The dataset container shared by fingerprints, reductions and models
use ndarray::{ArrayBase, ArrayView, ArrayView1, Ix1, Ix2, NdFloat, OwnedRepr};
use num_traits::{AsPrimitive, FromPrimitive, NumCast, Signed};
use rand::distributions::uniform::SampleUniform;
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use std::iter::Sum;
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

mod impl_dataset;
mod impl_records;
mod impl_targets;

/// Element type of records and targets, implemented for `f32` and `f64`
pub trait Float:
    NdFloat
    + FromPrimitive
    + Default
    + Signed
    + Sum
    + AsPrimitive<usize>
    + for<'a> AddAssign<&'a Self>
    + for<'a> MulAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> DivAssign<&'a Self>
    + num_traits::MulAdd<Output = Self>
    + SampleUniform
    + approx::AbsDiffEq<Epsilon = Self>
    + std::marker::Unpin
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}
impl Float for f64 {}

/// Records, one target per record and the names of the features
///
/// Fingerprint records are a `(nsamples, nfeatures)` matrix with one row per candidate. The
/// targets are a vector of the same length, or `()` for records without a known target.
/// Feature names are owned and cloned along with views, they default to `feature-{index}`.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetBase<R, T>
where
    R: Records,
{
    pub records: R,
    pub targets: T,

    feature_names: Vec<String>,
}

/// Owned records with a continuous target per record
pub type Dataset<F> = DatasetBase<ArrayBase<OwnedRepr<F>, Ix2>, ArrayBase<OwnedRepr<F>, Ix1>>;

/// Borrowed records and targets
pub type DatasetView<'a, F> = DatasetBase<ArrayView<'a, F, Ix2>, ArrayView<'a, F, Ix1>>;

/// Anything with a number of samples and features
pub trait Records: Sized {
    type Elem;

    fn nsamples(&self) -> usize;
    fn nfeatures(&self) -> usize;
}

/// Targets that can be viewed as a vector
pub trait AsTargets {
    type Elem;

    fn as_targets(&self) -> ArrayView1<Self::Elem>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1, Array2};

    #[test]
    fn autotraits() {
        fn has_autotraits<T: Send + Sync + Sized + Unpin>() {}
        has_autotraits::<Dataset<f64>>();
        has_autotraits::<DatasetView<f64>>();
    }

    #[test]
    fn dataset_implements_required_methods() {
        let dataset = Dataset::new(array![[1., 2.], [3., 4.], [5., 6.]], array![0., 1., 2.]);

        assert_eq!(dataset.nsamples(), 3);
        assert_eq!(dataset.nfeatures(), 2);
        assert_eq!(dataset.feature_names(), vec!["feature-0", "feature-1"]);
        let targets = array![0., 1., 2.];
        assert_abs_diff_eq!(dataset.as_targets(), targets.view());

        let view = dataset.view();
        assert_eq!(view.records().dim(), (3, 2));

        let dataset = dataset.with_feature_names(vec!["mass", "rdf"]);
        assert_eq!(dataset.feature_names(), vec!["mass", "rdf"]);
    }

    #[test]
    fn remove_features_keeps_original_order() {
        let records = Array2::from_shape_fn((4, 5), |(i, j)| (i * 10 + j) as f64);
        let dataset = Dataset::new(records, Array1::zeros(4))
            .with_feature_names(vec!["a", "b", "c", "d", "e"]);

        let reduced = dataset.remove_features(&[3, 0]).unwrap();
        assert_eq!(reduced.nfeatures(), 3);
        assert_eq!(reduced.feature_names(), vec!["b", "c", "e"]);
        assert_abs_diff_eq!(reduced.records().row(1), array![11., 12., 14.]);

        // targets are untouched
        assert_eq!(reduced.targets().len(), 4);
    }

    #[test]
    fn select_features_follows_given_order() {
        let records = Array2::from_shape_fn((2, 4), |(i, j)| (i * 10 + j) as f64);
        let dataset = Dataset::new(records, array![1., 2.]);

        let selected = dataset.select_features(&[2, 0]).unwrap();
        assert_abs_diff_eq!(selected.records(), &array![[2., 0.], [12., 10.]]);
        assert_eq!(selected.feature_names(), vec!["feature-2", "feature-0"]);
    }

    #[test]
    fn out_of_range_features_are_rejected() {
        let dataset = Dataset::new(Array2::<f64>::zeros((2, 3)), array![1., 2.]);

        assert!(dataset.select_features(&[3]).is_err());
        assert!(dataset.remove_features(&[0, 7]).is_err());
    }

    #[test]
    fn check_shapes_detects_misaligned_targets() {
        let dataset = Dataset::new(Array2::<f64>::zeros((3, 2)), array![1., 2.]);
        assert!(dataset.check_shapes().is_err());

        let dataset = Dataset::new(Array2::<f64>::zeros((2, 2)), array![1., 2.]);
        assert!(dataset.check_shapes().is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn fingerprint_dataset_survives_json() {
        let dataset = Dataset::new(array![[1.5, 2.], [3., 4.25]], array![-1., 0.5])
            .with_feature_names(vec!["mass", "rdf-Au-Au-0"]);

        let json = serde_json::to_string(&dataset).unwrap();
        let restored: Dataset<f64> = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, dataset);
        assert_eq!(restored.feature_names(), vec!["mass", "rdf-Au-Au-0"]);
    }
}
