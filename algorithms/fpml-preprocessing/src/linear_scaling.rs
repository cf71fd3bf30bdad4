//! Linear scaling of fingerprint features
//!
//! Every method learns one affine map per feature, `x ↦ (x - offset) · scale + shift`, from the
//! records passed to `fit`. The fitted scaler applies the same maps to any other records.

use std::fmt;

use approx::abs_diff_eq;
use fpml::dataset::DatasetBase;
use fpml::traits::{Fit, Transformer};
use fpml::Float;
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix2, Zip};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{PreprocessingError, Result};

/// How a [`LinearScaler`] maps the features
///
/// | Method | Offset | Scale | Result |
/// | :--- | :--- | :--- | :--- |
/// | `Normalize` | mean | `1 / (max - min)` | zero mean, unit range |
/// | `Standard` | mean | `1 / std` | zero mean, unit variance |
/// | `MinMax(a, b)` | min | `(b - a) / (max - min)` | values in `[a, b]` |
/// | `MaxAbs` | `0` | `1 / max(abs)` | values in `[-1, 1]` |
///
/// A constant feature has no spread and keeps a scale of one.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub enum ScalingMethod<F: Float> {
    Normalize,
    Standard,
    MinMax(F, F),
    MaxAbs,
}

impl<F: Float> fmt::Display for ScalingMethod<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalingMethod::Normalize => write!(f, "normalizer (mean, range)"),
            ScalingMethod::Standard => write!(f, "standard scaler (mean, standard deviation)"),
            ScalingMethod::MinMax(min, max) => write!(f, "min-max scaler [{}, {}]", min, max),
            ScalingMethod::MaxAbs => write!(f, "max-abs scaler"),
        }
    }
}

/// Learns per-feature scaling from a training dataset
///
/// The statistics come from the dataset passed to `fit` only. Scaling the test records with a
/// scaler fitted on the training records therefore never leaks test information into the model.
///
/// ```rust
/// use fpml::traits::{Fit, Transformer};
/// use fpml::Dataset;
/// use fpml_preprocessing::LinearScaler;
/// use ndarray::array;
///
/// let train: Dataset<f64> = Dataset::new(array![[1., 10.], [3., 30.], [5., 20.]], array![0., 1., 2.]);
/// let test: Dataset<f64> = Dataset::new(array![[2., 15.]], array![1.]);
///
/// let scaler = LinearScaler::normalize().fit(&train).unwrap();
/// let test = scaler.transform(test);
/// assert!((test.records()[(0, 0)] + 0.25).abs() < 1e-12);
/// assert!((test.records()[(0, 1)] + 0.25).abs() < 1e-12);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct LinearScaler<F: Float> {
    method: ScalingMethod<F>,
}

impl<F: Float> Default for LinearScaler<F> {
    fn default() -> Self {
        Self::normalize()
    }
}

impl<F: Float> LinearScaler<F> {
    pub fn new(method: ScalingMethod<F>) -> Self {
        Self { method }
    }

    /// Centre every feature and divide it by its range
    pub fn normalize() -> Self {
        Self::new(ScalingMethod::Normalize)
    }

    /// Centre every feature and divide it by its standard deviation
    pub fn standard() -> Self {
        Self::new(ScalingMethod::Standard)
    }

    /// Map every feature onto `[0, 1]`
    pub fn min_max() -> Self {
        Self::new(ScalingMethod::MinMax(F::zero(), F::one()))
    }

    /// Map every feature onto `[min, max]`, fitting fails for `min > max`
    pub fn min_max_range(min: F, max: F) -> Self {
        Self::new(ScalingMethod::MinMax(min, max))
    }

    /// Divide every feature by its largest absolute value
    pub fn max_abs() -> Self {
        Self::new(ScalingMethod::MaxAbs)
    }

    pub fn method(&self) -> &ScalingMethod<F> {
        &self.method
    }
}

/// Per-feature statistics of a set of records
struct ColumnStats<F> {
    min: Array1<F>,
    max: Array1<F>,
    mean: Array1<F>,
}

impl<F: Float> ColumnStats<F> {
    fn new<D: Data<Elem = F>>(records: &ArrayBase<D, Ix2>) -> Result<Self> {
        let mean = records
            .mean_axis(Axis(0))
            .ok_or(PreprocessingError::NotEnoughSamples)?;
        let min = records.fold_axis(Axis(0), F::infinity(), |&acc, &x| acc.min(x));
        let max = records.fold_axis(Axis(0), F::neg_infinity(), |&acc, &x| acc.max(x));

        Ok(ColumnStats { min, max, mean })
    }

    fn range(&self) -> Array1<F> {
        &self.max - &self.min
    }
}

/// Inverts a spread, constant features are not scaled
fn inverse_spread<F: Float>(spread: F) -> F {
    if abs_diff_eq!(spread, F::zero()) {
        F::one()
    } else {
        F::one() / spread
    }
}

impl<F: Float, D: Data<Elem = F>, T> Fit<ArrayBase<D, Ix2>, T, PreprocessingError>
    for LinearScaler<F>
{
    type Object = FittedLinearScaler<F>;

    /// Learns the scaling of every feature of the records
    ///
    /// Fails for records without samples and for a flipped min-max range.
    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        let records = dataset.records();
        let stats = ColumnStats::new(records)?;
        let nfeatures = records.ncols();

        let (offsets, scales, shift) = match self.method {
            ScalingMethod::Normalize => (
                stats.mean.clone(),
                stats.range().mapv(inverse_spread),
                F::zero(),
            ),
            ScalingMethod::Standard => (
                stats.mean.clone(),
                records.std_axis(Axis(0), F::zero()).mapv(inverse_spread),
                F::zero(),
            ),
            ScalingMethod::MinMax(min, max) => {
                if min > max {
                    return Err(PreprocessingError::FlippedMinMaxRange);
                }
                let scales = stats.range().mapv(|spread| inverse_spread(spread) * (max - min));
                (stats.min.clone(), scales, min)
            }
            ScalingMethod::MaxAbs => {
                let largest = Zip::from(&stats.min)
                    .and(&stats.max)
                    .map_collect(|min, max| min.abs().max(max.abs()));
                (Array1::zeros(nfeatures), largest.mapv(inverse_spread), F::zero())
            }
        };

        log::debug!(
            "fitted {} on {} records with {} features",
            self.method,
            records.nrows(),
            nfeatures
        );

        Ok(FittedLinearScaler {
            offsets,
            scales,
            shift,
            method: self.method.clone(),
        })
    }
}

/// Per-feature affine maps learned by a [`LinearScaler`]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct FittedLinearScaler<F: Float> {
    offsets: Array1<F>,
    scales: Array1<F>,
    shift: F,
    method: ScalingMethod<F>,
}

impl<F: Float> FittedLinearScaler<F> {
    /// Subtracted from every feature before scaling
    pub fn offsets(&self) -> &Array1<F> {
        &self.offsets
    }

    /// Multiplied to every feature after subtracting the offset
    pub fn scales(&self) -> &Array1<F> {
        &self.scales
    }

    pub fn method(&self) -> &ScalingMethod<F> {
        &self.method
    }

    /// Number of features the scaler was fitted on
    pub fn nfeatures(&self) -> usize {
        self.offsets.len()
    }
}

impl<F: Float> Transformer<Array2<F>, Array2<F>> for FittedLinearScaler<F> {
    /// Scales records of shape `(nsamples, nfeatures)`
    ///
    /// # Panics
    ///
    /// If the records have a different number of features than the fitted ones
    fn transform(&self, mut x: Array2<F>) -> Array2<F> {
        if x.is_empty() {
            return x;
        }
        let shift = self.shift;
        Zip::from(x.columns_mut())
            .and(&self.offsets)
            .and(&self.scales)
            .for_each(|mut column, &offset, &scale| {
                column.mapv_inplace(|value| (value - offset) * scale + shift)
            });

        x
    }
}

impl<F: Float, D: Data<Elem = F>, T>
    Transformer<DatasetBase<ArrayBase<D, Ix2>, T>, DatasetBase<Array2<F>, T>>
    for FittedLinearScaler<F>
{
    /// Replaces the records of a dataset by their scaled version, feature names are kept
    fn transform(&self, x: DatasetBase<ArrayBase<D, Ix2>, T>) -> DatasetBase<Array2<F>, T> {
        let feature_names = x.feature_names();
        let scaled = self.transform(x.records().to_owned());

        x.with_records(scaled).with_feature_names(feature_names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use fpml::Dataset;
    use ndarray::array;
    use ndarray_rand::{rand_distr::Uniform, RandomExt};
    use rand::{rngs::SmallRng, SeedableRng};

    fn column_range(records: &Array2<f64>) -> (Array1<f64>, Array1<f64>) {
        let stats = ColumnStats::new(records).unwrap();
        (stats.min, stats.max)
    }

    #[test]
    fn autotraits() {
        fn has_autotraits<T: Send + Sync + Sized + Unpin>() {}
        has_autotraits::<LinearScaler<f64>>();
        has_autotraits::<FittedLinearScaler<f64>>();
        has_autotraits::<ScalingMethod<f64>>();
    }

    #[test]
    fn normalize_centres_and_divides_by_the_range() {
        let dataset = Dataset::new(
            array![[1., 10., 2.], [2., 30., 2.], [3., 20., 2.], [6., 0., 2.]],
            array![0., 0., 0., 0.],
        );
        let scaler = LinearScaler::normalize().fit(&dataset).unwrap();
        assert_abs_diff_eq!(scaler.offsets(), &array![3., 15., 2.]);
        // constant feature keeps its scale
        assert_abs_diff_eq!(scaler.scales(), &array![1. / 5., 1. / 30., 1.]);

        let transformed = scaler.transform(dataset);
        let means = transformed.records().mean_axis(Axis(0)).unwrap();
        assert_abs_diff_eq!(means, array![0., 0., 0.], epsilon = 1e-12);
        assert_abs_diff_eq!(
            transformed.records().column(0).to_owned(),
            array![-0.4, -0.2, 0., 0.6],
            epsilon = 1e-12
        );
    }

    #[test]
    fn feature_names_survive_scaling() {
        let dataset = Dataset::new(array![[1., 2.], [3., 5.]], array![0., 1.])
            .with_feature_names(vec!["mass", "rdf-Au-Au-0"]);
        let scaler = LinearScaler::normalize().fit(&dataset).unwrap();
        let transformed = scaler.transform(dataset);
        assert_eq!(transformed.feature_names(), vec!["mass", "rdf-Au-Au-0"]);
    }

    #[test]
    fn test_records_use_training_statistics() {
        let mut rng = SmallRng::seed_from_u64(42);
        let train = Dataset::new(
            Array2::random_using((50, 4), Uniform::new(-2., 2.), &mut rng),
            Array1::zeros(50),
        );
        let test = Dataset::new(
            Array2::random_using((20, 4), Uniform::new(10., 50.), &mut rng),
            Array1::zeros(20),
        );

        let scaler = LinearScaler::normalize().fit(&train).unwrap();
        let offsets = scaler.offsets().clone();
        let scales = scaler.scales().clone();

        let scaled_test = scaler.transform(test.clone());
        let scaled_train = scaler.transform(train.clone());
        assert_eq!(scaler.offsets(), &offsets);
        assert_eq!(scaler.scales(), &scales);

        let expected = (test.records() - &offsets) * &scales;
        assert_abs_diff_eq!(scaled_test.records(), &expected, epsilon = 1e-12);
        assert_eq!(scaled_train.records().ncols(), scaled_test.records().ncols());

        // refitting on the training data gives the same statistics
        let refit = LinearScaler::normalize().fit(&train).unwrap();
        assert_abs_diff_eq!(refit.offsets(), &offsets);
        assert_abs_diff_eq!(refit.scales(), &scales);
    }

    #[test]
    fn standard_scaling_gives_unit_variance() {
        let dataset = DatasetBase::from(array![[1., -1., 2.], [2., 0., 0.], [0., 1., -1.]]);
        let scaler = LinearScaler::standard().fit(&dataset).unwrap();
        assert_abs_diff_eq!(scaler.offsets(), &array![1., 0., 1. / 3.], epsilon = 1e-12);

        let transformed = scaler.transform(dataset);
        let means = transformed.records().mean_axis(Axis(0)).unwrap();
        let std_devs = transformed.records().std_axis(Axis(0), 0.);
        assert_abs_diff_eq!(means, array![0., 0., 0.], epsilon = 1e-12);
        assert_abs_diff_eq!(std_devs, array![1., 1., 1.], epsilon = 1e-12);
    }

    #[test]
    fn min_max_maps_onto_the_range() {
        let dataset = DatasetBase::from(array![[1., -1., 2.], [2., 0., 0.], [0., 1., -1.]]);
        let scaler = LinearScaler::min_max_range(5., 10.).fit(&dataset).unwrap();
        assert_abs_diff_eq!(scaler.offsets(), &array![0., -1., -1.]);

        let transformed = scaler.transform(dataset);
        let (mins, maxes) = column_range(transformed.records());
        assert_abs_diff_eq!(mins, array![5., 5., 5.], epsilon = 1e-12);
        assert_abs_diff_eq!(maxes, array![10., 10., 10.], epsilon = 1e-12);

        let flipped = LinearScaler::min_max_range(10., 5.).fit(&DatasetBase::from(array![[1.], [2.]]));
        assert!(matches!(flipped, Err(PreprocessingError::FlippedMinMaxRange)));
    }

    #[test]
    fn max_abs_keeps_the_sign() {
        let dataset = DatasetBase::from(array![[1., -1.], [2., -2.], [3., -3.], [4., -5.]]);
        let scaled = LinearScaler::max_abs().fit(&dataset).unwrap().transform(dataset);

        assert_abs_diff_eq!(
            scaled.records(),
            &array![[0.25, -0.2], [0.5, -0.4], [0.75, -0.6], [1., -1.]],
            epsilon = 1e-12
        );
    }

    #[test]
    fn empty_records_cannot_be_fitted() {
        let dataset = DatasetBase::from(Array2::<f64>::zeros((0, 3)));
        for scaler in [
            LinearScaler::normalize(),
            LinearScaler::standard(),
            LinearScaler::min_max(),
            LinearScaler::max_abs(),
        ] {
            assert!(matches!(
                scaler.fit(&dataset),
                Err(PreprocessingError::NotEnoughSamples)
            ));
        }

        let scaler = LinearScaler::normalize()
            .fit(&DatasetBase::from(array![[1., 2.], [3., 4.]]))
            .unwrap();
        let empty: Array2<f64> = scaler.transform(Array2::zeros((0, 2)));
        assert!(empty.is_empty());
    }

    #[test]
    #[should_panic]
    fn mismatched_features_panic() {
        let scaler = LinearScaler::normalize()
            .fit(&DatasetBase::from(array![[1., -1., 2.], [2., 0., 2.]]))
            .unwrap();
        let _: Array2<f64> = scaler.transform(Array2::zeros((1, 2)));
    }
}
