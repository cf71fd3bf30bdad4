//! Principal component analysis
//!
//! The records are centred on their mean and decomposed with the singular value decomposition of
//! `linfa-linalg`. The right singular vectors belonging to the largest singular values are the
//! directions of largest variance, projecting onto the first `k` of them gives a `k` dimensional
//! description of every record.
//!
//! ```
//! use fpml::traits::{Fit, Predict};
//! use fpml::DatasetBase;
//! use fpml_reduction::Pca;
//! use ndarray::array;
//!
//! let dataset = DatasetBase::from(array![[1., 2., 0.], [2., 4., 1.], [3., 7., 0.], [4., 8., 1.]]);
//!
//! // a single direction along the largest spread
//! let pca = Pca::params(1).fit(&dataset).unwrap();
//! assert_eq!(pca.predict(&dataset).dim(), (4, 1));
//! ```
use linfa_linalg::svd::*;
use ndarray::{s, Array1, Array2, ArrayBase, Axis, Data, Ix2};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use fpml::{
    traits::{Fit, PredictInplace, Transformer},
    DatasetBase, Float, ParamGuard,
};

use crate::error::{ReductionError, Result};

/// Checked parameters of a [`Pca`]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcaValidParams {
    ncomponents: usize,
    whiten: bool,
}

impl PcaValidParams {
    /// Number of kept principal components
    pub fn ncomponents(&self) -> usize {
        self.ncomponents
    }

    pub fn whitening(&self) -> bool {
        self.whiten
    }
}

/// Parameters of a [`Pca`], checked before fitting
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcaParams(PcaValidParams);

impl PcaParams {
    /// Scale every component to unit variance on the training records
    pub fn whiten(mut self, whiten: bool) -> Self {
        self.0.whiten = whiten;
        self
    }
}

impl ParamGuard for PcaParams {
    type Checked = PcaValidParams;
    type Error = ReductionError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        match self.0.ncomponents {
            0 => Err(ReductionError::EmbeddingTooSmall),
            _ => Ok(&self.0),
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

/// Degrees of freedom of the sample variance
fn degrees_of_freedom<F: Float>(nsamples: usize) -> F {
    F::cast(nsamples.saturating_sub(1).max(1))
}

impl<F: Float, D: Data<Elem = F>, T> Fit<ArrayBase<D, Ix2>, T, ReductionError>
    for PcaValidParams
{
    type Object = Pca<F>;

    /// Finds the principal axes of the records
    ///
    /// At most `min(nsamples, nfeatures)` components exist, asking for more fails with
    /// [`ReductionError::TooManyComponents`].
    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Pca<F>> {
        let records = dataset.records();
        let (nsamples, nfeatures) = records.dim();
        let mean = records
            .mean_axis(Axis(0))
            .ok_or(ReductionError::NotEnoughSamples)?;

        let available = nsamples.min(nfeatures);
        if self.ncomponents > available {
            return Err(ReductionError::TooManyComponents(self.ncomponents, available));
        }

        let centred = records - &mean;
        let (_, singular_values, v_t) = centred.svd(false, true)?.sort_svd_desc();
        let v_t = v_t.ok_or(ReductionError::MissingSingularVectors)?;

        let dof = degrees_of_freedom::<F>(nsamples);
        let total_variance = singular_values.fold(F::zero(), |acc, s| acc + *s * *s) / dof;

        // tiny singular values would blow up the whitening
        let singular_values = singular_values
            .slice(s![..self.ncomponents])
            .mapv(|s| s.max(F::cast(1e-8)));
        let mut components = v_t.slice(s![..self.ncomponents, ..]).to_owned();
        if self.whiten {
            for (mut row, s) in components.outer_iter_mut().zip(singular_values.iter()) {
                row *= dof.sqrt() / *s;
            }
        }

        log::debug!(
            "PCA keeps {} of {} components of {} records",
            self.ncomponents,
            available,
            nsamples
        );

        Ok(Pca {
            components,
            singular_values,
            mean,
            dof,
            total_variance,
        })
    }
}

/// Principal axes of a set of training records
///
/// Records are centred on the training mean before they are projected, test records included.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct Pca<F> {
    /// One principal axis per row
    components: Array2<F>,
    singular_values: Array1<F>,
    mean: Array1<F>,
    dof: F,
    total_variance: F,
}

impl Pca<f64> {
    /// Keep `ncomponents` principal axes, without whitening
    pub fn params(ncomponents: usize) -> PcaParams {
        PcaParams(PcaValidParams {
            ncomponents,
            whiten: false,
        })
    }
}

impl<F: Float> Pca<F> {
    /// Variance of the training records along every kept axis
    pub fn explained_variance(&self) -> Array1<F> {
        self.singular_values.mapv(|s| s * s / self.dof)
    }

    /// Share of the total training variance explained by every kept axis
    pub fn explained_variance_ratio(&self) -> Array1<F> {
        if self.total_variance > F::zero() {
            self.explained_variance() / self.total_variance
        } else {
            Array1::zeros(self.singular_values.len())
        }
    }

    pub fn singular_values(&self) -> &Array1<F> {
        &self.singular_values
    }

    pub fn ncomponents(&self) -> usize {
        self.components.nrows()
    }

    /// Mean of the training records
    pub fn mean(&self) -> &Array1<F> {
        &self.mean
    }
}

impl<F: Float, D: Data<Elem = F>> PredictInplace<ArrayBase<D, Ix2>, Array2<F>> for Pca<F> {
    /// Centres the records and projects them onto the principal axes
    fn predict_inplace(&self, x: &ArrayBase<D, Ix2>, y: &mut Array2<F>) {
        assert_eq!(
            x.ncols(),
            self.mean.len(),
            "records must have as many features as the training records"
        );
        assert_eq!(
            y.dim(),
            (x.nrows(), self.ncomponents()),
            "projection must hold one row per record and one column per component"
        );

        *y = (x - &self.mean).dot(&self.components.t());
    }

    fn default_target(&self, x: &ArrayBase<D, Ix2>) -> Array2<F> {
        Array2::zeros((x.nrows(), self.ncomponents()))
    }
}

impl<F: Float, D: Data<Elem = F>, T>
    Transformer<DatasetBase<ArrayBase<D, Ix2>, T>, DatasetBase<Array2<F>, T>> for Pca<F>
{
    /// Replaces the records with their projection, the targets stay
    fn transform(&self, ds: DatasetBase<ArrayBase<D, Ix2>, T>) -> DatasetBase<Array2<F>, T> {
        let mut projected = self.default_target(ds.records());
        self.predict_inplace(ds.records(), &mut projected);

        let names = (0..self.ncomponents())
            .map(|i| format!("pc-{}", i))
            .collect::<Vec<_>>();

        ds.with_records(projected).with_feature_names(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use fpml::traits::Predict;
    use fpml::Dataset;
    use ndarray::{array, Array1, Array2};
    use ndarray_rand::{
        rand_distr::{StandardNormal, Uniform},
        RandomExt,
    };
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn autotraits() {
        fn has_autotraits<T: Send + Sync + Sized + Unpin>() {}
        has_autotraits::<PcaParams>();
        has_autotraits::<PcaValidParams>();
        has_autotraits::<Pca<f64>>();
    }

    #[test]
    fn whitened_projection_has_unit_covariance() {
        let mut rng = SmallRng::seed_from_u64(42);

        // correlated features
        let uniform = Array2::random_using((300, 2), Uniform::new(-1.0f64, 1.), &mut rng);
        let dataset = DatasetBase::from(uniform.dot(&array![[1., 1.], [-1., 1.]]));

        let pca = Pca::params(2).whiten(true).fit(&dataset).unwrap();
        let projected = pca.predict(&dataset);

        let covariance = projected.t().dot(&projected) / 299.;
        assert_abs_diff_eq!(covariance, Array2::eye(2), epsilon = 1e-5);
    }

    #[test]
    fn rank_two_records_have_two_components() {
        let mut rng = SmallRng::seed_from_u64(42);
        let n = 60;

        // two orthonormal directions
        let mut a = Array1::<f64>::random_using(n, StandardNormal, &mut rng);
        a /= a.dot(&a).sqrt();
        let mut b = Array1::<f64>::random_using(n, StandardNormal, &mut rng);
        b -= &(&a * b.dot(&a));
        b /= b.dot(&b).sqrt();

        let records = Array2::from_shape_fn((n, n), |(i, j)| a[i] * a[j] + b[i] * b[j]);
        let pca = Pca::params(5).fit(&DatasetBase::from(records)).unwrap();
        let ratio = pca.explained_variance_ratio();

        assert_eq!(ratio.len(), 5);
        assert_abs_diff_eq!(ratio[0] + ratio[1], 1., epsilon = 1e-6);
        assert_abs_diff_eq!(ratio.slice(s![2..]).sum(), 0., epsilon = 1e-6);
    }

    #[test]
    fn identity_records_spread_variance_evenly() {
        let dataset = DatasetBase::from(Array2::<f64>::eye(4));
        let pca = Pca::params(3).fit(&dataset).unwrap();

        assert_abs_diff_eq!(
            pca.explained_variance_ratio(),
            array![1. / 3., 1. / 3., 1. / 3.],
            epsilon = 1e-6
        );
    }

    #[test]
    fn component_count_is_bounded() {
        let mut rng = SmallRng::seed_from_u64(3);
        let records = Array2::random_using((6, 4), Uniform::new(-1.0f64, 1.), &mut rng);
        let dataset = DatasetBase::from(records);

        for k in 1..=4 {
            let pca = Pca::params(k).fit(&dataset).unwrap();
            assert_eq!(pca.ncomponents(), k);
            assert_eq!(pca.predict(&dataset).dim(), (6, k));
        }

        assert!(matches!(
            Pca::params(5).fit(&dataset),
            Err(ReductionError::TooManyComponents(5, 4))
        ));
        assert!(matches!(
            Pca::params(0).fit(&dataset),
            Err(ReductionError::EmbeddingTooSmall)
        ));

        let wide = DatasetBase::from(Array2::<f64>::zeros((3, 10)));
        assert!(matches!(
            Pca::params(4).fit(&wide),
            Err(ReductionError::TooManyComponents(4, 3))
        ));

        let empty = DatasetBase::from(Array2::<f64>::zeros((0, 3)));
        assert!(matches!(
            Pca::params(1).fit(&empty),
            Err(ReductionError::NotEnoughSamples)
        ));
    }

    #[test]
    fn test_records_are_centred_on_the_training_mean() {
        let mut rng = SmallRng::seed_from_u64(7);
        let train = Dataset::new(
            Array2::random_using((20, 3), Uniform::new(0.0f64, 1.), &mut rng),
            Array1::zeros(20),
        );
        let test = Dataset::new(
            Array2::random_using((5, 3), Uniform::new(0.0f64, 1.), &mut rng),
            Array1::ones(5),
        );

        let pca = Pca::params(2).fit(&train).unwrap();
        let train_mean = train.records().mean_axis(Axis(0)).unwrap();
        assert_abs_diff_eq!(pca.mean(), &train_mean, epsilon = 1e-12);

        let projected = pca.transform(test);
        assert_eq!(projected.records().dim(), (5, 2));
        assert_eq!(projected.feature_names(), vec!["pc-0", "pc-1"]);
        assert_abs_diff_eq!(projected.targets(), &Array1::ones(5));

        let projected_train = pca.predict(&train);
        assert_abs_diff_eq!(
            projected_train.mean_axis(Axis(0)).unwrap(),
            Array1::zeros(2),
            epsilon = 1e-12
        );
    }
}
