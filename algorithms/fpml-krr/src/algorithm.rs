use linfa_linalg::{cholesky::InverseC, LinalgError};
use ndarray::{Array1, Array2, ArrayBase, Data, Ix1, Ix2};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use fpml::dataset::{AsTargets, DatasetBase};
use fpml::metrics::Regression;
use fpml::traits::{Fit, PredictInplace};
use fpml::Float;
use fpml_kernel::{Kernel, KernelMethod};

use crate::error::{KrrError, Result};
use crate::hyperparams::KernelRidgeValidParams;

/// Which errors [`predictions`](KernelRidgeValidParams::predictions) should report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ErrorRequest {
    /// Error of the model on its own training records
    pub training: bool,
    /// Error on the test records, requires test targets
    pub validation: bool,
}

impl ErrorRequest {
    /// Request training and validation errors
    pub fn all() -> Self {
        ErrorRequest {
            training: true,
            validation: true,
        }
    }
}

/// Deviation of predictions from known targets
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorSummary<F> {
    /// Root mean squared error
    pub average: F,
    /// Absolute error of every prediction
    pub absolute: Array1<F>,
}

impl<F: Float> ErrorSummary<F> {
    fn new<D: Data<Elem = F>>(prediction: &Array1<F>, target: &ArrayBase<D, Ix1>) -> Self {
        let target = target.view();
        ErrorSummary {
            average: prediction.root_mean_squared_error(&target),
            absolute: (prediction - &target).mapv(|x| x.abs()),
        }
    }
}

/// Predictions for test records together with the requested errors
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct KrrPrediction<F> {
    pub prediction: Array1<F>,
    pub training_error: Option<ErrorSummary<F>>,
    pub validation_error: Option<ErrorSummary<F>>,
}

/// Mean and scale used to standardize the training target
fn target_scaling<F: Float, D: Data<Elem = F>>(
    target: &ArrayBase<D, Ix1>,
    standardize: bool,
) -> (F, F) {
    if !standardize {
        return (F::zero(), F::one());
    }

    let mean = target.mean().unwrap_or_else(F::zero);
    let std = target.std(F::zero());
    if std > F::epsilon() {
        (mean, std)
    } else {
        (mean, F::one())
    }
}

fn weighted_prediction<F: Float, D: Data<Elem = F>, E: Data<Elem = F>>(
    kernel: &KernelMethod<F>,
    records: &ArrayBase<D, Ix2>,
    train: &ArrayBase<E, Ix2>,
    weights: &Array1<F>,
    (mean, scale): (F, F),
) -> Array1<F> {
    kernel
        .cross(records, train)
        .dot(weights)
        .mapv(|p| p * scale + mean)
}

impl<F: Float> KernelRidgeValidParams<F> {
    /// Kernel matrix of the training records with the regularization added to its diagonal
    pub fn covariance<D: Data<Elem = F>>(&self, train: &ArrayBase<D, Ix2>) -> Array2<F> {
        let mut covariance = Kernel::new(train, &Kernel::params().method(self.kernel)).into_inner();
        let regularization = self.regularization;
        covariance
            .diag_mut()
            .mapv_inplace(|x| x + regularization);

        log::debug!(
            "covariance of {} training records computed",
            covariance.nrows()
        );

        covariance
    }

    /// Inverts a covariance matrix with a Cholesky factorization
    ///
    /// A matrix which is not positive definite results in `KrrError::SingularCovariance`.
    /// Nothing is retried, a larger regularization is the caller's remedy.
    pub fn invert(&self, covariance: &Array2<F>) -> Result<Array2<F>> {
        covariance.invc().map_err(|err| match err {
            LinalgError::NotPositiveDefinite => KrrError::SingularCovariance,
            err => KrrError::LinalgError(err),
        })
    }

    /// Predicts the targets of the test records
    ///
    /// `cinv` is the inverted covariance of the training records, as returned by
    /// [`invert`](Self::invert). The prediction is `k(test, train) · cinv · train_target`.
    /// Training errors compare predictions for the training records with their targets,
    /// validation errors need `test_target`.
    pub fn predictions<D: Data<Elem = F>, E: Data<Elem = F>>(
        &self,
        train: &ArrayBase<D, Ix2>,
        test: &ArrayBase<E, Ix2>,
        cinv: &Array2<F>,
        train_target: &Array1<F>,
        test_target: Option<&Array1<F>>,
        request: ErrorRequest,
    ) -> Result<KrrPrediction<F>> {
        let nsamples = train.nrows();
        if nsamples == 0 {
            return Err(KrrError::NotEnoughSamples("training"));
        }
        if train.ncols() != test.ncols() {
            return Err(KrrError::MismatchedFeatures(train.ncols(), test.ncols()));
        }
        if cinv.dim() != (nsamples, nsamples) {
            return Err(KrrError::MismatchedLength {
                what: "rows of the inverted covariance",
                expected: nsamples,
                actual: cinv.nrows(),
            });
        }
        if train_target.len() != nsamples {
            return Err(KrrError::MismatchedLength {
                what: "training targets",
                expected: nsamples,
                actual: train_target.len(),
            });
        }

        let scaling = target_scaling(train_target, self.standardize_target);
        let weights = cinv.dot(&train_target.mapv(|y| (y - scaling.0) / scaling.1));

        let prediction = weighted_prediction(&self.kernel, test, train, &weights, scaling);

        let training_error = if request.training {
            let fitted = weighted_prediction(&self.kernel, train, train, &weights, scaling);
            Some(ErrorSummary::new(&fitted, train_target))
        } else {
            None
        };

        let validation_error = if request.validation {
            let test_target = test_target.ok_or(KrrError::MissingTestTarget)?;
            if test_target.len() != test.nrows() {
                return Err(KrrError::MismatchedLength {
                    what: "test targets",
                    expected: test.nrows(),
                    actual: test_target.len(),
                });
            }
            if test.nrows() == 0 {
                return Err(KrrError::NotEnoughSamples("test"));
            }
            Some(ErrorSummary::new(&prediction, test_target))
        } else {
            None
        };

        Ok(KrrPrediction {
            prediction,
            training_error,
            validation_error,
        })
    }
}

/// Fitted kernel ridge regression model
///
/// Keeps the training records, since every prediction compares a new record with all of them.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct FittedKernelRidge<F> {
    records: Array2<F>,
    weights: Array1<F>,
    kernel: KernelMethod<F>,
    target_mean: F,
    target_scale: F,
}

impl<F: Float> FittedKernelRidge<F> {
    /// Weight of every training record
    pub fn weights(&self) -> &Array1<F> {
        &self.weights
    }

    pub fn kernel(&self) -> &KernelMethod<F> {
        &self.kernel
    }
}

impl<F: Float, D: Data<Elem = F>, T: AsTargets<Elem = F>> Fit<ArrayBase<D, Ix2>, T, KrrError>
    for KernelRidgeValidParams<F>
{
    type Object = FittedKernelRidge<F>;

    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        dataset.check_shapes()?;
        let records = dataset.records();
        if records.nrows() == 0 {
            return Err(KrrError::NotEnoughSamples("training"));
        }

        let target = dataset.as_targets();
        let (target_mean, target_scale) = target_scaling(&target, self.standardize_target);

        let cinv = self.invert(&self.covariance(records))?;
        let weights = cinv.dot(&target.mapv(|y| (y - target_mean) / target_scale));

        Ok(FittedKernelRidge {
            records: records.to_owned(),
            weights,
            kernel: self.kernel,
            target_mean,
            target_scale,
        })
    }
}

impl<F: Float, D: Data<Elem = F>> PredictInplace<ArrayBase<D, Ix2>, Array1<F>>
    for FittedKernelRidge<F>
{
    fn predict_inplace(&self, x: &ArrayBase<D, Ix2>, y: &mut Array1<F>) {
        assert_eq!(
            x.nrows(),
            y.len(),
            "The number of data points must match the number of output targets."
        );

        *y = weighted_prediction(
            &self.kernel,
            x,
            &self.records,
            &self.weights,
            (self.target_mean, self.target_scale),
        );
    }

    fn default_target(&self, x: &ArrayBase<D, Ix2>) -> Array1<F> {
        Array1::zeros(x.nrows())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{KernelRidge, KernelRidgeParams};
    use approx::assert_abs_diff_eq;
    use fpml::traits::Predict;
    use fpml::{Dataset, ParamGuard};
    use ndarray::{array, Array2};
    use ndarray_rand::{rand_distr::Uniform, RandomExt};
    use rand::{rngs::SmallRng, SeedableRng};

    fn params() -> KernelRidgeValidParams<f64> {
        KernelRidgeParams::new().check().unwrap()
    }

    #[test]
    fn autotraits() {
        fn has_autotraits<T: Send + Sync + Sized + Unpin>() {}
        has_autotraits::<KernelRidgeParams<f64>>();
        has_autotraits::<KernelRidgeValidParams<f64>>();
        has_autotraits::<FittedKernelRidge<f64>>();
        has_autotraits::<KrrPrediction<f64>>();
    }

    #[test]
    fn covariance_adds_regularization_to_the_kernel() {
        let train = array![[0., 0.], [1., 0.], [0., 2.]];
        let krr = params();

        let covariance = krr.covariance(&train);
        let kernel = KernelMethod::Gaussian(0.5).cross(&train, &train);

        assert_abs_diff_eq!(covariance.diag(), Array1::from_elem(3, 1.001), epsilon = 1e-12);
        assert_abs_diff_eq!(
            covariance - Array2::<f64>::eye(3) * 1e-3,
            kernel,
            epsilon = 1e-12
        );
    }

    #[test]
    fn inverse_of_covariance() {
        let mut rng = SmallRng::seed_from_u64(42);
        let train = Array2::random_using((20, 3), Uniform::new(-1., 1.), &mut rng);
        let krr = params();

        let covariance = krr.covariance(&train);
        let cinv = krr.invert(&covariance).unwrap();

        assert_abs_diff_eq!(covariance.dot(&cinv), Array2::eye(20), epsilon = 1e-6);
    }

    #[test]
    fn singular_covariance_is_reported() {
        // two identical records without regularization
        let train = array![[1.], [1.]];
        let krr = KernelRidgeParams::new()
            .kernel(KernelMethod::Linear)
            .regularization(0.)
            .check()
            .unwrap();

        let covariance = krr.covariance(&train);
        assert!(matches!(
            krr.invert(&covariance),
            Err(KrrError::SingularCovariance)
        ));
    }

    #[test]
    fn separated_records_are_reproduced() {
        let train = array![[0.], [3.], [6.]];
        let target = array![1., 2., 3.];
        let krr = params();

        let cinv = krr.invert(&krr.covariance(&train)).unwrap();
        let result = krr
            .predictions(
                &train,
                &train,
                &cinv,
                &target,
                Some(&target),
                ErrorRequest::all(),
            )
            .unwrap();

        let training = result.training_error.unwrap();
        let validation = result.validation_error.unwrap();
        assert!(training.average < 1e-2);
        assert_abs_diff_eq!(training.average, validation.average, epsilon = 1e-12);
        assert_abs_diff_eq!(result.prediction, target, epsilon = 1e-2);

        // the average is the root mean squared error of the absolute errors
        let rmse = (training.absolute.mapv(|x| x * x).sum() / 3.).sqrt();
        assert_abs_diff_eq!(training.average, rmse, epsilon = 1e-12);
    }

    #[test]
    fn standardized_target_falls_back_to_the_mean() {
        let train = array![[0.], [3.], [6.]];
        let target = array![1., 2., 3.];
        let far_away = array![[100.]];

        let plain = params();
        let standardized = KernelRidgeParams::new()
            .standardize_target(true)
            .check()
            .unwrap();

        for (krr, expected) in [(plain, 0.), (standardized, 2.)] {
            let cinv = krr.invert(&krr.covariance(&train)).unwrap();
            let result = krr
                .predictions(
                    &train,
                    &far_away,
                    &cinv,
                    &target,
                    None,
                    ErrorRequest::default(),
                )
                .unwrap();

            assert!(result.training_error.is_none());
            assert!(result.validation_error.is_none());
            assert_abs_diff_eq!(result.prediction[0], expected, epsilon = 1e-8);
        }
    }

    #[test]
    fn invalid_prediction_inputs() {
        let train = array![[0.], [3.]];
        let target = array![1., 2.];
        let krr = params();
        let cinv = krr.invert(&krr.covariance(&train)).unwrap();

        assert!(matches!(
            krr.predictions(
                &train,
                &train,
                &cinv,
                &target,
                None,
                ErrorRequest::all()
            ),
            Err(KrrError::MissingTestTarget)
        ));
        assert!(matches!(
            krr.predictions(
                &train,
                &array![[0., 1.]],
                &cinv,
                &target,
                None,
                ErrorRequest::default()
            ),
            Err(KrrError::MismatchedFeatures(1, 2))
        ));
        assert!(matches!(
            krr.predictions(
                &train,
                &train,
                &cinv,
                &array![1.],
                None,
                ErrorRequest::default()
            ),
            Err(KrrError::MismatchedLength { .. })
        ));
    }

    #[test]
    fn fitted_model_matches_stepwise_predictions() {
        let mut rng = SmallRng::seed_from_u64(3);
        let records = Array2::random_using((30, 4), Uniform::new(-1., 1.), &mut rng);
        let target = records.column(0).mapv(|x| x * x) + &records.column(2);
        let test = Array2::random_using((10, 4), Uniform::new(-1., 1.), &mut rng);
        let train = Dataset::new(records, target);

        let model = KernelRidge::params()
            .standardize_target(true)
            .fit(&train)
            .unwrap();
        let predicted: Array1<f64> = model.predict(&test);

        let krr = KernelRidge::params()
            .standardize_target(true)
            .check()
            .unwrap();
        let cinv = krr.invert(&krr.covariance(train.records())).unwrap();
        let stepwise = krr
            .predictions(
                train.records(),
                &test,
                &cinv,
                train.targets(),
                None,
                ErrorRequest::default(),
            )
            .unwrap();

        assert_eq!(model.weights().len(), 30);
        assert_abs_diff_eq!(predicted, stepwise.prediction, epsilon = 1e-8);
    }
}
