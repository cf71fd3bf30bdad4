//! Deviation of continuous predictions from known targets
//!
//! All measures compare two arrays of equal length element by element and return `NaN` when
//! both are empty.

use ndarray::prelude::*;
use ndarray::{Data, IntoNdProducer, NdFloat};
use num_traits::FromPrimitive;

/// Error measures of a prediction against the ground truth
///
/// ```rust
/// use fpml::metrics::Regression;
/// use ndarray::array;
///
/// let prediction = array![0.5, 1.0, 2.0];
/// let target = array![0.5, 2.0, 1.0];
/// assert_eq!(prediction.max_error(&target), 1.0);
/// assert!((prediction.root_mean_squared_error(&target) - (2f64 / 3.).sqrt()).abs() < 1e-12);
/// ```
pub trait Regression<
    'a,
    A: 'a,
    D: ndarray::Dimension,
    T: IntoNdProducer<Item = &'a A, Dim = D, Output = ArrayView<'a, A, D>>,
>
{
    /// Largest absolute deviation
    fn max_error(&self, compare_to: T) -> A;
    fn mean_absolute_error(&self, compare_to: T) -> A;
    fn mean_squared_error(&self, compare_to: T) -> A;
    /// Square root of the mean squared error, in units of the target
    fn root_mean_squared_error(&self, compare_to: T) -> A;
    /// Coefficient of determination with `compare_to` as ground truth
    ///
    /// One for a perfect prediction, zero for predicting the mean of the ground truth.
    fn r2(&self, compare_to: T) -> A;
}

impl<
        'a,
        A: 'a + NdFloat + FromPrimitive,
        D: Data<Elem = A>,
        T: IntoNdProducer<Item = &'a A, Dim = Ix1, Output = ArrayView<'a, A, Ix1>>,
    > Regression<'a, A, Ix1, T> for ArrayBase<D, Ix1>
{
    fn max_error(&self, compare_to: T) -> A {
        let compare_to: ArrayView1<'a, A> = compare_to.into_producer();
        if self.is_empty() {
            return A::nan();
        }

        (self - &compare_to)
            .iter()
            .fold(A::zero(), |max, x| max.max(x.abs()))
    }

    fn mean_absolute_error(&self, compare_to: T) -> A {
        let compare_to: ArrayView1<'a, A> = compare_to.into_producer();

        (self - &compare_to)
            .mapv(|x| x.abs())
            .mean()
            .unwrap_or_else(A::nan)
    }

    fn mean_squared_error(&self, compare_to: T) -> A {
        let compare_to: ArrayView1<'a, A> = compare_to.into_producer();

        (self - &compare_to)
            .mapv(|x| x * x)
            .mean()
            .unwrap_or_else(A::nan)
    }

    fn root_mean_squared_error(&self, compare_to: T) -> A {
        self.mean_squared_error(compare_to).sqrt()
    }

    fn r2(&self, compare_to: T) -> A {
        let compare_to: ArrayView1<'a, A> = compare_to.into_producer();
        let mean = match compare_to.mean() {
            Some(mean) => mean,
            None => return A::nan(),
        };

        let residual = (self - &compare_to).mapv(|x| x * x).sum();
        let total = compare_to.mapv(|x| (x - mean) * (x - mean)).sum();
        // constant ground truth
        let total = total + A::from_f64(1e-10).unwrap_or_else(A::epsilon);

        A::one() - residual / total
    }
}
