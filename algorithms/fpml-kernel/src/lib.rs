//! ## Kernel matrices
//!
//! A kernel compares two fingerprints and returns their similarity. Kernel ridge regression
//! needs two kinds of matrices built from it:
//!
//! * the square, symmetric [`Kernel`] of the training records with itself
//! * the rectangular [`KernelMethod::cross`] matrix comparing the records to predict with the
//!   training records
//!
//! Gaussian, linear and polynomial kernels are available. All matrices are dense, descriptor
//! studies train on a few hundred candidates.
//!
//! ```rust
//! use fpml_kernel::{Kernel, KernelMethod};
//! use ndarray::array;
//!
//! let train = array![[0., 0.], [1., 0.], [0., 1.]];
//! let kernel = Kernel::new(&train, &Kernel::params().method(KernelMethod::Linear));
//! assert_eq!(kernel.inner(), &train.dot(&train.t()));
//!
//! let test = array![[1., 1.]];
//! assert_eq!(KernelMethod::Linear.cross(&test, &train), array![[0., 1., 1.]]);
//! ```

use std::fmt;

use ndarray::{Array1, Array2, ArrayBase, ArrayView1, Data, Ix2};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};
use thiserror::Error;

use fpml::{traits::Transformer, Float};

/// Errors of an invalid kernel definition
#[derive(Error, Debug, Clone)]
pub enum KernelError {
    #[error("gaussian kernel width has to be positive, got {0}")]
    InvalidWidth(f32),
    #[error("polynomial degree has to be positive, got {0}")]
    InvalidDegree(f32),
}

/// The similarity of two records
///
/// | Method | Similarity of `x` and `y` |
/// | :--- | :--- |
/// | `Gaussian(width)` | `exp(-‖x - y‖² / (2 width²))` |
/// | `Linear` | `<x, y>` |
/// | `Polynomial(constant, degree)` | `(<x, y> + constant)^degree` |
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
pub enum KernelMethod<F> {
    Gaussian(F),
    Linear,
    Polynomial(F, F),
}

impl<F: Float> KernelMethod<F> {
    /// Similarity of two records of equal length
    pub fn evaluate(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F {
        match *self {
            KernelMethod::Gaussian(width) => {
                let squared = a
                    .iter()
                    .zip(b.iter())
                    .map(|(x, y)| (*x - *y) * (*x - *y))
                    .sum::<F>();

                (-squared / (F::cast(2.) * width * width)).exp()
            }
            KernelMethod::Linear => a.dot(&b),
            KernelMethod::Polynomial(constant, degree) => (a.dot(&b) + constant).powf(degree),
        }
    }

    /// Kernel evaluations between every row of `a` and every row of `b`
    ///
    /// The result has shape `(a.nrows(), b.nrows())`. For prediction `a` holds the records to
    /// predict and `b` the training records.
    ///
    /// ## Panics
    ///
    /// If `a` and `b` differ in their number of features
    pub fn cross<D: Data<Elem = F>, E: Data<Elem = F>>(
        &self,
        a: &ArrayBase<D, Ix2>,
        b: &ArrayBase<E, Ix2>,
    ) -> Array2<F> {
        assert_eq!(
            a.ncols(),
            b.ncols(),
            "kernel arguments must have the same number of features"
        );

        Array2::from_shape_fn((a.nrows(), b.nrows()), |(i, j)| {
            self.evaluate(a.row(i), b.row(j))
        })
    }

    /// Symmetric kernel of the records with themselves
    fn gram<D: Data<Elem = F>>(&self, records: &ArrayBase<D, Ix2>) -> Array2<F> {
        let n = records.nrows();
        let mut gram = Array2::zeros((n, n));

        // upper triangle only
        for i in 0..n {
            for j in i..n {
                let value = self.evaluate(records.row(i), records.row(j));
                gram[(i, j)] = value;
                gram[(j, i)] = value;
            }
        }

        gram
    }

    /// Checks that the kernel parameters describe a valid kernel
    pub fn validate(&self) -> Result<(), KernelError> {
        match *self {
            KernelMethod::Gaussian(width) if width.is_nan() || width <= F::zero() => {
                Err(KernelError::InvalidWidth(width.to_f32().unwrap_or(f32::NAN)))
            }
            KernelMethod::Polynomial(_, degree) if degree.is_nan() || degree <= F::zero() => {
                Err(KernelError::InvalidDegree(degree.to_f32().unwrap_or(f32::NAN)))
            }
            _ => Ok(()),
        }
    }
}

impl<F: Float> fmt::Display for KernelMethod<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KernelMethod::Gaussian(width) => write!(f, "gaussian kernel (width = {})", width),
            KernelMethod::Linear => write!(f, "linear kernel"),
            KernelMethod::Polynomial(constant, degree) => write!(
                f,
                "polynomial kernel (constant = {}, degree = {})",
                constant, degree
            ),
        }
    }
}

/// A dense kernel of training records
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel<F> {
    inner: Array2<F>,
    method: KernelMethod<F>,
}

impl<F: Float> Kernel<F> {
    /// Gaussian kernel of width 0.5, change it with [`KernelParams::method`]
    pub fn params() -> KernelParams<F> {
        KernelParams {
            method: KernelMethod::Gaussian(F::cast(0.5)),
        }
    }

    pub fn new<D: Data<Elem = F>>(
        records: &ArrayBase<D, Ix2>,
        params: &KernelParams<F>,
    ) -> Kernel<F> {
        Kernel {
            inner: params.method.gram(records),
            method: params.method,
        }
    }

    /// The square matrix of pairwise kernel evaluations
    pub fn inner(&self) -> &Array2<F> {
        &self.inner
    }

    pub fn method(&self) -> &KernelMethod<F> {
        &self.method
    }

    /// Number of training records
    pub fn size(&self) -> usize {
        self.inner.nrows()
    }

    /// Similarity of every record with itself
    pub fn diagonal(&self) -> Array1<F> {
        self.inner.diag().to_owned()
    }

    /// Consumes the kernel and returns the inner matrix
    pub fn into_inner(self) -> Array2<F> {
        self.inner
    }
}

/// Parameters of a kernel
#[derive(Debug, Clone, PartialOrd, PartialEq)]
pub struct KernelParams<F> {
    method: KernelMethod<F>,
}

impl<F> KernelParams<F> {
    /// Set the similarity of two records
    pub fn method(mut self, method: KernelMethod<F>) -> Self {
        self.method = method;
        self
    }
}

impl<'a, F: Float, D: Data<Elem = F>> Transformer<&'a ArrayBase<D, Ix2>, Kernel<F>>
    for KernelParams<F>
{
    /// Kernel of the records with themselves
    fn transform(&self, records: &'a ArrayBase<D, Ix2>) -> Kernel<F> {
        Kernel::new(records, self)
    }
}
