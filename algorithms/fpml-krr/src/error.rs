use thiserror::Error;

pub type Result<T> = std::result::Result<T, KrrError>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum KrrError {
    #[error("regularization has to be non-negative and finite, got {0}")]
    InvalidRegularization(f32),
    #[error("the covariance matrix is not positive definite, increase the regularization")]
    SingularCovariance,
    #[error("at least one {0} sample is needed")]
    NotEnoughSamples(&'static str),
    #[error("training records have {0} features, test records {1}")]
    MismatchedFeatures(usize, usize),
    #[error("expected {expected} {what}, got {actual}")]
    MismatchedLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("a validation error was requested without test targets")]
    MissingTestTarget,
    #[error(transparent)]
    Kernel(#[from] fpml_kernel::KernelError),
    #[error(transparent)]
    LinalgError(#[from] linfa_linalg::LinalgError),
    #[error(transparent)]
    BaseCrate(#[from] fpml::Error),
}
