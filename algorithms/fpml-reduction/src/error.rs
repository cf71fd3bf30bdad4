//! Failures of a dimensionality reduction
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReductionError>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReductionError {
    #[error("records without samples have no principal components")]
    NotEnoughSamples,
    #[error("at least one component has to be kept")]
    EmbeddingTooSmall,
    /// Requested and available number of components
    #[error("{0} components requested, but only {1} are available")]
    TooManyComponents(usize, usize),
    #[error("singular value decomposition returned no right singular vectors")]
    MissingSingularVectors,
    #[error(transparent)]
    LinalgError(#[from] linfa_linalg::LinalgError),
    #[error(transparent)]
    BaseCrate(#[from] fpml::Error),
}
