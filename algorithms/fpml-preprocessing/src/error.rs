//! Failures while learning a scaling
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PreprocessingError>;

#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum PreprocessingError {
    /// Statistics need at least one record
    #[error("cannot learn a scaling from records without samples")]
    NotEnoughSamples,
    #[error("lower bound of the min-max range is greater than the upper bound")]
    FlippedMinMaxRange,
    #[error(transparent)]
    BaseCrate(#[from] fpml::Error),
}
