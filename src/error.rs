//! Errors of the dataset container
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("number of records ({0}) does not match number of targets ({1})")]
    MismatchedShapes(usize, usize),
    #[error("feature index {0} out of range for {1} features")]
    FeatureOutOfRange(usize, usize),
}
