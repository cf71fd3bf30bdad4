use thiserror::Error;

pub type Result<T> = std::result::Result<T, SelectionError>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SelectionError {
    #[error("at least 2 samples are needed to correlate features with the target")]
    NotEnoughSamples,
    #[error("the number of selected features has to be at least one")]
    InvalidSize,
    #[error("the screening step has to be at least one, got {0}")]
    InvalidStep(usize),
    #[error("the correlation cutoff has to be in [0, 1), got {0}")]
    InvalidCutoff(f32),
    #[error("iterative screening of {0} features needs more than {0} samples, got {1}")]
    TooFewSamples(usize, usize),
    #[error("selection was made on {1} features, records have {0}")]
    MismatchedFeatures(usize, usize),
    #[error(transparent)]
    BaseCrate(#[from] fpml::Error),
}
