use thiserror::Error;

pub type Result<T> = std::result::Result<T, DriverError>;

/// An error ending a descriptor experiment
#[derive(Error, Debug)]
pub enum DriverError {
    #[error("input/output error")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration file")]
    Toml(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("{0} candidates are left for training, at least two are needed")]
    NotEnoughCandidates(usize),
    #[error(transparent)]
    Candidate(#[from] fpml_candidates::CandidateError),
    #[error(transparent)]
    Fingerprint(#[from] fpml_fingerprint::FingerprintError),
    #[error(transparent)]
    Preprocessing(#[from] fpml_preprocessing::PreprocessingError),
    #[error(transparent)]
    Reduction(#[from] fpml_reduction::ReductionError),
    #[error(transparent)]
    Selection(#[from] fpml_selection::SelectionError),
    #[error(transparent)]
    Krr(#[from] fpml_krr::KrrError),
}
