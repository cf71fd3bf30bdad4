use thiserror::Error;

pub type Result<T> = std::result::Result<T, FingerprintError>;

/// An error when computing fingerprints
#[derive(Error, Debug)]
pub enum FingerprintError {
    #[error("element {0} is not part of the fingerprint context")]
    ElementNotInContext(u8),
    #[error("structure with {0} atoms exceeds the context maximum of {1}")]
    TooManyAtoms(usize, usize),
    #[error("atoms {0} and {1} share the same position")]
    CoincidentAtoms(usize, usize),
    #[error("invalid particle fingerprint parameter: {0}")]
    InvalidParams(String),
    #[error("a fingerprint context needs at least one structure")]
    EmptyPool,
    #[error("unknown descriptor {0:?}")]
    UnknownDescriptor(String),
    #[error("the pipeline has no descriptors")]
    NoDescriptors,
    #[error(transparent)]
    Candidate(#[from] fpml_candidates::CandidateError),
    #[error(transparent)]
    LinalgError(#[from] linfa_linalg::LinalgError),
    #[error(transparent)]
    NdShape(#[from] ndarray::ShapeError),
    #[error(transparent)]
    BaseCrate(#[from] fpml::Error),
}
