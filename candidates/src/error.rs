use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CandidateError>;

/// An error when reading, building or splitting candidates
#[derive(Error, Debug)]
pub enum CandidateError {
    #[error("element with atomic number {0} has no tabulated mass or covalent radius")]
    UnknownElement(u8),
    #[error("unknown chemical symbol {0:?}")]
    UnknownSymbol(String),
    #[error("positions of {natoms} atoms need shape ({natoms}, 3), got {shape:?}")]
    InvalidPositions { natoms: usize, shape: Vec<usize> },
    #[error("row {id} of the candidate database is malformed: {reason}")]
    MalformedRow { id: usize, reason: String },
    #[error("candidate {id} has no numeric key value pair {key:?}")]
    MissingTarget { id: usize, key: String },
    #[error("index {0} is outside the candidate pool of size {1}")]
    IndexOutOfRange(usize, usize),
    #[error("{0} is an SQLite database, convert it with `ase db <file> --insert-into <name>.json`")]
    SqliteDatabase(PathBuf),
    #[error("I/O error while accessing the candidate database")]
    Io(#[from] std::io::Error),
    #[error("candidate database is not valid JSON")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    NdShape(#[from] ndarray::ShapeError),
}
