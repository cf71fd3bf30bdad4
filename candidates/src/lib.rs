//! `fpml-candidates` holds the atomic structures evaluated by a genetic algorithm search.
//!
//! * [`Atoms`] stores atomic numbers, positions and the unit cell of a structure
//! * [`elements`] tabulates symbols, masses and covalent radii
//! * [`Candidate`] pairs a structure with its key value pairs, among them the `raw_score`
//! * [`CandidateStore`] reads and writes the ASE JSON database of a search
//! * [`split`] draws disjoint test and training sets from a candidate pool
//! * [`generate`] builds synthetic nanoparticle pools for tests and demonstrations
//!
//! ```rust
//! use fpml_candidates::{generate, split, CandidateStore};
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! let mut rng = SmallRng::seed_from_u64(42);
//! let store = CandidateStore::from_candidates(
//!     generate::nanoparticle_pool(100, 13, [79, 29], &mut rng).unwrap(),
//! );
//!
//! let pool = store.get_all_relaxed_candidates(false);
//! let (train, test) = split::train_test_split(&pool, 50, 30, "raw_score", &mut rng).unwrap();
//! assert_eq!(train.len(), 50);
//! assert_eq!(test.len(), 30);
//! ```

mod atoms;
mod candidate;
pub mod elements;
mod error;
pub mod generate;
pub mod split;
mod store;

pub use atoms::Atoms;
pub use candidate::Candidate;
pub use error::{CandidateError, Result};
pub use split::CandidateSet;
pub use store::CandidateStore;
