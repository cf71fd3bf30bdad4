//! # Fingerprints of atomic structures
//!
//! A fingerprint maps an atomic structure to a fixed length vector of real numbers. This crate
//! provides two families of descriptors:
//!
//! * [`particle`] descriptors resolve the bonding and the shape of nanoparticles: the average
//!   number of neighbours per element pair, bond count fractions, the radial distribution of
//!   every element around the center of mass and the pair radial distribution function
//! * [`standard`] descriptors apply to any structure: total mass, composition, the eigenspectrum
//!   of the Coulomb matrix and mean pair distances
//!
//! Descriptor lengths depend on the elements present in the whole candidate pool, which are
//! collected once in a [`FingerprintContext`]. A [`FingerprintPipeline`] concatenates an ordered
//! list of [`Descriptor`]s and returns one row per candidate.
//!
//! ```rust
//! use fpml_candidates::generate;
//! use fpml_fingerprint::{Descriptor, FingerprintContext, FingerprintPipeline};
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! let mut rng = SmallRng::seed_from_u64(42);
//! let pool = generate::nanoparticle_pool(10, 13, [79, 29], &mut rng).unwrap();
//!
//! let context = FingerprintContext::from_candidates(&pool).unwrap();
//! let pipeline = FingerprintPipeline::new(vec![Descriptor::Mass, Descriptor::Eigenspectrum], context);
//!
//! let fingerprints = pipeline.transform(&pool).unwrap();
//! assert_eq!(fingerprints.records().dim(), (10, 14));
//! ```

mod context;
mod descriptor;
mod error;
mod hyperparams;
pub mod particle;
mod pipeline;
pub mod standard;

pub use context::FingerprintContext;
pub use descriptor::Descriptor;
pub use error::{FingerprintError, Result};
pub use hyperparams::{ParticleParams, ParticleValidParams};
pub use pipeline::FingerprintPipeline;
