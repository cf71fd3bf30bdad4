//! Test and training sets drawn from a candidate pool
//!
//! The test set is a random sample of the pool, the training set consists of the first
//! candidates (in pool order) not taken by the test set. Both sets are therefore disjoint.
//! Requests larger than the available pool are truncated with a warning.

use std::collections::HashSet;

use ndarray::Array1;
use rand::seq::index::sample;
use rand::Rng;

use crate::candidate::Candidate;
use crate::error::{CandidateError, Result};

/// Candidates drawn from a pool together with their targets
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSet {
    /// Selected candidates
    pub candidates: Vec<Candidate>,
    /// Target value of every candidate, aligned with `candidates`
    pub target: Array1<f64>,
    /// Positions of the candidates in the pool
    pub taken: Vec<usize>,
}

impl CandidateSet {
    fn from_indices(pool: &[Candidate], taken: Vec<usize>, key: &str) -> Result<CandidateSet> {
        let candidates = taken
            .iter()
            .map(|idx| {
                pool.get(*idx)
                    .cloned()
                    .ok_or(CandidateError::IndexOutOfRange(*idx, pool.len()))
            })
            .collect::<Result<Vec<_>>>()?;
        let target = candidates
            .iter()
            .map(|c| c.target(key))
            .collect::<Result<Array1<_>>>()?;

        Ok(CandidateSet {
            candidates,
            target,
            taken,
        })
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Database ids of the candidates
    pub fn ids(&self) -> Vec<usize> {
        self.candidates.iter().map(Candidate::id).collect()
    }
}

/// Draw `size` candidates uniformly at random without replacement
pub fn test_set<R: Rng>(
    pool: &[Candidate],
    size: usize,
    key: &str,
    rng: &mut R,
) -> Result<CandidateSet> {
    let amount = if size > pool.len() {
        log::warn!(
            "test set of {} requested, but only {} candidates available",
            size,
            pool.len()
        );
        pool.len()
    } else {
        size
    };

    let taken = sample(rng, pool.len(), amount).into_vec();
    CandidateSet::from_indices(pool, taken, key)
}

/// Take the first `size` candidates which are not in `taken`
pub fn train_set(
    pool: &[Candidate],
    size: usize,
    taken: &[usize],
    key: &str,
) -> Result<CandidateSet> {
    let taken = taken.iter().copied().collect::<HashSet<_>>();
    let indices = (0..pool.len())
        .filter(|idx| !taken.contains(idx))
        .take(size)
        .collect::<Vec<_>>();

    if indices.len() < size {
        log::warn!(
            "training set of {} requested, but only {} candidates left",
            size,
            indices.len()
        );
    }

    CandidateSet::from_indices(pool, indices, key)
}

/// Split a pool into a training and a test set, returned in this order
pub fn train_test_split<R: Rng>(
    pool: &[Candidate],
    train_size: usize,
    test_size: usize,
    key: &str,
    rng: &mut R,
) -> Result<(CandidateSet, CandidateSet)> {
    let test = test_set(pool, test_size, key, rng)?;
    let train = train_set(pool, train_size, &test.taken, key)?;

    log::debug!(
        "split pool of {} into {} training and {} test candidates",
        pool.len(),
        train.len(),
        test.len()
    );

    Ok((train, test))
}
