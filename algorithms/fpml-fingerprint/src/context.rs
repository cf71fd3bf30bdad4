use fpml_candidates::{elements, Atoms, Candidate};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{FingerprintError, Result};

/// Properties of the whole candidate pool which fix the fingerprint lengths
///
/// Per element descriptors need the set of elements present in the pool and the eigenspectrum
/// pads to the largest structure. Computing the context once from the whole pool guarantees
/// that training and test fingerprints have the same width.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerprintContext {
    elements: Vec<u8>,
    max_atoms: usize,
}

impl FingerprintContext {
    /// Create a context from atomic numbers and the largest atom count
    ///
    /// Elements are sorted and deduplicated, each one needs tabulated data.
    pub fn new(mut elements: Vec<u8>, max_atoms: usize) -> Result<FingerprintContext> {
        elements.sort_unstable();
        elements.dedup();
        for number in &elements {
            elements::atomic_mass(*number)?;
        }

        Ok(FingerprintContext {
            elements,
            max_atoms,
        })
    }

    /// Collect elements and the largest atom count of a set of structures
    pub fn from_atoms<'a, I: IntoIterator<Item = &'a Atoms>>(structures: I) -> Result<Self> {
        let mut elements = Vec::new();
        let mut max_atoms = 0;
        let mut nstructures = 0;
        for atoms in structures {
            elements.extend_from_slice(atoms.numbers());
            max_atoms = max_atoms.max(atoms.len());
            nstructures += 1;
        }
        if nstructures == 0 {
            return Err(FingerprintError::EmptyPool);
        }

        FingerprintContext::new(elements, max_atoms)
    }

    pub fn from_candidates(candidates: &[Candidate]) -> Result<Self> {
        FingerprintContext::from_atoms(candidates.iter().map(Candidate::atoms))
    }

    /// Sorted atomic numbers
    pub fn elements(&self) -> &[u8] {
        &self.elements
    }

    pub fn nelements(&self) -> usize {
        self.elements.len()
    }

    pub fn max_atoms(&self) -> usize {
        self.max_atoms
    }

    /// Number of unordered element pairs, including pairs of the same element
    pub fn npairs(&self) -> usize {
        let n = self.nelements();
        n * (n + 1) / 2
    }

    /// Position of an element in the context
    pub fn index_of(&self, number: u8) -> Result<usize> {
        self.elements
            .binary_search(&number)
            .map_err(|_| FingerprintError::ElementNotInContext(number))
    }

    /// Position of the unordered pair of element positions `a` and `b`
    pub fn pair_index(&self, a: usize, b: usize) -> usize {
        let (a, b) = if a <= b { (a, b) } else { (b, a) };
        let n = self.nelements();
        a * n - a * a.saturating_sub(1) / 2 - a + b
    }

    /// Chemical symbols in context order
    pub fn symbols(&self) -> Vec<&'static str> {
        // elements are checked on construction
        self.elements
            .iter()
            .map(|z| elements::symbol(*z).unwrap_or("X"))
            .collect()
    }

    /// Symbols of all unordered pairs in pair order
    pub fn pair_symbols(&self) -> Vec<(&'static str, &'static str)> {
        let symbols = self.symbols();
        let mut pairs = Vec::with_capacity(self.npairs());
        for a in 0..symbols.len() {
            for b in a..symbols.len() {
                pairs.push((symbols[a], symbols[b]));
            }
        }

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn context_of_a_pool() {
        let dimer = Atoms::new(vec![79, 29], array![[0., 0., 0.], [0., 0., 2.5]]).unwrap();
        let trimer = Atoms::new(vec![46, 79, 79], Array2::zeros((3, 3))).unwrap();

        let context = FingerprintContext::from_atoms(vec![&dimer, &trimer]).unwrap();
        assert_eq!(context.elements(), &[29, 46, 79]);
        assert_eq!(context.symbols(), vec!["Cu", "Pd", "Au"]);
        assert_eq!(context.max_atoms(), 3);
        assert_eq!(context.index_of(79).unwrap(), 2);
        assert!(matches!(
            context.index_of(1),
            Err(FingerprintError::ElementNotInContext(1))
        ));

        let empty: Vec<&Atoms> = Vec::new();
        assert!(matches!(
            FingerprintContext::from_atoms(empty),
            Err(FingerprintError::EmptyPool)
        ));
    }

    #[test]
    fn pair_indices_enumerate_pairs() {
        let context = FingerprintContext::new(vec![29, 46, 79], 3).unwrap();
        assert_eq!(context.npairs(), 6);

        let mut expected = 0;
        for a in 0..3 {
            for b in a..3 {
                assert_eq!(context.pair_index(a, b), expected);
                assert_eq!(context.pair_index(b, a), expected);
                expected += 1;
            }
        }
        assert_eq!(context.pair_symbols()[4], ("Pd", "Au"));
    }
}
