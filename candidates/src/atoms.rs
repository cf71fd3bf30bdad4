use std::collections::BTreeMap;

use ndarray::{Array1, Array2, ArrayView1, Axis};

use crate::elements;
use crate::error::{CandidateError, Result};

/// An atomic structure
///
/// Atomic numbers and cartesian positions (in Ångström, one row per atom) together with the unit
/// cell and periodic boundary flags. Every element is checked against the tabulated data when the
/// structure is created.
#[derive(Debug, Clone, PartialEq)]
pub struct Atoms {
    numbers: Vec<u8>,
    positions: Array2<f64>,
    cell: Array2<f64>,
    pbc: [bool; 3],
}

impl Atoms {
    /// Create a non-periodic structure without unit cell
    pub fn new(numbers: Vec<u8>, positions: Array2<f64>) -> Result<Atoms> {
        if positions.dim() != (numbers.len(), 3) {
            return Err(CandidateError::InvalidPositions {
                natoms: numbers.len(),
                shape: positions.shape().to_vec(),
            });
        }
        for number in &numbers {
            elements::atomic_mass(*number)?;
        }

        Ok(Atoms {
            numbers,
            positions,
            cell: Array2::zeros((3, 3)),
            pbc: [false; 3],
        })
    }

    /// Set unit cell and periodic boundary flags
    pub fn with_cell(mut self, cell: Array2<f64>, pbc: [bool; 3]) -> Result<Atoms> {
        if cell.dim() != (3, 3) {
            return Err(CandidateError::InvalidPositions {
                natoms: 3,
                shape: cell.shape().to_vec(),
            });
        }
        self.cell = cell;
        self.pbc = pbc;

        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    pub fn numbers(&self) -> &[u8] {
        &self.numbers
    }

    pub fn positions(&self) -> &Array2<f64> {
        &self.positions
    }

    pub fn cell(&self) -> &Array2<f64> {
        &self.cell
    }

    pub fn pbc(&self) -> [bool; 3] {
        self.pbc
    }

    pub fn position(&self, i: usize) -> ArrayView1<f64> {
        self.positions.row(i)
    }

    /// Sorted atomic numbers of all elements present
    pub fn elements(&self) -> Vec<u8> {
        let mut elements = self.numbers.clone();
        elements.sort_unstable();
        elements.dedup();

        elements
    }

    /// Atomic mass of every atom
    pub fn masses(&self) -> Array1<f64> {
        // numbers are checked on construction
        self.numbers
            .iter()
            .map(|z| elements::atomic_mass(*z).unwrap_or(0.0))
            .collect()
    }

    pub fn total_mass(&self) -> f64 {
        self.masses().sum()
    }

    /// Mass weighted mean position, the origin for an empty structure
    pub fn center_of_mass(&self) -> Array1<f64> {
        let masses = self.masses();
        let total = masses.sum();
        if total <= 0.0 {
            return Array1::zeros(3);
        }

        masses.dot(&self.positions) / total
    }

    /// Euclidean distance between atom `i` and `j`, without minimum image convention
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        let diff = &self.positions.row(i) - &self.positions.row(j);
        diff.dot(&diff).sqrt()
    }

    /// Symmetric matrix of all pairwise distances
    pub fn distance_matrix(&self) -> Array2<f64> {
        let n = self.len();
        let mut distances = Array2::zeros((n, n));
        for i in 0..n {
            for j in (i + 1)..n {
                let d = self.distance(i, j);
                distances[(i, j)] = d;
                distances[(j, i)] = d;
            }
        }

        distances
    }

    /// Distance of every atom from the center of mass
    pub fn distances_from_center(&self) -> Array1<f64> {
        let center = self.center_of_mass();
        self.positions
            .axis_iter(Axis(0))
            .map(|pos| {
                let diff = &pos - &center;
                diff.dot(&diff).sqrt()
            })
            .collect()
    }

    /// Chemical formula with elements in order of increasing atomic number, e.g. `Cu6Au7`
    pub fn formula(&self) -> String {
        let mut counts = BTreeMap::new();
        for number in &self.numbers {
            *counts.entry(*number).or_insert(0usize) += 1;
        }

        counts
            .into_iter()
            .map(|(number, count)| {
                let symbol = elements::symbol(number).unwrap_or("X");
                if count == 1 {
                    symbol.to_string()
                } else {
                    format!("{}{}", symbol, count)
                }
            })
            .collect()
    }
}
