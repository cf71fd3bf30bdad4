//! Descriptors which apply to any atomic structure

use std::cmp::Ordering;

use fpml_candidates::Atoms;
use linfa_linalg::eigh::*;
use ndarray::{s, Array1, Array2};

use crate::context::FingerprintContext;
use crate::error::{FingerprintError, Result};
use crate::particle::element_indices;

/// Total mass of the structure
pub fn mass(atoms: &Atoms) -> Array1<f64> {
    Array1::from_elem(1, atoms.total_mass())
}

/// Fraction of the atoms belonging to every element of the context
pub fn composition(atoms: &Atoms, context: &FingerprintContext) -> Result<Array1<f64>> {
    let mut fractions = Array1::zeros(context.nelements());
    for kind in element_indices(atoms, context)? {
        fractions[kind] += 1.0;
    }
    if !atoms.is_empty() {
        fractions /= atoms.len() as f64;
    }

    Ok(fractions)
}

/// Coulomb matrix with `0.5 Z^2.4` on the diagonal and `Z_i Z_j / r_ij` elsewhere
pub fn coulomb_matrix(atoms: &Atoms) -> Result<Array2<f64>> {
    let charges = atoms
        .numbers()
        .iter()
        .map(|z| *z as f64)
        .collect::<Vec<_>>();
    let n = atoms.len();

    let mut coulomb = Array2::zeros((n, n));
    for i in 0..n {
        coulomb[(i, i)] = 0.5 * charges[i].powf(2.4);
        for j in (i + 1)..n {
            let distance = atoms.distance(i, j);
            if distance <= 0.0 {
                return Err(FingerprintError::CoincidentAtoms(i, j));
            }
            let repulsion = charges[i] * charges[j] / distance;
            coulomb[(i, j)] = repulsion;
            coulomb[(j, i)] = repulsion;
        }
    }

    Ok(coulomb)
}

/// Eigenvalues of the Coulomb matrix in decreasing order
///
/// Zero padded to the largest atom count of the context, a larger structure is an error.
pub fn eigenspectrum(atoms: &Atoms, context: &FingerprintContext) -> Result<Array1<f64>> {
    let n = atoms.len();
    if n > context.max_atoms() {
        return Err(FingerprintError::TooManyAtoms(n, context.max_atoms()));
    }

    let mut spectrum = Array1::zeros(context.max_atoms());
    if n == 0 {
        return Ok(spectrum);
    }

    let (eigvals, _) = coulomb_matrix(atoms)?.eigh_into()?;
    let mut eigvals = eigvals.to_vec();
    eigvals.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));
    spectrum
        .slice_mut(s![..n])
        .assign(&Array1::from(eigvals));

    Ok(spectrum)
}

/// Mean distance of every unordered element pair, zero for pairs which do not occur
pub fn distance(atoms: &Atoms, context: &FingerprintContext) -> Result<Array1<f64>> {
    let kinds = element_indices(atoms, context)?;

    let mut sums = Array1::<f64>::zeros(context.npairs());
    let mut counts = Array1::<f64>::zeros(context.npairs());
    for i in 0..atoms.len() {
        for j in (i + 1)..atoms.len() {
            let pair = context.pair_index(kinds[i], kinds[j]);
            sums[pair] += atoms.distance(i, j);
            counts[pair] += 1.0;
        }
    }

    Ok(ndarray::Zip::from(&sums)
        .and(&counts)
        .map_collect(|sum, count| if *count > 0.0 { sum / count } else { 0.0 }))
}
