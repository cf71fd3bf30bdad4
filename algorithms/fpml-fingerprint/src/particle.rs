//! Descriptors of the bonding and shape of nanoparticles
//!
//! Two atoms are bonded when their distance is below the sum of their covalent radii plus a
//! tolerance `dx`. Every descriptor resolves the elements of the [`FingerprintContext`], so its
//! length only depends on the context and the parameters.

use fpml_candidates::{elements, Atoms};
use ndarray::{Array1, Array2};

use crate::context::FingerprintContext;
use crate::error::Result;
use crate::hyperparams::ParticleValidParams;

/// Context position of the element of every atom
pub(crate) fn element_indices(atoms: &Atoms, context: &FingerprintContext) -> Result<Vec<usize>> {
    atoms
        .numbers()
        .iter()
        .map(|z| context.index_of(*z))
        .collect()
}

/// Bonded neighbours of every atom
pub fn neighbour_list(atoms: &Atoms, dx: f64) -> Result<Vec<Vec<usize>>> {
    let radii = atoms
        .numbers()
        .iter()
        .map(|z| elements::covalent_radius(*z))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut neighbours = vec![Vec::new(); atoms.len()];
    for i in 0..atoms.len() {
        for j in (i + 1)..atoms.len() {
            if atoms.distance(i, j) < radii[i] + radii[j] + dx {
                neighbours[i].push(j);
                neighbours[j].push(i);
            }
        }
    }

    Ok(neighbours)
}

/// Divide every row by the number of atoms of its element
fn per_element(mut counts: Array2<f64>, natoms: &Array1<f64>) -> Array2<f64> {
    for (mut row, n) in counts.outer_iter_mut().zip(natoms.iter()) {
        if *n > 0.0 {
            row /= *n;
        }
    }

    counts
}

fn count_elements(kinds: &[usize], nelements: usize) -> Array1<f64> {
    let mut natoms = Array1::zeros(nelements);
    for kind in kinds {
        natoms[*kind] += 1.0;
    }

    natoms
}

fn bin_of(value: f64, upper: f64, nbin: usize) -> usize {
    if upper > 0.0 {
        ((value / upper * nbin as f64).floor() as usize).min(nbin - 1)
    } else {
        0
    }
}

/// Average number of neighbours of element B around an atom of element A
///
/// Ordered element pairs, the entry of `(A, B)` is at `A * E + B`.
pub fn nearest_neighbour(
    atoms: &Atoms,
    context: &FingerprintContext,
    params: &ParticleValidParams,
) -> Result<Array1<f64>> {
    let nelements = context.nelements();
    let kinds = element_indices(atoms, context)?;
    let neighbours = neighbour_list(atoms, params.dx())?;

    let mut counts = Array2::zeros((nelements, nelements));
    for (i, list) in neighbours.iter().enumerate() {
        for j in list {
            counts[(kinds[i], kinds[*j])] += 1.0;
        }
    }
    let counts = per_element(counts, &count_elements(&kinds, nelements));

    Ok(counts.into_shape(nelements * nelements)?)
}

/// Fraction of the atoms of every element with exactly `k` bonds, for `k = 1..=max_bonds`
///
/// Larger bond counts are clamped to `max_bonds`, atoms without bonds are not counted.
pub fn bond_count(
    atoms: &Atoms,
    context: &FingerprintContext,
    params: &ParticleValidParams,
) -> Result<Array1<f64>> {
    let nelements = context.nelements();
    let max_bonds = params.max_bonds();
    let kinds = element_indices(atoms, context)?;
    let neighbours = neighbour_list(atoms, params.dx())?;

    let mut counts = Array2::zeros((nelements, max_bonds));
    for (kind, list) in kinds.iter().zip(&neighbours) {
        if !list.is_empty() {
            counts[(*kind, list.len().min(max_bonds) - 1)] += 1.0;
        }
    }
    let counts = per_element(counts, &count_elements(&kinds, nelements));

    Ok(counts.into_shape(nelements * max_bonds)?)
}

/// Fraction of the atoms of every element in equally wide shells around the center of mass
///
/// The shells divide the distance of the outermost atom into `nbin` parts.
pub fn distribution(
    atoms: &Atoms,
    context: &FingerprintContext,
    params: &ParticleValidParams,
) -> Result<Array1<f64>> {
    let nelements = context.nelements();
    let nbin = params.nbin();
    let kinds = element_indices(atoms, context)?;

    let radius = atoms.distances_from_center();
    let outermost = radius.fold(0.0f64, |acc, r| acc.max(*r));

    let mut counts = Array2::zeros((nelements, nbin));
    for (kind, r) in kinds.iter().zip(radius.iter()) {
        counts[(*kind, bin_of(*r, outermost, nbin))] += 1.0;
    }
    let counts = per_element(counts, &count_elements(&kinds, nelements));

    Ok(counts.into_shape(nelements * nbin)?)
}

/// Radial distribution function of every unordered element pair
///
/// Histogram of the pair distances below `rmax` in `nbin` bins, divided by the number of atoms.
pub fn rdf(
    atoms: &Atoms,
    context: &FingerprintContext,
    params: &ParticleValidParams,
) -> Result<Array1<f64>> {
    let nbin = params.nbin();
    let rmax = params.rmax();
    let kinds = element_indices(atoms, context)?;

    let mut counts = Array2::zeros((context.npairs(), nbin));
    for i in 0..atoms.len() {
        for j in (i + 1)..atoms.len() {
            let d = atoms.distance(i, j);
            if d < rmax {
                counts[(context.pair_index(kinds[i], kinds[j]), bin_of(d, rmax, nbin))] += 1.0;
            }
        }
    }
    if !atoms.is_empty() {
        counts /= atoms.len() as f64;
    }

    Ok(counts.into_shape(context.npairs() * nbin)?)
}
