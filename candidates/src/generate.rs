//! Utility functions for randomly generating candidate pools

use ndarray::{Array2, Axis};
use ndarray_rand::{rand::Rng, rand_distr::Uniform, RandomExt};

use crate::atoms::Atoms;
use crate::candidate::Candidate;
use crate::error::{CandidateError, Result};

/// Nearest neighbour distance of the generated clusters in Ångström
const LATTICE_SPACING: f64 = 2.7;

/// Sites of a compact cluster cut from a face centered cubic lattice
///
/// The `natoms` sites closest to the origin, ties are broken by lattice order.
pub fn fcc_cluster(natoms: usize) -> Array2<f64> {
    let cube = LATTICE_SPACING * std::f64::consts::SQRT_2;
    let extent = (natoms as f64).cbrt().ceil() as i64 + 1;

    let basis = [
        [0.0, 0.0, 0.0],
        [0.5, 0.5, 0.0],
        [0.5, 0.0, 0.5],
        [0.0, 0.5, 0.5],
    ];
    let mut sites = Vec::new();
    for i in -extent..=extent {
        for j in -extent..=extent {
            for k in -extent..=extent {
                for b in &basis {
                    let site = [
                        (i as f64 + b[0]) * cube,
                        (j as f64 + b[1]) * cube,
                        (k as f64 + b[2]) * cube,
                    ];
                    let norm = site.iter().map(|x| x * x).sum::<f64>();
                    sites.push((norm, site));
                }
            }
        }
    }
    sites.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let mut positions = Array2::zeros((natoms, 3));
    for (mut row, (_, site)) in positions.axis_iter_mut(Axis(0)).zip(sites) {
        row[0] = site[0];
        row[1] = site[1];
        row[2] = site[2];
    }

    positions
}

/// Generate a pool of relaxed bimetallic nanoparticles
///
/// Every candidate is a `natoms` cluster whose sites are occupied at random by the first or the
/// second element of `elements` and displaced by a small amount of noise. The raw score rewards
/// the first element sitting close to the center of mass, so particle fingerprints which
/// resolve the radial distribution carry information about the target. Every tenth candidate is
/// marked extinct.
pub fn nanoparticle_pool(
    ncandidates: usize,
    natoms: usize,
    elements: [u8; 2],
    rng: &mut impl Rng,
) -> Result<Vec<Candidate>> {
    if natoms == 0 {
        return Err(CandidateError::InvalidPositions {
            natoms,
            shape: vec![0, 3],
        });
    }

    let sites = fcc_cluster(natoms);

    (0..ncandidates)
        .map(|idx| -> Result<Candidate> {
            let fraction = rng.gen_range(0.2..0.8);
            let numbers = (0..natoms)
                .map(|_| {
                    if rng.gen_bool(fraction) {
                        elements[0]
                    } else {
                        elements[1]
                    }
                })
                .collect::<Vec<_>>();
            let displacement = Array2::random_using((natoms, 3), Uniform::new(-0.1, 0.1), rng);
            let atoms = Atoms::new(numbers, &sites + &displacement)?;

            let radius = atoms.distances_from_center();
            let segregation = atoms
                .numbers()
                .iter()
                .zip(radius.iter())
                .filter(|(z, _)| **z == elements[0])
                .map(|(_, r)| r)
                .sum::<f64>()
                / natoms as f64;
            let raw_score = -segregation + rng.gen_range(-0.02..0.02);

            Ok(Candidate::new(idx + 1, atoms)
                .with_key_value("raw_score", raw_score)
                .with_key_value("relaxed", 1)
                .with_key_value("extinct", if idx % 10 == 9 { 1 } else { 0 })
                .with_key_value("gaid", idx + 1))
        })
        .collect()
}
