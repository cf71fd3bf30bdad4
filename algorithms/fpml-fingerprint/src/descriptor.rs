use std::fmt;
use std::str::FromStr;

use fpml_candidates::Atoms;
use ndarray::Array1;
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::context::FingerprintContext;
use crate::error::{FingerprintError, Result};
use crate::hyperparams::ParticleValidParams;
use crate::{particle, standard};

/// A fingerprint extractor
///
/// With `E` elements in the context, `P = E(E+1)/2` unordered element pairs and `N` the largest
/// atom count the lengths are
///
/// | Descriptor | Length |
/// | :--- | :--- |
/// | `NearestNeighbour` | `E²` |
/// | `BondCount` | `E · max_bonds` |
/// | `Distribution` | `E · nbin` |
/// | `Rdf` | `P · nbin` |
/// | `Mass` | `1` |
/// | `Composition` | `E` |
/// | `Eigenspectrum` | `N` |
/// | `Distance` | `P` |
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "snake_case")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Descriptor {
    NearestNeighbour,
    BondCount,
    Distribution,
    Rdf,
    Mass,
    Composition,
    Eigenspectrum,
    Distance,
}

impl Descriptor {
    /// All descriptors, particle descriptors first
    pub fn all() -> [Descriptor; 8] {
        [
            Descriptor::NearestNeighbour,
            Descriptor::BondCount,
            Descriptor::Distribution,
            Descriptor::Rdf,
            Descriptor::Mass,
            Descriptor::Composition,
            Descriptor::Eigenspectrum,
            Descriptor::Distance,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Descriptor::NearestNeighbour => "nearest_neighbour",
            Descriptor::BondCount => "bond_count",
            Descriptor::Distribution => "distribution",
            Descriptor::Rdf => "rdf",
            Descriptor::Mass => "mass",
            Descriptor::Composition => "composition",
            Descriptor::Eigenspectrum => "eigenspectrum",
            Descriptor::Distance => "distance",
        }
    }

    /// Whether the descriptor depends on the particle parameters
    pub fn is_particle(&self) -> bool {
        matches!(
            self,
            Descriptor::NearestNeighbour
                | Descriptor::BondCount
                | Descriptor::Distribution
                | Descriptor::Rdf
        )
    }

    /// Number of values the descriptor contributes to a fingerprint
    pub fn len(&self, context: &FingerprintContext, params: &ParticleValidParams) -> usize {
        let nelements = context.nelements();
        match self {
            Descriptor::NearestNeighbour => nelements * nelements,
            Descriptor::BondCount => nelements * params.max_bonds(),
            Descriptor::Distribution => nelements * params.nbin(),
            Descriptor::Rdf => context.npairs() * params.nbin(),
            Descriptor::Mass => 1,
            Descriptor::Composition => nelements,
            Descriptor::Eigenspectrum => context.max_atoms(),
            Descriptor::Distance => context.npairs(),
        }
    }

    /// Names of the values, in fingerprint order
    pub fn feature_names(
        &self,
        context: &FingerprintContext,
        params: &ParticleValidParams,
    ) -> Vec<String> {
        let symbols = context.symbols();
        let pairs = context.pair_symbols();
        let bins = |prefix: &str, labels: Vec<String>, nbin: usize| {
            labels
                .iter()
                .flat_map(|label| (0..nbin).map(move |bin| format!("{}-{}-{}", prefix, label, bin)))
                .collect::<Vec<_>>()
        };

        match self {
            Descriptor::NearestNeighbour => symbols
                .iter()
                .flat_map(|a| symbols.iter().map(move |b| format!("nn-{}-{}", a, b)))
                .collect(),
            Descriptor::BondCount => symbols
                .iter()
                .flat_map(|a| (1..=params.max_bonds()).map(move |k| format!("bonds-{}-{}", a, k)))
                .collect(),
            Descriptor::Distribution => bins(
                "shell",
                symbols.iter().map(|s| s.to_string()).collect(),
                params.nbin(),
            ),
            Descriptor::Rdf => bins(
                "rdf",
                pairs.iter().map(|(a, b)| format!("{}-{}", a, b)).collect(),
                params.nbin(),
            ),
            Descriptor::Mass => vec!["mass".to_string()],
            Descriptor::Composition => symbols.iter().map(|s| format!("comp-{}", s)).collect(),
            Descriptor::Eigenspectrum => (0..context.max_atoms())
                .map(|i| format!("eig-{}", i))
                .collect(),
            Descriptor::Distance => pairs
                .iter()
                .map(|(a, b)| format!("distance-{}-{}", a, b))
                .collect(),
        }
    }

    /// Compute the descriptor of a single structure
    pub fn extract(
        &self,
        atoms: &Atoms,
        context: &FingerprintContext,
        params: &ParticleValidParams,
    ) -> Result<Array1<f64>> {
        match self {
            Descriptor::NearestNeighbour => particle::nearest_neighbour(atoms, context, params),
            Descriptor::BondCount => particle::bond_count(atoms, context, params),
            Descriptor::Distribution => particle::distribution(atoms, context, params),
            Descriptor::Rdf => particle::rdf(atoms, context, params),
            Descriptor::Mass => Ok(standard::mass(atoms)),
            Descriptor::Composition => standard::composition(atoms, context),
            Descriptor::Eigenspectrum => standard::eigenspectrum(atoms, context),
            Descriptor::Distance => standard::distance(atoms, context),
        }
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Descriptor {
    type Err = FingerprintError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        let normalized = normalized.trim_end_matches("_fpv");
        Descriptor::all()
            .iter()
            .find(|d| d.name() == normalized || d.name().replace('_', "") == normalized)
            .copied()
            .ok_or_else(|| FingerprintError::UnknownDescriptor(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fpml::ParamGuard;

    use crate::hyperparams::ParticleParams;

    #[test]
    fn lengths_match_feature_names() {
        let context = FingerprintContext::new(vec![29, 46, 79], 13).unwrap();
        let params = ParticleParams::new().check().unwrap();

        let lengths = Descriptor::all()
            .iter()
            .map(|d| d.len(&context, &params))
            .collect::<Vec<_>>();
        assert_eq!(lengths, vec![9, 39, 12, 24, 1, 3, 13, 6]);

        for descriptor in &Descriptor::all() {
            assert_eq!(
                descriptor.feature_names(&context, &params).len(),
                descriptor.len(&context, &params)
            );
        }
        assert_eq!(
            Descriptor::Rdf.feature_names(&context, &params)[5],
            "rdf-Cu-Pd-1"
        );
    }

    #[test]
    fn parse_descriptor_names() {
        assert_eq!(
            "nearestneighbour".parse::<Descriptor>().unwrap(),
            Descriptor::NearestNeighbour
        );
        assert_eq!(
            "bond_count_fpv".parse::<Descriptor>().unwrap(),
            Descriptor::BondCount
        );
        assert_eq!("RDF".parse::<Descriptor>().unwrap(), Descriptor::Rdf);
        for descriptor in &Descriptor::all() {
            assert_eq!(
                descriptor.to_string().parse::<Descriptor>().unwrap(),
                *descriptor
            );
        }
        assert!(matches!(
            "charge".parse::<Descriptor>(),
            Err(FingerprintError::UnknownDescriptor(_))
        ));
    }
}
