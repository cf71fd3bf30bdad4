use fpml::correlation::pearson_with_target;
use fpml::dataset::{AsTargets, DatasetBase};
use fpml::traits::Fit;
use fpml::Float;
use ndarray::{Array1, ArrayBase, ArrayView1, Axis, Data, Ix2};

use crate::error::{Result, SelectionError};
use crate::hyperparams::IterativeSisValidParams;
use crate::selection::FeatureSelection;
use crate::sis::rank_by_correlation;

/// Orthonormal basis of the intercept and the accepted feature columns
///
/// Projecting the target onto the span of the basis is the least squares fit on the accepted
/// features, what is left over is its residual. Columns which are (numerically) linear
/// combinations of the basis add no direction and are skipped.
struct ResidualBasis<F> {
    vectors: Vec<Array1<F>>,
}

impl<F: Float> ResidualBasis<F> {
    fn with_intercept(nsamples: usize) -> Self {
        let norm = F::cast(nsamples as f64).sqrt();
        ResidualBasis {
            vectors: vec![Array1::from_elem(nsamples, F::one() / norm)],
        }
    }

    fn orthogonalize(&self, v: &mut Array1<F>) {
        for q in &self.vectors {
            let projection = q.dot(v);
            v.scaled_add(-projection, q);
        }
    }

    fn push(&mut self, column: ArrayView1<F>) {
        let scale = column.dot(&column).sqrt();
        let mut v = column.to_owned();
        // modified Gram-Schmidt, applied twice for numerical stability
        self.orthogonalize(&mut v);
        self.orthogonalize(&mut v);

        let norm = v.dot(&v).sqrt();
        if norm > F::cast(1e-10) * scale {
            v /= norm;
            self.vectors.push(v);
        }
    }

    fn residual(&self, target: &Array1<F>) -> Array1<F> {
        let mut residual = target.clone();
        self.orthogonalize(&mut residual);

        residual
    }
}

impl<F: Float, D: Data<Elem = F>, T: AsTargets<Elem = F>>
    Fit<ArrayBase<D, Ix2>, T, SelectionError> for IterativeSisValidParams<F>
{
    type Object = FeatureSelection<F>;

    /// Accepts `step` features per round until `size` features are accepted or no feature is
    /// left
    ///
    /// Every round screens the remaining features against the residual of the least squares fit
    /// of the target on the features accepted so far.
    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        dataset.check_shapes()?;
        let records = dataset.records();
        let (nsamples, nfeatures) = records.dim();
        if nsamples <= self.size() {
            return Err(SelectionError::TooFewSamples(self.size(), nsamples));
        }

        let target = dataset.as_targets().to_owned();
        let step = self.step();

        let mut remaining = (0..nfeatures).collect::<Vec<_>>();
        let mut accepted = Vec::with_capacity(self.size());
        let mut correlation = Vec::with_capacity(self.size());
        let mut rejected = Vec::new();

        let mut basis = ResidualBasis::with_intercept(nsamples);
        let mut residual = target.clone();

        while accepted.len() < self.size() && !remaining.is_empty() {
            let candidates = records.select(Axis(1), &remaining);
            let round_correlation = pearson_with_target(&candidates, &residual);
            let take = step.min(self.size() - accepted.len());

            let mut taken = 0;
            let mut next_remaining = Vec::with_capacity(remaining.len());
            for pos in rank_by_correlation(&round_correlation) {
                let idx = remaining[pos];
                let strength = round_correlation[pos].abs();

                if let Some(cutoff) = self.cutoff() {
                    if strength < cutoff {
                        rejected.push(idx);
                        continue;
                    }
                }

                if taken < take {
                    accepted.push(idx);
                    correlation.push(strength);
                    basis.push(records.column(idx));
                    taken += 1;
                } else {
                    next_remaining.push(idx);
                }
            }

            next_remaining.sort_unstable();
            remaining = next_remaining;

            log::debug!(
                "iterative SIS round accepted {} features, {} accepted, {} remaining, {} rejected",
                taken,
                accepted.len(),
                remaining.len(),
                rejected.len()
            );

            if taken == 0 {
                break;
            }

            residual = basis.residual(&target);
        }

        rejected.extend(remaining);
        let sorted = accepted.iter().chain(&rejected).copied().collect();

        Ok(FeatureSelection {
            accepted,
            rejected,
            correlation: Array1::from(correlation),
            sorted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::ResidualBasis;
    use crate::{IterativeSis, SelectionError};
    use approx::assert_abs_diff_eq;
    use fpml::traits::Fit;
    use fpml::Dataset;
    use ndarray::{array, Array1, Array2};
    use ndarray_rand::{rand_distr::Uniform, RandomExt};
    use rand::{rngs::SmallRng, SeedableRng};

    /// Target is the sum of feature 2 and 7, all other features are noise
    fn additive_dataset(rng: &mut SmallRng) -> Dataset<f64> {
        let records = Array2::random_using((100, 12), Uniform::new(-1., 1.), rng);
        let targets = &records.column(2) + &records.column(7);

        Dataset::new(records, targets)
    }

    fn assert_partition(accepted: &[usize], rejected: &[usize], nfeatures: usize) {
        let mut all = accepted.iter().chain(rejected).copied().collect::<Vec<_>>();
        all.sort_unstable();
        assert_eq!(all, (0..nfeatures).collect::<Vec<_>>());
    }

    #[test]
    fn residual_reveals_second_feature() {
        let mut rng = SmallRng::seed_from_u64(42);
        let dataset = additive_dataset(&mut rng);

        let selection = IterativeSis::params(2).step(1).fit(&dataset).unwrap();
        let mut accepted = selection.accepted().to_vec();
        accepted.sort_unstable();
        assert_eq!(accepted, vec![2, 7]);

        // the second feature explains almost all of the residual
        assert!(selection.correlation()[1] > 0.9);
        assert_partition(selection.accepted(), selection.rejected(), 12);
    }

    #[test]
    fn steps_accept_up_to_size() {
        let mut rng = SmallRng::seed_from_u64(5);
        let records = Array2::random_using((50, 20), Uniform::new(-1., 1.), &mut rng);
        let targets = Array1::random_using(50, Uniform::new(-1., 1.), &mut rng);
        let dataset = Dataset::new(records, targets);

        // rounds of 4, 4 and 2 features
        let selection = IterativeSis::params(10).step(4).fit(&dataset).unwrap();
        assert_eq!(selection.accepted().len(), 10);
        assert_eq!(selection.correlation().len(), 10);
        assert_eq!(selection.rejected().len(), 10);
        assert_partition(selection.accepted(), selection.rejected(), 20);
        assert_eq!(&selection.sorted()[..10], selection.accepted());
    }

    #[test]
    fn cutoff_rejects_weak_features() {
        let mut rng = SmallRng::seed_from_u64(42);
        let dataset = additive_dataset(&mut rng);

        let selection = IterativeSis::params(5)
            .step(1)
            .cutoff(0.5)
            .fit(&dataset)
            .unwrap();

        let mut accepted = selection.accepted().to_vec();
        accepted.sort_unstable();
        assert_eq!(accepted, vec![2, 7]);
        assert_eq!(selection.rejected().len(), 10);
        assert_partition(selection.accepted(), selection.rejected(), 12);
    }

    #[test]
    fn size_has_to_be_smaller_than_samples() {
        let dataset = Dataset::new(Array2::<f64>::zeros((4, 6)), Array1::zeros(4));
        assert!(matches!(
            IterativeSis::params(4).fit(&dataset),
            Err(SelectionError::TooFewSamples(4, 4))
        ));
    }

    #[test]
    fn collinear_columns_do_not_extend_the_basis() {
        let x = array![[1., 2.], [2., 4.], [3., 6.], [5., 10.]];
        let mut basis = ResidualBasis::with_intercept(4);
        basis.push(x.column(0));
        basis.push(x.column(1));
        assert_eq!(basis.vectors.len(), 2);

        // an exact linear target leaves no residual
        let target = x.column(0).mapv(|v| 2. * v + 1.);
        assert_abs_diff_eq!(basis.residual(&target), Array1::zeros(4), epsilon = 1e-12);
    }
}
