use std::cmp::Ordering;

use fpml::correlation::pearson_with_target;
use fpml::dataset::{AsTargets, DatasetBase};
use fpml::traits::Fit;
use fpml::Float;
use ndarray::{Array1, ArrayBase, Data, Ix2};

use crate::error::{Result, SelectionError};
use crate::hyperparams::SisValidParams;
use crate::selection::FeatureSelection;

/// Positions of `correlation` ordered by decreasing absolute value
///
/// The sort is stable, equally correlated features keep their index order.
pub(crate) fn rank_by_correlation<F: Float>(correlation: &Array1<F>) -> Vec<usize> {
    let mut order = (0..correlation.len()).collect::<Vec<_>>();
    order.sort_by(|a, b| {
        correlation[*b]
            .abs()
            .partial_cmp(&correlation[*a].abs())
            .unwrap_or(Ordering::Equal)
    });

    order
}

impl<F: Float, D: Data<Elem = F>, T: AsTargets<Elem = F>>
    Fit<ArrayBase<D, Ix2>, T, SelectionError> for SisValidParams
{
    type Object = FeatureSelection<F>;

    /// Ranks all features by their absolute Pearson correlation with the target and accepts the
    /// best `size` of them
    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        dataset.check_shapes()?;
        let records = dataset.records();
        if records.nrows() < 2 {
            return Err(SelectionError::NotEnoughSamples);
        }

        let correlation = pearson_with_target(records, &dataset.as_targets());
        let sorted = rank_by_correlation(&correlation);
        let nkept = self.size().min(sorted.len());

        let accepted = sorted[..nkept].to_vec();
        let rejected = sorted[nkept..].to_vec();
        let correlation = sorted
            .iter()
            .map(|idx| correlation[*idx].abs())
            .collect::<Array1<_>>();

        log::debug!(
            "SIS accepted {} of {} features",
            accepted.len(),
            sorted.len()
        );

        Ok(FeatureSelection {
            accepted,
            rejected,
            correlation,
            sorted,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{Sis, SelectionError};
    use approx::assert_abs_diff_eq;
    use fpml::correlation::pearson_with_target;
    use fpml::traits::Fit;
    use fpml::Dataset;
    use ndarray::{Array1, Array2, Axis};
    use ndarray_rand::{rand_distr::Uniform, RandomExt};
    use rand::{rngs::SmallRng, SeedableRng};

    fn planted_dataset(rng: &mut SmallRng) -> Dataset<f64> {
        let records = Array2::random_using((200, 12), Uniform::new(-1., 1.), rng);
        let noise = Array1::random_using(200, Uniform::new(-0.05, 0.05), rng);
        let targets = records.column(4).mapv(|x| 3. * x) - &records.column(9) * 1.5 + noise;

        Dataset::new(records, targets)
    }

    fn assert_partition(accepted: &[usize], rejected: &[usize], nfeatures: usize) {
        let mut all = accepted.iter().chain(rejected).copied().collect::<Vec<_>>();
        all.sort_unstable();
        assert_eq!(all, (0..nfeatures).collect::<Vec<_>>());
    }

    #[test]
    fn accepted_and_rejected_partition_the_features() {
        let mut rng = SmallRng::seed_from_u64(42);
        let dataset = planted_dataset(&mut rng);

        let selection = Sis::params(5).fit(&dataset).unwrap();
        assert_eq!(selection.accepted().len(), 5);
        assert_eq!(selection.rejected().len(), 7);
        assert_partition(selection.accepted(), selection.rejected(), 12);
        assert_eq!(selection.sorted().len(), 12);
    }

    #[test]
    fn every_feature_is_scored_in_sorted_order() {
        let mut rng = SmallRng::seed_from_u64(42);
        let dataset = planted_dataset(&mut rng);

        let selection = Sis::params(3).fit(&dataset).unwrap();
        let corr = selection.correlation();
        assert_eq!(corr.len(), 12);
        assert_eq!(&selection.sorted()[..3], selection.accepted());
        for pair in corr.windows(2) {
            assert!(pair[0] >= pair[1]);
        }

        let full = pearson_with_target(dataset.records(), dataset.targets());
        for (score, idx) in corr.iter().zip(selection.sorted()) {
            assert_abs_diff_eq!(*score, full[*idx].abs(), epsilon = 1e-12);
        }
    }

    #[test]
    fn strongest_feature_comes_first() {
        let mut rng = SmallRng::seed_from_u64(42);
        let dataset = planted_dataset(&mut rng);

        let selection = Sis::params(2).fit(&dataset).unwrap();
        assert_eq!(selection.accepted(), &[4, 9]);

        // correlations are reported in decreasing order
        let corr = selection.correlation();
        assert!(corr[0] >= corr[1]);
        assert!(corr[0] > 0.8);
    }

    #[test]
    fn oversized_selection_accepts_everything() {
        let mut rng = SmallRng::seed_from_u64(1);
        let dataset = planted_dataset(&mut rng);

        let selection = Sis::params(40).fit(&dataset).unwrap();
        assert_eq!(selection.accepted().len(), 12);
        assert!(selection.rejected().is_empty());

        let reduced = selection.reduce(&dataset).unwrap();
        assert_eq!(reduced.records(), dataset.records());
    }

    #[test]
    fn reduced_train_and_test_have_equal_width() {
        let mut rng = SmallRng::seed_from_u64(3);
        let train = planted_dataset(&mut rng);
        let test = planted_dataset(&mut rng);

        let selection = Sis::params(3).fit(&train).unwrap();
        let train = selection.reduce(&train).unwrap();
        let test = selection.reduce(&test).unwrap();

        assert_eq!(train.records().len_of(Axis(1)), 3);
        assert_eq!(test.records().len_of(Axis(1)), 3);
    }

    #[test]
    fn single_sample_is_rejected() {
        let dataset = Dataset::new(Array2::<f64>::zeros((1, 3)), Array1::zeros(1));
        assert!(matches!(
            Sis::params(2).fit(&dataset),
            Err(SelectionError::NotEnoughSamples)
        ));
    }
}
