//! Correlation analysis of dataset features against the target
//!
//! Screening methods rank features by how strongly they co-vary with the target variable. This
//! module computes Pearson's correlation coefficient between every feature column and the
//! target.
use ndarray::{Array1, ArrayBase, Axis, Data, Ix1, Ix2};

use crate::dataset::{AsTargets, DatasetBase};
use crate::Float;

/// Pearson correlation of every column in `records` with `target`
///
/// Columns (or targets) without any variance have no defined correlation; their coefficient is
/// reported as zero so that they end up at the bottom of any ranking.
pub fn pearson_with_target<F: Float, D: Data<Elem = F>, E: Data<Elem = F>>(
    records: &ArrayBase<D, Ix2>,
    target: &ArrayBase<E, Ix1>,
) -> Array1<F> {
    assert_eq!(
        records.nrows(),
        target.len(),
        "number of records must match the number of targets"
    );

    let mean = match records.mean_axis(Axis(0)) {
        Some(mean) => mean,
        None => return Array1::zeros(records.ncols()),
    };

    // subtract mean
    let target_mean = target.mean().unwrap_or_else(F::zero);
    let target = target.mapv(|t| t - target_mean);
    let target_norm = target.dot(&target).sqrt();

    let denoised = records - &mean;

    denoised
        .columns()
        .into_iter()
        .map(|col| {
            let norm = col.dot(&col).sqrt();
            let denom = norm * target_norm;
            if denom <= F::epsilon() {
                F::zero()
            } else {
                col.dot(&target) / denom
            }
        })
        .collect()
}

/// Correlation of the features in a dataset with its targets
pub trait TargetCorrelation<F> {
    /// Pearson correlation coefficient of every feature with the target
    fn target_correlation(&self) -> Array1<F>;
}

impl<F: Float, D: Data<Elem = F>, T: AsTargets<Elem = F>> TargetCorrelation<F>
    for DatasetBase<ArrayBase<D, Ix2>, T>
{
    fn target_correlation(&self) -> Array1<F> {
        pearson_with_target(self.records(), &self.as_targets())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dataset;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1, Array2};
    use ndarray_rand::{rand_distr::Uniform, RandomExt};
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn perfectly_correlated_columns() {
        let target = array![1., 2., 3., 4.];
        let records = array![[2., -1., 5.], [4., -2., 5.], [6., -3., 5.], [8., -4., 5.]];

        let corr = pearson_with_target(&records, &target);

        // linear, anti-linear and constant column
        assert_abs_diff_eq!(corr, array![1., -1., 0.], epsilon = 1e-12);
    }

    #[test]
    fn uncorrelated_noise_is_close_to_zero() {
        let mut rng = SmallRng::seed_from_u64(42);
        let records: Array2<f64> = Array2::random_using((5000, 3), Uniform::new(-1., 1.), &mut rng);
        let target: Array1<f64> = Array1::random_using(5000, Uniform::new(-1., 1.), &mut rng);

        let dataset = Dataset::new(records, target);
        let corr = dataset.target_correlation();

        assert_eq!(corr.len(), 3);
        for c in corr.iter() {
            assert!(c.abs() < 0.05);
        }
    }

    #[test]
    fn constant_target_has_zero_correlation() {
        let records = array![[1., 2.], [3., 1.], [5., 0.]];
        let target = array![7., 7., 7.];

        let corr = pearson_with_target(&records, &target);
        assert_abs_diff_eq!(corr, array![0., 0.]);
    }
}
