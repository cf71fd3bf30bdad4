//! The descriptor sweep
//!
//! Every stage reduces the fingerprints of the training and test candidates in the same way,
//! normalizes them with training statistics and fits a kernel ridge model. The stages run in
//! a fixed order: all principal component counts, the unreduced fingerprints, sure independence
//! screening and the two iterative screenings.

use std::io::Write;

use fpml::traits::{Fit, Transformer};
use fpml::{Dataset, ParamGuard};
use fpml_candidates::{split, CandidateStore};
use fpml_fingerprint::{FingerprintContext, FingerprintPipeline};
use fpml_krr::{ErrorRequest, KernelRidgeValidParams};
use fpml_preprocessing::LinearScaler;
use fpml_reduction::Pca;
use fpml_selection::FeatureSelection;
use ndarray::Array2;
use rand::{rngs::SmallRng, SeedableRng};

use crate::config::ExperimentConfig;
use crate::error::{DriverError, Result};
use crate::report::{PredictionReport, Stage};

/// Errors of a kernel ridge model trained on `train` and evaluated on `test`
///
/// Returns the feature length together with the training and the validation error.
pub fn predict(
    krr: &KernelRidgeValidParams<f64>,
    train: &Dataset<f64>,
    test: &Dataset<f64>,
) -> Result<(usize, f64, f64)> {
    let scaler = LinearScaler::normalize().fit(train)?;
    let train_records: Array2<f64> = scaler.transform(train.records().to_owned());
    let test_records: Array2<f64> = scaler.transform(test.records().to_owned());

    let covariance = krr.covariance(&train_records);
    let cinv = krr.invert(&covariance)?;
    let prediction = krr.predictions(
        &train_records,
        &test_records,
        &cinv,
        train.targets(),
        Some(test.targets()),
        ErrorRequest::all(),
    )?;

    let training_error = prediction
        .training_error
        .map_or(f64::NAN, |error| error.average);
    let validation_error = prediction
        .validation_error
        .map_or(f64::NAN, |error| error.average);

    Ok((train_records.ncols(), training_error, validation_error))
}

/// Number of principal components the sweep visits
pub fn pca_components(config: &ExperimentConfig, train: &Dataset<f64>) -> usize {
    let (nsamples, nfeatures) = train.records().dim();
    let available = nsamples.min(nfeatures);

    match config.selection.pca_max_components {
        Some(max) => available.min(max),
        None => available,
    }
}

fn report(
    krr: &KernelRidgeValidParams<f64>,
    stage: Stage,
    train: &Dataset<f64>,
    test: &Dataset<f64>,
    selection: Option<FeatureSelection<f64>>,
) -> Result<PredictionReport> {
    let (nfeatures, training_error, validation_error) = predict(krr, train, test)?;
    log::info!(
        "{:?}: {} features, training error {:.4}, model error {:.4}",
        stage,
        nfeatures,
        training_error,
        validation_error
    );

    Ok(PredictionReport {
        stage,
        nfeatures,
        training_error,
        validation_error,
        selection,
    })
}

fn screened(
    krr: &KernelRidgeValidParams<f64>,
    stage: Stage,
    selection: FeatureSelection<f64>,
    train: &Dataset<f64>,
    test: &Dataset<f64>,
) -> Result<PredictionReport> {
    log::debug!("{:?} accepted features {:?}", stage, selection.accepted());
    let train = selection.reduce(train)?;
    let test = selection.reduce(test)?;

    report(krr, stage, &train, &test, Some(selection))
}

/// Run all stages on fingerprinted training and test candidates
///
/// `on_report` sees every report as soon as it is available, the full sequence is returned at
/// the end. The first failing stage aborts the sweep.
pub fn sweep<C>(
    config: &ExperimentConfig,
    train: &Dataset<f64>,
    test: &Dataset<f64>,
    mut on_report: C,
) -> Result<Vec<PredictionReport>>
where
    C: FnMut(&PredictionReport) -> Result<()>,
{
    if train.records().ncols() != test.records().ncols() {
        return Err(DriverError::Config(format!(
            "training records have {} features, test records {}",
            train.records().ncols(),
            test.records().ncols()
        )));
    }

    let krr = config.krr_params()?;
    let mut reports = Vec::new();
    let mut push = |report: PredictionReport| -> Result<()> {
        on_report(&report)?;
        reports.push(report);
        Ok(())
    };

    if config.selection.pca {
        for ncomponents in 1..=pca_components(config, train) {
            let pca = Pca::params(ncomponents).check()?.fit(train)?;
            let reduced_train = pca.transform(train.clone());
            let reduced_test = pca.transform(test.clone());

            push(report(
                &krr,
                Stage::Pca(ncomponents),
                &reduced_train,
                &reduced_test,
                None,
            )?)?;
        }
    }

    push(report(&krr, Stage::Base, train, test, None)?)?;

    let sis = config.sis_params()?.fit(train)?;
    push(screened(&krr, Stage::Sis, sis, train, test)?)?;

    let (iterative, with_cutoff) = config.iterative_params()?;
    let selection = iterative.fit(train)?;
    push(screened(&krr, Stage::IterativeSis, selection, train, test)?)?;

    let selection = with_cutoff.fit(train)?;
    push(screened(
        &krr,
        Stage::IterativeSisCutoff,
        selection,
        train,
        test,
    )?)?;

    Ok(reports)
}

/// Fingerprint the candidates of the configured database and write the sweep to `out`
pub fn run<W: Write>(config: &ExperimentConfig, out: &mut W) -> Result<Vec<PredictionReport>> {
    config.validate()?;

    writeln!(out, "Getting candidates from the database")?;
    let store = CandidateStore::open(&config.database)?;
    let pool = store.get_all_relaxed_candidates(config.split.use_extinct);

    let mut rng = SmallRng::seed_from_u64(config.seed);
    let (train, test) = split::train_test_split(
        &pool,
        config.split.train_size,
        config.split.test_size,
        &config.split.target_key,
        &mut rng,
    )?;
    if train.len() < 2 {
        return Err(DriverError::NotEnoughCandidates(train.len()));
    }

    writeln!(out, "Getting the fingerprint vectors")?;
    let context = FingerprintContext::from_candidates(&pool)?;
    let pipeline = FingerprintPipeline::new(config.descriptors()?, context)
        .particle_params(config.particle_params()?);
    let train = pipeline.transform_set(&train)?;
    let test = pipeline.transform_set(&test)?;
    log::info!(
        "{} training and {} test fingerprints of length {}",
        train.records().nrows(),
        test.records().nrows(),
        pipeline.nfeatures()
    );

    let reports = sweep(config, &train, &test, |report| {
        if report.stage == Stage::Sis {
            writeln!(out, "Getting descriptor correlation")?;
        }
        writeln!(out, "{}", report)?;
        Ok(())
    })?;
    out.flush()?;

    Ok(reports)
}
