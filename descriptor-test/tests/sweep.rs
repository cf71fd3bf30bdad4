use std::io::{self, Write};
use std::path::Path;

use descriptor_test::sweep::{self, pca_components};
use descriptor_test::{DriverError, ExperimentConfig, Stage};
use fpml_candidates::{generate, CandidateStore};
use rand::{rngs::SmallRng, SeedableRng};
use tempfile::TempDir;

fn write_database(dir: &Path, ncandidates: usize) -> std::path::PathBuf {
    let mut rng = SmallRng::seed_from_u64(42);
    let pool = generate::nanoparticle_pool(ncandidates, 13, [79, 29], &mut rng).unwrap();

    let path = dir.join("gadb.json");
    CandidateStore::from_candidates(pool).write(&path).unwrap();
    path
}

fn small_experiment(database: std::path::PathBuf) -> ExperimentConfig {
    let mut config = ExperimentConfig::default();
    config.database = database;
    config.split.train_size = 30;
    config.split.test_size = 15;
    config.selection.sis_size = 5;
    config.selection.iterative_step = 2;
    config
}

#[test]
fn full_sweep_on_a_synthetic_search() {
    let dir = TempDir::new().unwrap();
    let config = small_experiment(write_database(dir.path(), 60));

    let mut out = Vec::new();
    let reports = sweep::run(&config, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    // 30 training fingerprints of 67 features
    let pca = reports
        .iter()
        .filter_map(|r| match r.stage {
            Stage::Pca(k) => Some(k),
            _ => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(pca, (1..=30).collect::<Vec<_>>());
    assert_eq!(reports.len(), 30 + 4);

    let tail = reports[30..].iter().map(|r| r.stage).collect::<Vec<_>>();
    assert_eq!(
        tail,
        vec![
            Stage::Base,
            Stage::Sis,
            Stage::IterativeSis,
            Stage::IterativeSisCutoff
        ]
    );
    assert_eq!(reports[30].nfeatures, 67);
    assert_eq!(reports[31].nfeatures, 5);
    for report in &reports {
        assert!(report.training_error.is_finite());
        assert!(report.validation_error.is_finite());
    }

    let lines = text.lines().collect::<Vec<_>>();
    assert_eq!(lines[0], "Getting candidates from the database");
    assert_eq!(lines[1], "Getting the fingerprint vectors");
    assert_eq!(lines[2], "PREDICTION FOR 1 COMPONENTS");
    assert_eq!(lines[3], "Feature length: 1");
    assert!(lines[4].starts_with("Training error: "));
    assert!(lines[5].starts_with("Model error: "));

    let position = |needle: &str| lines.iter().position(|line| line.starts_with(needle)).unwrap();
    assert!(position("PREDICTION FOR 30 COMPONENTS") < position("Base Predictions"));
    assert!(position("Base Predictions") < position("Getting descriptor correlation"));
    assert!(position("Getting descriptor correlation") < position("sis features:"));
    assert!(position("sis correlation:") < position("iterative_sis features:"));
    assert!(position("iterative_sis correlation:") < position("iterative_sis + cutoff features:"));
    assert_eq!(
        text.matches("Feature length:").count(),
        reports.len()
    );
}

#[test]
fn same_seed_same_errors() {
    let dir = TempDir::new().unwrap();
    let mut config = small_experiment(write_database(dir.path(), 60));
    config.selection.pca = false;

    let first = sweep::run(&config, &mut Vec::new()).unwrap();
    let second = sweep::run(&config, &mut Vec::new()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn pca_sweep_is_bounded_by_the_training_set() {
    let dir = TempDir::new().unwrap();
    let mut config = small_experiment(write_database(dir.path(), 60));
    config.split.train_size = 12;
    config.split.test_size = 40;
    config.selection.sis_size = 4;

    let reports = sweep::run(&config, &mut Vec::new()).unwrap();
    let npca = reports
        .iter()
        .filter(|r| matches!(r.stage, Stage::Pca(_)))
        .count();
    assert_eq!(npca, 12);
}

#[test]
fn missing_database_is_an_error() {
    let dir = TempDir::new().unwrap();
    let config = small_experiment(dir.path().join("missing.json"));

    let mut out = Vec::new();
    assert!(matches!(
        sweep::run(&config, &mut out),
        Err(DriverError::Candidate(_))
    ));
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Getting candidates from the database\n"
    );
}

#[test]
fn too_few_candidates_for_training() {
    let dir = TempDir::new().unwrap();
    let mut config = small_experiment(write_database(dir.path(), 20));
    config.split.test_size = 17;

    assert!(matches!(
        sweep::run(&config, &mut Vec::new()),
        Err(DriverError::NotEnoughCandidates(1))
    ));
}

#[test]
fn pca_component_count_respects_the_cap() {
    let dir = TempDir::new().unwrap();
    let mut config = small_experiment(write_database(dir.path(), 60));
    config.selection.pca_max_components = Some(3);

    let reports = sweep::run(&config, &mut Vec::new()).unwrap();
    assert_eq!(reports[2].stage, Stage::Pca(3));
    assert_eq!(reports[3].stage, Stage::Base);
    assert_eq!(reports[3].nfeatures, 67);

    let base = fpml::Dataset::new(ndarray::Array2::zeros((10, 4)), ndarray::Array1::zeros(10));
    assert_eq!(pca_components(&config, &base), 3);
}

/// Accepts every line but cannot be flushed, like a closed pipe
struct ClosedPipe(Vec<u8>);

impl Write for ClosedPipe {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader went away"))
    }
}

#[test]
fn failed_flush_of_the_report_is_an_error() {
    let dir = TempDir::new().unwrap();
    let mut config = small_experiment(write_database(dir.path(), 60));
    config.selection.pca = false;

    let mut out = ClosedPipe(Vec::new());
    assert!(matches!(
        sweep::run(&config, &mut out),
        Err(DriverError::Io(_))
    ));
    assert!(String::from_utf8_lossy(&out.0).contains("Base Predictions"));
}
