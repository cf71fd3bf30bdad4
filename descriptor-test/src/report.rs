use std::fmt;

use fpml_selection::FeatureSelection;
use ndarray::Array1;

/// Feature reduction applied before a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Projection onto the given number of principal components
    Pca(usize),
    /// Unreduced fingerprints
    Base,
    Sis,
    IterativeSis,
    IterativeSisCutoff,
}

impl Stage {
    /// Prefix of the selection lines of a screening stage
    fn selection_label(&self) -> Option<&'static str> {
        match self {
            Stage::Sis => Some("sis"),
            Stage::IterativeSis => Some("iterative_sis"),
            Stage::IterativeSisCutoff => Some("iterative_sis + cutoff"),
            Stage::Pca(_) | Stage::Base => None,
        }
    }
}

/// Outcome of a single prediction of the sweep
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionReport {
    pub stage: Stage,
    /// Number of features the model was trained on
    pub nfeatures: usize,
    /// Root mean squared error on the training records
    pub training_error: f64,
    /// Root mean squared error on the test records
    pub validation_error: f64,
    /// Screening result for the selection stages
    pub selection: Option<FeatureSelection<f64>>,
}

fn format_indices(indices: &[usize]) -> String {
    let indices = indices
        .iter()
        .map(|idx| idx.to_string())
        .collect::<Vec<_>>();
    format!("[{}]", indices.join(", "))
}

fn format_values(values: &Array1<f64>) -> String {
    let values = values
        .iter()
        .map(|value| format!("{:.6}", value))
        .collect::<Vec<_>>();
    format!("[{}]", values.join(", "))
}

impl fmt::Display for PredictionReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.stage {
            Stage::Pca(ncomponents) => writeln!(f, "PREDICTION FOR {} COMPONENTS", ncomponents)?,
            Stage::Base => writeln!(f, "Base Predictions")?,
            Stage::Sis | Stage::IterativeSis | Stage::IterativeSisCutoff => {}
        }
        if let (Some(label), Some(selection)) = (self.stage.selection_label(), &self.selection) {
            writeln!(f, "{} features: {}", label, format_indices(selection.accepted()))?;
            writeln!(
                f,
                "{} correlation: {}",
                label,
                format_values(selection.correlation())
            )?;
        }

        writeln!(f, "Feature length: {}", self.nfeatures)?;
        writeln!(f, "Training error: {}", self.training_error)?;
        write!(f, "Model error: {}", self.validation_error)
    }
}
