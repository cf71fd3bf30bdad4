//! Re-exports of the types and traits needed by almost every user of `fpml`

pub use crate::correlation::TargetCorrelation;
pub use crate::dataset::{AsTargets, Dataset, DatasetBase, DatasetView, Float, Records};
pub use crate::error::{Error, Result};
pub use crate::metrics_regression::Regression;
pub use crate::param_guard::ParamGuard;
pub use crate::traits::*;
