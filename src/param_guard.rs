use std::error::Error;

/// Hyperparameters that are validated before use
///
/// Algorithms implement [`Fit`](crate::traits::Fit) or
/// [`Transformer`](crate::traits::Transformer) for the `Checked` type only. The unchecked builder
/// gets both traits for free, the validation then runs as the first step of fitting.
///
/// `check_ref` and `check` must accept and reject the same values.
pub trait ParamGuard {
    /// Validated hyperparameters
    type Checked;
    type Error: Error;

    /// Validates the hyperparameters without consuming them
    fn check_ref(&self) -> Result<&Self::Checked, Self::Error>;

    /// Validates and unwraps the hyperparameters
    fn check(self) -> Result<Self::Checked, Self::Error>;
}
