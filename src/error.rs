use thiserror::Error;

/// Custom error type for pdesol
///
/// This error type is used to wrap all possible errors that can occur when building or evaluating a PDE solution
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PdeSolError {
    #[error("Solution error: {0}")]
    SolutionError(#[from] SolutionError),
    #[error("Evaluation error: {0}")]
    EvaluationError(#[from] EvaluationError),
    #[error("Other error: {0}")]
    Other(String),
}

/// Possible errors that can occur when building a solution record
#[derive(Error, Debug, PartialEq)]
pub enum SolutionError {
    #[error("Variable `{0}` is declared more than once")]
    DuplicateVariable(String),
    #[error("Errors given for `{0}`, which is not a dependent variable")]
    UnknownErrorField(String),
    #[error("Errors for `{0}` are given more than once")]
    DuplicateErrorField(String),
    #[error("Array for `{field}` has {found} axes, expected {expected}")]
    RankMismatch {
        field: String,
        expected: usize,
        found: usize,
    },
    #[error("Array for `{field}` has shape {found:?}, expected {expected:?} (`None` is any non-zero extent)")]
    ShapeMismatch {
        field: String,
        expected: Vec<Option<usize>>,
        found: Vec<usize>,
    },
    #[error("Axis {axis} of `{field}` is empty but its domain is an interval")]
    EmptyAxis { field: String, axis: usize },
    #[error("A time series solution needs at least one time point")]
    EmptyTimes,
    #[error("Time points must be non-decreasing, time point {0} is before the one preceding it")]
    TimesNotOrdered(usize),
    #[error("Current index {index} is out of range for {len} time points")]
    CurrentIndexOutOfRange { index: usize, len: usize },
    #[error("Interval for `{0}` has a lower bound greater than its upper bound")]
    InvalidInterval(String),
    #[error("Metadata `{metadata}` does not describe a {expected} solution")]
    TimeAxisMismatch {
        metadata: String,
        expected: &'static str,
    },
}

/// Possible errors that can occur when evaluating a solution at a point
#[derive(Error, Debug, PartialEq)]
pub enum EvaluationError {
    #[error("Evaluation is not implemented for discretization metadata `{metadata}` (type `{type_name}`). The discretizer that produced this solution must implement `DiscretizationMetadata::evaluate_time_series` / `evaluate_no_time` for `{type_name}`")]
    NotImplemented { metadata: String, type_name: String },
    #[error("A time series solution must be evaluated at a time")]
    MissingTime,
    #[error("Point has {found} coordinates, expected {expected}")]
    PointDimensionMismatch { expected: usize, found: usize },
    #[error("Point lies outside the solution domain")]
    OutOfDomain,
    #[error("Other error: {0}")]
    Other(String),
}

#[macro_export]
macro_rules! solution_error {
    ($variant:ident) => {
        PdeSolError::from(SolutionError::$variant)
    };
    ($variant:ident, $($arg:tt)*) => {
        PdeSolError::from(SolutionError::$variant($($arg)*))
    };
}

#[macro_export]
macro_rules! evaluation_error {
    ($variant:ident) => {
        PdeSolError::from(EvaluationError::$variant)
    };
    ($variant:ident, $($arg:tt)*) => {
        PdeSolError::from(EvaluationError::$variant($($arg)*))
    };
}

#[macro_export]
macro_rules! other_error {
    ($msg:expr) => {
        PdeSolError::Other($msg.to_string())
    };
}
