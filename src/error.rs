//! Error types for the agri-forecast library.

use thiserror::Error;

/// Result type alias for forecasting pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, fitting, forecasting or querying.
///
/// `NotSupported` and `OutOfRange` are deliberately absent: they are
/// ordinary outcomes and live on [`crate::Prediction`] and
/// [`crate::Resolution`] instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The configured data source could not be found.
    #[error("data source not found: {0}")]
    SourceNotFound(String),

    /// The data source exists but its content is unusable.
    #[error("malformed data source {source_id}: {reason}")]
    MalformedSource { source_id: String, reason: String },

    /// Insufficient observations to estimate the requested orders.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// The parameter optimizer did not converge.
    #[error("model fit did not converge after {iterations} iterations")]
    NonConvergence { iterations: usize },

    /// Forecast horizon must be positive.
    #[error("invalid forecast horizon: {0}")]
    InvalidHorizon(usize),

    /// Model has not been fitted yet.
    #[error("model must be fitted before prediction")]
    FitRequired,

    /// Observed and forecast halves do not line up.
    #[error("timeline composition failed: {0}")]
    Composition(String),

    /// Structurally invalid query.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Observation series violates its invariants.
    #[error("invalid series: {0}")]
    InvalidSeries(String),

    /// Commodity configuration could not be read or is inconsistent.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Coarse classification of [`Error`] used by presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SourceNotFound,
    ModelFit,
    Forecast,
    Composition,
    InvalidInput,
    Configuration,
}

impl Error {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::SourceNotFound(_) => ErrorKind::SourceNotFound,
            Error::MalformedSource { .. } | Error::InvalidSeries(_) | Error::Configuration(_) => {
                ErrorKind::Configuration
            }
            Error::InsufficientData { .. } | Error::NonConvergence { .. } => ErrorKind::ModelFit,
            Error::InvalidHorizon(_) | Error::FitRequired => ErrorKind::Forecast,
            Error::Composition(_) => ErrorKind::Composition,
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
        }
    }

    /// Whether this error indicates a misuse of the pipeline rather than bad
    /// user input or bad data.
    pub fn is_internal(&self) -> bool {
        matches!(self.kind(), ErrorKind::Forecast | ErrorKind::Composition)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Configuration(err.to_string())
    }
}
