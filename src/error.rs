use thiserror::Error;

/// Conditions that abort a run before any output is written.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("input has no data rows")]
    EmptyInput,

    #[error("coordinate columns not found (detected lat={lat:?}, lon={lon:?})")]
    MissingColumns {
        lat: Option<String>,
        lon: Option<String>,
    },

    #[error("delimiter must be a single ASCII character, got {0:?}")]
    InvalidDelimiter(String),
}
