use thiserror::Error;

/// Failures the persona engine can report.
///
/// Oracle failures are normally absorbed by the `fallback` module before they reach
/// callers; only record loading and storage errors surface to the user.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("oracle unavailable: {0}")]
    OracleUnavailable(String),

    #[error("malformed oracle response: {0}")]
    MalformedOracleResponse(String),

    #[error("oracle call timed out after {0}s")]
    Timeout(u64),

    #[error("invalid persona record: {0}")]
    InvalidPersonaRecord(String),

    #[error("serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for EngineError {
    fn from(err: rusqlite::Error) -> Self {
        EngineError::Storage(err.to_string())
    }
}

impl From<platform::PlatformError> for EngineError {
    fn from(err: platform::PlatformError) -> Self {
        EngineError::Config(err.to_string())
    }
}

impl EngineError {
    /// True for failures of an external oracle call, which callers degrade rather than surface.
    pub fn is_oracle_failure(&self) -> bool {
        matches!(
            self,
            EngineError::OracleUnavailable(_)
                | EngineError::MalformedOracleResponse(_)
                | EngineError::Timeout(_)
        )
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
