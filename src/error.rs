use crate::sql::SqlParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("No SQL source supplied")]
    MissingInput,
    #[error(transparent)]
    Parse(#[from] SqlParseError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EngineError {
    /// True for errors caused by the caller's input rather than by the engine.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::MissingInput | Self::Parse(_))
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("failed to serialize schema graph: {err}"))
    }
}
