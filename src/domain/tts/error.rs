use crate::error::AppError;

use super::model::{SpeedOutOfRange, UnknownOption};

/// Terminal failure of one synthesis invocation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SynthesisError {
    #[error("OpenAI API key is not set. Enter it in the sidebar.")]
    MissingCredential,
    #[error("Enter some text to convert to speech.")]
    EmptyInput,
    #[error("{0}")]
    SynthesisFailed(String),
}

/// Problems detected while reading the form
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CollectError {
    #[error(transparent)]
    UnknownOption(#[from] UnknownOption),
    #[error(transparent)]
    SpeedOutOfRange(#[from] SpeedOutOfRange),
}

impl From<SynthesisError> for AppError {
    fn from(err: SynthesisError) -> Self {
        match err {
            SynthesisError::MissingCredential | SynthesisError::EmptyInput => {
                AppError::BadRequest(err.to_string())
            }
            SynthesisError::SynthesisFailed(msg) => AppError::ExternalService(msg),
        }
    }
}

impl From<CollectError> for AppError {
    fn from(err: CollectError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
