use msm_core::MsmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChoiceError {
    #[error("scoring configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Registry(#[from] MsmError),
}

pub type ChoiceResult<T> = Result<T, ChoiceError>;
