use msm_choice::ChoiceError;
use msm_core::{MsmError, Year};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("unknown migration policy {0:?}: expected \"migration\", \"population\" or \"populationGrowthRate\"")]
    UnknownMigrationPolicy(String),

    #[error("{table} has no row for year {year}")]
    MissingYear { table: &'static str, year: Year },

    #[error("table parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Registry(#[from] MsmError),

    #[error(transparent)]
    Choice(#[from] ChoiceError),
}

pub type SimResult<T> = Result<T, SimError>;
