use thiserror::Error;

/// Erreurs du calculateur (dates, calendrier vaccinal).
#[derive(Error, Debug)]
pub enum CalcError {
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("date out of range")]
    DateOverflow,
    #[error("invalid vaccine schedule: {0}")]
    InvalidSchedule(String),
    #[error("unknown vaccine: {0}")]
    UnknownVaccine(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
