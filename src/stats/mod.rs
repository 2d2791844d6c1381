//! Indicateurs : couverture, complétude, ponctualité, abandon, pertes.
//!
//! Tous les taux sont des pourcentages bornés à `[0, 100]` ; un
//! dénominateur nul donne `0.0`.

mod rates;
mod summary;
mod types;

pub use rates::{
    completion_rate, coverage_rate, dropout_rate, timeliness_rate, wastage_rate,
};
pub use summary::{summarize_doses, DoseSummary};
pub use types::{StatsOptions, DEFAULT_GRACE_DAYS, DEFAULT_MISSED_AFTER_DAYS};
