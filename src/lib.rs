#![forbid(unsafe_code)]
//! ImmuniTrack — calcul du calendrier vaccinal d'un enfant (KEPI).
//!
//! - Éligibilité : doses dues, fenêtres d'âge, doses à venir.
//! - Regroupement par tranche d'âge pour l'affichage.
//! - Indicateurs : couverture, ponctualité, abandon, pertes.
//! - Dates de rappel avant une échéance.
//! - Fonctions pures ; dates calendaires, rappels en UTC.

#[macro_use]
pub mod logging;

pub mod catalog;
pub mod config;
pub mod dates;
pub mod eligibility;
pub mod error;
pub mod grouping;
pub mod io;
pub mod model;
pub mod notification;
pub mod stats;
pub mod storage;

pub use catalog::kepi_catalog;
pub use config::Settings;
pub use eligibility::{
    age_appropriate_vaccines, classify_dose, due_date, due_vaccines, is_vaccine_due,
    is_vaccine_due_now, is_vaccine_due_str, upcoming_vaccines, UpcomingVaccine,
};
pub use error::CalcError;
pub use grouping::{flatten_groups, group_by_age_category, AgeCategory};
pub use model::{
    Catalog, Child, ChildId, DoseRecord, DoseStatus, VaccineId, VaccineSchedule,
};
pub use notification::{
    generate_reminder_schedule, prepare_reminders, Reminder, ReminderOptions, ReminderRenderer,
    TextReminder, DEFAULT_LEAD_DAYS,
};
pub use stats::{
    completion_rate, coverage_rate, dropout_rate, summarize_doses, timeliness_rate,
    wastage_rate, DoseSummary, StatsOptions,
};
pub use storage::{JsonStorage, Storage};
