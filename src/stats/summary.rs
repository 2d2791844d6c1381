use super::{rates, StatsOptions};
use crate::dates;
use crate::eligibility::classify_dose;
use crate::model::{DoseRecord, DoseStatus};
use chrono::NaiveDate;
use serde::Serialize;

/// Décompte des doses d'un ensemble d'enregistrements à une date donnée.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DoseSummary {
    pub total: u64,
    pub administered: u64,
    pub upcoming: u64,
    pub overdue: u64,
    pub missed: u64,
    pub timely: u64,
}

impl DoseSummary {
    /// Doses administrées sur doses déjà échues ou faites (les doses à
    /// venir ne pénalisent pas).
    pub fn completion_rate(&self) -> f64 {
        rates::completion_rate(self.total - self.upcoming, self.administered)
    }

    pub fn timeliness_rate(&self) -> f64 {
        rates::completion_rate(self.administered, self.timely)
    }

    pub fn has_gaps(&self) -> bool {
        self.overdue > 0 || self.missed > 0
    }
}

pub fn summarize_doses(
    records: &[DoseRecord],
    today: NaiveDate,
    opts: &StatsOptions,
) -> DoseSummary {
    let mut summary = DoseSummary::default();
    for rec in records {
        summary.total += 1;
        match classify_dose(rec, today, opts) {
            DoseStatus::Administered => {
                summary.administered += 1;
                if let Some(on) = rec.administered_date {
                    if dates::days_between(rec.due_date, on) <= i64::from(opts.grace_days) {
                        summary.timely += 1;
                    }
                }
            }
            DoseStatus::Upcoming => summary.upcoming += 1,
            DoseStatus::Overdue => summary.overdue += 1,
            DoseStatus::Missed => summary.missed += 1,
        }
    }
    summary
}
