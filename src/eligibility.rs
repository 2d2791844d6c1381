//! Éligibilité : vaccins dus, adaptés à l'âge, à venir ; statut d'une dose.

use crate::dates;
use crate::error::CalcError;
use crate::model::{Catalog, DoseRecord, DoseStatus, VaccineId, VaccineSchedule};
use crate::stats::StatsOptions;
use chrono::NaiveDate;

/// Date recommandée de la dose : naissance + `recommended_age_days`.
pub fn due_date(vaccine: &VaccineSchedule, birth: NaiveDate) -> Result<NaiveDate, CalcError> {
    dates::add_days(birth, vaccine.recommended_age_days)
}

/// Vrai si la dose est due à `today` : fenêtre `[min, max]` respectée et
/// âge recommandé atteint.
pub fn is_vaccine_due(
    vaccine: &VaccineSchedule,
    birth: NaiveDate,
    today: NaiveDate,
) -> Result<bool, CalcError> {
    if let Some(min) = vaccine.min_age_days {
        if today < dates::add_days(birth, min)? {
            return Ok(false);
        }
    }
    if let Some(max) = vaccine.max_age_days {
        if today > dates::add_days(birth, max)? {
            return Ok(false);
        }
    }
    Ok(today >= due_date(vaccine, birth)?)
}

pub fn is_vaccine_due_now(vaccine: &VaccineSchedule, birth: NaiveDate) -> Result<bool, CalcError> {
    is_vaccine_due(vaccine, birth, dates::today_utc())
}

/// Variante sur date de naissance textuelle ; une date invalide est une erreur.
pub fn is_vaccine_due_str(
    vaccine: &VaccineSchedule,
    birth: &str,
    today: NaiveDate,
) -> Result<bool, CalcError> {
    let birth = dates::parse_date(birth)?;
    is_vaccine_due(vaccine, birth, today)
}

/// Doses du catalogue non encore administrées dont la fenêtre d'âge
/// contient l'âge actuel de l'enfant. L'ordre du catalogue est conservé.
pub fn age_appropriate_vaccines<'a>(
    catalog: &'a Catalog,
    birth: NaiveDate,
    administered: &[VaccineId],
    today: NaiveDate,
) -> Vec<&'a VaccineSchedule> {
    let age = dates::age_in_days(birth, today);
    if age < 0 {
        return Vec::new();
    }
    catalog
        .vaccines
        .iter()
        .filter(|v| !administered.contains(&v.vaccine_id))
        .filter(|v| v.window_contains(age))
        .collect()
}

/// Doses dues (au sens de [`is_vaccine_due`]) et non administrées.
pub fn due_vaccines<'a>(
    catalog: &'a Catalog,
    birth: NaiveDate,
    administered: &[VaccineId],
    today: NaiveDate,
) -> Result<Vec<&'a VaccineSchedule>, CalcError> {
    let mut out = Vec::new();
    for v in &catalog.vaccines {
        if administered.contains(&v.vaccine_id) {
            continue;
        }
        if is_vaccine_due(v, birth, today)? {
            out.push(v);
        }
    }
    Ok(out)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingVaccine<'a> {
    pub vaccine: &'a VaccineSchedule,
    pub due_date: NaiveDate,
}

/// Doses non administrées dont la date recommandée tombe dans
/// `(today, today + horizon_days]`, triées par date.
pub fn upcoming_vaccines<'a>(
    catalog: &'a Catalog,
    birth: NaiveDate,
    administered: &[VaccineId],
    today: NaiveDate,
    horizon_days: u32,
) -> Result<Vec<UpcomingVaccine<'a>>, CalcError> {
    let horizon = dates::add_days(today, horizon_days)?;
    let mut out = Vec::new();
    for v in &catalog.vaccines {
        if administered.contains(&v.vaccine_id) {
            continue;
        }
        let due = due_date(v, birth)?;
        if due > today && due <= horizon {
            out.push(UpcomingVaccine {
                vaccine: v,
                due_date: due,
            });
        }
    }
    out.sort_by_key(|u| u.due_date);
    Ok(out)
}

/// Statut d'une dose à `today`.
pub fn classify_dose(record: &DoseRecord, today: NaiveDate, opts: &StatsOptions) -> DoseStatus {
    if record.is_administered() {
        return DoseStatus::Administered;
    }
    if today < record.due_date {
        return DoseStatus::Upcoming;
    }
    let late_by = dates::days_between(record.due_date, today);
    if late_by <= i64::from(opts.missed_after_days) {
        DoseStatus::Overdue
    } else {
        DoseStatus::Missed
    }
}
