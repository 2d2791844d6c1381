//! Arithmétique de dates (jours calendaires, UTC).

use crate::error::CalcError;
use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeZone, Utc};

/// Parse une date `YYYY-MM-DD` ou un timestamp RFC3339 (jour UTC).
pub fn parse_date(raw: &str) -> Result<NaiveDate, CalcError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    raw.parse::<DateTime<Utc>>()
        .map(|dt| dt.date_naive())
        .map_err(|_| CalcError::InvalidDate(raw.to_string()))
}

/// Date du jour (UTC).
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn add_days(date: NaiveDate, days: u32) -> Result<NaiveDate, CalcError> {
    date.checked_add_days(Days::new(u64::from(days)))
        .ok_or(CalcError::DateOverflow)
}

pub fn sub_days(date: NaiveDate, days: u32) -> Result<NaiveDate, CalcError> {
    date.checked_sub_days(Days::new(u64::from(days)))
        .ok_or(CalcError::DateOverflow)
}

/// Nombre de jours signé `to - from`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Mois calendaires entiers écoulés entre `from` et `to` (négatif si `to < from`).
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let mut months = i64::from(to.year() - from.year()) * 12 + i64::from(to.month())
        - i64::from(from.month());
    if to >= from {
        if to.day() < from.day() {
            months -= 1;
        }
    } else if to.day() > from.day() {
        months += 1;
    }
    months
}

pub fn years_between(from: NaiveDate, to: NaiveDate) -> i64 {
    months_between(from, to) / 12
}

pub fn age_in_days(birth: NaiveDate, today: NaiveDate) -> i64 {
    days_between(birth, today)
}

/// `start <= date <= end`.
pub fn is_within_range(date: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    start <= date && date <= end
}

/// Minuit UTC du jour donné.
pub fn start_of_day_utc(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Libellé lisible d'un âge en jours : "Birth", "6 weeks", "9 months", "2 years".
pub fn describe_age(days: u32) -> String {
    match days {
        0 => "Birth".to_string(),
        1..=6 => plural(days, "day"),
        7..=83 => plural(days / 7, "week"),
        84..=729 => plural(days / 30, "month"),
        _ => plural(days / 365, "year"),
    }
}

fn plural(n: u32, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}
