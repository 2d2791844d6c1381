use crate::dates;
use crate::grouping::AgeCategory;
use crate::model::{Catalog, DoseRecord, VaccineId, VaccineSchedule};
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import du catalogue depuis CSV: header `vaccine_id,vaccine_name,recommended_age_days,
/// min_age_days,max_age_days,interval_days,dose_number,total_doses,is_birth_dose,is_booster`
///
/// Les cellules optionnelles vides valent `None` ; chaque ligne est validée.
pub fn import_catalog_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Catalog> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut vaccines = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let vaccine =
            parse_catalog_row(&rec).with_context(|| format!("catalog row {}", line + 2))?;
        vaccines.push(vaccine);
    }
    let catalog = Catalog::new(vaccines);
    catalog.validate()?;
    Ok(catalog)
}

fn parse_catalog_row(rec: &StringRecord) -> anyhow::Result<VaccineSchedule> {
    let id = field(rec, 0, "vaccine_id")?;
    let name = field(rec, 1, "vaccine_name")?;
    if id.is_empty() || name.is_empty() {
        log_event!(debug, "rejecting catalog row with empty id or name: {rec:?}");
        bail!("invalid catalog row (empty)");
    }
    let vaccine = VaccineSchedule {
        vaccine_id: VaccineId::new(id),
        vaccine_name: name.to_string(),
        recommended_age_days: parse_days(field(rec, 2, "recommended_age_days")?)?,
        min_age_days: optional_days(rec, 3)?,
        max_age_days: optional_days(rec, 4)?,
        interval_days: optional_days(rec, 5)?,
        dose_number: optional_days(rec, 6)?.unwrap_or(1),
        total_doses: optional_days(rec, 7)?.unwrap_or(1),
        is_birth_dose: optional_bool(rec, 8)?.unwrap_or(false),
        is_booster: optional_bool(rec, 9)?.unwrap_or(false),
    };
    vaccine.validate()?;
    Ok(vaccine)
}

fn field<'r>(rec: &'r StringRecord, idx: usize, name: &str) -> anyhow::Result<&'r str> {
    rec.get(idx)
        .map(str::trim)
        .with_context(|| format!("missing {name}"))
}

fn parse_days(s: &str) -> anyhow::Result<u32> {
    s.parse::<u32>()
        .with_context(|| format!("expected a number of days, got {s:?}"))
}

fn optional_days(rec: &StringRecord, idx: usize) -> anyhow::Result<Option<u32>> {
    match rec.get(idx).map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_days(s).map(Some),
    }
}

fn optional_bool(rec: &StringRecord, idx: usize) -> anyhow::Result<Option<bool>> {
    match rec.get(idx).map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_bool(s).map(Some),
    }
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        _ => bail!("expected boolean, got {s:?}"),
    }
}

/// Import de doses: header `vaccine_id,due_date,administered_date`
pub fn import_doses_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<DoseRecord>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let vaccine_id = rec
            .get(0)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(VaccineId::new);
        let due = field(&rec, 1, "due_date")?;
        let due_date = dates::parse_date(due).context("due_date")?;
        let administered_date = match rec.get(2).map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(dates::parse_date(raw).context("administered_date")?),
        };
        out.push(DoseRecord {
            vaccine_id,
            due_date,
            administered_date,
        });
    }
    Ok(out)
}

/// Export JSON du catalogue (jolie mise en forme)
pub fn export_catalog_json<P: AsRef<Path>>(path: P, catalog: &Catalog) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(catalog)?;
    fs::write(path, s)?;
    Ok(())
}

/// Ligne de la liste des doses dues.
#[derive(Debug, Clone)]
pub struct DueEntry<'a> {
    pub vaccine: &'a VaccineSchedule,
    pub due_date: NaiveDate,
}

/// Export CSV des doses dues: header `vaccine_id,vaccine_name,due_date,age_days,category`
pub fn export_due_csv<P: AsRef<Path>>(path: P, entries: &[DueEntry<'_>]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["vaccine_id", "vaccine_name", "due_date", "age_days", "category"])?;
    let mut days = itoa::Buffer::new();
    for e in entries {
        let due = e.due_date.format("%Y-%m-%d").to_string();
        w.write_record([
            e.vaccine.vaccine_id.as_str(),
            e.vaccine.vaccine_name.as_str(),
            due.as_str(),
            days.format(e.vaccine.recommended_age_days),
            AgeCategory::for_vaccine(e.vaccine).label(),
        ])?;
    }
    w.flush()?;
    Ok(())
}
