use crate::error::CalcError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

/// Identifiant fort pour un vaccin (ex. `penta-1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VaccineId(String);

impl VaccineId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VaccineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Entrée du calendrier vaccinal : une dose d'un vaccin et sa fenêtre d'âge.
///
/// Les bornes absentes valent 0 (min) et l'infini (max).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaccineSchedule {
    pub vaccine_id: VaccineId,
    pub vaccine_name: String,
    pub recommended_age_days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_age_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_days: Option<u32>,
    pub dose_number: u32,
    pub total_doses: u32,
    #[serde(default)]
    pub is_birth_dose: bool,
    #[serde(default)]
    pub is_booster: bool,
}

impl VaccineSchedule {
    /// Dose unique recommandée à `recommended_age_days`, sans fenêtre.
    pub fn new<I: AsRef<str>, N: Into<String>>(id: I, name: N, recommended_age_days: u32) -> Self {
        Self {
            vaccine_id: VaccineId::new(id),
            vaccine_name: name.into(),
            recommended_age_days,
            min_age_days: None,
            max_age_days: None,
            interval_days: None,
            dose_number: 1,
            total_doses: 1,
            is_birth_dose: recommended_age_days == 0,
            is_booster: false,
        }
    }

    pub fn with_window(mut self, min_age_days: Option<u32>, max_age_days: Option<u32>) -> Self {
        self.min_age_days = min_age_days;
        self.max_age_days = max_age_days;
        self
    }

    pub fn with_dose(mut self, dose_number: u32, total_doses: u32) -> Self {
        self.dose_number = dose_number;
        self.total_doses = total_doses;
        self
    }

    pub fn with_interval(mut self, interval_days: u32) -> Self {
        self.interval_days = Some(interval_days);
        self
    }

    pub fn booster(mut self) -> Self {
        self.is_booster = true;
        self
    }

    /// Borne basse effective (0 si absente).
    pub fn min_age(&self) -> u32 {
        self.min_age_days.unwrap_or(0)
    }

    /// Borne haute effective (`None` = pas de limite).
    pub fn max_age(&self) -> Option<u32> {
        self.max_age_days
    }

    /// Vrai si un enfant de `age_days` jours est dans la fenêtre `[min, max]`.
    pub fn window_contains(&self, age_days: i64) -> bool {
        if age_days < i64::from(self.min_age()) {
            return false;
        }
        match self.max_age_days {
            Some(max) => age_days <= i64::from(max),
            None => true,
        }
    }

    pub fn validate(&self) -> Result<(), CalcError> {
        let id = self.vaccine_id.as_str();
        if id.trim().is_empty() {
            return Err(CalcError::InvalidSchedule("vaccine id cannot be empty".into()));
        }
        if self.vaccine_name.trim().is_empty() {
            return Err(CalcError::InvalidSchedule(format!(
                "{id}: vaccine name cannot be empty"
            )));
        }
        if let Some(min) = self.min_age_days {
            if min > self.recommended_age_days {
                return Err(CalcError::InvalidSchedule(format!(
                    "{id}: min_age_days ({min}) > recommended_age_days ({})",
                    self.recommended_age_days
                )));
            }
        }
        if let Some(max) = self.max_age_days {
            if self.recommended_age_days > max {
                return Err(CalcError::InvalidSchedule(format!(
                    "{id}: recommended_age_days ({}) > max_age_days ({max})",
                    self.recommended_age_days
                )));
            }
        }
        if self.dose_number == 0 || self.dose_number > self.total_doses {
            return Err(CalcError::InvalidSchedule(format!(
                "{id}: dose {} of {} is out of range",
                self.dose_number, self.total_doses
            )));
        }
        Ok(())
    }
}

/// Catalogue ordonné de doses.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Catalog {
    pub vaccines: Vec<VaccineSchedule>,
}

impl Catalog {
    pub fn new(vaccines: Vec<VaccineSchedule>) -> Self {
        Self { vaccines }
    }

    pub fn find<'a>(&'a self, id: &VaccineId) -> Option<&'a VaccineSchedule> {
        self.vaccines.iter().find(|v| &v.vaccine_id == id)
    }

    pub fn get<'a>(&'a self, id: &VaccineId) -> Result<&'a VaccineSchedule, CalcError> {
        self.find(id)
            .ok_or_else(|| CalcError::UnknownVaccine(id.as_str().to_string()))
    }

    pub fn len(&self) -> usize {
        self.vaccines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vaccines.is_empty()
    }

    pub fn validate(&self) -> Result<(), CalcError> {
        let mut seen = HashSet::new();
        for v in &self.vaccines {
            v.validate()?;
            if !seen.insert(&v.vaccine_id) {
                return Err(CalcError::InvalidSchedule(format!(
                    "duplicate vaccine id: {}",
                    v.vaccine_id
                )));
            }
        }
        Ok(())
    }
}

/// Identifiant fort pour un enfant
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChildId(String);

impl ChildId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Enfant suivi
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    pub id: ChildId,
    pub name: String,
    pub birth_date: NaiveDate,
}

impl Child {
    pub fn new<N: Into<String>>(name: N, birth_date: NaiveDate) -> Self {
        Self {
            id: ChildId::random(),
            name: name.into(),
            birth_date,
        }
    }
}

/// Dose attendue (et éventuellement administrée).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoseRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vaccine_id: Option<VaccineId>,
    pub due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub administered_date: Option<NaiveDate>,
}

impl DoseRecord {
    pub fn pending(due_date: NaiveDate) -> Self {
        Self {
            vaccine_id: None,
            due_date,
            administered_date: None,
        }
    }

    pub fn administered(due_date: NaiveDate, on: NaiveDate) -> Self {
        Self {
            vaccine_id: None,
            due_date,
            administered_date: Some(on),
        }
    }

    pub fn is_administered(&self) -> bool {
        self.administered_date.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoseStatus {
    Administered,
    Upcoming,
    Overdue,
    Missed,
}

impl DoseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DoseStatus::Administered => "administered",
            DoseStatus::Upcoming => "upcoming",
            DoseStatus::Overdue => "overdue",
            DoseStatus::Missed => "missed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_defaults_to_open_bounds() {
        let v = VaccineSchedule::new("bcg", "BCG", 0);
        assert!(v.window_contains(0));
        assert!(v.window_contains(10_000));
        assert!(!v.window_contains(-1));
    }

    #[test]
    fn validate_rejects_inverted_window() {
        let v = VaccineSchedule::new("opv-1", "OPV 1", 42).with_window(Some(50), None);
        assert!(matches!(v.validate(), Err(CalcError::InvalidSchedule(_))));

        let v = VaccineSchedule::new("opv-1", "OPV 1", 42).with_window(None, Some(30));
        assert!(v.validate().is_err());

        let v = VaccineSchedule::new("opv-1", "OPV 1", 42).with_window(Some(42), Some(42));
        assert!(v.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_dose_numbers() {
        let v = VaccineSchedule::new("penta-4", "Penta 4", 98).with_dose(4, 3);
        assert!(v.validate().is_err());
        let v = VaccineSchedule::new("penta-0", "Penta 0", 98).with_dose(0, 3);
        assert!(v.validate().is_err());
    }

    #[test]
    fn catalog_rejects_duplicate_ids() {
        let catalog = Catalog::new(vec![
            VaccineSchedule::new("bcg", "BCG", 0),
            VaccineSchedule::new("bcg", "BCG again", 0),
        ]);
        assert!(catalog.validate().is_err());
        assert!(matches!(
            catalog.get(&VaccineId::new("nope")),
            Err(CalcError::UnknownVaccine(id)) if id == "nope"
        ));
    }

    #[test]
    fn schedule_json_omits_absent_bounds() {
        let v = VaccineSchedule::new("mr-1", "Measles-Rubella 1", 270).with_window(Some(270), None);
        let json = serde_json::to_string(&v).unwrap();
        assert!(json.contains("\"min_age_days\":270"));
        assert!(!json.contains("max_age_days"));

        let back: VaccineSchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
