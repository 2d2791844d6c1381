use crate::dates;
use crate::eligibility;
use crate::model::{Child, VaccineSchedule};
use anyhow::{bail, Result};
use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LEAD_DAYS: [u32; 3] = [7, 3, 1];

/// Délais de rappel (jours avant la date prévue), appliqués dans l'ordre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderOptions {
    pub lead_days: Vec<u32>,
}

impl Default for ReminderOptions {
    fn default() -> Self {
        Self {
            lead_days: DEFAULT_LEAD_DAYS.to_vec(),
        }
    }
}

/// Dates d'envoi `due - lead` pour chaque délai, en ne gardant que celles
/// strictement postérieures à `now`. Ordre des délais conservé, sans dédoublonnage.
///
/// Un délai qui sort de la plage des dates représentables tombe forcément
/// avant `now` : il est ignoré.
pub fn generate_reminder_schedule(
    due: DateTime<Utc>,
    lead_days: &[u32],
    now: DateTime<Utc>,
) -> Vec<DateTime<Utc>> {
    lead_days
        .iter()
        .filter_map(|lead| due.checked_sub_days(Days::new(u64::from(*lead))))
        .filter(|at| *at > now)
        .collect()
}

/// Représente un rappel généré pour un enfant et une dose.
#[derive(Debug, Clone)]
pub struct Reminder {
    pub child_name: String,
    pub vaccine_id: String,
    pub due_date: NaiveDate,
    pub send_at: DateTime<Utc>,
    pub content: String,
}

/// Permet de customiser le rendu du message (texte, SMS, etc.).
pub trait ReminderRenderer {
    fn render(
        &self,
        child: &Child,
        vaccine: &VaccineSchedule,
        due_date: NaiveDate,
        send_at: DateTime<Utc>,
    ) -> String;
}

/// Gabarit texte simple destiné à un futur SMS.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextReminder;

impl ReminderRenderer for TextReminder {
    fn render(
        &self,
        child: &Child,
        vaccine: &VaccineSchedule,
        due_date: NaiveDate,
        send_at: DateTime<Utc>,
    ) -> String {
        let days_left = dates::days_between(send_at.date_naive(), due_date);
        format!(
            "Reminder: {name} is due for {vaccine} (dose {dose} of {total}, {age}) on {due}.\nThat is in {days_left} day(s). Please visit your nearest health facility.\n",
            name = child.name,
            vaccine = vaccine.vaccine_name,
            dose = vaccine.dose_number,
            total = vaccine.total_doses,
            age = dates::describe_age(vaccine.recommended_age_days),
            due = due_date.format("%Y-%m-%d"),
        )
    }
}

/// Prépare les rappels restants pour une dose d'un enfant.
pub fn prepare_reminders(
    child: &Child,
    vaccine: &VaccineSchedule,
    opts: &ReminderOptions,
    now: DateTime<Utc>,
    renderer: &dyn ReminderRenderer,
) -> Result<Vec<Reminder>> {
    if opts.lead_days.is_empty() {
        bail!("at least one reminder lead time is required");
    }

    let due_date = eligibility::due_date(vaccine, child.birth_date)?;
    let due = dates::start_of_day_utc(due_date);

    let reminders = generate_reminder_schedule(due, &opts.lead_days, now)
        .into_iter()
        .map(|send_at| Reminder {
            child_name: child.name.clone(),
            vaccine_id: vaccine.vaccine_id.as_str().to_string(),
            due_date,
            send_at,
            content: renderer.render(child, vaccine, due_date, send_at),
        })
        .collect();
    Ok(reminders)
}
