//! Réglages optionnels (fichier JSON), surchargés par les options de la CLI.
//!
//! ```json
//! { "reminders": { "lead_days": [14, 7, 1] }, "stats": { "grace_days": 10 } }
//! ```
//! Toute section ou clé absente garde sa valeur par défaut.

use crate::notification::ReminderOptions;
use crate::stats::StatsOptions;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub reminders: ReminderOptions,
    pub stats: StatsOptions,
}

impl Settings {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let settings: Settings = serde_json::from_slice(&data)
            .with_context(|| format!("parsing settings {}", path.display()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Charge `path` s'il est fourni, sinon les valeurs par défaut.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.reminders.lead_days.is_empty() {
            bail!("reminders.lead_days cannot be empty");
        }
        Ok(())
    }
}
