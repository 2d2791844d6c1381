use serde::{Deserialize, Serialize};

pub const DEFAULT_GRACE_DAYS: u32 = 7;
pub const DEFAULT_MISSED_AFTER_DAYS: u32 = 28;

/// Paramètres des indicateurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsOptions {
    /// Retard toléré (jours) pour qu'une dose reste "à temps".
    pub grace_days: u32,
    /// Au-delà de ce retard (jours), une dose non faite est "manquée".
    pub missed_after_days: u32,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            grace_days: DEFAULT_GRACE_DAYS,
            missed_after_days: DEFAULT_MISSED_AFTER_DAYS,
        }
    }
}
