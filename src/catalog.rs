//! Calendrier de routine KEPI intégré (utilisé quand aucun catalogue n'est fourni).

use crate::model::{Catalog, VaccineSchedule};

const WEEK: u32 = 7;

fn dose(id: &str, name: &str, age_days: u32, number: u32, total: u32) -> VaccineSchedule {
    VaccineSchedule::new(id, name, age_days)
        .with_window(Some(age_days), None)
        .with_dose(number, total)
}

/// Calendrier de routine du programme élargi de vaccination du Kenya.
pub fn kepi_catalog() -> Catalog {
    let mut vaccines = vec![
        VaccineSchedule::new("bcg", "BCG", 0),
        VaccineSchedule::new("opv-0", "Oral Polio (birth dose)", 0)
            .with_window(None, Some(2 * WEEK))
            .with_dose(1, 4),
    ];

    for (n, age) in [(1, 6 * WEEK), (2, 10 * WEEK), (3, 14 * WEEK)] {
        vaccines.push(
            dose(&format!("opv-{n}"), &format!("Oral Polio {n}"), age, n + 1, 4)
                .with_interval(4 * WEEK),
        );
        vaccines.push(
            dose(&format!("penta-{n}"), &format!("DPT-HepB-Hib {n}"), age, n, 3)
                .with_interval(4 * WEEK),
        );
        vaccines.push(
            dose(&format!("pcv-{n}"), &format!("Pneumococcal {n}"), age, n, 3)
                .with_interval(4 * WEEK),
        );
        if n < 3 {
            // fenêtre stricte : 15 semaines pour la 1re dose, 8 mois pour la 2e
            let max = if n == 1 { 15 * WEEK } else { 245 };
            vaccines.push(
                dose(&format!("rota-{n}"), &format!("Rotavirus {n}"), age, n, 2)
                    .with_window(Some(age), Some(max))
                    .with_interval(4 * WEEK),
            );
        }
    }

    vaccines.extend([
        dose("ipv", "Inactivated Polio", 14 * WEEK, 1, 1),
        dose("vit-a", "Vitamin A", 180, 1, 1).with_window(Some(180), Some(364)),
        dose("mr-1", "Measles-Rubella 1", 270, 1, 2),
        dose("yf", "Yellow Fever", 270, 1, 1),
        dose("mr-2", "Measles-Rubella 2", 540, 2, 2),
        dose("hpv", "HPV", 3650, 1, 1).with_window(Some(3650), Some(5475)),
    ]);

    Catalog::new(vaccines)
}
