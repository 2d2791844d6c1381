use crate::dates;
use crate::model::DoseRecord;

/// `numerator / denominator * 100`, 0 si le dénominateur est nul.
fn percentage(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    clamp_percentage(numerator / denominator * 100.0)
}

fn clamp_percentage(value: f64) -> f64 {
    if (0.0..=100.0).contains(&value) {
        return value;
    }
    log_event!(warn, "rate {value:.2} outside [0, 100], clamped");
    value.clamp(0.0, 100.0)
}

/// Part de la population cible immunisée.
pub fn coverage_rate(target_population: u64, immunized_population: u64) -> f64 {
    percentage(immunized_population as f64, target_population as f64)
}

/// Part des doses prévues effectivement administrées.
pub fn completion_rate(total_doses: u64, administered_doses: u64) -> f64 {
    percentage(administered_doses as f64, total_doses as f64)
}

/// Part des doses administrées au plus `grace_days` jours après la date
/// prévue. Les doses non administrées ne comptent pas.
pub fn timeliness_rate(records: &[DoseRecord], grace_days: u32) -> f64 {
    let mut administered = 0u64;
    let mut timely = 0u64;
    for rec in records {
        let Some(on) = rec.administered_date else {
            continue;
        };
        administered += 1;
        if dates::days_between(rec.due_date, on) <= i64::from(grace_days) {
            timely += 1;
        }
    }
    percentage(timely as f64, administered as f64)
}

/// Part des enfants ayant commencé une série sans la terminer.
pub fn dropout_rate(started: u64, completed: u64) -> f64 {
    percentage(started as f64 - completed as f64, started as f64)
}

/// `wasted / (received - administered) * 100` ; 0 si ce dénominateur est <= 0.
pub fn wastage_rate(received: u64, administered: u64, wasted: u64) -> f64 {
    let unaccounted = received as f64 - administered as f64;
    if unaccounted <= 0.0 {
        return 0.0;
    }
    percentage(wasted as f64, unaccounted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn zero_denominators_give_zero() {
        assert_eq!(coverage_rate(0, 0), 0.0);
        assert_eq!(completion_rate(0, 3), 0.0);
        assert_eq!(dropout_rate(0, 0), 0.0);
        assert_eq!(wastage_rate(10, 10, 2), 0.0);
        assert_eq!(wastage_rate(5, 10, 2), 0.0);
        assert_eq!(timeliness_rate(&[], 7), 0.0);
    }

    #[test]
    fn plain_rates() {
        assert_eq!(completion_rate(10, 5), 50.0);
        assert_eq!(coverage_rate(200, 150), 75.0);
        assert_eq!(dropout_rate(80, 60), 25.0);
        assert_eq!(wastage_rate(100, 80, 5), 25.0);
    }

    #[test]
    fn out_of_range_inputs_are_clamped() {
        assert_eq!(completion_rate(5, 10), 100.0);
        assert_eq!(dropout_rate(10, 12), 0.0);
        assert_eq!(wastage_rate(100, 90, 20), 100.0);
    }

    #[test]
    fn timeliness_uses_grace_period() {
        let due = d(2024, 2, 12);
        let records = vec![
            DoseRecord::administered(due, d(2024, 2, 10)),
            DoseRecord::administered(due, d(2024, 2, 19)),
            DoseRecord::administered(due, d(2024, 2, 20)),
            DoseRecord::pending(due),
        ];
        assert_eq!(timeliness_rate(&records, 7), 2.0 / 3.0 * 100.0);
        assert_eq!(timeliness_rate(&records, 8), 100.0);
    }
}
