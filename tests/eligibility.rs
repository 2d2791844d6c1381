#![forbid(unsafe_code)]
use chrono::NaiveDate;
use immunitrack::{
    age_appropriate_vaccines, dates, is_vaccine_due, is_vaccine_due_now, kepi_catalog,
    upcoming_vaccines, CalcError, Catalog, VaccineId, VaccineSchedule,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn not_due_before_min_age() {
    let v = VaccineSchedule::new("penta-1", "DPT-HepB-Hib 1", 42).with_window(Some(42), None);
    assert!(!is_vaccine_due(&v, d(2024, 1, 1), d(2024, 1, 15)).unwrap());
}

#[test]
fn due_exactly_when_in_window_and_recommended_age_reached() {
    let birth = d(2024, 1, 1);
    let v = VaccineSchedule::new("rota-2", "Rotavirus 2", 70).with_window(Some(60), Some(245));
    for age in 0..300u32 {
        let today = dates::add_days(birth, age).unwrap();
        let expected = (60..=245).contains(&age) && age >= 70;
        assert_eq!(
            is_vaccine_due(&v, birth, today).unwrap(),
            expected,
            "age = {age}"
        );
    }
}

#[test]
fn due_without_bounds_never_expires() {
    let v = VaccineSchedule::new("bcg", "BCG", 0);
    assert!(is_vaccine_due(&v, d(2020, 1, 1), d(2024, 1, 1)).unwrap());
    assert!(!is_vaccine_due(&v, d(2024, 1, 2), d(2024, 1, 1)).unwrap());
}

#[test]
fn birth_dose_is_due_on_the_day_of_birth() {
    let v = VaccineSchedule::new("bcg", "BCG", 0);
    assert!(is_vaccine_due_now(&v, dates::today_utc()).unwrap());
}

#[test]
fn overflowing_window_is_reported() {
    let v = VaccineSchedule::new("hpv", "HPV", 3650).with_window(Some(3650), None);
    let err = is_vaccine_due(&v, NaiveDate::MAX, NaiveDate::MAX).unwrap_err();
    assert!(matches!(err, CalcError::DateOverflow));
}

#[test]
fn age_appropriate_filters_and_keeps_catalog_order() {
    let catalog = kepi_catalog();
    let birth = d(2024, 1, 1);
    let today = dates::add_days(birth, 50).unwrap();
    let done = [VaccineId::new("bcg"), VaccineId::new("penta-1")];

    let ids: Vec<&str> = age_appropriate_vaccines(&catalog, birth, &done, today)
        .iter()
        .map(|v| v.vaccine_id.as_str())
        .collect();
    assert_eq!(ids, vec!["opv-1", "pcv-1", "rota-1"]);
}

#[test]
fn age_appropriate_is_empty_before_birth() {
    let catalog = kepi_catalog();
    let out = age_appropriate_vaccines(&catalog, d(2024, 1, 10), &[], d(2024, 1, 1));
    assert!(out.is_empty());
}

#[test]
fn upcoming_sorted_by_due_date() {
    let catalog = Catalog::new(vec![
        VaccineSchedule::new("mr-1", "Measles-Rubella 1", 270),
        VaccineSchedule::new("opv-1", "Oral Polio 1", 42),
        VaccineSchedule::new("opv-2", "Oral Polio 2", 70),
    ]);
    let birth = d(2024, 1, 1);
    let today = dates::add_days(birth, 42).unwrap();

    let out = upcoming_vaccines(&catalog, birth, &[], today, 240).unwrap();
    let ids: Vec<&str> = out.iter().map(|u| u.vaccine.vaccine_id.as_str()).collect();
    // opv-1 est dû aujourd'hui : pas "à venir"
    assert_eq!(ids, vec!["opv-2", "mr-1"]);
    assert_eq!(out[0].due_date, dates::add_days(birth, 70).unwrap());
}
