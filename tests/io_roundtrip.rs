#![forbid(unsafe_code)]
use chrono::NaiveDate;
use immunitrack::io::{self, DueEntry};
use immunitrack::{kepi_catalog, JsonStorage, Storage, VaccineId};
use std::fs;
use tempfile::tempdir;

const CATALOG_CSV: &str = "\
vaccine_id,vaccine_name,recommended_age_days,min_age_days,max_age_days,interval_days,dose_number,total_doses,is_birth_dose,is_booster
bcg,BCG,0,,,,1,1,yes,no
rota-1,Rotavirus 1,42,42,105,28,1,2,,
mr-2,Measles-Rubella 2,540,540,,,2,2,false,true
";

#[test]
fn import_catalog_with_optional_cells() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalog.csv");
    fs::write(&path, CATALOG_CSV).unwrap();

    let catalog = io::import_catalog_csv(&path).unwrap();
    assert_eq!(catalog.len(), 3);

    let bcg = catalog.get(&VaccineId::new("bcg")).unwrap();
    assert!(bcg.is_birth_dose);
    assert_eq!(bcg.min_age_days, None);

    let rota = catalog.get(&VaccineId::new("rota-1")).unwrap();
    assert_eq!((rota.min_age_days, rota.max_age_days), (Some(42), Some(105)));
    assert_eq!(rota.interval_days, Some(28));
    assert!(!rota.is_booster);

    assert!(catalog.get(&VaccineId::new("mr-2")).unwrap().is_booster);
}

#[test]
fn import_rejects_inverted_window() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalog.csv");
    let bad = CATALOG_CSV.replace("42,42,105", "42,60,105");
    fs::write(&path, bad).unwrap();

    let err = io::import_catalog_csv(&path).unwrap_err();
    assert!(format!("{err:#}").contains("catalog row 3"));
}

#[test]
fn import_doses_reports_bad_dates() {
    let dir = tempdir().unwrap();
    let ok = dir.path().join("doses.csv");
    fs::write(
        &ok,
        "vaccine_id,due_date,administered_date\nbcg,2024-01-01,2024-01-02\nopv-1,2024-02-12,\n",
    )
    .unwrap();
    let doses = io::import_doses_csv(&ok).unwrap();
    assert_eq!(doses.len(), 2);
    assert_eq!(doses[1].vaccine_id, Some(VaccineId::new("opv-1")));
    assert!(doses[1].administered_date.is_none());

    let bad = dir.path().join("bad.csv");
    fs::write(&bad, "vaccine_id,due_date,administered_date\nbcg,12/01/2024,\n").unwrap();
    let err = io::import_doses_csv(&bad).unwrap_err();
    assert!(format!("{err:#}").contains("invalid date"));
}

#[test]
fn export_due_list_csv() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("due.csv");
    let catalog = kepi_catalog();
    let penta = catalog.get(&VaccineId::new("penta-1")).unwrap();
    let entries = [DueEntry {
        vaccine: penta,
        due_date: NaiveDate::from_ymd_opt(2024, 2, 12).unwrap(),
    }];

    io::export_due_csv(&path, &entries).unwrap();
    let out = fs::read_to_string(&path).unwrap();
    assert_eq!(
        out,
        "vaccine_id,vaccine_name,due_date,age_days,category\npenta-1,DPT-HepB-Hib 1,2024-02-12,42,6 Weeks\n"
    );
}

#[test]
fn catalog_json_export_loads_back_through_storage() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    let catalog = kepi_catalog();
    io::export_catalog_json(&path, &catalog).unwrap();

    let storage = JsonStorage::open(&path).unwrap();
    assert_eq!(storage.load().unwrap(), catalog);
}
