#![forbid(unsafe_code)]
use chrono::NaiveDate;
use immunitrack::{
    completion_rate, coverage_rate, dropout_rate, summarize_doses, timeliness_rate, wastage_rate,
    DoseRecord, StatsOptions,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn rates_never_return_nan() {
    for rate in [
        coverage_rate(0, 0),
        completion_rate(0, 0),
        dropout_rate(0, 0),
        wastage_rate(0, 0, 0),
        timeliness_rate(&[], 0),
    ] {
        assert_eq!(rate, 0.0);
    }
}

#[test]
fn completion_of_half_the_doses() {
    assert_eq!(completion_rate(10, 5), 50.0);
}

#[test]
fn rates_stay_within_percent_bounds() {
    for (a, b) in [(0u64, 5u64), (5, 0), (3, 7), (7, 3), (100, 1)] {
        for rate in [coverage_rate(a, b), completion_rate(a, b), dropout_rate(a, b)] {
            assert!((0.0..=100.0).contains(&rate), "{a} {b} -> {rate}");
        }
    }
}

#[test]
fn summary_matches_timeliness_rate() {
    let records = vec![
        DoseRecord::administered(d(2024, 2, 12), d(2024, 2, 12)),
        DoseRecord::administered(d(2024, 3, 11), d(2024, 4, 1)),
        DoseRecord::administered(d(2024, 4, 8), d(2024, 4, 10)),
        DoseRecord::pending(d(2024, 9, 27)),
    ];
    let opts = StatsOptions::default();
    let summary = summarize_doses(&records, d(2024, 6, 1), &opts);

    assert_eq!(summary.administered, 3);
    assert_eq!(summary.upcoming, 1);
    assert!(!summary.has_gaps());
    assert_eq!(summary.completion_rate(), 100.0);
    assert_eq!(summary.timeliness_rate(), timeliness_rate(&records, opts.grace_days));
}
