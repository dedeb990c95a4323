use std::fs;

use vitals_api::decode_patients;
use vitals_core::{
    default_months_window, derive_report, BpStatus, DashboardConfig, DashboardState,
};

fn fixture_path(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn fixture_decodes_and_derives_end_to_end() {
    let body = fs::read_to_string(fixture_path("patients.json")).expect("missing fixture");
    let patients = decode_patients(&body).expect("fixture should decode");

    assert_eq!(patients.len(), 2);
    assert_eq!(patients[0].name, "Jessica Taylor");
    // The upstream sometimes sends year as a string.
    assert_eq!(patients[0].diagnosis_history[1].year, 2024);
    assert_eq!(patients[1].emergency_contact, None);
    assert!(patients[1].diagnosis_history.is_empty());

    let mut state = DashboardState::new(DashboardConfig::default());
    state.apply_fetched(patients);
    assert_eq!(state.selected_patient().unwrap().name, "Jessica Taylor");

    let window = default_months_window();
    let report = derive_report(state.selected_patient(), &window);

    // Dec 23, Feb 24 and Mar 24 are filled; the other three slots are gaps.
    let filled: Vec<&str> = report
        .series
        .iter()
        .filter(|point| !point.is_gap())
        .map(|point| point.label.as_str())
        .collect();
    assert_eq!(filled, vec!["Dec 23", "Feb 24", "Mar 24"]);

    // mean(160, 119, 130) = 136.33 -> 136; mean(78, 72, 82) = 77.33 -> 77
    let averages = report.averages.unwrap();
    assert_eq!(averages.systolic, 136);
    assert_eq!(averages.diastolic, 77);

    // Latest is March 2024: 160/78 against 136/77.
    assert_eq!(report.latest_systolic, Some(160.0));
    assert_eq!(report.classification.systolic, Some(BpStatus::Higher));
    assert_eq!(report.classification.diastolic, Some(BpStatus::Higher));

    assert_eq!(report.stat_cards.len(), 3);
    assert_eq!(report.stat_cards[1].value, "98.6°F");
}

#[test]
fn patient_with_empty_history_derives_all_gaps() {
    let body = fs::read_to_string(fixture_path("patients.json")).expect("missing fixture");
    let patients = decode_patients(&body).expect("fixture should decode");

    let mut state = DashboardState::new(DashboardConfig::default());
    state.apply_fetched(patients);
    state.select_patient("Ryan Johnson");

    let window = default_months_window();
    let report = derive_report(state.selected_patient(), &window);

    assert!(report.series.iter().all(|point| point.is_gap()));
    assert_eq!(report.averages, None);
    assert_eq!(report.classification.systolic, None);
    assert!(report.stat_cards.is_empty());
}
