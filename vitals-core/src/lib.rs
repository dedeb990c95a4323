//! Core data model and derivation pipeline for the patient vitals dashboard.
//!
//! Everything here is pure: the raw patient record comes in from the API
//! layer, and display-ready shapes (monthly blood-pressure series, averages,
//! comparison statuses, stat cards) come out. No I/O, no clocks.

use std::str::FromStr;

use chrono::Month;
use serde::{Deserialize, Serialize};

/// Dashboard-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardConfig {
    /// Patient preselected after a fetch, when present in the list.
    pub default_patient_name: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_patient_name: "Jessica Taylor".to_string(),
        }
    }
}

/// One patient as returned by the upstream list endpoint.
///
/// `name` doubles as the selection key. The upstream payload carries no id
/// field, so two patients with the same name would collide; the shape is
/// fixed externally and kept as-is here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientRecord {
    pub name: String,
    pub gender: String,
    pub age: u32,
    pub phone_number: String,
    pub date_of_birth: String,
    pub insurance_type: String,
    pub profile_picture: String,
    #[serde(default)]
    pub emergency_contact: Option<String>,
    #[serde(default)]
    pub diagnosis_history: Vec<DiagnosisEntry>,
}

/// A single monthly diagnosis record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosisEntry {
    pub month: String,
    #[serde(deserialize_with = "de_year")]
    pub year: i32,
    pub blood_pressure: BloodPressure,
    pub respiratory_rate: Reading,
    pub temperature: Reading,
    pub heart_rate: Reading,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BloodPressure {
    pub systolic: Reading,
    pub diastolic: Reading,
}

/// The upstream wraps every vital in a `{"value": n}` object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reading {
    pub value: f64,
}

/// The upstream is inconsistent about `year`: sometimes a JSON number,
/// sometimes a numeric string. Accept both.
fn de_year<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum YearRepr {
        Num(i32),
        Text(String),
    }

    match YearRepr::deserialize(deserializer)? {
        YearRepr::Num(year) => Ok(year),
        YearRepr::Text(text) => text
            .trim()
            .parse::<i32>()
            .map_err(serde::de::Error::custom),
    }
}

/// One fixed calendar slot of the chart window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthSlot {
    pub month: String,
    pub year: i32,
}

impl MonthSlot {
    pub fn new(month: &str, year: i32) -> Self {
        Self {
            month: month.to_string(),
            year,
        }
    }

    /// Abbreviated chart label: three-letter month plus two-digit year.
    pub fn label(&self) -> String {
        let prefix: String = self.month.chars().take(3).collect();
        format!("{} {:02}", prefix, self.year.rem_euclid(100))
    }
}

/// The six-slot window the dashboard charts, October 2023 through March 2024.
/// Fixed order, independent of what the patient data actually contains.
pub fn default_months_window() -> Vec<MonthSlot> {
    vec![
        MonthSlot::new("October", 2023),
        MonthSlot::new("November", 2023),
        MonthSlot::new("December", 2023),
        MonthSlot::new("January", 2024),
        MonthSlot::new("February", 2024),
        MonthSlot::new("March", 2024),
    ]
}

/// One point of the monthly blood-pressure series. A slot with no matching
/// diagnosis entry keeps its label but carries no values: a gap, never zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesPoint {
    pub label: String,
    pub systolic: Option<f64>,
    pub diastolic: Option<f64>,
}

impl SeriesPoint {
    pub fn is_gap(&self) -> bool {
        self.systolic.is_none() || self.diastolic.is_none()
    }
}

/// Rounded systolic/diastolic means over the filled slots of a series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BpAverages {
    pub systolic: i64,
    pub diastolic: i64,
}

/// How the latest reading compares against the window average.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BpStatus {
    Higher,
    Lower,
    Average,
}

/// Per-component status; `None` when there is no data to compare.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BpClassification {
    pub systolic: Option<BpStatus>,
    pub diastolic: Option<BpStatus>,
}

/// One latest-reading card (respiratory rate, temperature, heart rate).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatCard {
    pub label: String,
    pub value: String,
    pub color: String,
    pub sign: String,
}

struct StatCardDef {
    label: &'static str,
    unit: &'static str,
    spaced_unit: bool,
    color: &'static str,
    sign: &'static str,
}

/// Card table, including the static qualitative signs. The signs are display
/// configuration, not derived from the reading; there is no threshold logic
/// behind them upstream.
const STAT_CARD_DEFS: [StatCardDef; 3] = [
    StatCardDef {
        label: "Respiratory Rate",
        unit: "bpm",
        spaced_unit: true,
        color: "#E0F3FA",
        sign: "Normal",
    },
    StatCardDef {
        label: "Temperature",
        unit: "°F",
        spaced_unit: false,
        color: "#FFE6E9",
        sign: "Normal",
    },
    StatCardDef {
        label: "Heart Rate",
        unit: "bpm",
        spaced_unit: true,
        color: "#FFE6F1",
        sign: "Lower than Average",
    },
];

/// Everything the presentation shell needs for one selected patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VitalsReport {
    pub series: Vec<SeriesPoint>,
    pub averages: Option<BpAverages>,
    pub classification: BpClassification,
    pub stat_cards: Vec<StatCard>,
    pub latest_systolic: Option<f64>,
    pub latest_diastolic: Option<f64>,
}

impl VitalsReport {
    /// All-gap report for the no-selection case.
    pub fn empty(window: &[MonthSlot]) -> Self {
        Self {
            series: window
                .iter()
                .map(|slot| SeriesPoint {
                    label: slot.label(),
                    systolic: None,
                    diastolic: None,
                })
                .collect(),
            averages: None,
            classification: BpClassification::default(),
            stat_cards: Vec::new(),
            latest_systolic: None,
            latest_diastolic: None,
        }
    }
}

/// Build the fixed monthly blood-pressure series for one patient.
///
/// Matching is exact: month by name equality (no case or locale
/// normalization), year numerically. Slots without a match become gaps.
pub fn build_monthly_series(patient: &PatientRecord, window: &[MonthSlot]) -> Vec<SeriesPoint> {
    window
        .iter()
        .map(|slot| {
            let entry = patient
                .diagnosis_history
                .iter()
                .find(|d| d.month == slot.month && d.year == slot.year);
            match entry {
                Some(entry) => SeriesPoint {
                    label: slot.label(),
                    systolic: Some(entry.blood_pressure.systolic.value),
                    diastolic: Some(entry.blood_pressure.diastolic.value),
                },
                None => SeriesPoint {
                    label: slot.label(),
                    systolic: None,
                    diastolic: None,
                },
            }
        })
        .collect()
}

/// Arithmetic mean of the filled slots, or `None` when every slot is a gap.
///
/// Rounds with `f64::round`, i.e. half away from zero: a .5 mean rounds up
/// for the positive values seen here ([121, 130] -> 126).
pub fn compute_averages(series: &[SeriesPoint]) -> Option<BpAverages> {
    let filled: Vec<(f64, f64)> = series
        .iter()
        .filter_map(|point| match (point.systolic, point.diastolic) {
            (Some(sys), Some(dia)) => Some((sys, dia)),
            _ => None,
        })
        .collect();

    if filled.is_empty() {
        return None;
    }

    let count = filled.len() as f64;
    let systolic: f64 = filled.iter().map(|(sys, _)| sys).sum::<f64>() / count;
    let diastolic: f64 = filled.iter().map(|(_, dia)| dia).sum::<f64>() / count;

    Some(BpAverages {
        systolic: systolic.round() as i64,
        diastolic: diastolic.round() as i64,
    })
}

/// Compare the latest reading against the averages. Defined only when both
/// exist; a tie is `Average`, not `Higher`.
pub fn classify_latest(
    latest: Option<&DiagnosisEntry>,
    averages: Option<&BpAverages>,
) -> BpClassification {
    let (Some(latest), Some(averages)) = (latest, averages) else {
        return BpClassification::default();
    };

    BpClassification {
        systolic: Some(status_for(
            latest.blood_pressure.systolic.value,
            averages.systolic,
        )),
        diastolic: Some(status_for(
            latest.blood_pressure.diastolic.value,
            averages.diastolic,
        )),
    }
}

fn status_for(latest: f64, average: i64) -> BpStatus {
    let average = average as f64;
    if latest > average {
        BpStatus::Higher
    } else if latest < average {
        BpStatus::Lower
    } else {
        BpStatus::Average
    }
}

/// Most recent diagnosis entry, ordered by (year, month-of-year) rather than
/// by trusting the upstream to keep the history most-recent-first. Month
/// names that chrono cannot parse sort below every real month.
pub fn latest_entry(patient: &PatientRecord) -> Option<&DiagnosisEntry> {
    patient
        .diagnosis_history
        .iter()
        .max_by_key(|entry| (entry.year, month_ordinal(&entry.month)))
}

fn month_ordinal(name: &str) -> u32 {
    Month::from_str(name)
        .map(|month| month.number_from_month())
        .unwrap_or(0)
}

/// Latest-reading stat cards: three when a latest entry exists, none
/// otherwise. Values are formatted with their display unit; colors and signs
/// come from the card table.
pub fn build_stat_cards(latest: Option<&DiagnosisEntry>) -> Vec<StatCard> {
    let Some(latest) = latest else {
        return Vec::new();
    };

    let readings = [
        &latest.respiratory_rate,
        &latest.temperature,
        &latest.heart_rate,
    ];

    STAT_CARD_DEFS
        .iter()
        .zip(readings)
        .map(|(def, reading)| {
            let number = format_numeric(reading.value);
            let value = if def.spaced_unit {
                format!("{number} {}", def.unit)
            } else {
                format!("{number}{}", def.unit)
            };
            StatCard {
                label: def.label.to_string(),
                value,
                color: def.color.to_string(),
                sign: def.sign.to_string(),
            }
        })
        .collect()
}

/// Print whole readings bare and keep a single decimal when it carries
/// information (98.6 stays 98.6, 78.0 prints as 78).
pub fn format_numeric(value: f64) -> String {
    if (value.fract() - 0.0).abs() < f64::EPSILON {
        format!("{value:.0}")
    } else if (value * 10.0).fract().abs() < f64::EPSILON {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Run the whole pipeline for an optional selection.
pub fn derive_report(patient: Option<&PatientRecord>, window: &[MonthSlot]) -> VitalsReport {
    let Some(patient) = patient else {
        return VitalsReport::empty(window);
    };

    let series = build_monthly_series(patient, window);
    let averages = compute_averages(&series);
    let latest = latest_entry(patient);
    let classification = classify_latest(latest, averages.as_ref());
    let stat_cards = build_stat_cards(latest);

    VitalsReport {
        series,
        averages,
        classification,
        stat_cards,
        latest_systolic: latest.map(|entry| entry.blood_pressure.systolic.value),
        latest_diastolic: latest.map(|entry| entry.blood_pressure.diastolic.value),
    }
}

/// Fetched patient list plus the current selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    config: DashboardConfig,
    patients: Vec<PatientRecord>,
    selected: Option<usize>,
}

impl DashboardState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            patients: Vec::new(),
            selected: None,
        }
    }

    /// Replace the list wholesale and apply the default-selection rule:
    /// the configured default patient when present, else the first record,
    /// else no selection.
    pub fn apply_fetched(&mut self, patients: Vec<PatientRecord>) {
        self.patients = patients;
        self.selected = self
            .patients
            .iter()
            .position(|p| p.name == self.config.default_patient_name)
            .or(if self.patients.is_empty() { None } else { Some(0) });
    }

    /// Select a patient by name. Unknown names are ignored: the current
    /// selection stays untouched and no error is signalled.
    pub fn select_patient(&mut self, name: &str) {
        if let Some(index) = self.patients.iter().position(|p| p.name == name) {
            self.selected = Some(index);
        }
    }

    pub fn selected_patient(&self) -> Option<&PatientRecord> {
        self.selected.and_then(|index| self.patients.get(index))
    }

    pub fn patients(&self) -> &[PatientRecord] {
        &self.patients
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }
}

/// Contact panel projection of a patient record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactInfo {
    pub profile_picture: String,
    pub name: String,
    pub gender: String,
    pub phone_number: String,
    pub date_of_birth: String,
    pub insurance_type: String,
    pub emergency_contact: String,
}

impl ContactInfo {
    pub fn for_patient(patient: &PatientRecord) -> Self {
        Self {
            profile_picture: patient.profile_picture.clone(),
            name: patient.name.clone(),
            gender: patient.gender.clone(),
            phone_number: patient.phone_number.clone(),
            date_of_birth: patient.date_of_birth.clone(),
            insurance_type: patient.insurance_type.clone(),
            emergency_contact: patient
                .emergency_contact
                .clone()
                .unwrap_or_else(|| "N/A".to_string()),
        }
    }
}
