//! Framework-neutral WASM <-> JavaScript bridge for the vitals pipeline.

use serde::Deserialize;
use serde_wasm_bindgen::{from_value, to_value};
use vitals_core::{
    default_months_window, derive_report, DashboardConfig, DashboardState, PatientRecord,
};
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
struct JsDashboardConfig {
    #[serde(default)]
    default_patient_name: Option<String>,
}

impl From<JsDashboardConfig> for DashboardConfig {
    fn from(cfg: JsDashboardConfig) -> Self {
        let mut base = DashboardConfig::default();
        if let Some(name) = cfg.default_patient_name {
            base.default_patient_name = name;
        }
        base
    }
}

/// Derive the full vitals report (series, averages, statuses, stat cards)
/// for one patient record handed over as JSON.
#[wasm_bindgen]
pub fn derive_vitals_report(patient: JsValue) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let value = from_value::<serde_json::Value>(patient)
        .map_err(|err| JsValue::from_str(&format!("unreadable patient JSON: {err}")))?;

    let record: PatientRecord = serde_json::from_value(value)
        .map_err(|err| JsValue::from_str(&format!("malformed patient record: {err}")))?;

    let window = default_months_window();
    let report = derive_report(Some(&record), &window);

    to_value(&report).map_err(|err| JsValue::from_str(&format!("unserializable report: {err}")))
}

/// Apply the default-selection rule to a fetched patient list and return the
/// name that would be selected, or `null` for an empty list.
#[wasm_bindgen]
pub fn pick_default_patient(patients: JsValue, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let value = from_value::<serde_json::Value>(patients)
        .map_err(|err| JsValue::from_str(&format!("unreadable patient list JSON: {err}")))?;

    let records: Vec<PatientRecord> = serde_json::from_value(value)
        .map_err(|err| JsValue::from_str(&format!("malformed patient list: {err}")))?;

    let cfg = match config {
        Some(js_cfg) => {
            let cfg: JsDashboardConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("unreadable config: {err}")))?;
            DashboardConfig::from(cfg)
        }
        None => DashboardConfig::default(),
    };

    let mut state = DashboardState::new(cfg);
    state.apply_fetched(records);
    let selected = state.selected_patient().map(|p| p.name.clone());

    to_value(&selected).map_err(|err| JsValue::from_str(&format!("unserializable name: {err}")))
}
