//! Yew presentation shell for the patient vitals dashboard (WebAssembly).
//!
//! Rendering only: every derived shape comes from `vitals-core`. The host
//! page performs the one-shot patient fetch and hands the decoded JSON array
//! to `mount_patient_dashboard`; selection changes re-run the derivation
//! synchronously on each render.

pub mod chart;

#[cfg(target_arch = "wasm32")]
mod styles;

#[cfg(target_arch = "wasm32")]
mod wasm_ui {
    use crate::chart;
    use crate::styles;
    use serde_wasm_bindgen::from_value;
    use vitals_core::{
        default_months_window, derive_report, BpStatus, ContactInfo, DashboardConfig,
        DashboardState, PatientRecord, SeriesPoint, StatCard, VitalsReport,
    };
    use wasm_bindgen::prelude::*;
    use web_sys::{console, Document, Element, Window};
    use yew::prelude::*;

    const SYSTOLIC_COLOR: &str = "#E66FD2";
    const DIASTOLIC_COLOR: &str = "#8C6FE6";

    #[derive(Properties, PartialEq)]
    pub struct DashboardViewProps {
        pub patients: Vec<PatientRecord>,
    }

    #[function_component(DashboardView)]
    fn dashboard_view(props: &DashboardViewProps) -> Html {
        use_effect_with((), |_| {
            if let Some(window) = web_sys::window() {
                if let Some(document) = window.document() {
                    if let Err(err) = styles::ensure_styles(&document) {
                        console::error_1(&err);
                    }
                }
            }
            || ()
        });

        let state = use_state({
            let patients = props.patients.clone();
            move || {
                let mut state = DashboardState::new(DashboardConfig::default());
                state.apply_fetched(patients);
                state
            }
        });

        let on_select = {
            let state = state.clone();
            Callback::from(move |name: String| {
                let mut next = (*state).clone();
                next.select_patient(&name);
                state.set(next);
            })
        };

        let window = default_months_window();
        let report = derive_report(state.selected_patient(), &window);
        let selected_name = state.selected_patient().map(|p| p.name.clone());
        let contact = state.selected_patient().map(ContactInfo::for_patient);

        html! {
            <div class="dashboard-root">
                <div class="dashboard-box patient-box">
                    <div class="box-title">{"Patients"}</div>
                    <div class="patient-list">
                        {
                            for state.patients().iter().map(|patient| {
                                let selected = selected_name.as_deref() == Some(patient.name.as_str());
                                render_patient_row(patient, selected, on_select.clone())
                            })
                        }
                    </div>
                </div>
                <div class="dashboard-box diagnosis-box">
                    <div class="diagnosis-title">{"Diagnosis History"}</div>
                    <div class="chart-area">
                        <div class="bp-chart">
                            <div class="bp-chart-heading">{"Blood Pressure"}</div>
                            { render_bp_chart(&report.series) }
                        </div>
                        { render_averages_panel(&report) }
                    </div>
                    <div class="stat-cards">
                        { for report.stat_cards.iter().map(render_stat_card) }
                    </div>
                </div>
                <div class="dashboard-box contact-box">
                    { contact.map(|info| render_contact(&info)).unwrap_or_default() }
                </div>
            </div>
        }
    }

    fn render_patient_row(
        patient: &PatientRecord,
        selected: bool,
        on_select: Callback<String>,
    ) -> Html {
        let name = patient.name.clone();
        let onclick = Callback::from(move |_| on_select.emit(name.clone()));

        html! {
            <div
                class={classes!("patient-row", selected.then_some("is-selected"))}
                onclick={onclick}
            >
                <img
                    class="patient-avatar"
                    src={patient.profile_picture.clone()}
                    alt={patient.name.clone()}
                />
                <div class="patient-meta">
                    <div class="patient-name">{ patient.name.clone() }</div>
                    <div class="patient-demographics">
                        { format!("{}: {}", patient.gender, patient.age) }
                    </div>
                </div>
            </div>
        }
    }

    fn render_bp_chart(series: &[SeriesPoint]) -> Html {
        let view_box = format!("0 0 {} {}", chart::WIDTH, chart::HEIGHT);
        let label_y = format!("{:.1}", chart::label_y());
        let count = series.len();

        html! {
            <svg viewBox={view_box} role="img">
                { render_series_lines(series, |p| p.systolic, SYSTOLIC_COLOR) }
                { render_series_lines(series, |p| p.diastolic, DIASTOLIC_COLOR) }
                {
                    for series.iter().enumerate().map(|(index, point)| {
                        let x = format!("{:.1}", chart::x_for(index, count));
                        html! {
                            <text
                                x={x}
                                y={label_y.clone()}
                                text-anchor="middle"
                                font-size="11"
                                fill="#444140"
                            >
                                { point.label.clone() }
                            </text>
                        }
                    })
                }
            </svg>
        }
    }

    fn render_series_lines<F>(series: &[SeriesPoint], pick: F, color: &'static str) -> Html
    where
        F: Fn(&SeriesPoint) -> Option<f64>,
    {
        let runs = chart::segments(series, pick);

        html! {
            <>
                {
                    for runs.iter().filter(|run| run.len() >= 2).map(|run| {
                        html! {
                            <polyline
                                points={chart::polyline_points(run)}
                                fill="none"
                                stroke={color}
                                stroke-width="2"
                            />
                        }
                    })
                }
                {
                    for runs.iter().flatten().map(|(x, y)| {
                        html! {
                            <circle
                                cx={format!("{x:.1}")}
                                cy={format!("{y:.1}")}
                                r="4"
                                fill={color}
                            />
                        }
                    })
                }
            </>
        }
    }

    fn render_averages_panel(report: &VitalsReport) -> Html {
        html! {
            <div class="bp-averages">
                { render_bp_stat(
                    "Systolic",
                    SYSTOLIC_COLOR,
                    report.latest_systolic,
                    report.classification.systolic,
                    report.averages.map(|a| a.systolic),
                ) }
                { render_bp_stat(
                    "Diastolic",
                    DIASTOLIC_COLOR,
                    report.latest_diastolic,
                    report.classification.diastolic,
                    report.averages.map(|a| a.diastolic),
                ) }
            </div>
        }
    }

    fn render_bp_stat(
        label: &str,
        dot_color: &'static str,
        latest: Option<f64>,
        status: Option<BpStatus>,
        average: Option<i64>,
    ) -> Html {
        let value = latest
            .map(vitals_core::format_numeric)
            .unwrap_or_else(|| "--".to_string());
        let average = average
            .map(|avg| avg.to_string())
            .unwrap_or_else(|| "N/A".to_string());

        html! {
            <div class="bp-stat">
                <span class="bp-dot" style={format!("background: {dot_color}")}></span>
                <strong>{ label }</strong>
                <div class="bp-stat-value">{ value }</div>
                { status.map(render_status).unwrap_or_default() }
                <div class="bp-stat-avg">{ format!("Avg: {average}") }</div>
            </div>
        }
    }

    fn render_status(status: BpStatus) -> Html {
        let (text, color) = match status {
            BpStatus::Higher => ("▲ Higher than Average", "var(--vitals-higher)"),
            BpStatus::Lower => ("▼ Lower than Average", "var(--vitals-lower)"),
            BpStatus::Average => ("Average", "var(--vitals-neutral)"),
        };

        html! {
            <div class="bp-stat-status" style={format!("color: {color}")}>{ text }</div>
        }
    }

    fn render_stat_card(card: &StatCard) -> Html {
        html! {
            <div class="stat-card" style={format!("background: {}", card.color)}>
                <div class="stat-label">{ card.label.clone() }</div>
                <div class="stat-value">{ card.value.clone() }</div>
                <div class="stat-sign">{ card.sign.clone() }</div>
            </div>
        }
    }

    fn render_contact(info: &ContactInfo) -> Html {
        let rows = [
            ("Date of Birth", info.date_of_birth.clone()),
            ("Gender", info.gender.clone()),
            ("Phone Number", info.phone_number.clone()),
            ("Emergency Contact", info.emergency_contact.clone()),
            ("Insurance Type", info.insurance_type.clone()),
        ];

        html! {
            <div class="contact-details">
                <div class="contact-portrait">
                    <img src={info.profile_picture.clone()} alt={info.name.clone()} />
                    <div class="patient-name">{ info.name.clone() }</div>
                </div>
                {
                    for rows.into_iter().map(|(header, value)| html! {
                        <div class="contact-row">
                            <div class="contact-header">{ header }</div>
                            <div class="contact-value">{ value }</div>
                        </div>
                    })
                }
                <button class="show-all-info" type="button">{"Show All Information"}</button>
            </div>
        }
    }

    #[wasm_bindgen]
    pub fn mount_patient_dashboard(selector: &str, patients: JsValue) -> Result<(), JsValue> {
        let window: Window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document: Document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let target: Element = document
            .query_selector(selector)
            .map_err(|err| JsValue::from_str(&format!("bad selector: {err:?}")))?
            .ok_or_else(|| JsValue::from_str("no element matches selector"))?;

        let patients: Vec<PatientRecord> = from_value(patients)
            .map_err(|err| JsValue::from_str(&format!("malformed patient list: {err}")))?;

        yew::Renderer::<DashboardView>::with_root_and_props(
            target,
            DashboardViewProps { patients },
        )
        .render();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_ui::mount_patient_dashboard;

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_patient_dashboard(
    _: &str,
    _: wasm_bindgen::JsValue,
) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "vitals-ui only supports the wasm32 target",
    ))
}
