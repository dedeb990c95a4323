#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Node};

const STYLE_TAG_SELECTOR: &str = "style[data-vitals-ui]";

/// Default CSS for the dashboard along with easy-to-override design tokens.
pub const DEFAULT_STYLES: &str = r#"
:root {
  --vitals-font-family: 'Manrope', system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
  --vitals-bg: #f6f7f8;
  --vitals-card-bg: #ffffff;
  --vitals-radius: 16px;
  --vitals-text: #072635;
  --vitals-muted: #707070;
  --vitals-heading: #14213d;
  --vitals-systolic: #e66fd2;
  --vitals-diastolic: #8c6fe6;
  --vitals-averages-bg: #f4f0fe;
  --vitals-higher: green;
  --vitals-lower: blue;
  --vitals-neutral: #444140;
  --vitals-accent: #01f0d0;
  --vitals-selected-row: #d8fcf7;
}

.dashboard-root {
  font-family: var(--vitals-font-family);
  background: var(--vitals-bg);
  color: var(--vitals-text);
  display: grid;
  gap: 24px;
  padding: 24px;
  grid-template-columns: minmax(260px, 0.8fr) minmax(520px, 1.8fr) minmax(280px, 0.9fr);
}

.dashboard-box {
  background: var(--vitals-card-bg);
  border-radius: var(--vitals-radius);
  padding: 20px;
  box-shadow: 0 12px 28px rgba(7, 38, 53, 0.06);
}

.patient-box .box-title {
  display: flex;
  justify-content: space-between;
  align-items: center;
  font-size: 1.3rem;
  font-weight: 800;
  margin-bottom: 16px;
}

.patient-list {
  display: flex;
  flex-direction: column;
  max-height: 960px;
  overflow-y: auto;
}

.patient-row {
  display: flex;
  align-items: center;
  gap: 12px;
  padding: 10px 12px;
  border-radius: 10px;
  cursor: pointer;
}

.patient-row:hover {
  background: rgba(1, 240, 208, 0.12);
}

.patient-row.is-selected {
  background: var(--vitals-selected-row);
}

.patient-avatar {
  width: 32px;
  height: 32px;
  border-radius: 50%;
  background: #e4baca;
  outline: 1.5px white solid;
}

.patient-name {
  font-weight: 700;
  font-size: 0.95rem;
}

.patient-demographics {
  color: var(--vitals-muted);
  font-size: 0.85rem;
}

.diagnosis-title {
  font-size: 1.3rem;
  font-weight: 800;
  margin-bottom: 16px;
}

.chart-area {
  display: flex;
  align-items: flex-start;
  gap: 16px;
}

.bp-chart {
  flex: 1;
}

.bp-chart-heading {
  font-weight: 600;
  font-size: 1.05rem;
  color: var(--vitals-heading);
  margin-bottom: 8px;
}

.bp-chart svg {
  width: 100%;
  height: auto;
}

.bp-averages {
  width: 200px;
  min-width: 200px;
  padding: 16px;
  background: var(--vitals-averages-bg);
  border-radius: 12px;
  display: flex;
  flex-direction: column;
  gap: 16px;
}

.bp-stat strong {
  display: inline-block;
  margin-left: 6px;
}

.bp-dot {
  display: inline-block;
  width: 12px;
  height: 12px;
  border-radius: 50%;
}

.bp-stat-value {
  font-size: 1.6rem;
  font-weight: 800;
}

.bp-stat-status {
  font-size: 0.85rem;
  font-weight: 600;
}

.bp-stat-avg {
  color: var(--vitals-muted);
  font-size: 0.85rem;
  margin-top: 4px;
}

.stat-cards {
  display: flex;
  gap: 16px;
  margin-top: 20px;
}

.stat-card {
  flex: 1;
  border-radius: 12px;
  padding: 16px;
}

.stat-label {
  font-size: 0.95rem;
  margin-top: 8px;
}

.stat-value {
  font-size: 1.5rem;
  font-weight: 800;
}

.stat-sign {
  font-size: 0.85rem;
  color: black;
  margin-top: 6px;
}

.contact-portrait {
  display: flex;
  flex-direction: column;
  align-items: center;
  margin-bottom: 16px;
}

.contact-portrait img {
  width: 100px;
  height: 100px;
  border-radius: 50%;
}

.contact-portrait .patient-name {
  margin-top: 8px;
  font-size: 1.1rem;
}

.contact-row {
  margin-bottom: 12px;
}

.contact-header {
  color: var(--vitals-muted);
  font-size: 0.82rem;
}

.contact-value {
  font-weight: 700;
  font-size: 0.95rem;
}

.show-all-info {
  margin-top: 16px;
  width: 100%;
  background: var(--vitals-accent);
  color: var(--vitals-heading);
  border: none;
  border-radius: 20px;
  padding: 12px 0;
  font-weight: 700;
  font-size: 1rem;
  cursor: pointer;
}
"#;

pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.query_selector(STYLE_TAG_SELECTOR)?.is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("document has no <head>"))?;

    let style_el = document.create_element("style")?;
    style_el.set_attribute("data-vitals-ui", "v1")?;
    style_el.set_text_content(Some(DEFAULT_STYLES));
    head.append_child(&style_el.clone().dyn_into::<Node>()?)?;

    Ok(())
}
