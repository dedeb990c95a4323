//! Geometry for the blood-pressure line chart.
//!
//! The chart is plain inline SVG: two colored series over six fixed monthly
//! slots, y-domain 60..180 mmHg. Slots without data split a series into
//! separate runs so a gap renders as a discontinuity, never as a
//! zero-height point.

use vitals_core::SeriesPoint;

pub const WIDTH: f64 = 500.0;
pub const HEIGHT: f64 = 200.0;
pub const Y_MIN: f64 = 60.0;
pub const Y_MAX: f64 = 180.0;

const PAD_X: f64 = 30.0;
const PAD_TOP: f64 = 15.0;
const PAD_BOTTOM: f64 = 30.0;

/// Slot x-coordinate, slots spread evenly across the drawable width.
pub fn x_for(index: usize, count: usize) -> f64 {
    if count <= 1 {
        return WIDTH / 2.0;
    }
    PAD_X + index as f64 * (WIDTH - 2.0 * PAD_X) / (count as f64 - 1.0)
}

/// Value y-coordinate, clamped into the fixed domain.
pub fn y_for(value: f64) -> f64 {
    let clamped = value.clamp(Y_MIN, Y_MAX);
    PAD_TOP + (Y_MAX - clamped) * (HEIGHT - PAD_TOP - PAD_BOTTOM) / (Y_MAX - Y_MIN)
}

/// Baseline for the month labels.
pub fn label_y() -> f64 {
    HEIGHT - 8.0
}

/// Consecutive runs of present values for one series component. Each gap
/// closes the current run.
pub fn segments<F>(series: &[SeriesPoint], pick: F) -> Vec<Vec<(f64, f64)>>
where
    F: Fn(&SeriesPoint) -> Option<f64>,
{
    let count = series.len();
    let mut runs = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();

    for (index, point) in series.iter().enumerate() {
        match pick(point) {
            Some(value) => current.push((x_for(index, count), y_for(value))),
            None => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }

    runs
}

/// SVG `points` attribute for one run.
pub fn polyline_points(run: &[(f64, f64)]) -> String {
    run.iter()
        .map(|(x, y)| format!("{x:.1},{y:.1}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(label: &str, systolic: Option<f64>) -> SeriesPoint {
        SeriesPoint {
            label: label.to_string(),
            systolic,
            diastolic: systolic,
        }
    }

    #[test]
    fn gap_splits_series_into_separate_runs() {
        let series = vec![
            point("Oct 23", Some(120.0)),
            point("Nov 23", Some(125.0)),
            point("Dec 23", None),
            point("Jan 24", Some(130.0)),
            point("Feb 24", Some(128.0)),
            point("Mar 24", Some(132.0)),
        ];
        let runs = segments(&series, |p| p.systolic);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].len(), 2);
        assert_eq!(runs[1].len(), 3);
    }

    #[test]
    fn all_gap_series_draws_nothing() {
        let series = vec![point("Oct 23", None), point("Nov 23", None)];
        assert!(segments(&series, |p| p.systolic).is_empty());
    }

    #[test]
    fn isolated_point_forms_its_own_run() {
        let series = vec![
            point("Oct 23", None),
            point("Nov 23", Some(118.0)),
            point("Dec 23", None),
        ];
        let runs = segments(&series, |p| p.systolic);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].len(), 1);
    }

    #[test]
    fn y_is_clamped_to_domain() {
        assert_eq!(y_for(300.0), y_for(Y_MAX));
        assert_eq!(y_for(10.0), y_for(Y_MIN));
        assert!(y_for(Y_MAX) < y_for(Y_MIN));
    }

    #[test]
    fn x_spreads_slots_across_width() {
        assert_eq!(x_for(0, 6), 30.0);
        assert_eq!(x_for(5, 6), WIDTH - 30.0);
    }
}
