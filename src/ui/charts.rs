use std::ops::RangeInclusive;

use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoints, Points};

use crate::color::CategoryColors;
use crate::data::aggregate::{self, Counts};
use crate::data::filter::FilterSelection;
use crate::data::model::YearMonth;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// The six chart sections (fixed order)
// ---------------------------------------------------------------------------

/// Render every chart section against the current filtered view. Each
/// aggregation is recomputed here on every frame; the render is a pure
/// function of (dataset, selection).
pub fn chart_sections(ui: &mut Ui, state: &AppState) {
    let dataset = &state.dataset;
    let indices = &state.filtered;
    let selection = &state.selection;

    section_heading(ui, "Number of Incidents Over Time", selection);
    let trend = aggregate::monthly_trend(dataset, indices);
    if trend.is_empty() {
        no_data(ui, "There is no incident data available for the selected filters.");
    } else {
        trend_chart(ui, &trend);
    }

    section_heading(ui, "Age Distribution of Victims", selection);
    let victims = aggregate::victims_under_18_distribution(dataset, indices);
    if victims.is_empty() {
        no_data(ui, "There is no victim data available for the selected filters.");
    } else {
        bar_chart(ui, "victims_under_18", "Victims under 18 per incident", &victims);
    }

    section_heading(ui, "Incidents by Offense Type", selection);
    let offenses = aggregate::offense_breakdown(dataset, indices);
    if offenses.is_empty() {
        no_data(ui, "There is no offense data available for the selected filters.");
    } else {
        bar_chart(ui, "offense_breakdown", "Offense Type", &offenses);
    }

    section_heading(ui, "Offender Age Group Distribution", selection);
    let offenders = aggregate::offenders_under_18_distribution(dataset, indices);
    if offenders.is_empty() {
        no_data(ui, "There is no offender data available for the selected filters.");
    } else {
        bar_chart(
            ui,
            "offenders_under_18",
            "Offenders under 18 per incident",
            &offenders,
        );
    }

    section_heading(ui, "Incidents by Zip Code", selection);
    let zips = aggregate::zip_code_breakdown(dataset, indices);
    if zips.is_empty() {
        no_data(ui, "There is no zip code data available for the selected filters.");
    } else {
        bar_chart(ui, "zip_codes", "Zip Code", &zips);
    }

    section_heading(ui, "Bias Motivation Breakdown", selection);
    let biases = aggregate::bias_breakdown(dataset, indices);
    if biases.is_empty() {
        no_data(
            ui,
            "There is no bias motivation data available for the selected filters.",
        );
    } else {
        bar_chart(ui, "bias_breakdown", "Bias Motivation", &biases);
    }
}

fn section_heading(ui: &mut Ui, title: &str, selection: &FilterSelection) {
    ui.add_space(18.0);
    ui.heading(title);
    ui.label(
        RichText::new(format!(
            "(Bias: {}) (Year: {}) (Offense Type: {}) (Location: {})",
            selection.bias_label(),
            selection.year_label(),
            selection.offense_label(),
            selection.location_label(),
        ))
        .weak(),
    );
    ui.add_space(4.0);
}

fn no_data(ui: &mut Ui, message: &str) {
    ui.label(RichText::new(message).italics());
}

// ---------------------------------------------------------------------------
// Chart renderers
// ---------------------------------------------------------------------------

/// Line chart of the monthly trend, one point per year+month bucket.
fn trend_chart(ui: &mut Ui, trend: &Counts<YearMonth>) {
    let labels: Vec<String> = trend.iter().map(|(ym, _)| ym.to_string()).collect();
    let coords: Vec<[f64; 2]> = trend
        .iter()
        .enumerate()
        .map(|(i, &(_, count))| [i as f64, count as f64])
        .collect();

    let line = Line::new(PlotPoints::from(coords.clone()))
        .name("Incidents")
        .color(Color32::LIGHT_BLUE)
        .width(2.0);
    let markers = Points::new(PlotPoints::from(coords))
        .color(Color32::LIGHT_BLUE)
        .radius(3.0);

    Plot::new("monthly_trend")
        .height(CHART_HEIGHT)
        .x_axis_label("Month")
        .y_axis_label("Number of Incidents")
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            index_label(&labels, mark.value)
        })
        .show(ui, |plot_ui| {
            plot_ui.line(line);
            plot_ui.points(markers);
        });
}

/// Bar chart over categorical keys placed at integer x positions; the key
/// labels come back through the axis formatter and per-bar hover names.
fn bar_chart<K: ToString>(ui: &mut Ui, id: &str, x_label: &str, counts: &Counts<K>) {
    let labels: Vec<String> = counts.iter().map(|(key, _)| key.to_string()).collect();
    let colors = CategoryColors::new(labels.clone());

    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, (key, count))| {
            let label = key.to_string();
            let color = colors.color_for(&label);
            Bar::new(i as f64, *count as f64)
                .name(label)
                .width(0.7)
                .fill(color)
        })
        .collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(x_label)
        .y_axis_label("Number of Incidents")
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            index_label(&labels, mark.value)
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

/// Axis tick label for integer positions; fractional grid marks get none.
fn index_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_labels_only_land_on_integer_marks() {
        let labels = vec!["Jan 2020".to_string(), "Feb 2020".to_string()];
        assert_eq!(index_label(&labels, 0.0), "Jan 2020");
        assert_eq!(index_label(&labels, 1.0), "Feb 2020");
        assert_eq!(index_label(&labels, 0.5), "");
        assert_eq!(index_label(&labels, -1.0), "");
        assert_eq!(index_label(&labels, 7.0), "");
    }
}
