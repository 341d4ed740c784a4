use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top title bar with the loaded/matching record counts.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Hate Crime Incidents Trend Dashboard");
        ui.separator();
        ui.label(format!(
            "{} incidents loaded, {} matching the current filters",
            state.dataset.len(),
            state.filtered.len()
        ));
    });
}

// ---------------------------------------------------------------------------
// Left side panel – filter dropdowns
// ---------------------------------------------------------------------------

/// Render the left filter panel: one dropdown per filterable field.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.label(RichText::new("Pick \"All\" to leave a field unrestricted.").weak());
    ui.separator();

    let mut changed = false;
    changed |= filter_combo(ui, "Year", &mut state.selection.year, &state.dataset.years);
    changed |= filter_combo(ui, "Bias", &mut state.selection.bias, &state.dataset.biases);
    changed |= filter_combo(
        ui,
        "Offense Type",
        &mut state.selection.offense,
        &state.dataset.offenses,
    );
    changed |= filter_combo(
        ui,
        "Offense Location",
        &mut state.selection.location,
        &state.dataset.locations,
    );

    if changed {
        state.refilter();
    }
}

/// One dropdown over "All" plus the distinct values observed for a field.
/// Returns whether the selection changed.
fn filter_combo<T>(ui: &mut Ui, label: &str, selected: &mut Option<T>, values: &[T]) -> bool
where
    T: Clone + PartialEq + ToString,
{
    let mut changed = false;

    ui.label(RichText::new(label).strong());
    let current = selected
        .as_ref()
        .map_or_else(|| "All".to_string(), ToString::to_string);

    egui::ComboBox::from_id_salt(label)
        .selected_text(current)
        .width(ui.available_width() - 8.0)
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(selected.is_none(), "All").clicked() && selected.is_some() {
                *selected = None;
                changed = true;
            }
            for value in values {
                let is_selected = selected.as_ref() == Some(value);
                if ui.selectable_label(is_selected, value.to_string()).clicked() && !is_selected {
                    *selected = Some(value.clone());
                    changed = true;
                }
            }
        });
    ui.add_space(10.0);

    changed
}

// ---------------------------------------------------------------------------
// Central panel text blocks
// ---------------------------------------------------------------------------

/// Static description block shown above the charts.
pub fn intro_block(ui: &mut Ui) {
    ui.add_space(6.0);
    ui.label(
        "This dashboard helps policymakers and researchers analyse trends in hate \
         crimes recorded in Austin, Texas from 2017 to 2025. It breaks the incidents \
         down by offense, bias motivation, location, zip code, and victim and \
         offender age groups.",
    );
    ui.add_space(4.0);
    ui.label(
        "Use the sidebar to narrow the data by year, bias, offense type, and offense \
         location. When no incidents match the selected filters, the charts are \
         replaced by an explanatory message.",
    );
}

/// Headline figures for the full 2017-2025 dataset, fixed at publication
/// time and displayed verbatim rather than recomputed.
const KEY_STATISTICS: [(&str, &str); 5] = [
    ("Total number of hate crime incidents", "265"),
    ("Victims under 18", "12"),
    ("Victims over 18", "268"),
    ("Most common offense", "Criminal Mischief"),
    ("Most common bias motivation", "Anti-Black or African American"),
];

pub fn key_statistics_block(ui: &mut Ui) {
    ui.add_space(10.0);
    ui.strong("Key statistics (2017-2025)");
    for (label, value) in KEY_STATISTICS {
        ui.horizontal(|ui: &mut Ui| {
            ui.label(format!("{label}:"));
            ui.strong(value);
        });
    }
}

/// Current-filter summary line, or a warning banner when nothing matches.
pub fn filter_summary(ui: &mut Ui, state: &AppState) {
    if state.filtered.is_empty() {
        ui.label(
            RichText::new(
                "There is no data available for the selected filters. Adjust your \
                 selections and try again.",
            )
            .color(Color32::RED)
            .strong(),
        );
        return;
    }

    let selection = &state.selection;
    ui.label(format!(
        "Showing data where Bias: {}, Year: {}, Offense Type: {}, and Offense Location: {}",
        selection.bias_label(),
        selection.year_label(),
        selection.offense_label(),
        selection.location_label(),
    ));
}
