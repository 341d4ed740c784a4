use crate::data::filter::{filtered_indices, FilterSelection};
use crate::data::model::IncidentDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The dataset is loaded once before the window opens and never mutated;
/// the only state that changes between frames is the filter selection and
/// the cached indices of the records passing it.
pub struct AppState {
    /// Loaded dataset.
    pub dataset: IncidentDataset,

    /// Current filter choices from the sidebar.
    pub selection: FilterSelection,

    /// Indices of incidents passing the current filters (cached).
    pub filtered: Vec<usize>,
}

impl AppState {
    /// Start unrestricted: every record is in view.
    pub fn new(dataset: IncidentDataset) -> Self {
        let filtered = (0..dataset.len()).collect();
        Self {
            dataset,
            selection: FilterSelection::default(),
            filtered,
        }
    }

    /// Recompute the filtered view after a selection change.
    pub fn refilter(&mut self) {
        self.filtered = filtered_indices(&self.dataset, &self.selection);
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::model::Incident;

    fn dataset() -> IncidentDataset {
        let incidents = [(2019, "Anti-Jewish"), (2020, "Anti-Jewish"), (2020, "Anti-Sikh")]
            .iter()
            .enumerate()
            .map(|(i, &(year, bias))| Incident {
                incident_number: format!("{i}"),
                date: NaiveDate::from_ymd_opt(year, 1, 1),
                bias: Some(bias.to_string()),
                offense: None,
                location: None,
                zip_code: None,
                victims_under_18: None,
                offenders_under_18: None,
            })
            .collect();
        IncidentDataset::from_incidents(incidents)
    }

    #[test]
    fn starts_with_everything_in_view() {
        let state = AppState::new(dataset());
        assert!(state.selection.is_unrestricted());
        assert_eq!(state.filtered, vec![0, 1, 2]);
    }

    #[test]
    fn refilter_tracks_the_selection() {
        let mut state = AppState::new(dataset());

        state.selection.year = Some(2020);
        state.refilter();
        assert_eq!(state.filtered, vec![1, 2]);

        state.selection.bias = Some("Anti-Sikh".to_string());
        state.refilter();
        assert_eq!(state.filtered, vec![2]);

        state.selection = FilterSelection::default();
        state.refilter();
        assert_eq!(state.filtered, vec![0, 1, 2]);
    }
}
