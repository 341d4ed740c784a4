use super::model::IncidentDataset;

// ---------------------------------------------------------------------------
// Filter selection: one choice (or "All") per filterable field
// ---------------------------------------------------------------------------

/// The four filter choices. `None` is the "All" sentinel meaning the field
/// imposes no constraint. Built fresh from the sidebar widgets; never
/// persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub year: Option<i32>,
    pub bias: Option<String>,
    pub offense: Option<String>,
    pub location: Option<String>,
}

impl FilterSelection {
    /// Whether every field is the "All" sentinel.
    pub fn is_unrestricted(&self) -> bool {
        self.year.is_none()
            && self.bias.is_none()
            && self.offense.is_none()
            && self.location.is_none()
    }

    pub fn year_label(&self) -> String {
        Self::label(&self.year)
    }

    pub fn bias_label(&self) -> String {
        Self::label(&self.bias)
    }

    pub fn offense_label(&self) -> String {
        Self::label(&self.offense)
    }

    pub fn location_label(&self) -> String {
        Self::label(&self.location)
    }

    fn label<T: ToString>(value: &Option<T>) -> String {
        value
            .as_ref()
            .map_or_else(|| "All".to_string(), ToString::to_string)
    }
}

// ---------------------------------------------------------------------------
// Conjunctive filtering
// ---------------------------------------------------------------------------

/// Return indices of incidents matching every restricted field exactly.
///
/// Fields compose conjunctively (logical AND). Matching is exact and
/// case-sensitive; a record with a missing value for a restricted field
/// never matches. Zero matches yields an empty vec, never an error.
pub fn filtered_indices(dataset: &IncidentDataset, selection: &FilterSelection) -> Vec<usize> {
    dataset
        .incidents
        .iter()
        .enumerate()
        .filter(|(_, incident)| {
            if let Some(year) = selection.year {
                if incident.year() != Some(year) {
                    return false;
                }
            }
            if let Some(bias) = &selection.bias {
                if incident.bias.as_deref() != Some(bias.as_str()) {
                    return false;
                }
            }
            if let Some(offense) = &selection.offense {
                if incident.offense.as_deref() != Some(offense.as_str()) {
                    return false;
                }
            }
            if let Some(location) = &selection.location {
                if incident.location.as_deref() != Some(location.as_str()) {
                    return false;
                }
            }
            true
        })
        .map(|(i, _)| i)
        .collect()
}
