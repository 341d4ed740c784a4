use std::collections::BTreeSet;
use std::fmt;

use chrono::{Datelike, NaiveDate};

// ---------------------------------------------------------------------------
// Incident – one row of the source dataset
// ---------------------------------------------------------------------------

/// A single recorded incident (one normalized row of the source CSV).
///
/// Malformed field values degrade to `None` at load time; a record with a
/// missing field stays in the dataset and is skipped only by the
/// aggregations keyed on that field.
#[derive(Debug, Clone)]
pub struct Incident {
    /// Unique incident identifier, used only for counting.
    pub incident_number: String,
    /// Incident date; `None` when the source value was unparseable.
    pub date: Option<NaiveDate>,
    /// Bias motivation category (e.g. "Anti-Black or African American").
    pub bias: Option<String>,
    /// Offense type; several offenses may be recorded as one string.
    pub offense: Option<String>,
    /// Offense location category.
    pub location: Option<String>,
    /// Zip code, kept as an opaque label and never treated as a number.
    pub zip_code: Option<String>,
    /// Victims under 18 for this incident, used as a bucket key.
    pub victims_under_18: Option<u32>,
    /// Offenders under 18 for this incident, used as a bucket key.
    pub offenders_under_18: Option<u32>,
}

impl Incident {
    /// Year derived from the incident date.
    pub fn year(&self) -> Option<i32> {
        self.date.map(|d| d.year())
    }

    /// Calendar month (1–12) derived from the incident date.
    pub fn month(&self) -> Option<u32> {
        self.date.map(|d| d.month())
    }

    /// Year + month bucket for the time-trend aggregation.
    pub fn year_month(&self) -> Option<YearMonth> {
        self.date.map(|d| YearMonth {
            year: d.year(),
            month: d.month(),
        })
    }
}

// ---------------------------------------------------------------------------
// YearMonth – time-trend bucket key
// ---------------------------------------------------------------------------

/// A calendar month within a specific year. `Ord` is chronological, so a
/// `BTreeMap` keyed on it yields time-trend buckets already in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    /// 1–12.
    pub month: u32,
}

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .month
            .checked_sub(1)
            .and_then(|i| MONTH_ABBREVIATIONS.get(i as usize))
            .copied()
            .unwrap_or("?");
        write!(f, "{name} {}", self.year)
    }
}

// ---------------------------------------------------------------------------
// IncidentDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed distinct-value indexes for the
/// four filterable fields. Immutable after load; filtering only ever
/// produces index vectors into `incidents`.
#[derive(Debug, Clone)]
pub struct IncidentDataset {
    /// All incidents (rows).
    pub incidents: Vec<Incident>,
    /// Distinct observed years, ascending.
    pub years: Vec<i32>,
    /// Distinct bias motivations, sorted.
    pub biases: Vec<String>,
    /// Distinct offense types, sorted.
    pub offenses: Vec<String>,
    /// Distinct offense locations, sorted.
    pub locations: Vec<String>,
}

impl IncidentDataset {
    /// Build the distinct-value indexes from the loaded incidents.
    pub fn from_incidents(incidents: Vec<Incident>) -> Self {
        let mut years: BTreeSet<i32> = BTreeSet::new();
        let mut biases: BTreeSet<String> = BTreeSet::new();
        let mut offenses: BTreeSet<String> = BTreeSet::new();
        let mut locations: BTreeSet<String> = BTreeSet::new();

        for incident in &incidents {
            if let Some(year) = incident.year() {
                years.insert(year);
            }
            if let Some(bias) = &incident.bias {
                biases.insert(bias.clone());
            }
            if let Some(offense) = &incident.offense {
                offenses.insert(offense.clone());
            }
            if let Some(location) = &incident.location {
                locations.insert(location.clone());
            }
        }

        IncidentDataset {
            incidents,
            years: years.into_iter().collect(),
            biases: biases.into_iter().collect(),
            offenses: offenses.into_iter().collect(),
            locations: locations.into_iter().collect(),
        }
    }

    /// Number of incidents.
    pub fn len(&self) -> usize {
        self.incidents.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incident(num: &str, date: Option<(i32, u32, u32)>, bias: Option<&str>) -> Incident {
        Incident {
            incident_number: num.to_string(),
            date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            bias: bias.map(str::to_string),
            offense: None,
            location: None,
            zip_code: None,
            victims_under_18: None,
            offenders_under_18: None,
        }
    }

    #[test]
    fn derived_fields_follow_the_date() {
        let with_date = incident("1", Some((2021, 3, 14)), None);
        assert_eq!(with_date.year(), Some(2021));
        assert_eq!(with_date.month(), Some(3));
        assert_eq!(
            with_date.year_month(),
            Some(YearMonth {
                year: 2021,
                month: 3
            })
        );

        let without_date = incident("2", None, None);
        assert_eq!(without_date.year(), None);
        assert_eq!(without_date.month(), None);
        assert_eq!(without_date.year_month(), None);
    }

    #[test]
    fn distinct_values_are_deduplicated_and_sorted() {
        let dataset = IncidentDataset::from_incidents(vec![
            incident("1", Some((2020, 5, 1)), Some("Anti-Jewish")),
            incident("2", Some((2018, 1, 9)), Some("Anti-Black or African American")),
            incident("3", Some((2020, 7, 2)), Some("Anti-Jewish")),
            incident("4", None, None),
        ]);

        assert_eq!(dataset.years, vec![2018, 2020]);
        assert_eq!(
            dataset.biases,
            vec!["Anti-Black or African American", "Anti-Jewish"]
        );
        assert!(dataset.offenses.is_empty());
        assert_eq!(dataset.len(), 4);
    }

    #[test]
    fn year_month_orders_chronologically() {
        let dec_2019 = YearMonth {
            year: 2019,
            month: 12,
        };
        let jan_2020 = YearMonth {
            year: 2020,
            month: 1,
        };
        assert!(dec_2019 < jan_2020);
        assert_eq!(jan_2020.to_string(), "Jan 2020");
    }
}
