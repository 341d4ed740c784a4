//! Dataset acquisition: download the source CSV and normalize it into an
//! [`IncidentDataset`].
//!
//! The header row is validated against a fixed required-column list before
//! any record is read; a missing column fails the whole load. Individual
//! malformed field values (bad dates, non-numeric counts, empty cells)
//! degrade to missing instead, so one dirty row never takes the dataset
//! down with it.

use std::io::Read;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use super::model::{Incident, IncidentDataset};

/// Columns the source CSV must carry. Renaming any of these upstream is a
/// schema break, not something to paper over.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "Incident Number",
    "Date of Incident",
    "Bias",
    "Offense(s)",
    "Offense Location",
    "Zip Code",
    "Number of Victims under 18",
    "Number of Offenders under 18",
];

/// Errors that make the dataset unavailable. All of them are fatal for the
/// session; there is no retry.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to download dataset: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("dataset request returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("failed to parse dataset CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("dataset is missing required column '{0}'")]
    MissingColumn(&'static str),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Download the dataset from `url` and parse it.
pub fn fetch_dataset(url: &str) -> Result<IncidentDataset, DataError> {
    log::info!("downloading dataset from {url}");
    let response = reqwest::blocking::get(url)?;
    let status = response.status();
    if !status.is_success() {
        return Err(DataError::Status(status));
    }
    let body = response.text()?;
    log::debug!("downloaded {} bytes", body.len());
    parse_csv(body.as_bytes())
}

/// Parse incident records out of CSV bytes.
pub fn parse_csv<R: Read>(input: R) -> Result<IncidentDataset, DataError> {
    let mut reader = csv::Reader::from_reader(input);

    let headers = reader.headers()?.clone();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(DataError::MissingColumn(required));
        }
    }

    let mut incidents = Vec::new();
    for result in reader.deserialize() {
        let raw: RawRecord = result?;
        incidents.push(normalize(raw));
    }

    log::info!("loaded {} incident records", incidents.len());
    Ok(IncidentDataset::from_incidents(incidents))
}

// ---------------------------------------------------------------------------
// Raw record and normalization
// ---------------------------------------------------------------------------

/// One raw CSV row, keyed by the upstream column headers. Every field is
/// read as text; typing happens in [`normalize`].
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Incident Number")]
    incident_number: String,
    #[serde(rename = "Date of Incident")]
    date: String,
    #[serde(rename = "Bias")]
    bias: String,
    #[serde(rename = "Offense(s)")]
    offense: String,
    #[serde(rename = "Offense Location")]
    location: String,
    #[serde(rename = "Zip Code")]
    zip_code: String,
    #[serde(rename = "Number of Victims under 18")]
    victims_under_18: String,
    #[serde(rename = "Number of Offenders under 18")]
    offenders_under_18: String,
}

fn normalize(raw: RawRecord) -> Incident {
    Incident {
        incident_number: raw.incident_number.trim().to_string(),
        date: parse_date(&raw.date),
        bias: non_empty(&raw.bias),
        offense: non_empty(&raw.offense),
        location: non_empty(&raw.location),
        zip_code: non_empty(&raw.zip_code).map(|z| zip_label(&z)),
        victims_under_18: parse_count(&raw.victims_under_18),
        offenders_under_18: parse_count(&raw.offenders_under_18),
    }
}

/// Accepted date layouts, tried in order.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%m-%d-%Y"];

fn parse_date(value: &str) -> Option<NaiveDate> {
    // Timestamps like "2020-01-15 00:00:00" carry the date up front.
    let date_part = value.trim().split_whitespace().next().unwrap_or("");
    if date_part.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Zip codes are opaque labels; exports that went through a float-typed
/// column arrive as e.g. "78741.0".
fn zip_label(value: &str) -> String {
    value.strip_suffix(".0").unwrap_or(value).to_string()
}

fn parse_count(value: &str) -> Option<u32> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(n) = trimmed.parse::<u32>() {
        return Some(n);
    }
    // Float-typed exports ("1.0") still carry an integral count.
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|f| *f >= 0.0 && f.fract() == 0.0)
        .map(|f| f as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Incident Number,Date of Incident,Bias,Offense(s),\
Offense Location,Zip Code,Number of Victims under 18,Number of Offenders under 18";

    fn parse(rows: &[&str]) -> Result<IncidentDataset, DataError> {
        let csv = format!("{HEADER}\n{}", rows.join("\n"));
        parse_csv(csv.as_bytes())
    }

    #[test]
    fn parses_well_formed_rows() {
        let dataset = parse(&[
            "2017-101,2017-01-15,Anti-Jewish,Criminal Mischief,Residence,78741,0,1",
            "2017-102,01/20/2017,Anti-Gay (Male),Assault,Highway,78704,1,0",
        ])
        .unwrap();

        assert_eq!(dataset.len(), 2);
        let first = &dataset.incidents[0];
        assert_eq!(first.incident_number, "2017-101");
        assert_eq!(first.year(), Some(2017));
        assert_eq!(first.month(), Some(1));
        assert_eq!(first.bias.as_deref(), Some("Anti-Jewish"));
        assert_eq!(first.zip_code.as_deref(), Some("78741"));
        assert_eq!(first.victims_under_18, Some(0));
        assert_eq!(first.offenders_under_18, Some(1));

        // Both accepted date layouts land on the same calendar month.
        assert_eq!(dataset.incidents[1].month(), Some(1));
    }

    #[test]
    fn missing_required_column_fails_the_load() {
        let csv = "Incident Number,Date of Incident,Bias\n1,2020-01-01,Anti-Jewish";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn("Offense(s)")));
    }

    #[test]
    fn unparseable_date_keeps_the_record() {
        let dataset = parse(&[
            "1,not-a-date,Anti-Jewish,Assault,Residence,78741,0,0",
        ])
        .unwrap();

        let incident = &dataset.incidents[0];
        assert_eq!(incident.date, None);
        assert_eq!(incident.year(), None);
        // The record is still present for non-date fields.
        assert_eq!(incident.bias.as_deref(), Some("Anti-Jewish"));
        assert_eq!(dataset.len(), 1);
        assert!(dataset.years.is_empty());
    }

    #[test]
    fn empty_cells_become_missing() {
        let dataset = parse(&["1,2020-03-02,,Assault,, ,,"]).unwrap();

        let incident = &dataset.incidents[0];
        assert_eq!(incident.bias, None);
        assert_eq!(incident.location, None);
        assert_eq!(incident.zip_code, None);
        assert_eq!(incident.victims_under_18, None);
        assert_eq!(incident.offenders_under_18, None);
        assert_eq!(incident.offense.as_deref(), Some("Assault"));
    }

    #[test]
    fn float_typed_exports_are_normalized() {
        let dataset = parse(&[
            "1,2020-03-02,Anti-Jewish,Assault,Residence,78741.0,2.0,junk",
        ])
        .unwrap();

        let incident = &dataset.incidents[0];
        assert_eq!(incident.zip_code.as_deref(), Some("78741"));
        assert_eq!(incident.victims_under_18, Some(2));
        assert_eq!(incident.offenders_under_18, None);
    }

    #[test]
    fn timestamped_dates_parse() {
        let dataset = parse(&[
            "1,2020-01-15 00:00:00,Anti-Jewish,Assault,Residence,78741,0,0",
        ])
        .unwrap();
        assert_eq!(dataset.incidents[0].year(), Some(2020));
    }
}
