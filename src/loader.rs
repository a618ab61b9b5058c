// 📂 Loader - Billionaire CSV → in-memory raw table
// Header is checked against the declared source schema before any row is read.

use crate::error::{PipelineError, Result};
use crate::schema::{is_missing_token, validate_header};
use csv::{ByteRecord, StringRecord};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, info};

/// One source row, typed as it appears in the file.
/// Empty fields and missing-value tokens ("NaN", "NA", "NULL", ...) deserialize
/// to `None`, and so do non-finite numbers.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawRecord {
    pub rank: Option<i64>,

    #[serde(rename = "finalWorth")]
    pub final_worth: Option<f64>,

    pub category: Option<String>,

    #[serde(rename = "personName")]
    pub person_name: Option<String>,

    pub age: Option<f64>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub source: Option<String>,
    pub industries: Option<String>,

    #[serde(rename = "countryOfCitizenship")]
    pub country_of_citizenship: Option<String>,

    pub organization: Option<String>,

    #[serde(rename = "selfMade")]
    pub self_made: Option<String>,

    pub status: Option<String>,
    pub gender: Option<String>,

    #[serde(rename = "birthDate")]
    pub birth_date: Option<String>,

    #[serde(rename = "lastName")]
    pub last_name: Option<String>,

    #[serde(rename = "firstName")]
    pub first_name: Option<String>,

    pub title: Option<String>,

    /// Kept as text; the cleaner coerces it to an integer
    #[serde(rename = "birthYear")]
    pub birth_year: Option<String>,

    #[serde(rename = "birthMonth")]
    pub birth_month: Option<String>,

    /// Kept as text; the cleaner coerces it to an integer
    #[serde(rename = "birthDay")]
    pub birth_day: Option<String>,

    // ========================================================================
    // GEOGRAPHIC / ECONOMIC (dropped by the cleaner, carried verbatim)
    // ========================================================================
    pub date: Option<String>,
    pub state: Option<String>,

    #[serde(rename = "residenceStateRegion")]
    pub residence_state_region: Option<String>,

    pub cpi_country: Option<String>,
    pub cpi_change_country: Option<String>,
    pub gdp_country: Option<String>,
    pub gross_tertiary_education_enrollment: Option<String>,
    pub gross_primary_education_enrollment_country: Option<String>,
    pub life_expectancy_country: Option<String>,
    pub tax_revenue_country_country: Option<String>,
    pub total_tax_rate_country: Option<String>,
    pub population_country: Option<String>,
    pub latitude_country: Option<String>,
    pub longitude_country: Option<String>,
}

/// Loaded source: header as read plus one `RawRecord` per data row.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub records: Vec<RawRecord>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Load the billionaire CSV at `csv_path`.
pub fn load_csv(csv_path: &Path) -> Result<RawTable> {
    let file = File::open(csv_path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => PipelineError::MissingInput {
            path: csv_path.to_path_buf(),
        },
        _ => PipelineError::malformed(format!(
            "cannot read {}: {}",
            csv_path.display(),
            e
        )),
    })?;

    let table = load_reader(file)?;
    info!(path = %csv_path.display(), rows = table.len(), "loaded source CSV");

    Ok(table)
}

/// Load billionaire rows from any reader carrying the CSV text.
pub fn load_reader<R: Read>(reader: R) -> Result<RawTable> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let header_bytes = rdr
        .byte_headers()
        .map_err(|e| PipelineError::malformed(format!("unreadable header: {}", e)))?
        .clone();
    let headers = decode_record(&header_bytes);
    let header_names: Vec<String> = headers.iter().map(str::to_string).collect();

    validate_header(&header_names).map_err(|errors| {
        let details: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        PipelineError::malformed(format!("unexpected header: {}", details.join("; ")))
    })?;

    let mut records = Vec::new();
    let mut raw = ByteRecord::new();
    let mut row = 0usize;

    loop {
        let more = rdr.read_byte_record(&mut raw).map_err(|e| {
            PipelineError::malformed(format!("row {}: {}", row + 1, e))
        })?;
        if !more {
            break;
        }
        row += 1;

        let decoded = decode_row(&raw);
        let mut record: RawRecord = decoded.deserialize(Some(&headers)).map_err(|e| {
            PipelineError::malformed(format!("row {}: {}", row, e))
        })?;
        record.final_worth = record.final_worth.filter(|v| v.is_finite());
        record.age = record.age.filter(|v| v.is_finite());
        records.push(record);
    }

    debug!(rows = records.len(), columns = header_names.len(), "parsed CSV rows");

    Ok(RawTable {
        headers: header_names,
        records,
    })
}

/// Decode every field as UTF-8, falling back to Latin-1 for fields that
/// carry invalid bytes so malformed input never aborts the load.
fn decode_record(record: &ByteRecord) -> StringRecord {
    record.iter().map(decode_field).collect()
}

/// Data rows additionally blank out missing-value tokens.
fn decode_row(record: &ByteRecord) -> StringRecord {
    record
        .iter()
        .map(decode_field)
        .map(|cell| if is_missing_token(&cell) { String::new() } else { cell })
        .collect()
}

fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
