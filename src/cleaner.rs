// 🧹 Cleaner - raw rows → BillionaireRecord
// Drops the geographic/economic columns, fills missing values with the
// fixed defaults from `schema`, and coerces birthYear/birthDay to integers.

use crate::error::{PipelineError, Result};
use crate::loader::{RawRecord, RawTable};
use crate::schema::{
    DEFAULT_AGE, DEFAULT_BIRTH_DATE, DEFAULT_BIRTH_DAY, DEFAULT_BIRTH_MONTH, DEFAULT_BIRTH_YEAR,
    DEFAULT_CITY, DEFAULT_COUNTRY, DEFAULT_FIRST_NAME, DEFAULT_ORGANIZATION, DEFAULT_TITLE,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Cleaned billionaire row. Field order matches `schema::CLEANED_COLUMNS`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillionaireRecord {
    pub rank: Option<i64>,
    #[serde(rename = "finalWorth")]
    pub final_worth: Option<f64>,
    pub category: Option<String>,
    #[serde(rename = "personName")]
    pub person_name: Option<String>,
    pub age: f64,
    pub country: String,
    pub city: String,
    pub source: Option<String>,
    pub industries: Option<String>,
    #[serde(rename = "countryOfCitizenship")]
    pub country_of_citizenship: Option<String>,
    pub organization: String,
    #[serde(rename = "selfMade")]
    pub self_made: Option<String>,
    pub status: Option<String>,
    pub gender: Option<String>,
    #[serde(rename = "birthDate")]
    pub birth_date: String,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    #[serde(rename = "firstName")]
    pub first_name: String,
    pub title: String,
    #[serde(rename = "birthYear")]
    pub birth_year: i64,
    #[serde(rename = "birthMonth")]
    pub birth_month: String,
    #[serde(rename = "birthDay")]
    pub birth_day: i64,
}

/// Clean every row of the raw table, in order.
pub fn clean_records(raw: &RawTable) -> Result<Vec<BillionaireRecord>> {
    let records = raw
        .records
        .iter()
        .enumerate()
        .map(|(i, record)| clean_record(record, i + 1))
        .collect::<Result<Vec<_>>>()?;

    debug!(rows = records.len(), "cleaned billionaire rows");
    Ok(records)
}

/// Clean a single row. `row` is the 1-based data row, used in error messages.
pub fn clean_record(raw: &RawRecord, row: usize) -> Result<BillionaireRecord> {
    let birth_year = match &raw.birth_year {
        Some(value) => coerce_integer(value, "birthYear", row)?,
        None => DEFAULT_BIRTH_YEAR,
    };
    let birth_day = match &raw.birth_day {
        Some(value) => coerce_integer(value, "birthDay", row)?,
        None => DEFAULT_BIRTH_DAY,
    };

    Ok(BillionaireRecord {
        rank: raw.rank,
        final_worth: raw.final_worth.filter(|w| w.is_finite()),
        category: raw.category.clone(),
        person_name: raw.person_name.clone(),
        age: raw.age.filter(|a| a.is_finite()).unwrap_or(DEFAULT_AGE),
        country: fill(&raw.country, DEFAULT_COUNTRY),
        city: fill(&raw.city, DEFAULT_CITY),
        source: raw.source.clone(),
        industries: raw.industries.clone(),
        country_of_citizenship: raw.country_of_citizenship.clone(),
        organization: fill(&raw.organization, DEFAULT_ORGANIZATION),
        self_made: raw.self_made.clone(),
        status: raw.status.clone(),
        gender: raw.gender.clone(),
        birth_date: fill(&raw.birth_date, DEFAULT_BIRTH_DATE),
        last_name: raw.last_name.clone(),
        first_name: fill(&raw.first_name, DEFAULT_FIRST_NAME),
        title: fill(&raw.title, DEFAULT_TITLE),
        birth_year,
        birth_month: fill(&raw.birth_month, DEFAULT_BIRTH_MONTH),
        birth_day,
    })
}

fn fill(value: &Option<String>, default: &str) -> String {
    value.clone().unwrap_or_else(|| default.to_string())
}

/// Integer coercion: accepts "1949" or "1949.0"; fractional values are
/// truncated toward zero; anything non-numeric or non-finite is rejected.
fn coerce_integer(value: &str, column: &str, row: usize) -> Result<i64> {
    let trimmed = value.trim();

    if let Ok(int) = trimmed.parse::<i64>() {
        return Ok(int);
    }

    match trimmed.parse::<f64>() {
        Ok(float) if float.is_finite() && float.abs() < i64::MAX as f64 => Ok(float.trunc() as i64),
        _ => Err(PipelineError::malformed(format!(
            "row {}: column '{}' value '{}' is not an integer",
            row, column, value
        ))),
    }
}

// ============================================================================
// TESTS
// ============================================================================
