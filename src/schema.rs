// 📐 Shape Layer - Source and cleaned schema contract
// Declares which columns the source must carry, which are dropped,
// which get defaults, and how the cleaned table is typed in SQLite.

// ============================================================================
// SOURCE SCHEMA
// ============================================================================

/// Every column the source CSV must provide (order irrelevant).
pub const SOURCE_COLUMNS: [&str; 35] = [
    "rank",
    "finalWorth",
    "category",
    "personName",
    "age",
    "country",
    "city",
    "source",
    "industries",
    "countryOfCitizenship",
    "organization",
    "selfMade",
    "status",
    "gender",
    "birthDate",
    "lastName",
    "firstName",
    "title",
    "date",
    "state",
    "residenceStateRegion",
    "birthYear",
    "birthMonth",
    "birthDay",
    "cpi_country",
    "cpi_change_country",
    "gdp_country",
    "gross_tertiary_education_enrollment",
    "gross_primary_education_enrollment_country",
    "life_expectancy_country",
    "tax_revenue_country_country",
    "total_tax_rate_country",
    "population_country",
    "latitude_country",
    "longitude_country",
];

/// Geographic/economic columns removed by the cleaner.
pub const DROPPED_COLUMNS: [&str; 14] = [
    "state",
    "residenceStateRegion",
    "cpi_country",
    "cpi_change_country",
    "gdp_country",
    "gross_tertiary_education_enrollment",
    "gross_primary_education_enrollment_country",
    "life_expectancy_country",
    "tax_revenue_country_country",
    "total_tax_rate_country",
    "population_country",
    "latitude_country",
    "longitude_country",
    "date",
];

// ============================================================================
// MISSING-VALUE DEFAULTS
// ============================================================================

pub const DEFAULT_CITY: &str = "Unknown";
pub const DEFAULT_COUNTRY: &str = "Unknown";
pub const DEFAULT_AGE: f64 = 65.14;
pub const DEFAULT_ORGANIZATION: &str = "Unknown";
pub const DEFAULT_BIRTH_DATE: &str = "1/1/1111";
pub const DEFAULT_TITLE: &str = "unknown";
pub const DEFAULT_BIRTH_YEAR: i64 = 0;
pub const DEFAULT_BIRTH_DAY: i64 = 0;
pub const DEFAULT_BIRTH_MONTH: &str = "none";
pub const DEFAULT_FIRST_NAME: &str = "Unknown";

/// Cell texts read as a missing value, whatever the column.
pub const MISSING_TOKENS: [&str; 19] = [
    "",
    "#N/A",
    "#N/A N/A",
    "#NA",
    "-1.#IND",
    "-1.#QNAN",
    "-NaN",
    "-nan",
    "1.#IND",
    "1.#QNAN",
    "<NA>",
    "N/A",
    "NA",
    "NULL",
    "NaN",
    "None",
    "n/a",
    "nan",
    "null",
];

pub fn is_missing_token(cell: &str) -> bool {
    MISSING_TOKENS.contains(&cell)
}

/// Columns that never hold NULL after cleaning.
pub const DEFAULTED_COLUMNS: [&str; 10] = [
    "city",
    "country",
    "age",
    "organization",
    "birthDate",
    "title",
    "birthYear",
    "birthDay",
    "birthMonth",
    "firstName",
];

// ============================================================================
// CLEANED SCHEMA
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Integer,
    Real,
    Text,
}

impl SqlType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SqlType::Integer => "INTEGER",
            SqlType::Real => "REAL",
            SqlType::Text => "TEXT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: SqlType,
}

const fn col(name: &'static str, sql_type: SqlType) -> ColumnDef {
    ColumnDef { name, sql_type }
}

/// Cleaned table layout, in source order. Matches `BillionaireRecord`.
pub const CLEANED_COLUMNS: [ColumnDef; 21] = [
    col("rank", SqlType::Integer),
    col("finalWorth", SqlType::Real),
    col("category", SqlType::Text),
    col("personName", SqlType::Text),
    col("age", SqlType::Real),
    col("country", SqlType::Text),
    col("city", SqlType::Text),
    col("source", SqlType::Text),
    col("industries", SqlType::Text),
    col("countryOfCitizenship", SqlType::Text),
    col("organization", SqlType::Text),
    col("selfMade", SqlType::Text),
    col("status", SqlType::Text),
    col("gender", SqlType::Text),
    col("birthDate", SqlType::Text),
    col("lastName", SqlType::Text),
    col("firstName", SqlType::Text),
    col("title", SqlType::Text),
    col("birthYear", SqlType::Integer),
    col("birthMonth", SqlType::Text),
    col("birthDay", SqlType::Integer),
];

// ============================================================================
// HEADER VALIDATION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub column: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.column, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Check a source header against `SOURCE_COLUMNS`.
///
/// Reports every missing and every duplicated expected column in one pass,
/// so a drifted file fails before any row is read. Unknown extra columns are
/// accepted and ignored by the loader.
pub fn validate_header<S: AsRef<str>>(headers: &[S]) -> ValidationResult {
    let mut errors = Vec::new();

    for expected in SOURCE_COLUMNS {
        let occurrences = headers
            .iter()
            .filter(|h| AsRef::<str>::as_ref(*h) == expected)
            .count();

        match occurrences {
            0 => errors.push(ValidationError {
                column: expected.to_string(),
                message: "Required column is missing".to_string(),
            }),
            1 => {}
            n => errors.push(ValidationError {
                column: expected.to_string(),
                message: format!("Column appears {} times", n),
            }),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Column names of the cleaned table.
pub fn cleaned_column_names() -> Vec<&'static str> {
    CLEANED_COLUMNS.iter().map(|c| c.name).collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_header_is_valid() {
        assert!(validate_header(&SOURCE_COLUMNS[..]).is_ok());
    }

    #[test]
    fn test_extra_columns_are_tolerated() {
        let mut headers: Vec<&str> = SOURCE_COLUMNS.to_vec();
        headers.push("unexpected_extra");

        assert!(validate_header(&headers).is_ok());
    }

    #[test]
    fn test_missing_columns_all_reported() {
        let headers: Vec<&str> = SOURCE_COLUMNS
            .iter()
            .copied()
            .filter(|c| *c != "industries" && *c != "gdp_country")
            .collect();

        let errors = validate_header(&headers).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.column == "industries"));
        assert!(errors.iter().any(|e| e.column == "gdp_country"));
    }

    #[test]
    fn test_duplicate_column_reported() {
        let mut headers: Vec<&str> = SOURCE_COLUMNS.to_vec();
        headers.push("city");

        let errors = validate_header(&headers).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].column, "city");
        assert!(errors[0].message.contains("2 times"));
    }

    #[test]
    fn test_cleaned_schema_excludes_dropped_columns() {
        let cleaned = cleaned_column_names();

        assert_eq!(cleaned.len(), SOURCE_COLUMNS.len() - DROPPED_COLUMNS.len());
        for dropped in DROPPED_COLUMNS {
            assert!(!cleaned.contains(&dropped), "{} should be dropped", dropped);
        }
    }

    #[test]
    fn test_defaulted_columns_are_kept() {
        let cleaned = cleaned_column_names();
        for column in DEFAULTED_COLUMNS {
            assert!(cleaned.contains(&column));
        }
    }

    #[test]
    fn test_missing_tokens() {
        for token in ["", "NaN", "nan", "NA", "N/A", "NULL", "null", "None", "#N/A", "<NA>"] {
            assert!(is_missing_token(token), "{:?} should be missing", token);
        }
        for value in ["0", "Unknown", "none", "inf", " NaN", "Nancy"] {
            assert!(!is_missing_token(value), "{:?} should be kept", value);
        }
    }

    #[test]
    fn test_birth_year_and_day_are_integer_columns() {
        for column in CLEANED_COLUMNS {
            if column.name == "birthYear" || column.name == "birthDay" {
                assert_eq!(column.sql_type, SqlType::Integer);
            }
        }
    }
}
