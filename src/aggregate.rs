// 📊 Aggregator - four fixed read-only queries over the billionaire table

use crate::db::TABLE_NAME;
use crate::error::{PipelineError, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};
use tracing::debug;

// ============================================================================
// RESULT ROWS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryCount {
    pub industry: Option<String>,
    pub billionaire_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenderIndustryCount {
    pub industry: Option<String>,
    pub gender: Gender,
    pub billionaire_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryCount {
    pub country: Option<String>,
    pub billionaire_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryAverage {
    pub industry: Option<String>,
    /// NULL when no row of the industry carries a finalWorth
    pub avg_net_worth: Option<f64>,
}

/// The two gender codes the dataset uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    /// Code stored in the `gender` column
    pub fn code(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }

    /// Human-readable label used on the dashboard
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

/// Everything the dashboard shows, computed once per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    pub industry_counts: Vec<IndustryCount>,
    pub gender_industry_counts: Vec<GenderIndustryCount>,
    pub top_countries: Vec<CountryCount>,
    pub average_net_worth: Vec<IndustryAverage>,
    pub total_rows: i64,
    pub generated_at: DateTime<Utc>,
}

// ============================================================================
// QUERIES
// ============================================================================

pub const TOP_COUNTRY_LIMIT: i64 = 10;

fn query_failed(query: &'static str) -> impl Fn(rusqlite::Error) -> PipelineError {
    move |source| PipelineError::Query { query, source }
}

/// Run `sql` and map every row with `map`.
fn collect_rows<T, P, F>(
    conn: &Connection,
    query: &'static str,
    sql: &str,
    params: P,
    map: F,
) -> Result<Vec<T>>
where
    P: rusqlite::Params,
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut stmt = conn.prepare(sql).map_err(query_failed(query))?;

    let rows = stmt
        .query_map(params, map)
        .map_err(query_failed(query))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(query_failed(query))?;

    debug!(query, rows = rows.len(), "aggregate query done");
    Ok(rows)
}

/// Billionaires per industry, most first.
pub fn industry_counts(conn: &Connection) -> Result<Vec<IndustryCount>> {
    let sql = format!(
        "SELECT industries, COUNT(*) AS billionaire_count
         FROM {}
         GROUP BY industries
         ORDER BY billionaire_count DESC, industries ASC",
        TABLE_NAME
    );

    collect_rows(conn, "industry counts", &sql, params![], |row| {
        Ok(IndustryCount {
            industry: row.get(0)?,
            billionaire_count: row.get(1)?,
        })
    })
}

/// Per-industry counts for each gender: all male rows first, then female,
/// each block ordered by count descending.
pub fn gender_industry_counts(conn: &Connection) -> Result<Vec<GenderIndustryCount>> {
    let sql = format!(
        "SELECT industries, COUNT(gender) AS billionaire_count
         FROM {}
         WHERE gender = ?1
         GROUP BY industries
         ORDER BY billionaire_count DESC, industries ASC",
        TABLE_NAME
    );

    let mut combined = Vec::new();
    for gender in Gender::ALL {
        let rows = collect_rows(
            conn,
            "gender by industry counts",
            &sql,
            params![gender.code()],
            |row| {
                Ok(GenderIndustryCount {
                    industry: row.get(0)?,
                    gender,
                    billionaire_count: row.get(1)?,
                })
            },
        )?;
        combined.extend(rows);
    }

    Ok(combined)
}

/// The ten countries with the most billionaires.
pub fn top_countries(conn: &Connection) -> Result<Vec<CountryCount>> {
    let sql = format!(
        "SELECT country, COUNT(*) AS billionaire_count
         FROM {}
         GROUP BY country
         ORDER BY billionaire_count DESC, country ASC
         LIMIT ?1",
        TABLE_NAME
    );

    collect_rows(conn, "top countries", &sql, params![TOP_COUNTRY_LIMIT], |row| {
        Ok(CountryCount {
            country: row.get(0)?,
            billionaire_count: row.get(1)?,
        })
    })
}

/// Mean finalWorth per industry, highest first.
pub fn average_net_worth(conn: &Connection) -> Result<Vec<IndustryAverage>> {
    let sql = format!(
        "SELECT industries, AVG(finalWorth) AS avg_net_worth
         FROM {}
         GROUP BY industries
         ORDER BY avg_net_worth DESC, industries ASC",
        TABLE_NAME
    );

    collect_rows(conn, "average net worth", &sql, params![], |row| {
        Ok(IndustryAverage {
            industry: row.get(0)?,
            avg_net_worth: row.get(1)?,
        })
    })
}

/// Run all four queries against the same connection.
pub fn run_all(conn: &Connection) -> Result<DashboardData> {
    Ok(DashboardData {
        industry_counts: industry_counts(conn)?,
        gender_industry_counts: gender_industry_counts(conn)?,
        top_countries: top_countries(conn)?,
        average_net_worth: average_net_worth(conn)?,
        total_rows: crate::db::verify_count(conn)?,
        generated_at: Utc::now(),
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleaner::clean_record;
    use crate::db::replace_records;
    use crate::loader::RawRecord;

    fn raw(industry: &str, gender: &str, country: &str, worth: f64) -> RawRecord {
        RawRecord {
            industries: Some(industry.to_string()),
            gender: Some(gender.to_string()),
            country: Some(country.to_string()),
            final_worth: Some(worth),
            ..RawRecord::default()
        }
    }

    fn seeded(rows: Vec<RawRecord>) -> Connection {
        let mut conn = Connection::open_in_memory().unwrap();
        let records: Vec<_> = rows
            .iter()
            .enumerate()
            .map(|(i, r)| clean_record(r, i + 1).unwrap())
            .collect();
        replace_records(&mut conn, &records).unwrap();
        conn
    }

    #[test]
    fn test_single_tech_row() {
        let conn = seeded(vec![RawRecord {
            city: None,
            age: None,
            ..raw("Tech", "M", "USA", 5.0)
        }]);

        let counts = industry_counts(&conn).unwrap();
        assert_eq!(
            counts,
            vec![IndustryCount {
                industry: Some("Tech".to_string()),
                billionaire_count: 1,
            }]
        );

        let averages = average_net_worth(&conn).unwrap();
        assert_eq!(averages.len(), 1);
        assert_eq!(averages[0].industry.as_deref(), Some("Tech"));
        assert_eq!(averages[0].avg_net_worth, Some(5.0));
    }

    #[test]
    fn test_two_female_tech_rows() {
        let conn = seeded(vec![
            raw("Tech", "F", "USA", 1.0),
            raw("Tech", "F", "China", 2.0),
        ]);

        let rows = gender_industry_counts(&conn).unwrap();
        assert_eq!(
            rows,
            vec![GenderIndustryCount {
                industry: Some("Tech".to_string()),
                gender: Gender::Female,
                billionaire_count: 2,
            }]
        );
        assert_eq!(rows[0].gender.label(), "Female");
    }

    #[test]
    fn test_male_rows_come_before_female_rows() {
        let conn = seeded(vec![
            raw("Finance", "F", "USA", 1.0),
            raw("Finance", "F", "USA", 1.0),
            raw("Finance", "F", "USA", 1.0),
            raw("Tech", "M", "USA", 1.0),
            raw("Retail", "M", "USA", 1.0),
            raw("Retail", "M", "USA", 1.0),
        ]);

        let rows = gender_industry_counts(&conn).unwrap();
        let summary: Vec<(Gender, &str, i64)> = rows
            .iter()
            .map(|r| (r.gender, r.industry.as_deref().unwrap(), r.billionaire_count))
            .collect();

        assert_eq!(
            summary,
            vec![
                (Gender::Male, "Retail", 2),
                (Gender::Male, "Tech", 1),
                (Gender::Female, "Finance", 3),
            ]
        );
    }

    #[test]
    fn test_industry_counts_sum_to_row_count() {
        let conn = seeded(vec![
            raw("Tech", "M", "USA", 1.0),
            raw("Tech", "F", "USA", 1.0),
            raw("Energy", "M", "India", 1.0),
            RawRecord::default(),
        ]);

        let total: i64 = industry_counts(&conn)
            .unwrap()
            .iter()
            .map(|r| r.billionaire_count)
            .sum();
        assert_eq!(total, crate::db::verify_count(&conn).unwrap());
    }

    #[test]
    fn test_industry_counts_descending() {
        let conn = seeded(vec![
            raw("Energy", "M", "USA", 1.0),
            raw("Tech", "M", "USA", 1.0),
            raw("Tech", "M", "USA", 1.0),
        ]);

        let counts = industry_counts(&conn).unwrap();
        assert_eq!(counts[0].industry.as_deref(), Some("Tech"));
        assert_eq!(counts[0].billionaire_count, 2);
        assert_eq!(counts[1].industry.as_deref(), Some("Energy"));
    }

    #[test]
    fn test_top_countries_truncated_and_descending() {
        let mut rows = Vec::new();
        for (i, country) in [
            "USA", "China", "India", "Germany", "Russia", "Brazil", "Italy", "Canada",
            "France", "Japan", "Spain", "Sweden",
        ]
        .iter()
        .enumerate()
        {
            // USA gets 12 rows, China 11, ..., Sweden 1
            for _ in 0..(12 - i) {
                rows.push(raw("Tech", "M", country, 1.0));
            }
        }
        let conn = seeded(rows);

        let top = top_countries(&conn).unwrap();
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].country.as_deref(), Some("USA"));
        assert!(top
            .windows(2)
            .all(|w| w[0].billionaire_count >= w[1].billionaire_count));
        assert!(!top.iter().any(|c| c.country.as_deref() == Some("Sweden")));
    }

    #[test]
    fn test_missing_country_groups_as_unknown() {
        let conn = seeded(vec![RawRecord {
            country: None,
            ..raw("Tech", "M", "unused", 1.0)
        }]);

        let top = top_countries(&conn).unwrap();
        assert_eq!(top[0].country.as_deref(), Some("Unknown"));
    }

    #[test]
    fn test_average_net_worth_ordering() {
        let conn = seeded(vec![
            raw("Tech", "M", "USA", 10.0),
            raw("Tech", "M", "USA", 20.0),
            raw("Energy", "M", "USA", 40.0),
        ]);

        let averages = average_net_worth(&conn).unwrap();
        assert_eq!(averages[0].industry.as_deref(), Some("Energy"));
        assert_eq!(averages[0].avg_net_worth, Some(40.0));
        assert_eq!(averages[1].avg_net_worth, Some(15.0));
    }

    #[test]
    fn test_empty_table_yields_empty_results() {
        let conn = seeded(Vec::new());

        let data = run_all(&conn).unwrap();
        assert!(data.industry_counts.is_empty());
        assert!(data.gender_industry_counts.is_empty());
        assert!(data.top_countries.is_empty());
        assert!(data.average_net_worth.is_empty());
        assert_eq!(data.total_rows, 0);
    }

    #[test]
    fn test_queries_fail_without_table() {
        let conn = Connection::open_in_memory().unwrap();

        let err = industry_counts(&conn).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Query {
                query: "industry counts",
                ..
            }
        ));
    }
}
