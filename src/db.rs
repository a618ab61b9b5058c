// 🗄️ Store - cleaned records → SQLite, one table fully replaced per run
// WAL journal; drop + create + bulk insert share a single transaction.

use crate::cleaner::BillionaireRecord;
use crate::error::{PipelineError, Result};
use crate::schema::CLEANED_COLUMNS;
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::{debug, info};

/// Single table holding the cleaned dataset.
pub const TABLE_NAME: &str = "billion_dat";

/// Open (creating if needed) the SQLite file backing the dashboard.
pub fn open_database(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path).map_err(PipelineError::StorageWrite)?;

    // Enable WAL mode for crash recovery
    let mode: String = conn
        .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
        .map_err(PipelineError::StorageWrite)?;

    debug!(path = %db_path.display(), journal_mode = %mode, "opened database");
    Ok(conn)
}

/// Release the connection, surfacing any error SQLite reports on close.
pub fn close_database(conn: Connection) -> Result<()> {
    conn.close().map_err(|(_, e)| PipelineError::StorageWrite(e))
}

fn create_table_sql() -> String {
    let columns: Vec<String> = CLEANED_COLUMNS
        .iter()
        .map(|c| format!("\"{}\" {}", c.name, c.sql_type.as_sql()))
        .collect();

    format!("CREATE TABLE {} (\n    {}\n)", TABLE_NAME, columns.join(",\n    "))
}

fn insert_sql() -> String {
    let names: Vec<String> = CLEANED_COLUMNS
        .iter()
        .map(|c| format!("\"{}\"", c.name))
        .collect();
    let placeholders: Vec<String> = (1..=CLEANED_COLUMNS.len())
        .map(|i| format!("?{}", i))
        .collect();

    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        TABLE_NAME,
        names.join(", "),
        placeholders.join(", ")
    )
}

/// Replace the whole table with `records`.
///
/// Drop, create and bulk insert run in one transaction, so re-running on the
/// same input leaves an identical table rather than appending.
pub fn replace_records(conn: &mut Connection, records: &[BillionaireRecord]) -> Result<usize> {
    let tx = conn.transaction().map_err(PipelineError::StorageWrite)?;

    tx.execute_batch(&format!(
        "DROP TABLE IF EXISTS {};\n{};",
        TABLE_NAME,
        create_table_sql()
    ))
    .map_err(PipelineError::StorageWrite)?;

    let mut inserted = 0;
    {
        let mut stmt = tx
            .prepare(&insert_sql())
            .map_err(PipelineError::StorageWrite)?;

        for record in records {
            stmt.execute(params![
                record.rank,
                record.final_worth,
                record.category,
                record.person_name,
                record.age,
                record.country,
                record.city,
                record.source,
                record.industries,
                record.country_of_citizenship,
                record.organization,
                record.self_made,
                record.status,
                record.gender,
                record.birth_date,
                record.last_name,
                record.first_name,
                record.title,
                record.birth_year,
                record.birth_month,
                record.birth_day,
            ])
            .map_err(PipelineError::StorageWrite)?;

            inserted += 1;
        }
    }

    tx.commit().map_err(PipelineError::StorageWrite)?;

    info!(table = TABLE_NAME, rows = inserted, "replaced table contents");
    Ok(inserted)
}

pub fn verify_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn
        .query_row(&format!("SELECT COUNT(*) FROM {}", TABLE_NAME), [], |row| {
            row.get(0)
        })
        .map_err(|source| PipelineError::Query {
            query: "row count",
            source,
        })?;

    Ok(count)
}

/// Column names of the persisted table, in declaration order.
pub fn table_columns(conn: &Connection) -> Result<Vec<String>> {
    let query_err = |source| PipelineError::Query {
        query: "table columns",
        source,
    };

    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({})", TABLE_NAME))
        .map_err(query_err)?;

    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .map_err(query_err)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(query_err)?;

    Ok(columns)
}
