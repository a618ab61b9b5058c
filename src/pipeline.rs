// 🔁 Pipeline - load → clean → persist → query, once per run
// One connection is opened here, lent to the store and the aggregator, and
// closed before the results are handed to the dashboard.

use crate::aggregate::{run_all, DashboardData};
use crate::cleaner::clean_records;
use crate::config::DashboardConfig;
use crate::db::{close_database, open_database, replace_records};
use crate::error::Result;
use crate::loader::load_csv;
use tracing::info;

pub fn run(config: &DashboardConfig) -> Result<DashboardData> {
    info!(path = %config.csv_path.display(), "loading dataset");
    let raw = load_csv(&config.csv_path)?;

    let records = clean_records(&raw)?;
    info!(rows = records.len(), "cleaned dataset");

    // Dropped on any early return below, which closes the file
    let mut conn = open_database(&config.db_path)?;
    let inserted = replace_records(&mut conn, &records)?;
    info!(path = %config.db_path.display(), rows = inserted, "persisted dataset");

    let data = run_all(&conn)?;
    close_database(conn)?;

    info!(
        industries = data.industry_counts.len(),
        countries = data.top_countries.len(),
        "aggregates ready"
    );

    Ok(data)
}
