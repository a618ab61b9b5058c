// Billionaire Dashboard - Core Library
// Exposes the pipeline stages and the dashboard for the binary and tests

pub mod error;
pub mod config;
pub mod schema;     // Source/cleaned schema contract
pub mod loader;     // CSV → raw table
pub mod cleaner;    // Drop, fill, coerce
pub mod db;         // SQLite store
pub mod aggregate;  // Four dashboard queries
pub mod charts;     // Bar chart models
pub mod svg;        // Chart rendering
pub mod page;       // HTML layout
pub mod pipeline;

// Only compile the web server when the server feature is enabled
#[cfg(feature = "server")]
pub mod dashboard;

// Re-export commonly used types
pub use error::{PipelineError, Result};
pub use config::DashboardConfig;
pub use loader::{load_csv, load_reader, RawRecord, RawTable};
pub use cleaner::{clean_record, clean_records, BillionaireRecord};
pub use db::{
    open_database, close_database, replace_records, verify_count, table_columns, TABLE_NAME,
};
pub use aggregate::{
    industry_counts, gender_industry_counts, top_countries, average_net_worth, run_all,
    IndustryCount, GenderIndustryCount, CountryCount, IndustryAverage, Gender, DashboardData,
};
pub use charts::{build_dashboard, BarChart, Dashboard, Series, Palette, Rgb};
pub use page::render_page;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
