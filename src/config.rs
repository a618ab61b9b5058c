// Run configuration. Fixed defaults; the dashboard reads no files, flags or
// environment variables of its own.

use std::path::PathBuf;

pub const DEFAULT_CSV_PATH: &str = "Billionaires Statistics Dataset.csv";
pub const DEFAULT_DB_PATH: &str = "billion_dat.db";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Source dataset
    pub csv_path: PathBuf,
    /// SQLite file, rebuilt on every run
    pub db_path: PathBuf,
    /// Address the dashboard listens on
    pub bind_addr: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();

        assert_eq!(config.csv_path, PathBuf::from("Billionaires Statistics Dataset.csv"));
        assert_eq!(config.db_path, PathBuf::from("billion_dat.db"));
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
    }
}
