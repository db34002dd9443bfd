use std::path::PathBuf;
use std::time::Duration;

/// Station configuration
///
/// # Environment variables
///
/// Every setting can be overridden through an environment variable:
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | DATA_DIR | /var/lib/dine-station | Database location |
/// | EXPORT_DIR | <DATA_DIR>/bills | Exported bill files |
/// | POLL_INTERVAL_MS | 2000 | Board refresh fallback interval |
/// | BILL_WIDTH | 42 | Bill page width in characters |
/// | TIMEZONE | Asia/Kolkata | Timestamps on bills |
/// | STATION_NAME | Full on Cafe | Bill header |
///
/// # Example
///
/// ```ignore
/// DATA_DIR=/data/station POLL_INTERVAL_MS=1000 my-station-app
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the station database
    pub data_dir: String,
    /// Directory exported bills are written to
    pub export_dir: String,
    /// Board refresh fallback interval (milliseconds)
    pub poll_interval_ms: u64,
    /// Bill page width in characters
    pub bill_width: usize,
    /// Business timezone for bill timestamps
    pub timezone: chrono_tz::Tz,
    /// Station name shown on bill headers
    pub station_name: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to their defaults.
    pub fn from_env() -> Self {
        let data_dir =
            std::env::var("DATA_DIR").unwrap_or_else(|_| "/var/lib/dine-station".into());
        let export_dir =
            std::env::var("EXPORT_DIR").unwrap_or_else(|_| format!("{}/bills", data_dir));

        Self {
            export_dir,
            poll_interval_ms: std::env::var("POLL_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2000),
            bill_width: std::env::var("BILL_WIDTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(42),
            timezone: std::env::var("TIMEZONE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(chrono_tz::Asia::Kolkata),
            station_name: std::env::var("STATION_NAME")
                .unwrap_or_else(|_| "Full on Cafe".into()),
            data_dir,
        }
    }

    /// Override the directories, keeping everything else from the
    /// environment
    ///
    /// Common in tests.
    pub fn with_overrides(data_dir: impl Into<String>, export_dir: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.data_dir = data_dir.into();
        config.export_dir = export_dir.into();
        config
    }

    /// Board refresh fallback interval
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Path of the station database file
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("station.redb")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
