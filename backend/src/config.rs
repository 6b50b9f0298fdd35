use log::{info, warn};
use std::{env, fmt::Display, path::PathBuf, str::FromStr};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("Invalid {key} value: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Runtime settings, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Base URL of the ticket API, without a trailing slash.
    pub ticket_api_base_url: String,
    /// Only edits on this sheet trigger a sync.
    pub sheet_name: String,
    /// 1-based row holding the column titles.
    pub header_row: usize,
    pub sheet_csv_path: PathBuf,
    pub sync_log_db: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("TICKET_API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("TICKET_API_BASE_URL"))?;

        let header_row: usize = try_load(&lookup, "SHEET_HEADER_ROW", "1")?;
        if header_row == 0 {
            return Err(ConfigError::Invalid {
                key: "SHEET_HEADER_ROW",
                message: "rows are numbered from 1".to_string(),
            });
        }

        Ok(Self {
            host: try_load(&lookup, "SYNC_HOST", "127.0.0.1")?,
            port: try_load(&lookup, "SYNC_PORT", "8080")?,
            ticket_api_base_url: base_url.trim().trim_end_matches('/').to_string(),
            sheet_name: try_load(&lookup, "SHEET_NAME", "Tickets")?,
            header_row,
            sheet_csv_path: try_load(&lookup, "SHEET_CSV_PATH", "tickets.csv")?,
            sync_log_db: try_load(&lookup, "SYNC_LOG_DB", "sheet_sync.sqlite")?,
        })
    }

    pub fn ticket_endpoint(&self) -> String {
        format!("{}/tickets/from-sheet", self.ticket_api_base_url)
    }
}

fn try_load<F, T>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    lookup(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            ConfigError::Invalid {
                key,
                message: e.to_string(),
            }
        })
}
