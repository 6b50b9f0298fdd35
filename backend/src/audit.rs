//! Persistent record of sync attempts.
//!
//! The sheet itself only shows whether a row was synced. Everything else (why
//! a row was skipped, what the ticket API answered) ends up in the log and in
//! this table, so that an operator can look at failed rows after the fact.
//! Ignored edits are not recorded.

use crate::sync::{SyncError, SyncOutcome};
use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Connection};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_LIMIT: usize = 50;
pub const MAX_LIMIT: usize = 200;

#[derive(Error, Debug)]
#[error("Sync log error: {0}")]
pub struct AuditError(#[from] rusqlite::Error);

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SyncLogEntry {
    pub id: i64,
    pub recorded_at: String,
    pub sheet: String,
    pub row: i64,
    pub outcome: String,
    pub ticket_id: Option<String>,
    pub detail: String,
}

#[derive(Debug, Clone)]
pub struct SyncLog {
    path: PathBuf,
}

impl SyncLog {
    /// Opens the database and creates the table if needed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AuditError> {
        let log = SyncLog { path: path.into() };
        log.connect()?.execute_batch(
            "CREATE TABLE IF NOT EXISTS sync_log (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                recorded_at TEXT NOT NULL,
                sheet       TEXT NOT NULL,
                row_number  INTEGER NOT NULL,
                outcome     TEXT NOT NULL,
                ticket_id   TEXT,
                detail      TEXT NOT NULL
            );",
        )?;
        Ok(log)
    }

    fn connect(&self) -> Result<Connection, AuditError> {
        Ok(Connection::open(&self.path)?)
    }

    /// Stores the result of one handler run. Returns `false` when the result
    /// was an ignored edit and nothing was written.
    pub fn record(
        &self,
        sheet: &str,
        row: usize,
        result: &Result<SyncOutcome, SyncError>,
    ) -> Result<bool, AuditError> {
        let (outcome, ticket_id, detail) = match result {
            Ok(SyncOutcome::Ignored { .. }) => return Ok(false),
            Ok(synced @ SyncOutcome::Synced { id, .. }) => {
                ("synced", Some(id.to_string()), synced.to_string())
            }
            Err(e) => (e.kind(), None, e.to_string()),
        };

        let recorded_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        self.connect()?.execute(
            "INSERT INTO sync_log (recorded_at, sheet, row_number, outcome, ticket_id, detail)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![recorded_at, sheet, row as i64, outcome, ticket_id, detail],
        )?;
        Ok(true)
    }

    /// Newest entries first.
    pub fn recent(&self, limit: usize) -> Result<Vec<SyncLogEntry>, AuditError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, recorded_at, sheet, row_number, outcome, ticket_id, detail
             FROM sync_log ORDER BY id DESC LIMIT ?1",
        )?;
        let entries = stmt
            .query_map(params![limit.min(MAX_LIMIT) as i64], |row| {
                Ok(SyncLogEntry {
                    id: row.get(0)?,
                    recorded_at: row.get(1)?,
                    sheet: row.get(2)?,
                    row: row.get(3)?,
                    outcome: row.get(4)?,
                    ticket_id: row.get(5)?,
                    detail: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }
}
