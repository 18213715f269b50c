mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{Connection, Row};
use uuid::Uuid;

use crate::models::*;

/// Append-only destination for transcript records.
///
/// The game core only ever appends. An append must be durable once it
/// returns; `close` is called once when the session ends.
pub trait TranscriptSink {
    fn append(&mut self, record: NewCommandRecord) -> Result<()>;

    fn close(&mut self) -> Result<()>;
}

/// SQLite transcript store.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory {}", parent.display())
            })?;
        }
        let conn = Connection::open(&path)
            .with_context(|| format!("Failed to open database {}", path.display()))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "FULL")?;
        tracing::debug!(path = %path.display(), "Opened transcript database");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    // ============================================================
    // Transcript operations
    // ============================================================

    pub fn append_record(&self, input: NewCommandRecord) -> Result<CommandRecord> {
        let conn = self.conn.lock().expect("database lock poisoned");

        conn.execute(
            "INSERT INTO logs (timestamp, command, response, session_id) VALUES (?, ?, ?, ?)",
            (
                input.timestamp.to_rfc3339(),
                &input.command,
                &input.response,
                input.session_id.to_string(),
            ),
        )
        .context("Failed to append transcript record")?;

        Ok(CommandRecord {
            id: conn.last_insert_rowid(),
            session_id: Some(input.session_id),
            timestamp: input.timestamp,
            command: input.command,
            response: input.response,
        })
    }

    /// The most recent `limit` records, oldest first.
    pub fn recent_records(&self, limit: usize) -> Result<Vec<CommandRecord>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, session_id, timestamp, command, response FROM (
                SELECT id, session_id, timestamp, command, response
                FROM logs ORDER BY id DESC LIMIT ?
             ) ORDER BY id",
        )?;

        let records = stmt
            .query_map([limit as i64], record_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    pub fn session_records(&self, session_id: Uuid) -> Result<Vec<CommandRecord>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, session_id, timestamp, command, response
             FROM logs WHERE session_id = ? ORDER BY id",
        )?;

        let records = stmt
            .query_map([session_id.to_string()], record_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    pub fn count_records(&self) -> Result<usize> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM logs", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl TranscriptSink for Database {
    fn append(&mut self, record: NewCommandRecord) -> Result<()> {
        let stored = self.append_record(record)?;
        tracing::trace!(id = stored.id, command = %stored.command, "Transcript record appended");
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        // No-op for in-memory databases, which have no WAL.
        conn.query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(()))
            .context("Failed to checkpoint transcript database")?;
        tracing::debug!("Transcript database closed");
        Ok(())
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<CommandRecord> {
    Ok(CommandRecord {
        id: row.get(0)?,
        session_id: row
            .get::<_, Option<String>>(1)?
            .and_then(|s| Uuid::parse_str(&s).ok()),
        timestamp: parse_datetime(row.get::<_, String>(2)?),
        command: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        response: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
    })
}

/// Parse a stored timestamp. Older transcripts hold naive local ISO-8601
/// strings; those are read as UTC.
fn parse_datetime(s: String) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.and_utc()))
        .unwrap_or_default()
}
