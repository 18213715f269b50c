use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One line of the operator transcript as stored.
///
/// Records are append-only. The game core writes them through a
/// [`TranscriptSink`](crate::db::TranscriptSink) and never reads them back;
/// only the `history` command does.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommandRecord {
    pub id: i64,
    /// Run that produced the record. `None` for rows written before session
    /// ids were tracked.
    pub session_id: Option<Uuid>,
    pub timestamp: DateTime<Utc>,
    /// The operator's command, or an event label such as `REWARD` or `ENIGMA`.
    pub command: String,
    pub response: String,
}

/// Input for appending a transcript record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCommandRecord {
    pub session_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub command: String,
    pub response: String,
}

impl NewCommandRecord {
    /// Stamp a record with the current time.
    pub fn now(session_id: Uuid, command: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            session_id,
            timestamp: Utc::now(),
            command: command.into(),
            response: response.into(),
        }
    }
}
