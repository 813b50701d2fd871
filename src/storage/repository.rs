use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::domain::{month_label, Kind, Message};

use super::MIGRATION_001_INITIAL;

/// Fixed key under which the whole message log is persisted.
pub const LOG_KEY: &str = "financial-messages";

/// Repository over an opaque string-keyed get/set store backed by SQLite.
/// The message log is written as one JSON blob on every mutation and read
/// back once at startup.
pub struct Repository {
    pool: SqlitePool,
}

/// Wire representation of one message inside the persisted blob.
/// The month partition label is intentionally absent: it is re-derived from
/// the stored timestamp on load, never trusted from the blob.
#[derive(Debug, Serialize, Deserialize)]
struct StoredMessage {
    id: Uuid,
    sequence: i64,
    text: String,
    kind: String,
    amount_cents: i64,
    timestamp: String,
}

impl StoredMessage {
    fn from_message(msg: &Message) -> Self {
        Self {
            id: msg.id,
            sequence: msg.sequence,
            text: msg.text.clone(),
            kind: msg.kind.as_str().to_string(),
            amount_cents: msg.amount_cents,
            timestamp: msg.timestamp.to_rfc3339(),
        }
    }

    /// Validated conversion back to the domain type. Any unknown kind,
    /// negative amount or malformed timestamp rejects the record.
    fn into_message(self) -> Option<Message> {
        let kind = Kind::from_str(&self.kind)?;
        if self.amount_cents < 0 {
            return None;
        }
        let timestamp = DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()?
            .with_timezone(&Utc);

        Some(Message {
            id: self.id,
            sequence: self.sequence,
            text: self.text,
            kind,
            amount_cents: self.amount_cents,
            timestamp,
            month: month_label(timestamp),
        })
    }
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given path.
    /// Creates the database file if it doesn't exist.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    // ========================
    // Key-value operations
    // ========================

    /// Get the value stored under a key, if any.
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM kv WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to read key")?;

        Ok(row.map(|row| row.get("value")))
    }

    /// Set the value stored under a key, replacing any previous value.
    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO kv (key, value) VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .context("Failed to write key")?;
        Ok(())
    }

    // ========================
    // Message log operations
    // ========================

    /// Persist the whole message log as one JSON blob under the fixed key.
    pub async fn save_log(&self, messages: &[Message]) -> Result<()> {
        let stored: Vec<StoredMessage> = messages.iter().map(StoredMessage::from_message).collect();
        let blob = serde_json::to_string(&stored).context("Failed to serialize message log")?;
        self.set(LOG_KEY, &blob).await
    }

    /// Load the message log from the fixed key.
    ///
    /// Fails closed: a missing blob, malformed JSON, or any record that does
    /// not validate yields an empty log instead of propagating bad data.
    pub async fn load_log(&self) -> Result<Vec<Message>> {
        let Some(blob) = self.get(LOG_KEY).await? else {
            return Ok(Vec::new());
        };

        let Ok(stored) = serde_json::from_str::<Vec<StoredMessage>>(&blob) else {
            return Ok(Vec::new());
        };

        let mut messages = Vec::with_capacity(stored.len());
        for record in stored {
            match record.into_message() {
                Some(msg) => messages.push(msg),
                None => return Ok(Vec::new()),
            }
        }

        Ok(messages)
    }
}
