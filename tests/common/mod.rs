// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use saldo::application::ChatService;
use saldo::Repository;
use tempfile::TempDir;

/// Helper to create a rehydrated (and therefore seeded) service with a
/// temporary database
pub async fn test_service() -> Result<(ChatService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = ChatService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Helper to create a service over a genuinely empty log, skipping
/// rehydration so the illustrative seeds are not inserted. The reply
/// pacing delay is zeroed so conversational tests run without sleeping.
pub async fn bare_service() -> Result<(ChatService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());
    let repo = Repository::init(&db_url).await?;
    let service = ChatService::new(repo).with_reply_delay(Duration::ZERO);
    Ok((service, temp_dir))
}

/// Helper to parse a date string into DateTime<Utc>
pub fn parse_date(date_str: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}
