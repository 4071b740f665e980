//! Append-only log of processed images.
//!
//! Each row records the stored upload, the processed output and the effect
//! that produced it. Rows are listed newest first.

use super::Database;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const TABLE: &str = "history";

/// A persisted history row.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Record {
    pub id: i64,
    pub original_filename: String,
    pub processed_filename: String,
    pub effect: String,
    pub created_at: DateTime<Utc>,
}

/// The caller-supplied part of a [`Record`]; id and timestamp are assigned on insert.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub original_filename: String,
    pub processed_filename: String,
    pub effect: String,
}

impl NewRecord {
    pub fn new(
        original_filename: impl Into<String>,
        processed_filename: impl Into<String>,
        effect: impl Into<String>,
    ) -> Self {
        Self {
            original_filename: original_filename.into(),
            processed_filename: processed_filename.into(),
            effect: effect.into(),
        }
    }
}

/// Create the history table if it doesn't exist
///
/// Schema:
/// - `id`: INTEGER PRIMARY KEY (auto-incrementing)
/// - `original_filename`, `processed_filename`: TEXT NOT NULL
/// - `effect`: TEXT NOT NULL
/// - `created_at`: TEXT NOT NULL (RFC 3339, UTC)
pub async fn new(db: &Database) -> Result<()> {
    sqlx::query(&format!(
        "CREATE TABLE IF NOT EXISTS {TABLE} (
             id INTEGER PRIMARY KEY,
             original_filename TEXT NOT NULL,
             processed_filename TEXT NOT NULL,
             effect TEXT NOT NULL,
             created_at TEXT NOT NULL
             )"
    ))
    .execute(db.pool())
    .await?;

    Ok(())
}

/// Insert a record stamped with the current time.
///
/// # Returns
/// The id assigned to the new row.
pub async fn insert(db: &Database, record: &NewRecord) -> Result<i64> {
    insert_at(db, record, Utc::now()).await
}

/// Insert a record with an explicit creation time.
pub async fn insert_at(db: &Database, record: &NewRecord, created_at: DateTime<Utc>) -> Result<i64> {
    let result = sqlx::query(&format!(
        "INSERT INTO {TABLE} (original_filename, processed_filename, effect, created_at)
         VALUES (?, ?, ?, ?)"
    ))
    .bind(&record.original_filename)
    .bind(&record.processed_filename)
    .bind(&record.effect)
    .bind(created_at)
    .execute(db.pool())
    .await
    .with_context(|| format!("insert {} record failed", record.effect))?;

    Ok(result.last_insert_rowid())
}

/// Select a record by id
///
/// # Errors
/// Returns an error if the record does not exist or the query fails.
pub async fn select(db: &Database, id: i64) -> Result<Record> {
    Ok(
        sqlx::query_as::<_, Record>(&format!("SELECT * FROM {TABLE} WHERE id=?"))
            .bind(id)
            .fetch_one(db.pool())
            .await?,
    )
}

/// Select every record, newest first.
pub async fn select_all(db: &Database) -> Result<Vec<Record>> {
    Ok(sqlx::query_as::<_, Record>(&format!(
        "SELECT * FROM {TABLE} ORDER BY created_at DESC, id DESC"
    ))
    .fetch_all(db.pool())
    .await?)
}

/// Select at most `limit` records, newest first.
pub async fn select_latest(db: &Database, limit: u32) -> Result<Vec<Record>> {
    Ok(sqlx::query_as::<_, Record>(&format!(
        "SELECT * FROM {TABLE} ORDER BY created_at DESC, id DESC LIMIT ?"
    ))
    .bind(limit)
    .fetch_all(db.pool())
    .await?)
}

/// Delete a record by id
///
/// # Returns
/// Whether a row was removed.
pub async fn delete(db: &Database, id: i64) -> Result<bool> {
    let result = sqlx::query(&format!("DELETE FROM {TABLE} WHERE id=?"))
        .bind(id)
        .execute(db.pool())
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete all records
///
/// # Warning
/// This operation removes all data from the table and cannot be undone.
pub async fn delete_all(db: &Database) -> Result<u64> {
    let result = sqlx::query(&format!("DELETE FROM {TABLE}"))
        .execute(db.pool())
        .await?;

    Ok(result.rows_affected())
}

pub async fn row_counts(db: &Database) -> Result<i64> {
    let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {TABLE}"))
        .fetch_one(db.pool())
        .await?;

    Ok(count.0)
}
