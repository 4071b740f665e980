use crate::{config::Config, upload};
use anyhow::{Context, Result};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use sqldb::{Database, history};

/// Opens the database named in the config and makes sure the tables exist.
pub async fn init(config: &Config) -> Result<Database> {
    let path = config.db_path.to_string_lossy();
    let db = Database::create(&*path)
        .await
        .with_context(|| format!("open database {path} failed"))?;

    history::new(&db).await.context("history table failed")?;
    Ok(db)
}

/// A history record as shown to clients.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub id: i64,
    pub original_url: String,
    pub processed_url: String,
    pub effect: String,
    pub created_at: String,
}

impl From<history::Record> for HistoryEntry {
    fn from(record: history::Record) -> Self {
        Self {
            id: record.id,
            original_url: upload::upload_url(&record.original_filename),
            processed_url: upload::processed_url(&record.processed_filename),
            effect: record.effect,
            created_at: record
                .created_at
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }
}
