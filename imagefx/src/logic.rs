//! The commands behind the CLI: process, history and housekeeping.

use crate::{cli::Command, config::Config, db::HistoryEntry, upload};
use anyhow::{Context, Result, bail};
use image_effect::EffectTag;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use sqldb::{Database, history};
use std::{fs, path::Path};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProcessOutcome {
    pub message: String,
    pub processed_filename: String,
    pub url: String,
    pub effect: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EffectInfo {
    pub name: &'static str,
}

pub async fn run(command: Command, config: &Config, db: &Database) -> Result<()> {
    match command {
        Command::Process { file, effect } => {
            let outcome = process(config, db, &file, &effect).await?;
            print_json(&outcome)
        }
        Command::History { limit } => print_json(&list_history(db, limit).await?),
        Command::Effects => print_json(&effects()),
        Command::Remove { id } => {
            if !history::delete(db, id).await? {
                bail!("No history record with id {id}");
            }
            info!("removed history record {id}");
            Ok(())
        }
        Command::Clear => {
            let count = history::delete_all(db).await?;
            info!("removed {count} history records");
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn effects() -> Vec<EffectInfo> {
    EffectTag::all()
        .iter()
        .map(|tag| EffectInfo { name: tag.name() })
        .collect()
}

/// Store `source` as an upload, apply `effect` and record the result.
///
/// On failure the stored upload is removed again and no history record is
/// written.
pub async fn process(
    config: &Config,
    db: &Database,
    source: &Path,
    effect: &str,
) -> Result<ProcessOutcome> {
    let stored = upload::store(config, source)?;

    let ext = upload::extension(&stored.filename).unwrap_or_else(|| "png".to_string());
    let processed_filename = upload::unique_filename(&ext);

    let input = config.upload_dir.join(&stored.filename);
    let output = config.processed_dir.join(&processed_filename);

    let success = {
        let (input, output, effect) = (input.clone(), output.clone(), effect.to_string());
        tokio::task::spawn_blocking(move || image_effect::process(&input, &output, &effect))
            .await
            .context("image processing task failed")?
    };

    if !success {
        if let Err(e) = fs::remove_file(&input) {
            warn!("remove upload {} failed: {e}", input.display());
        }
        bail!("Failed to process image");
    }

    let record = history::NewRecord::new(&stored.filename, &processed_filename, effect);
    history::insert(db, &record).await?;

    Ok(ProcessOutcome {
        message: "Image processed successfully".to_string(),
        url: upload::processed_url(&processed_filename),
        processed_filename,
        effect: effect.to_string(),
    })
}

/// History newest first, optionally capped at `limit` records.
pub async fn list_history(db: &Database, limit: Option<u32>) -> Result<Vec<HistoryEntry>> {
    let records = match limit {
        Some(limit) => history::select_latest(db, limit).await?,
        None => history::select_all(db).await?,
    };

    Ok(records.into_iter().map(HistoryEntry::from).collect())
}
