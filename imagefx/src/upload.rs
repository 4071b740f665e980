//! Stores incoming images under collision-free generated names.

use crate::config::Config;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StoredUpload {
    pub filename: String,
    pub original_name: String,
    pub url: String,
}

/// Reduce a user-supplied name to a safe file name.
///
/// Directory components are dropped, whitespace becomes `_`, anything other
/// than ASCII letters, digits, `.`, `_` and `-` is removed, and leading or
/// trailing `.`/`_` are trimmed. May return an empty string.
pub fn secure_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();

    let cleaned: String = base
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    cleaned.trim_matches(['.', '_']).to_string()
}

/// Lower-cased extension after the last `.`, if any.
pub fn extension(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }

    Some(ext.to_ascii_lowercase())
}

pub fn unique_filename(ext: &str) -> String {
    format!("{}.{ext}", Uuid::new_v4().simple())
}

pub fn upload_url(filename: &str) -> String {
    format!("/uploads/{filename}")
}

pub fn processed_url(filename: &str) -> String {
    format!("/processed/{filename}")
}

/// Copy `source` into the upload directory under a generated name.
pub fn store(config: &Config, source: &Path) -> Result<StoredUpload> {
    let raw_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let original_name = secure_filename(&raw_name);
    if original_name.is_empty() {
        bail!("No selected file");
    }

    let ext = match extension(&original_name) {
        Some(ext) if config.is_allowed_extension(&ext) => ext,
        _ => bail!("File type not allowed: {original_name}"),
    };

    let size = fs::metadata(source)
        .with_context(|| format!("read {} failed", source.display()))?
        .len();
    if size > config.max_upload_size {
        bail!(
            "File too large: {size} bytes (limit {} bytes)",
            config.max_upload_size
        );
    }

    let filename = unique_filename(&ext);
    let dest = config.upload_dir.join(&filename);
    fs::copy(source, &dest)
        .with_context(|| format!("save upload to {} failed", dest.display()))?;

    log::info!("stored upload {original_name} as {filename}");

    Ok(StoredUpload {
        url: upload_url(&filename),
        filename,
        original_name,
    })
}
