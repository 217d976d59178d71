// src/output.rs

use anyhow::{Context, Result};
use chrono::Utc;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

use crate::extract::BirthRecord;

/// Write `record` as pretty JSON to `<dir>/<ubrn>_<timestamp>.json`.
/// Creates `dir` if needed and returns the written path.
pub fn write_record(dir: impl AsRef<Path>, ubrn: &str, record: &BirthRecord) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).with_context(|| format!("creating output directory {:?}", dir))?;

    let stem: String = ubrn
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    let stem = if stem.is_empty() { "record".to_string() } else { stem };
    let ts = Utc::now().format("%Y%m%dT%H%M%S%6f");
    let path = dir.join(format!("{}_{}.json", stem, ts));

    let json = serde_json::to_string_pretty(record).context("serializing birth record")?;
    fs::write(&path, json).with_context(|| format!("writing record {:?}", path))?;
    info!(path = %path.display(), "wrote birth record");
    Ok(path)
}
