// src/config.rs

use anyhow::{Context, Result};
use std::{env, path::PathBuf};

use crate::extract::{Extractor, NormalizeMode};
use crate::verify::{SiteConfig, DEFAULT_SITE_URL};

/// Runtime settings, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `PORT`, default 8080.
    pub port: u16,
    /// `LOG_LEVEL`, default `info`.
    pub log_level: String,
    /// `NORMALIZE_MODE`: `verbatim` (default) or `title`.
    pub normalize: NormalizeMode,
    /// `RESULT_TABLE_SELECTOR`, default `table.table`.
    pub result_table_selector: String,
    /// `OUTPUT_DIR`; when unset records are not written to disk.
    pub output_dir: Option<PathBuf>,
    /// `SITE_URL`, the lookup form.
    pub site_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            log_level: "info".to_string(),
            normalize: NormalizeMode::Verbatim,
            result_table_selector: "table.table".to_string(),
            output_dir: None,
            site_url: DEFAULT_SITE_URL.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| get(key).filter(|v| !v.trim().is_empty());
        let mut cfg = Config::default();

        if let Some(port) = get("PORT") {
            cfg.port = port
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got {:?}", port))?;
        }
        if let Some(level) = get("LOG_LEVEL") {
            cfg.log_level = level;
        }
        if let Some(mode) = get("NORMALIZE_MODE") {
            cfg.normalize = mode.parse().context("reading NORMALIZE_MODE")?;
        }
        if let Some(selector) = get("RESULT_TABLE_SELECTOR") {
            cfg.result_table_selector = selector;
        }
        cfg.output_dir = get("OUTPUT_DIR").map(PathBuf::from);
        if let Some(url) = get("SITE_URL") {
            cfg.site_url = url;
        }
        Ok(cfg)
    }

    pub fn extractor(&self) -> Extractor {
        Extractor::with_mode(self.normalize)
    }

    pub fn site(&self) -> SiteConfig {
        SiteConfig {
            url: self.site_url.clone(),
            result_table: self.result_table_selector.clone(),
            ..SiteConfig::default()
        }
    }
}
