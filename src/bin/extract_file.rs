//! Extract a birth record from a saved result page.
//!
//! Usage: `extract_file <page.html> [ubrn]`
//!
//! Prints the extraction as JSON. With `OUTPUT_DIR` set and a UBRN given,
//! the record is also written there.

use anyhow::{bail, Context, Result};
use birthscraper::{config::Config, output::write_record, HtmlDocument};
use std::{env, fs};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let mut args = env::args().skip(1);
    let Some(page) = args.next() else {
        bail!("usage: extract_file <page.html> [ubrn]");
    };
    let ubrn = args.next();

    let cfg = Config::from_env()?;
    let html = fs::read_to_string(&page).with_context(|| format!("reading {}", page))?;
    let doc = HtmlDocument::parse(&html, &cfg.result_table_selector)?;
    let extraction = cfg.extractor().extract(&doc);

    for anomaly in &extraction.anomalies {
        warn!(?anomaly, "anomaly in {}", page);
    }
    println!("{}", serde_json::to_string_pretty(&extraction)?);

    match (&cfg.output_dir, &ubrn) {
        (Some(dir), Some(ubrn)) if extraction.record.has_result() => {
            let path = write_record(dir, ubrn, &extraction.record)?;
            info!("saved {}", path.display());
        }
        (Some(_), Some(_)) => warn!("no result on page; nothing saved"),
        _ => {}
    }
    Ok(())
}
