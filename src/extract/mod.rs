// src/extract/mod.rs

//! Turns a verification result page into a [`BirthRecord`].
//!
//! Extraction is total: a page without the expected tables yields an empty
//! record, an unknown month yields an `undefined` placeholder. Both are
//! reported as [`Anomaly`] values alongside the record so the caller can
//! decide whether to retry the upstream automation.

pub mod dates;
pub mod document;
pub mod layout;
pub mod normalize;
pub mod record;
pub mod words;

#[cfg(test)]
pub(crate) mod fixtures;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use dates::{canonicalize_date, date_to_words};
pub use document::{HtmlDocument, ResultDocument, ResultTable};
pub use layout::{FieldSpec, Transform, BIRTH_RECORD_LAYOUT, REQUIRED_TABLES};
pub use normalize::{title_case, with_country_suffix, NormalizeMode};
pub use record::{BirthRecord, Field};

/// Something odd about the page that did not stop extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anomaly {
    /// Fewer result tables than the layout needs; the record is empty.
    StructuralMismatch { tables_found: usize },
    /// A date cell carried a month name outside the month table.
    UnrecognizedMonthName { field: String, token: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub record: BirthRecord,
    pub anomalies: Vec<Anomaly>,
}

impl Extraction {
    /// No anomalies and a birth number was read.
    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty() && self.record.has_result()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ExtractorConfig {
    pub normalize: NormalizeMode,
    pub layout: &'static [FieldSpec],
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            normalize: NormalizeMode::default(),
            layout: BIRTH_RECORD_LAYOUT,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn with_mode(normalize: NormalizeMode) -> Self {
        Self::new(ExtractorConfig {
            normalize,
            ..ExtractorConfig::default()
        })
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Read every layout field out of `doc`.
    pub fn extract<D: ResultDocument + ?Sized>(&self, doc: &D) -> Extraction {
        let tables = doc.result_tables();
        if tables.len() < REQUIRED_TABLES {
            warn!(
                tables_found = tables.len(),
                required = REQUIRED_TABLES,
                "result tables missing; returning empty record"
            );
            return Extraction {
                record: BirthRecord::default(),
                anomalies: vec![Anomaly::StructuralMismatch {
                    tables_found: tables.len(),
                }],
            };
        }

        let mut record = BirthRecord::default();
        let mut anomalies = Vec::new();

        for spec in self.config.layout {
            let raw = tables
                .get(spec.table)
                .and_then(|t| t.cell(spec.row, spec.cell))
                .unwrap_or_default();
            let value = self.transform(spec, raw, &mut anomalies);
            record.set(spec.field, value);
        }

        let words = match record.get(Field::DateOfBirth) {
            Some(dob) if !dob.is_empty() => date_to_words(dob).unwrap_or_else(|| {
                warn!(date_of_birth = dob, "date of birth cannot be written out");
                String::new()
            }),
            _ => String::new(),
        };
        record.set(Field::DateOfBirthInWords, words);

        debug!(
            birth_number = record.get(Field::BirthNumber).unwrap_or_default(),
            anomalies = anomalies.len(),
            "extracted birth record"
        );
        Extraction { record, anomalies }
    }

    fn transform(&self, spec: &FieldSpec, raw: &str, anomalies: &mut Vec<Anomaly>) -> String {
        let mode = self.config.normalize;
        match spec.transform {
            Transform::Date => canonicalize_date(raw, spec.field.key(), anomalies),
            Transform::Text => mode.apply(raw),
            Transform::PlaceBn => {
                with_country_suffix(&mode.apply(raw), normalize::COUNTRY_BN, false)
            }
            Transform::PlaceEn => {
                with_country_suffix(&mode.apply(raw), normalize::COUNTRY_EN, true)
            }
        }
    }
}
