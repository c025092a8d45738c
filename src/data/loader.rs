// ============================================================
// Layer 4 — Corpus Loader
// ============================================================
// Reads the labelled corpus from a CSV file using the csv crate.
//
// Expected layout (header row required, column order free):
//
//   text,label
//   "No entiendo este cargo en mi factura. Ticket #12",billing
//   Mi pedido no ha llegado. Ticket #981,shipping_delivery
//
// Quoted fields may contain commas and newlines; the csv crate
// handles the quoting rules so texts round-trip unchanged.
//
// Failure modes:
//   - file missing           → ClassifierError::NotFound
//   - empty text or label    → ClassifierError::InvalidInput
//   - malformed CSV          → ClassifierError::Csv

use std::path::{Path, PathBuf};

use crate::domain::record::CorpusRecord;
use crate::domain::traits::CorpusSource;
use crate::error::{ClassifierError, Result};

/// Loads every record from a `text,label` CSV file.
pub struct CsvCorpusLoader {
    path: PathBuf,
}

impl CsvCorpusLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CorpusSource for CsvCorpusLoader {
    fn load_all(&self) -> Result<Vec<CorpusRecord>> {
        if !self.path.exists() {
            return Err(ClassifierError::not_found("corpus", &self.path));
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();

        for (row, result) in reader.deserialize::<CorpusRecord>().enumerate() {
            let record = result?;
            // +2: one for the header, one for 1-based line numbers
            let line = row + 2;

            if record.text.trim().is_empty() {
                return Err(ClassifierError::InvalidInput(format!(
                    "empty text at line {line} of '{}'",
                    self.path.display()
                )));
            }
            if record.label.trim().is_empty() {
                return Err(ClassifierError::InvalidInput(format!(
                    "empty label at line {line} of '{}'",
                    self.path.display()
                )));
            }
            records.push(record);
        }

        tracing::info!(
            "Loaded {} records from '{}'",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}
