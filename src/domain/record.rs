// ============================================================
// Layer 3 — Corpus Record
// ============================================================
// One row of the training corpus. The CSV header is `text,label`
// and serde maps the columns onto these fields by name.

use serde::{Deserialize, Serialize};

/// A single labelled ticket text.
///
/// Invariants (enforced by the loader, not the type):
///   - `text` is non-empty
///   - `label` comes from a finite, known set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusRecord {
    /// The raw ticket text
    pub text: String,

    /// The category the ticket belongs to
    pub label: String,
}

impl CorpusRecord {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text:  text.into(),
            label: label.into(),
        }
    }
}
