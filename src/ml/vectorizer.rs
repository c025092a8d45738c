// ============================================================
// Layer 5 — TF-IDF Vectorizer
// ============================================================
// Converts ticket text into a sparse, L2-normalised TF-IDF vector
// over unigrams and bigrams.
//
// Fitting (on the training texts only):
//   1. tokenise each text with the Preprocessor
//   2. build n-grams for n in ngram_min..=ngram_max
//      ("mi cuenta bloqueada" → "mi", "cuenta", "bloqueada",
//       "mi cuenta", "cuenta bloqueada")
//   3. count document frequency (df) of every n-gram
//   4. drop n-grams with df < min_df
//   5. sort the survivors → column index
//   6. idf[t] = ln((1 + n_docs) / (1 + df[t])) + 1
//
// Transforming:
//   tf-idf[t] = count(t in text) * idf[t], then divide by the
//   L2 norm so every non-empty vector has length 1. Terms that
//   were not in the fitted vocabulary are ignored.
//
// Reference: Manning, Raghavan & Schütze (2008) Introduction to
//            Information Retrieval, §6.2–6.3

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::data::preprocessor::Preprocessor;
use crate::error::{ClassifierError, Result};

/// Sparse feature vector: (column, value) pairs sorted by column.
pub type SparseVector = Vec<(usize, f32)>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TfidfConfig {
    /// Smallest n-gram length (1 = unigrams)
    pub ngram_min: usize,
    /// Largest n-gram length (2 = up to bigrams)
    pub ngram_max: usize,
    /// Minimum number of training documents a term must appear in
    pub min_df: usize,
}

impl Default for TfidfConfig {
    fn default() -> Self {
        Self { ngram_min: 1, ngram_max: 2, min_df: 2 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    config:     TfidfConfig,
    /// term → column index (sorted term order)
    vocabulary: BTreeMap<String, usize>,
    /// idf weight per column
    idf:        Vec<f32>,
}

impl TfidfVectorizer {
    /// Learn vocabulary and idf weights from `texts`.
    pub fn fit<S: AsRef<str>>(texts: &[S], config: TfidfConfig) -> Result<Self> {
        if config.ngram_min == 0 || config.ngram_min > config.ngram_max {
            return Err(ClassifierError::InvalidInput(format!(
                "invalid n-gram range {}..={}",
                config.ngram_min, config.ngram_max
            )));
        }

        let preprocessor = Preprocessor::new();
        let n_docs = texts.len();

        // ── Document frequency of every n-gram ────────────────────────────────
        let mut df: HashMap<String, usize> = HashMap::new();
        for text in texts {
            let terms: HashSet<String> =
                analyze(&preprocessor, text.as_ref(), &config).into_iter().collect();
            for term in terms {
                *df.entry(term).or_insert(0) += 1;
            }
        }

        // ── Prune rare terms, assign sorted column indices ────────────────────
        let kept: BTreeMap<String, usize> = df
            .into_iter()
            .filter(|(_, count)| *count >= config.min_df)
            .collect();

        if kept.is_empty() {
            return Err(ClassifierError::InvalidInput(format!(
                "no terms appear in at least {} of {} training documents",
                config.min_df, n_docs
            )));
        }

        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(kept.len());
        for (col, (term, doc_freq)) in kept.into_iter().enumerate() {
            let weight = ((1.0 + n_docs as f64) / (1.0 + doc_freq as f64)).ln() + 1.0;
            idf.push(weight as f32);
            vocabulary.insert(term, col);
        }

        tracing::info!(
            "TF-IDF fitted: {} terms from {} documents (n-grams {}..={}, min_df={})",
            vocabulary.len(),
            n_docs,
            config.ngram_min,
            config.ngram_max,
            config.min_df
        );

        Ok(Self { config, vocabulary, idf })
    }

    /// Check the invariants `transform` relies on; a deserialised
    /// vectorizer that fails them is a corrupt artifact.
    pub fn validate(&self) -> Result<()> {
        let TfidfConfig { ngram_min, ngram_max, .. } = self.config;
        if ngram_min == 0 || ngram_min > ngram_max {
            return Err(ClassifierError::CorruptArtifact(format!(
                "invalid n-gram range {ngram_min}..={ngram_max}"
            )));
        }
        if let Some((term, &col)) = self.vocabulary.iter().find(|(_, &col)| col >= self.idf.len()) {
            return Err(ClassifierError::CorruptArtifact(format!(
                "term '{term}' maps to column {col} but only {} idf weights exist",
                self.idf.len()
            )));
        }
        Ok(())
    }

    /// Map one text to its L2-normalised TF-IDF vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        let preprocessor = Preprocessor::new();

        let mut counts: BTreeMap<usize, f32> = BTreeMap::new();
        for term in analyze(&preprocessor, text, &self.config) {
            if let Some(&col) = self.vocabulary.get(&term) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(col, tf)| (col, tf * self.idf[col]))
            .collect();

        let norm = vector.iter().map(|(_, v)| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, v) in vector.iter_mut() {
                *v /= norm;
            }
        }
        vector
    }

    pub fn transform_all<S: AsRef<str>>(&self, texts: &[S]) -> Vec<SparseVector> {
        texts.iter().map(|t| self.transform(t.as_ref())).collect()
    }

    /// Number of feature columns.
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }
}

/// Tokens → n-grams for every length in the configured range.
fn analyze(preprocessor: &Preprocessor, text: &str, config: &TfidfConfig) -> Vec<String> {
    let tokens = preprocessor.tokenize(text);
    let mut terms = Vec::new();
    for n in config.ngram_min..=config.ngram_max {
        if n > tokens.len() {
            break;
        }
        terms.extend(tokens.windows(n).map(|w| w.join(" ")));
    }
    terms
}
