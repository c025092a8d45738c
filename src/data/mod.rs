// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between a CSV file on disk and the text/label
// columns the trainer fits on:
//
//   generator.rs    → writes a synthetic, seeded ticket corpus
//       │
//       ▼
//   loader.rs       → reads `text,label` rows into CorpusRecords
//       │
//       ▼
//   splitter.rs     → stratified 80/20 train/test split
//       │
//       ▼
//   preprocessor.rs → normalises and tokenises text for TF-IDF

/// Synthetic, seed-deterministic ticket corpus
pub mod generator;

/// Reads the CSV corpus
pub mod loader;

/// Stratified train/test split
pub mod splitter;

/// Text cleaning and word tokenisation
pub mod preprocessor;
