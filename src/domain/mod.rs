// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs and traits that define the core concepts
// of the classifier:
//
//   record.rs     — one labelled corpus row (text, label)
//   prediction.rs — one classification result (label, confidence)
//   traits.rs     — CorpusSource, Predict, PredictWithConfidence
//
// Rules for this layer:
//   - NO Burn framework types
//   - NO file I/O or network calls
//   - Only plain structs, enums, and traits

/// A labelled text row from the corpus
pub mod record;

/// The result of classifying one text
pub mod prediction;

/// Core abstractions (traits) that other layers implement
pub mod traits;
