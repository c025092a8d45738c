// ============================================================
// Layer 5 — ML Layer
// ============================================================
// Feature extraction, model fitting and prediction. Burn code
// is confined to model.rs and trainer.rs; the fitted pipeline
// carries plain Vec<f32> parameters so loading and predicting
// never touch a tensor backend.
//
//   vectorizer.rs — TF-IDF over unigrams + bigrams, min_df pruning
//   model.rs      — Burn logistic regression module
//   trainer.rs    — full-batch Adam fitting loop
//   evaluation.rs — accuracy and macro-F1
//   pipeline.rs   — TicketPipeline: vectorizer + fitted head
//   inferencer.rs — predict_one and the loaded-model wrapper

/// Text → sparse TF-IDF features
pub mod vectorizer;

/// Burn logistic regression module
pub mod model;

/// Fitting loop with Adam and early stopping
pub mod trainer;

/// Held-out accuracy and macro F1
pub mod evaluation;

/// The persisted, fitted text → label pipeline
pub mod pipeline;

/// Prediction with optional confidence
pub mod inferencer;
