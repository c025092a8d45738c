// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the data, ml and infra layers into the workflows
// the CLI exposes. No tensor math and no printing here.

// Corpus → fitted pipeline + metrics on disk
pub mod train_use_case;

// Generate / train whatever is missing before serving
pub mod bootstrap;
