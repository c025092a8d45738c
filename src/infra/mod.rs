// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Durable storage for the two training outputs:
//
//   checkpoint.rs — the fitted TicketPipeline, bincode-encoded
//                   behind a format-version header
//   metrics.rs    — the MetricsRecord as pretty-printed JSON
//
// Both writers create missing parent directories. Both readers
// distinguish "file absent" from "file unreadable".

/// Pipeline artifact save / load
pub mod checkpoint;

/// Metrics record save / load
pub mod metrics;
