// ============================================================
// Layer 6 — Pipeline Artifact Store
// ============================================================
// Saves and restores the fitted TicketPipeline with bincode.
//
// File layout (two bincode values back to back):
//
//   ┌──────────────────────┐
//   │ u32 format version   │  checked before anything else
//   ├──────────────────────┤
//   │ ArtifactEnvelope     │  crate version, creation time,
//   │                      │  TicketPipeline
//   └──────────────────────┘
//
// Reading the version first means an artifact written by an
// incompatible build fails with a clear CorruptArtifact message
// instead of a confusing decode error halfway through.
//
// Error mapping on load:
//   file absent               → NotFound
//   version mismatch / decode → CorruptArtifact
//   shape inconsistency       → CorruptArtifact

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};
use crate::ml::pipeline::TicketPipeline;

/// Bumped whenever the serialised pipeline layout changes.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct ArtifactEnvelope {
    crate_version: String,
    created_at:    String,
    pipeline:      TicketPipeline,
}

/// Write `pipeline` to `path`, creating parent directories.
pub fn save_model(path: &Path, pipeline: &TicketPipeline) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let envelope = ArtifactEnvelope {
        crate_version: env!("CARGO_PKG_VERSION").to_string(),
        created_at:    chrono::Utc::now().to_rfc3339(),
        pipeline:      pipeline.clone(),
    };

    let mut writer = BufWriter::new(File::create(path)?);
    bincode::serialize_into(&mut writer, &ARTIFACT_FORMAT_VERSION)?;
    bincode::serialize_into(&mut writer, &envelope)?;
    writer.flush()?;

    tracing::debug!("Saved pipeline artifact to '{}'", path.display());
    Ok(())
}

/// Read a pipeline written by `save_model`.
pub fn load_model(path: &Path) -> Result<TicketPipeline> {
    if !path.exists() {
        return Err(ClassifierError::not_found("model artifact", path));
    }

    // Slice decoding bounds every length prefix by the bytes left
    let bytes = fs::read(path)?;
    const HEADER_LEN: usize = std::mem::size_of::<u32>();
    if bytes.len() < HEADER_LEN {
        return Err(ClassifierError::CorruptArtifact(format!(
            "cannot read header of '{}': file has only {} bytes",
            path.display(),
            bytes.len()
        )));
    }
    let (header, body) = bytes.split_at(HEADER_LEN);

    let version: u32 = bincode::deserialize(header).map_err(|e| {
        ClassifierError::CorruptArtifact(format!(
            "cannot read header of '{}': {e}",
            path.display()
        ))
    })?;
    if version != ARTIFACT_FORMAT_VERSION {
        return Err(ClassifierError::CorruptArtifact(format!(
            "'{}' has format version {version}, this build reads version {}. \
             Re-run training.",
            path.display(),
            ARTIFACT_FORMAT_VERSION
        )));
    }

    let envelope: ArtifactEnvelope = bincode::deserialize(body).map_err(|e| {
        ClassifierError::CorruptArtifact(format!("cannot decode '{}': {e}", path.display()))
    })?;
    envelope.pipeline.validate()?;

    tracing::debug!(
        "Read artifact '{}' (built by v{} at {})",
        path.display(),
        envelope.crate_version,
        envelope.created_at
    );
    Ok(envelope.pipeline)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::traits::Predict;
    use crate::ml::pipeline::LogisticHead;
    use crate::ml::vectorizer::{TfidfConfig, TfidfVectorizer};
    use tempfile::tempdir;

    fn tiny_pipeline() -> TicketPipeline {
        let vectorizer = TfidfVectorizer::fit(
            &["factura mal", "pedido mal"],
            TfidfConfig { ngram_min: 1, ngram_max: 1, min_df: 1 },
        )
        .unwrap();
        let head = LogisticHead::new(
            vec!["billing".into(), "shipping".into()],
            3,
            vec![2.0, -2.0, 0.0, 0.0, -2.0, 2.0],
            vec![0.0, 0.0],
        )
        .unwrap();
        TicketPipeline::new(vectorizer, head).unwrap()
    }

    #[test]
    fn test_save_then_load_predicts_the_same() {
        let dir  = tempdir().unwrap();
        let path = dir.path().join("models/ticket_model.bin");
        let original = tiny_pipeline();

        save_model(&path, &original).unwrap();
        let loaded = load_model(&path).unwrap();

        assert_eq!(loaded.classes(), original.classes());
        assert_eq!(loaded.predict_label("mi pedido"), original.predict_label("mi pedido"));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let err = load_model(&dir.path().join("nope.bin")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_wrong_version_is_corrupt() {
        let dir  = tempdir().unwrap();
        let path = dir.path().join("old.bin");
        fs::write(&path, bincode::serialize(&999u32).unwrap()).unwrap();

        let err = load_model(&path).unwrap_err();
        assert!(matches!(err, ClassifierError::CorruptArtifact(msg) if msg.contains("999")));
    }

    #[test]
    fn test_garbage_is_corrupt() {
        let dir  = tempdir().unwrap();
        let path = dir.path().join("garbage.bin");
        fs::write(&path, b"\x01\x00").unwrap();

        let err = load_model(&path).unwrap_err();
        assert!(matches!(err, ClassifierError::CorruptArtifact(_)));
    }

    #[test]
    fn test_oversized_length_prefix_is_corrupt() {
        let dir  = tempdir().unwrap();
        let path = dir.path().join("huge.bin");
        // Valid header, then a 1 TiB string length with nothing behind it
        let mut bytes = bincode::serialize(&ARTIFACT_FORMAT_VERSION).unwrap();
        bytes.extend_from_slice(&(1u64 << 40).to_le_bytes());
        fs::write(&path, bytes).unwrap();

        let err = load_model(&path).unwrap_err();
        assert!(matches!(err, ClassifierError::CorruptArtifact(_)));
    }
}
