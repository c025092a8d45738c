// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load the CSV corpus           (Layer 4 - data)
//   Step 2: Stratified 80/20 split        (Layer 4 - data)
//   Step 3: Fit TF-IDF on train texts     (Layer 5 - ml)
//   Step 4: Fit logistic regression       (Layer 5 - ml)
//   Step 5: Evaluate on the test split    (Layer 5 - ml)
//   Step 6: Save artifact + metrics       (Layer 6 - infra)
//
// Same corpus + same TrainConfig → same split, same weights,
// same scores (only `trained_at_utc` differs between runs).

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::{loader::CsvCorpusLoader, splitter::stratified_split};
use crate::domain::record::CorpusRecord;
use crate::domain::traits::{CorpusSource, Predict};
use crate::error::Result;
use crate::infra::{checkpoint, metrics::{self, MetricsRecord}};
use crate::ml::{
    evaluation::evaluate,
    pipeline::TicketPipeline,
    trainer::fit_logistic,
    vectorizer::{TfidfConfig, TfidfVectorizer},
};

// ─── Training Configuration ──────────────────────────────────────────────────
// Every knob of one training run. Serialisable so a run can be
// described in JSON alongside its outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub test_fraction: f64,
    pub seed:          u64,
    pub ngram_min:     usize,
    pub ngram_max:     usize,
    pub min_df:        usize,
    pub max_iter:      usize,
    pub learning_rate: f64,
    pub tol:           f64,
    /// Inverse L2 regularisation strength
    pub c:             f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed:          42,
            ngram_min:     1,
            ngram_max:     2,
            min_df:        2,
            max_iter:      2000,
            learning_rate: 0.1,
            tol:           1e-6,
            c:             1.0,
        }
    }
}

impl TrainConfig {
    pub fn tfidf(&self) -> TfidfConfig {
        TfidfConfig {
            ngram_min: self.ngram_min,
            ngram_max: self.ngram_max,
            min_df:    self.min_df,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Load the corpus at `data_path`, train, and write both outputs.
    pub fn train_and_save(
        &self,
        data_path:    &Path,
        model_path:   &Path,
        metrics_path: &Path,
    ) -> Result<MetricsRecord> {
        // ── Step 1: Load corpus ───────────────────────────────────────────────
        tracing::info!("Loading corpus from '{}'", data_path.display());
        let records = CsvCorpusLoader::new(data_path).load_all()?;

        let (pipeline, record) = self.fit(records)?;

        // ── Step 6: Persist ───────────────────────────────────────────────────
        checkpoint::save_model(model_path, &pipeline)?;
        metrics::save_metrics(metrics_path, &record)?;
        tracing::info!(
            "Saved model to '{}' and metrics to '{}'",
            model_path.display(),
            metrics_path.display()
        );

        Ok(record)
    }

    /// Split, fit and evaluate in memory.
    pub fn fit(&self, records: Vec<CorpusRecord>) -> Result<(TicketPipeline, MetricsRecord)> {
        let cfg = &self.config;

        // ── Step 2: Stratified split ──────────────────────────────────────────
        let (train, test) = stratified_split(
            records,
            |r: &CorpusRecord| r.label.as_str(),
            cfg.test_fraction,
            cfg.seed,
        )?;
        tracing::info!("Split: {} train, {} test", train.len(), test.len());

        // ── Step 3: TF-IDF features ───────────────────────────────────────────
        let train_texts: Vec<&str> = train.iter().map(|r| r.text.as_str()).collect();
        let vectorizer = TfidfVectorizer::fit(&train_texts, cfg.tfidf())?;
        let features = vectorizer.transform_all(&train_texts);

        // ── Step 4: Logistic regression ───────────────────────────────────────
        // Classes sorted so probability columns have a stable order
        let classes: Vec<String> = train
            .iter()
            .map(|r| r.label.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let targets: Vec<usize> = train
            .iter()
            .map(|r| classes.binary_search(&r.label).unwrap_or_default())
            .collect();

        let (head, report) =
            fit_logistic(&features, vectorizer.n_features(), &targets, classes, cfg)?;
        tracing::info!(
            "Logistic regression: {} iterations, loss={:.6}, converged={}",
            report.iterations,
            report.final_loss,
            report.converged
        );
        let pipeline = TicketPipeline::new(vectorizer, head)?;

        // ── Step 5: Held-out evaluation ───────────────────────────────────────
        let y_true: Vec<&str> = test.iter().map(|r| r.label.as_str()).collect();
        let y_pred: Vec<String> = test.iter().map(|r| pipeline.predict_label(&r.text)).collect();
        let y_pred: Vec<&str> = y_pred.iter().map(String::as_str).collect();
        let scores = evaluate(&y_true, &y_pred);
        tracing::info!(
            "Test accuracy={:.4}, macro F1={:.4}",
            scores.accuracy,
            scores.f1_macro
        );

        Ok((pipeline, MetricsRecord::new(scores, train.len(), test.len())))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClassifierError;
    use crate::ml::inferencer::Inferencer;
    use std::fs;
    use tempfile::tempdir;

    /// 6 labels × 5 examples, the smallest corpus that stratifies 80/20.
    const MINI_CORPUS: &str = "text,label
No puedo iniciar sesión,account_access
He olvidado mi password,account_access
Mi cuenta está bloqueada,account_access
No me llega el email de verificación,account_access
Quiero activar 2FA,account_access
Me han cobrado dos veces,billing
No entiendo este cargo en mi factura,billing
Quiero cambiar mi método de pago,billing
La factura tiene un importe incorrecto,billing
Necesito un duplicado de la factura,billing
Quiero darme de baja,cancellation
Deseo cancelar mi suscripción,cancellation
No quiero renovar el plan,cancellation
Cómo cancelo mi contrato,cancellation
Quiero cerrar mi cuenta,cancellation
Mi pedido no ha llegado,shipping_delivery
El tracking no se actualiza,shipping_delivery
El envío se retrasó,shipping_delivery
Recibí el paquete dañado,shipping_delivery
La dirección de entrega está mal,shipping_delivery
La app se cierra al iniciar,technical_support
No puedo conectarme al servicio,technical_support
Error 500 al guardar cambios,technical_support
La página va muy lenta desde ayer,technical_support
No recibo notificaciones,technical_support
Qué planes tenéis,general_inquiry
Necesito información sobre precios,general_inquiry
Cómo funciona el servicio,general_inquiry
Tenéis descuentos para estudiantes,general_inquiry
Horario de atención al cliente,general_inquiry
";

    #[test]
    fn test_mini_corpus_split_sizes_and_score_ranges() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("tickets.csv");
        let model = dir.path().join("out/ticket_model.bin");
        let metrics_path = dir.path().join("out/metrics.json");
        fs::write(&data, MINI_CORPUS).unwrap();

        let m = TrainUseCase::new(TrainConfig::default())
            .train_and_save(&data, &model, &metrics_path)
            .unwrap();

        assert_eq!(m.n_train, 24);
        assert_eq!(m.n_test, 6);
        assert!((0.0..=1.0).contains(&m.accuracy));
        assert!((0.0..=1.0).contains(&m.f1_macro));
        assert!(model.exists());
        assert_eq!(metrics::load_metrics(&metrics_path).unwrap(), Some(m));
    }

    #[test]
    fn test_round_trip_prediction_is_in_label_set() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("tickets.csv");
        let model = dir.path().join("ticket_model.bin");
        fs::write(&data, MINI_CORPUS).unwrap();

        TrainUseCase::new(TrainConfig::default())
            .train_and_save(&data, &model, &dir.path().join("metrics.json"))
            .unwrap();

        let inferencer = Inferencer::from_artifact(&model).unwrap();
        let p = inferencer.predict("No puedo iniciar sesión con mi contraseña").unwrap();
        assert!(inferencer.classes().contains(&p.label));
        assert!((0.0..=1.0).contains(&p.confidence));
    }

    #[test]
    fn test_training_is_reproducible() {
        let records = || {
            crate::data::generator::generate(10, 7)
        };
        let uc = TrainUseCase::new(TrainConfig { max_iter: 200, ..TrainConfig::default() });
        let (_, a) = uc.fit(records()).unwrap();
        let (_, b) = uc.fit(records()).unwrap();
        assert_eq!((a.accuracy, a.f1_macro, a.n_train), (b.accuracy, b.f1_macro, b.n_train));
    }

    #[test]
    fn test_label_with_one_example_is_invalid_input() {
        let mut records = crate::data::generator::generate(5, 42);
        records.push(CorpusRecord::new("Algo totalmente distinto", "lonely"));
        let err = TrainUseCase::new(TrainConfig::default()).fit(records).unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidInput(_)));
    }

    #[test]
    fn test_single_label_is_invalid_input() {
        let records: Vec<CorpusRecord> = (0..10)
            .map(|i| CorpusRecord::new(format!("Mi pedido no ha llegado {i}"), "shipping"))
            .collect();
        let err = TrainUseCase::new(TrainConfig::default()).fit(records).unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidInput(_)));
    }

    #[test]
    fn test_missing_corpus_is_not_found() {
        let dir = tempdir().unwrap();
        let err = TrainUseCase::new(TrainConfig::default())
            .train_and_save(
                &dir.path().join("missing.csv"),
                &dir.path().join("m.bin"),
                &dir.path().join("m.json"),
            )
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(!dir.path().join("m.bin").exists());
    }
}
