// ============================================================
// TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load the processed corpus      (data)
//   Step 2: Validate it is trainable       (here)
//   Step 3: Build / load tokenizer         (infra)
//   Step 4: Tokenise into samples          (data)
//   Step 5: Split train/validation         (data)
//   Step 6: Batch for both backends        (data)
//   Step 7: Start the metrics monitor      (infra)
//   Step 8: Run the epoch loop             (ml)
//   Step 9: Save model + config            (infra)
//
// The monitor is always stopped before this returns, on the
// failure path included, so no server thread outlives the run.

use crate::config::{AppConfig, TrainingConfig};
use crate::data::{
    batcher::LmBatcher, dataset, loader, splitter::split_data, writer::DatasetWriter,
};
use crate::error::{PipelineError, Result};
use crate::infra::{
    checkpoint::CheckpointManager,
    monitor::TrainingMonitor,
    tokenizer_store::TokenizerStore,
};
use crate::ml::trainer::{run_training, MyBackend, MyInnerBackend};

const VOCAB_SIZE: usize = 10_000;

pub struct TrainUseCase {
    processed_dir: String,
    output_dir:    String,
    monitor_port:  u16,
    config:        TrainingConfig,
}

impl TrainUseCase {
    pub fn new(app_config: &AppConfig, config: TrainingConfig) -> Self {
        Self {
            processed_dir: app_config.processed_dir.clone(),
            output_dir:    app_config.train_output_dir.clone(),
            monitor_port:  app_config.monitor_port,
            config,
        }
    }

    /// Execute the full training pipeline end to end.
    pub fn execute(&self) -> Result<()> {
        let mut monitor = TrainingMonitor::new(self.monitor_port);
        monitor.start();

        let result = self.train(&monitor);

        monitor.stop();
        result
    }

    fn train(&self, monitor: &TrainingMonitor) -> Result<()> {
        let cfg = &self.config;
        tracing::info!(
            "Starting training: epochs={}, batch_size={}",
            cfg.epochs, cfg.batch_size
        );

        // ── Step 1: Load processed corpus ─────────────────────────────────────
        let corpus_path = DatasetWriter::new(self.processed_dir.clone()).corpus_path();
        let records = loader::load_processed(&corpus_path)?;
        tracing::info!("Loaded {} processed records", records.len());

        // ── Step 2: Validate ──────────────────────────────────────────────────
        if records.is_empty() {
            return Err(PipelineError::Validation(
                "processed dataset is empty, nothing to train on".to_string(),
            ));
        }

        // ── Step 3: Build / load tokenizer ────────────────────────────────────
        let texts: Vec<String> = records.iter().map(|r| r.text.clone()).collect();
        let tokenizer = TokenizerStore::new(&self.output_dir).load_or_build(&texts, VOCAB_SIZE)?;

        // ── Step 4: Tokenise into next-token samples ──────────────────────────
        let samples = dataset::build_samples(&records, &tokenizer, cfg.max_seq_length)?;
        if samples.is_empty() {
            return Err(PipelineError::Validation(
                "no record produced a usable training sample".to_string(),
            ));
        }

        // ── Step 5: Train / validation split ──────────────────────────────────
        let (train_samples, val_samples) = split_data(samples, cfg.validation_split);
        tracing::info!(
            "Split: {} train, {} validation",
            train_samples.len(),
            val_samples.len()
        );

        // ── Step 6: Batch each phase on its backend ───────────────────────────
        let device = burn::backend::ndarray::NdArrayDevice::default();
        let train_batches =
            LmBatcher::<MyBackend>::new(device).batch_all(&train_samples, cfg.batch_size);
        let val_batches =
            LmBatcher::<MyInnerBackend>::new(device).batch_all(&val_samples, cfg.batch_size);

        // ── Steps 7-8: Epoch loop with live metrics ───────────────────────────
        // Embedding rows cover exactly the ids the tokenizer can emit
        let vocab_size = tokenizer.get_vocab_size(true);
        let model = run_training(cfg, vocab_size, train_batches, val_batches, monitor)?;

        // ── Step 9: Save artifacts ────────────────────────────────────────────
        let ckpt_manager = CheckpointManager::new(self.output_dir.clone());
        ckpt_manager.save_config(cfg)?;
        ckpt_manager.save_model(&model)?;

        tracing::info!("Training completed");
        Ok(())
    }
}
