// ============================================================
// Checkpoint Manager
// ============================================================
// Persists the trained model artifact and the run configuration:
//
//   <dir>/model.*            — model weights (burn CompactRecorder)
//   <dir>/train_config.json  — the TrainingConfig of the run
//
// The config is saved alongside the weights so a later consumer
// can rebuild the exact architecture before loading them.

use std::{fs, path::PathBuf};

use burn::{
    module::Module,
    record::{CompactRecorder, Recorder},
    tensor::backend::AutodiffBackend,
};

use crate::config::TrainingConfig;
use crate::error::{PipelineError, Result};
use crate::ml::model::LmModel;

pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    pub fn new(dir: impl Into<String>) -> Self {
        Self { dir: PathBuf::from(dir.into()) }
    }

    /// Persist the trained model, creating directories as needed.
    pub fn save_model<B: AutodiffBackend>(&self, model: &LmModel<B>) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        // The recorder appends its own .mpk.gz extension
        let path = self.dir.join("model");
        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .map_err(|e| {
                PipelineError::Model(format!("failed to save model to '{}': {e}", path.display()))
            })?;

        tracing::info!("Model saved to {}", self.dir.display());
        Ok(())
    }

    /// Persist the run configuration next to the weights.
    pub fn save_config(&self, config: &TrainingConfig) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let path = self.dir.join("train_config.json");
        fs::write(&path, serde_json::to_string_pretty(config)?)?;

        tracing::debug!("Saved training config to '{}'", path.display());
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_config_round_trips() {
        let dir = TempDir::new().unwrap();
        let manager = CheckpointManager::new(dir.path().to_str().unwrap());

        let config = TrainingConfig::new(3, 8);
        manager.save_config(&config).unwrap();

        let raw = std::fs::read_to_string(dir.path().join("train_config.json")).unwrap();
        let loaded: TrainingConfig = serde_json::from_str(&raw).unwrap();
        assert_eq!(loaded.epochs, 3);
        assert_eq!(loaded.batch_size, 8);
        assert_eq!(loaded.warmup_steps, config.warmup_steps);
    }

    #[test]
    fn test_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a/b/c");
        let manager = CheckpointManager::new(nested.to_str().unwrap());

        manager.save_config(&TrainingConfig::default()).unwrap();
        assert!(nested.join("train_config.json").exists());
    }
}
