// ============================================================
// Configuration
// ============================================================
// All environment options are read exactly once, here, at
// startup. Components receive an AppConfig (or the piece of it
// they need) at construction — nothing re-reads the environment
// ad hoc mid-run.
//
// Recognised variables:
//   TRAINING_DATA_PATH — directory of raw *.json record files
//   OUTPUT_DIR         — output directory (default depends on command)
//   OPENAI_API_KEY     — credential for the generation service;
//                        absent → augmentation is skipped
//   MONITOR_PORT       — training monitor port (default 3000)

use serde::{Deserialize, Serialize};
use std::env;

const DEFAULT_DATA_PATH: &str = "./data/raw";
const DEFAULT_PROCESSED_DIR: &str = "./data/processed";
const DEFAULT_TRAIN_OUTPUT_DIR: &str = "./output";
const DEFAULT_MONITOR_PORT: u16 = 3000;

/// Process-wide configuration, validated once and passed down.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory containing raw *.json record files
    pub training_data_path: String,

    /// Output directory for processed data and stats
    pub processed_dir: String,

    /// Output directory for the trained model artifact
    pub train_output_dir: String,

    /// Generation service credential; None disables augmentation
    pub openai_api_key: Option<String>,

    /// Port the training monitor listens on
    pub monitor_port: u16,
}

impl AppConfig {
    /// Read and validate configuration from the environment.
    pub fn from_env() -> anyhow::Result<Self> {
        let training_data_path =
            env::var("TRAINING_DATA_PATH").unwrap_or_else(|_| DEFAULT_DATA_PATH.to_string());

        // OUTPUT_DIR covers both commands; each falls back to its
        // own default when unset, matching the documented surface.
        let output_dir = env::var("OUTPUT_DIR").ok();
        let processed_dir = output_dir.clone().unwrap_or_else(|| DEFAULT_PROCESSED_DIR.to_string());
        let train_output_dir = output_dir.unwrap_or_else(|| DEFAULT_TRAIN_OUTPUT_DIR.to_string());

        let openai_api_key = env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty());
        if openai_api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY is not set — augmentation will be skipped");
        }

        let monitor_port = match env::var("MONITOR_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("MONITOR_PORT must be a port number, got '{raw}'"))?,
            Err(_) => DEFAULT_MONITOR_PORT,
        };

        Ok(Self {
            training_data_path,
            processed_dir,
            train_output_dir,
            openai_api_key,
            monitor_port,
        })
    }
}

// ─── Training Hyperparameters ────────────────────────────────────────────────
// Fixed per-run parameters owned by the trainer for the duration
// of one train() call. Serialisable so the exact run settings are
// persisted next to the model artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    pub learning_rate:      f64,
    pub weight_decay:       f32,
    pub warmup_steps:       usize,
    pub max_seq_length:     usize,
    pub gradient_clip_norm: f32,
    pub validation_split:   f64,
    pub use_amp:            bool,
    pub epochs:             usize,
    pub batch_size:         usize,
}

impl TrainingConfig {
    /// Per-invocation epochs/batch size over the fixed defaults.
    pub fn new(epochs: usize, batch_size: usize) -> Self {
        Self { epochs, batch_size, ..Self::default() }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            learning_rate:      1e-5,
            weight_decay:       0.01,
            warmup_steps:       500,
            max_seq_length:     1024,
            gradient_clip_norm: 1.0,
            validation_split:   0.1,
            use_amp:            true,
            epochs:             10,
            batch_size:         32,
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_training_config_defaults() {
        let cfg = TrainingConfig::default();
        assert_eq!(cfg.warmup_steps, 500);
        assert_eq!(cfg.max_seq_length, 1024);
        assert!((cfg.validation_split - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_training_config_per_invocation() {
        let cfg = TrainingConfig::new(3, 16);
        assert_eq!(cfg.epochs, 3);
        assert_eq!(cfg.batch_size, 16);
        // Fixed hyperparameters are untouched
        assert!((cfg.learning_rate - 1e-5).abs() < f64::EPSILON);
    }
}
