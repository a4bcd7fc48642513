// ============================================================
// CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `process-data` and `train`,
// and their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, etc.)

use clap::{Args, Subcommand};

use crate::config::TrainingConfig;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load, clean, augment, balance, and persist the training dataset
    ProcessData,

    /// Fine-tune the model on the processed dataset
    Train(TrainArgs),
}

/// Arguments for the `train` command.
/// Fixed hyperparameters live in TrainingConfig; only the
/// per-run knobs are exposed here.
#[derive(Args, Debug, Clone)]
pub struct TrainArgs {
    /// Number of full passes through the training data
    #[arg(short, long, default_value_t = 10)]
    pub epochs: usize,

    /// Number of samples processed together in one forward pass
    #[arg(short, long, default_value_t = 32)]
    pub batch_size: usize,
}

/// Convert CLI TrainArgs into the application-layer config.
/// The application layer never sees clap types.
impl From<TrainArgs> for TrainingConfig {
    fn from(a: TrainArgs) -> Self {
        TrainingConfig::new(a.epochs, a.batch_size)
    }
}
