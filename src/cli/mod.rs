// ============================================================
// CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, parsed with `clap`.
// All business logic is delegated to the application layer.
//
// Two commands are supported:
//   1. `process-data` — prepares the training dataset
//   2. `train`        — fine-tunes the model on the prepared data

pub mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Commands, TrainArgs};

use crate::config::{AppConfig, TrainingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "llama-finetune",
    version = "0.1.0",
    about = "Prepare a text dataset and fine-tune a language model on it."
)]
pub struct Cli {
    /// The subcommand to run (process-data or train)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        let config = AppConfig::from_env()?;
        match &self.command {
            Commands::ProcessData => self.run_process_data(&config),
            Commands::Train(args) => self.run_train(&config, args.clone()),
        }
    }

    /// Handles the `process-data` subcommand.
    fn run_process_data(&self, config: &AppConfig) -> Result<()> {
        use crate::application::process_data::ProcessDataUseCase;

        ProcessDataUseCase::new(config)
            .execute()
            .context("data processing failed")?;

        println!("Data processing complete.");
        Ok(())
    }

    /// Handles the `train` subcommand.
    /// Converts CLI args into a TrainingConfig and hands off.
    fn run_train(&self, config: &AppConfig, args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        let training: TrainingConfig = args.into();
        TrainUseCase::new(config, training)
            .execute()
            .context("training failed")?;

        println!("Training complete. Model saved.");
        Ok(())
    }
}
