// ============================================================
// ProcessData Use Case
// ============================================================
// Orchestrates the full dataset preparation pipeline in order:
//
//   Step 1: Load raw .json record files   (data)
//   Step 2: Clean and normalise text      (data)
//   Step 3: Augment with variations       (data + infra)
//   Step 4: Balance length distribution   (data)
//   Step 5: Format for training           (data)
//   Step 6: Persist corpus and stats      (data)

use crate::config::AppConfig;
use crate::data::{augmenter::Augmenter, balancer, cleaner, formatter, loader::JsonLoader, writer::DatasetWriter};
use crate::domain::traits::{RecordSource, TextGenerator};
use crate::error::Result;
use crate::infra::generation::OpenAiClient;

pub struct ProcessDataUseCase {
    input_dir:  String,
    output_dir: String,
    api_key:    Option<String>,
}

impl ProcessDataUseCase {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            input_dir:  config.training_data_path.clone(),
            output_dir: config.processed_dir.clone(),
            api_key:    config.openai_api_key.clone(),
        }
    }

    /// Execute the full preparation pipeline end to end.
    pub fn execute(&self) -> Result<()> {
        tracing::info!("Starting data preprocessing...");

        // ── Step 1: Load raw records ──────────────────────────────────────────
        let loader = JsonLoader::new(&self.input_dir);
        let raw = loader.load_all()?;
        tracing::info!("Loaded {} raw records from '{}'", raw.len(), self.input_dir);

        // ── Step 2: Clean ─────────────────────────────────────────────────────
        let cleaned = cleaner::clean(raw);
        tracing::info!("{} records after cleaning", cleaned.len());

        // ── Step 3: Augment ───────────────────────────────────────────────────
        // Without a credential the augmenter passes records through
        let client = match self.api_key.as_ref() {
            Some(key) => Some(OpenAiClient::new(key.clone())?),
            None => None,
        };
        let generator = client.as_ref().map(|c| c as &dyn TextGenerator);
        let augmented = Augmenter::new(generator).augment(cleaned);
        tracing::info!("{} records after augmentation", augmented.len());

        // ── Step 4: Balance ───────────────────────────────────────────────────
        let balanced = balancer::balance(augmented);
        tracing::info!("{} records after balancing", balanced.len());

        // ── Step 5: Format ────────────────────────────────────────────────────
        let formatted = formatter::format_records(balanced);

        // ── Step 6: Persist corpus + stats ────────────────────────────────────
        let writer = DatasetWriter::new(&self.output_dir);
        writer.persist(&formatted)?;
        tracing::info!(
            "Data preprocessing completed: {} examples written to '{}'",
            formatted.len(),
            self.output_dir
        );

        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_raw(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).unwrap();
    }

    fn config_for(input: &TempDir, output: &TempDir) -> AppConfig {
        AppConfig {
            training_data_path: input.path().to_str().unwrap().to_string(),
            processed_dir:      output.path().to_str().unwrap().to_string(),
            train_output_dir:   output.path().to_str().unwrap().to_string(),
            openai_api_key:     None,
            monitor_port:       0,
        }
    }

    #[test]
    fn test_pipeline_end_to_end_without_augmentation() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_raw(
            &input,
            "records.json",
            r#"[
                {"text": "The quick brown fox jumps over the lazy dog."},
                {"text": "short"},
                {"text": "Another listing of perfectly reasonable sample text."}
            ]"#,
        );

        ProcessDataUseCase::new(&config_for(&input, &output)).execute().unwrap();

        let corpus = fs::read_to_string(output.path().join("processed_data.json")).unwrap();
        let records: Vec<serde_json::Value> = serde_json::from_str(&corpus).unwrap();
        // "short" fails the minimum raw length gate
        assert_eq!(records.len(), 2);
        assert!(records[0]["metadata"]["length"].is_u64());

        let stats = fs::read_to_string(output.path().join("dataset_stats.json")).unwrap();
        let stats: serde_json::Value = serde_json::from_str(&stats).unwrap();
        assert_eq!(stats["totalExamples"], 2);
    }

    #[test]
    fn test_missing_input_dir_fails() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let mut config = config_for(&input, &output);
        config.training_data_path = input.path().join("nope").to_str().unwrap().to_string();

        let result = ProcessDataUseCase::new(&config).execute();
        assert!(result.is_err());
    }
}
