// ============================================================
// Dataset Writer
// ============================================================
// Persists the formatted corpus and its derived statistics:
//
//   <output_dir>/processed_data.json — array of formatted records
//   <output_dir>/dataset_stats.json  — aggregate statistics
//
// Both are pretty-printed whole-document writes: each file is
// serialised in memory and written in one operation, never
// incrementally. Single attempt, no retry — an I/O failure
// propagates as-is.

use std::{collections::BTreeMap, fs, path::PathBuf};

use chrono::Utc;

use crate::domain::record::{DatasetStats, FormattedRecord, StatsMetadata};
use crate::error::Result;

const CORPUS_FILE: &str = "processed_data.json";
const STATS_FILE: &str = "dataset_stats.json";
const STATS_VERSION: &str = "1.0.0";

pub struct DatasetWriter {
    dir: PathBuf,
}

impl DatasetWriter {
    pub fn new(dir: impl Into<String>) -> Self {
        Self { dir: PathBuf::from(dir.into()) }
    }

    /// Write the corpus, then derive and write its statistics.
    pub fn persist(&self, records: &[FormattedRecord]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let corpus_path = self.dir.join(CORPUS_FILE);
        fs::write(&corpus_path, serde_json::to_string_pretty(records)?)?;
        tracing::info!("Processed data saved to {}", corpus_path.display());

        let stats = compute_stats(records);
        let stats_path = self.dir.join(STATS_FILE);
        fs::write(&stats_path, serde_json::to_string_pretty(&stats)?)?;
        tracing::info!("Dataset statistics saved to {}", stats_path.display());

        Ok(())
    }

    pub fn corpus_path(&self) -> PathBuf {
        self.dir.join(CORPUS_FILE)
    }
}

/// Derive aggregate statistics from the final corpus. Purely
/// descriptive; nothing downstream reads the stats file.
pub fn compute_stats(records: &[FormattedRecord]) -> DatasetStats {
    let total = records.len();

    let length_sum: usize = records.iter().map(|r| r.metadata.length).sum();
    let average_length = if total > 0 { length_sum as f64 / total as f64 } else { 0.0 };

    let mut token_distribution: BTreeMap<usize, usize> = BTreeMap::new();
    for record in records {
        *token_distribution.entry(record.tokens).or_insert(0) += 1;
    }

    DatasetStats {
        total_examples: total,
        average_length,
        token_distribution,
        metadata: StatsMetadata {
            generated_at: Utc::now().to_rfc3339(),
            version: STATS_VERSION.to_string(),
        },
    }
}
