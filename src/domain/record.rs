// ============================================================
// Record Types
// ============================================================
// The shapes one training example takes on its way through the
// pipeline:
//
//   raw JSON value → TextRecord (clean / augmented / balanced)
//                  → FormattedRecord (training-ready)
//
// Raw records stay as serde_json::Value so arbitrary extra
// fields survive loading; the cleaner is the stage that decides
// whether a value is a usable record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A text record after cleaning. Augmentation and balancing keep
/// this same shape: a variant is just another TextRecord.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRecord {
    pub text: String,
}

impl TextRecord {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Processing metadata attached by the formatter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMetadata {
    /// Character length of the text
    pub length: usize,
    /// RFC 3339 timestamp of when the record was formatted
    pub processed: String,
}

/// The final training-ready record shape written to
/// processed_data.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedRecord {
    pub text: String,
    /// Whitespace-delimited token count
    pub tokens: usize,
    pub metadata: RecordMetadata,
}

/// Aggregate statistics over the final formatted corpus,
/// written to dataset_stats.json alongside it. Purely
/// descriptive — nothing downstream consumes this file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStats {
    pub total_examples: usize,
    /// Arithmetic mean of text character lengths
    pub average_length: f64,
    /// Token count → number of records with that count
    pub token_distribution: BTreeMap<usize, usize>,
    pub metadata: StatsMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsMetadata {
    pub generated_at: String,
    pub version: String,
}

/// Metrics produced by one completed training epoch.
/// Validation fields are optional: an epoch may run without a
/// validation pass, and the monitor records a sentinel instead.
#[derive(Debug, Clone, Copy)]
pub struct EpochRecord {
    pub loss: f64,
    pub accuracy: f64,
    pub val_loss: Option<f64>,
    pub val_accuracy: Option<f64>,
}
