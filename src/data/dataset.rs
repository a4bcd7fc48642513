// ============================================================
// Training Samples
// ============================================================
// Turns formatted corpus records into token/label samples for
// the trainer: each record is tokenised, the final token becomes
// the label, and everything before it becomes the input. Records
// too short to yield a (input, label) pair are skipped.
//
// Long inputs keep their LAST max_seq_length tokens so the label
// stays adjacent to the input it follows.

use tokenizers::Tokenizer;

use crate::domain::record::FormattedRecord;
use crate::error::{PipelineError, Result};

/// One tokenised training sample with a next-token label.
#[derive(Debug, Clone)]
pub struct LmSample {
    pub input_ids: Vec<u32>,
    pub label: u32,
}

/// Tokenise the corpus into next-token samples.
pub fn build_samples(
    records: &[FormattedRecord],
    tokenizer: &Tokenizer,
    max_seq_length: usize,
) -> Result<Vec<LmSample>> {
    let mut samples = Vec::with_capacity(records.len());

    for record in records {
        let encoding = tokenizer
            .encode(record.text.as_str(), false)
            .map_err(|e| PipelineError::Model(format!("tokenisation error: {e}")))?;
        let ids = encoding.get_ids();

        // Need at least one input token plus the label
        if ids.len() < 2 {
            continue;
        }

        let start = ids.len().saturating_sub(max_seq_length + 1);
        let window = &ids[start..];
        if let Some((label, input)) = window.split_last() {
            samples.push(LmSample { input_ids: input.to_vec(), label: *label });
        }
    }

    tracing::info!("Built {} training samples from {} records", samples.len(), records.len());
    Ok(samples)
}
