// ============================================================
// Augmenter
// ============================================================
// Asks the text-generation collaborator for one paraphrased
// variant per clean record. Augmentation is best-effort:
//
//   - every original record is always retained
//   - a per-item generation failure costs only that item's
//     variants, logged as a warning and never propagated
//   - without a configured generator (no credential) the stage
//     passes records through untouched
//
// Each item's outcome is an explicit Result; this stage is the
// caller that aggregates them and decides retention. There is
// no retry or backoff — a failed item is simply not augmented.

use crate::domain::record::TextRecord;
use crate::domain::traits::{GenerationRequest, TextGenerator};
use crate::error::Result;

const SYSTEM_INSTRUCTION: &str =
    "Generate a variation of the following text while preserving its meaning.";
const VARIANT_TEMPERATURE: f64 = 0.8;
const VARIANT_MAX_TOKENS: u32 = 150;

/// Number of characters of the source text shown in warnings
const WARN_PREVIEW_CHARS: usize = 50;

pub struct Augmenter<'a> {
    generator: Option<&'a dyn TextGenerator>,
}

impl<'a> Augmenter<'a> {
    /// A None generator disables augmentation entirely.
    pub fn new(generator: Option<&'a dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Produce the augmented sequence: each original record,
    /// followed by its generated variants (zero on failure).
    pub fn augment(&self, records: Vec<TextRecord>) -> Vec<TextRecord> {
        let generator = match self.generator {
            Some(g) => g,
            None => {
                tracing::warn!("No generation service configured — skipping augmentation");
                return records;
            }
        };

        let mut augmented = Vec::with_capacity(records.len() * 2);

        for record in records {
            match self.variants_for(generator, &record) {
                Ok(variants) => {
                    augmented.push(record);
                    augmented.extend(variants.into_iter().map(TextRecord::new));
                }
                Err(e) => {
                    let preview: String =
                        record.text.chars().take(WARN_PREVIEW_CHARS).collect();
                    tracing::warn!("Failed to augment data for item: {preview}...: {e}");
                    augmented.push(record);
                }
            }
        }

        augmented
    }

    /// One item's variants. Ok(empty) means the service answered
    /// but produced nothing usable; Err means the call failed.
    fn variants_for(
        &self,
        generator: &dyn TextGenerator,
        record: &TextRecord,
    ) -> Result<Vec<String>> {
        let request = GenerationRequest {
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            input_text: record.text.clone(),
            temperature: VARIANT_TEMPERATURE,
            max_output_tokens: VARIANT_MAX_TOKENS,
        };

        Ok(generator.generate(&request)?.into_iter().collect())
    }
}
