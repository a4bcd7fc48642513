// ============================================================
// Formatter
// ============================================================
// Final preparation stage: attaches a whitespace-token count and
// processing metadata to every balanced record, producing the
// training-ready shape that gets persisted.

use chrono::Utc;

use crate::domain::record::{FormattedRecord, RecordMetadata, TextRecord};

/// Attach token counts and an RFC 3339 processing timestamp.
pub fn format_records(records: Vec<TextRecord>) -> Vec<FormattedRecord> {
    let processed = Utc::now().to_rfc3339();

    records
        .into_iter()
        .map(|record| {
            let length = record.text.chars().count();
            FormattedRecord {
                tokens: token_count(&record.text),
                metadata: RecordMetadata { length, processed: processed.clone() },
                text: record.text,
            }
        })
        .collect()
}

/// Whitespace-delimited token count.
pub fn token_count(text: &str) -> usize {
    text.split_whitespace().count()
}
