// ============================================================
// Cleaner
// ============================================================
// Pure filter + map over the raw record sequence. A record
// survives when:
//   1. it has a `text` field that is a string
//   2. the raw text is at least 10 characters long
//
// The length gate runs on the RAW text, before any
// normalisation. A 12-character string that collapses to 6
// allowed characters still passes; see DESIGN.md.
//
// Surviving text is normalised in this order:
//   1. trim leading/trailing whitespace
//   2. collapse internal whitespace runs to a single space
//   3. strip characters outside [ASCII word chars, whitespace, . , ? ! -]
//
// Records failing validation are dropped silently — the only
// place the reduction shows up is the final dataset stats.

use crate::domain::record::TextRecord;

const MIN_RAW_LENGTH: usize = 10;

/// Filter and normalise raw records into clean text records.
pub fn clean(records: Vec<serde_json::Value>) -> Vec<TextRecord> {
    records
        .into_iter()
        .filter_map(|item| {
            let text = item.get("text")?.as_str()?;
            if text.chars().count() < MIN_RAW_LENGTH {
                return None;
            }
            Some(TextRecord::new(normalize(text)))
        })
        .collect()
}

/// Normalise one text string: trim, collapse whitespace runs,
/// strip disallowed characters — in that order.
pub fn normalize(text: &str) -> String {
    let trimmed = text.trim();

    // Collapse whitespace runs to one space
    let mut collapsed = String::with_capacity(trimmed.len());
    let mut last_space = false;
    for c in trimmed.chars() {
        if c.is_whitespace() {
            if !last_space {
                collapsed.push(' ');
            }
            last_space = true;
        } else {
            collapsed.push(c);
            last_space = false;
        }
    }

    // Strip everything outside the allowed set
    collapsed.chars().filter(|&c| is_allowed(c)).collect()
}

/// The allowed set: ASCII word characters, whitespace, and the
/// punctuation `. , ? ! -`.
fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() || matches!(c, '.' | ',' | '?' | '!' | '-')
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalizes_whitespace_and_punctuation() {
        // The exact end-to-end normalisation scenario: both '!'
        // are in the allowed set, so both are retained.
        assert_eq!(normalize("  Hello   world!!  "), "Hello world!!");
    }

    #[test]
    fn test_strips_disallowed_characters() {
        assert_eq!(normalize("price: $5 #deal"), "price 5 deal");
        assert_eq!(normalize("keep_under-scores, ok?"), "keep_under-scores, ok?");
    }

    #[test]
    fn test_drops_short_and_shapeless_records() {
        let raw = vec![
            json!({"text": "long enough to pass the gate"}),
            json!({"text": "tiny"}),
            json!({"text": 42}),
            json!({"label": "no text field"}),
            json!("not even an object"),
        ];
        let cleaned = clean(raw);
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].text, "long enough to pass the gate");
    }

    #[test]
    fn test_length_gate_runs_on_raw_text() {
        // 12 raw characters, but only 6 survive stripping.
        // The record still passes the gate.
        let raw = vec![json!({"text": "ab##cd##ef##"})];
        let cleaned = clean(raw);
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].text, "abcdef");
    }

    #[test]
    fn test_cleaning_is_idempotent_on_clean_records() {
        let raw = vec![
            json!({"text": "Hello world! This is clean."}),
            json!({"text": "Already normalized, no doubt?"}),
        ];
        let once = clean(raw);
        let twice = clean(
            once.iter().map(|r| serde_json::json!({"text": r.text})).collect(),
        );
        assert_eq!(once, twice);
    }

    #[test]
    fn test_clean_output_stays_in_allowed_set() {
        let raw = vec![json!({"text": "  Mixed <b>markup</b> & entities!  "})];
        for record in clean(raw) {
            assert!(record.text.chars().all(is_allowed));
        }
    }
}
