// ============================================================
// Tokenizer Store
// ============================================================
// Builds, saves, and reloads the word-level tokenizer used by
// the trainer. In tokenizers 0.15, train_from_files requires
// Trainer::Model to equal ModelWrapper, so instead of going
// through a trainer we write the tokenizer JSON directly and
// load it back with Tokenizer::from_file.
//
// Vocabulary layout: [PAD]=0, [UNK]=1, corpus words from 2.
// [PAD] at 0 matches the padding id the batcher emits.

use std::{collections::HashMap, path::PathBuf};

use tokenizers::Tokenizer;

use crate::error::{PipelineError, Result};

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<String>) -> Self {
        Self { dir: PathBuf::from(dir.into()) }
    }

    /// Load the tokenizer saved by a previous run, or build a
    /// fresh one from the corpus and save it.
    pub fn load_or_build(
        &self,
        texts:      &[String],
        vocab_size: usize,
    ) -> Result<Tokenizer> {
        let tok_path = self.dir.join("tokenizer.json");
        if tok_path.exists() {
            tracing::info!("Loading existing tokenizer from disk");
            self.load()
        } else {
            tracing::info!("Building new tokenizer (vocab_size={})", vocab_size);
            self.build_and_save(texts, vocab_size)
        }
    }

    pub fn load(&self) -> Result<Tokenizer> {
        let path = self.dir.join("tokenizer.json");
        Tokenizer::from_file(&path).map_err(|e| {
            PipelineError::Model(format!(
                "cannot load tokenizer from '{}': {e}",
                path.display()
            ))
        })
    }

    fn build_and_save(&self, texts: &[String], vocab_size: usize) -> Result<Tokenizer> {
        std::fs::create_dir_all(&self.dir)?;

        // Count every word in the corpus, lowercased, with
        // punctuation stripped from the edges.
        let mut freq: HashMap<String, usize> = HashMap::new();
        for text in texts {
            for word in text.split_whitespace() {
                let w = word.to_lowercase();
                let w = w.trim_matches(|c: char| !c.is_alphanumeric());
                if !w.is_empty() {
                    *freq.entry(w.to_string()).or_insert(0) += 1;
                }
            }
        }

        // Frequency descending, alphabetical tie-break so the
        // vocabulary is stable across runs on the same corpus.
        let mut words: Vec<(String, usize)> = freq.into_iter().collect();
        words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        words.truncate(vocab_size.saturating_sub(2));

        let mut vocab = serde_json::json!({
            "[PAD]": 0,
            "[UNK]": 1,
        });

        let mut next_id = 2usize;
        for (word, _) in &words {
            if vocab.get(word).is_none() {
                vocab[word] = serde_json::json!(next_id);
                next_id += 1;
            }
        }

        // Tokenizer JSON in the format Tokenizer::from_file expects
        let tokenizer_json = serde_json::json!({
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": [
                {"id": 0, "content": "[PAD]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
                {"id": 1, "content": "[UNK]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
            ],
            "normalizer": {
                "type": "BertNormalizer",
                "clean_text": true,
                "handle_chinese_chars": true,
                "strip_accents": null,
                "lowercase": true
            },
            "pre_tokenizer": {
                "type": "Whitespace"
            },
            "post_processor": null,
            "decoder": null,
            "model": {
                "type": "WordLevel",
                "vocab": vocab,
                "unk_token": "[UNK]"
            }
        });

        let tok_path = self.dir.join("tokenizer.json");
        std::fs::write(&tok_path, serde_json::to_string_pretty(&tokenizer_json)?)?;

        tracing::info!(
            "Tokenizer built with {} entries, saved to '{}'",
            next_id,
            tok_path.display()
        );

        Tokenizer::from_file(&tok_path)
            .map_err(|e| PipelineError::Model(format!("cannot reload tokenizer: {e}")))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> TokenizerStore {
        TokenizerStore::new(dir.path().to_str().unwrap())
    }

    #[test]
    fn test_builds_and_encodes() {
        let dir = TempDir::new().unwrap();
        let texts = vec![
            "the quick brown fox".to_string(),
            "the lazy dog".to_string(),
        ];

        let tokenizer = store(&dir).load_or_build(&texts, 100).unwrap();
        let encoding = tokenizer.encode("the quick fox", false).unwrap();
        assert_eq!(encoding.get_ids().len(), 3);
    }

    #[test]
    fn test_special_token_ids_are_fixed() {
        let dir = TempDir::new().unwrap();
        let texts = vec!["alpha beta gamma".to_string()];

        let tokenizer = store(&dir).load_or_build(&texts, 100).unwrap();
        assert_eq!(tokenizer.token_to_id("[PAD]"), Some(0));
        assert_eq!(tokenizer.token_to_id("[UNK]"), Some(1));
    }

    #[test]
    fn test_unknown_words_map_to_unk() {
        let dir = TempDir::new().unwrap();
        let texts = vec!["alpha beta".to_string()];

        let tokenizer = store(&dir).load_or_build(&texts, 100).unwrap();
        let encoding = tokenizer.encode("zzz_not_in_vocab", false).unwrap();
        assert_eq!(encoding.get_ids(), &[1]);
    }

    #[test]
    fn test_second_call_reloads_saved_tokenizer() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);

        s.load_or_build(&["alpha beta".to_string()], 100).unwrap();
        // A different corpus on the second call must not rebuild
        let tokenizer = s.load_or_build(&["other words".to_string()], 100).unwrap();
        assert!(tokenizer.token_to_id("alpha").is_some());
        assert_eq!(tokenizer.token_to_id("other"), None);
    }

    #[test]
    fn test_vocab_size_cap_respected() {
        let dir = TempDir::new().unwrap();
        let texts = vec!["a b c d e f g h".to_string()];

        // 2 specials + at most 3 words
        let tokenizer = store(&dir).load_or_build(&texts, 5).unwrap();
        assert_eq!(tokenizer.get_vocab_size(false), 5);
    }
}
