// ============================================================
// Corpus Loader
// ============================================================
// Reads raw labeled records from a directory of JSON files.
// Each *.json file must contain a JSON array of objects; the
// arrays are concatenated in directory-listing order.
//
// Listing order is whatever the filesystem returns, which is
// not guaranteed stable across platforms. Documented limitation:
// two runs on different platforms may concatenate files in a
// different order.
//
// Failure mode is fail-fast: one malformed file aborts the
// whole load. There is no partial corpus.

use std::{fs, path::Path};

use crate::domain::traits::RecordSource;
use crate::error::{PipelineError, Result};

/// Loads raw records from every *.json file in a directory.
pub struct JsonLoader {
    dir: String,
}

impl JsonLoader {
    pub fn new(dir: impl Into<String>) -> Self {
        Self { dir: dir.into() }
    }
}

impl RecordSource for JsonLoader {
    fn load_all(&self) -> Result<Vec<serde_json::Value>> {
        let dir = Path::new(&self.dir);

        if !dir.exists() {
            return Err(PipelineError::Input(format!(
                "training data directory '{}' does not exist",
                self.dir
            )));
        }

        let mut records = Vec::new();

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let content = fs::read_to_string(&path)?;
            let parsed: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
                PipelineError::Input(format!("malformed JSON in '{}': {e}", path.display()))
            })?;

            // Every file must hold a top-level array of records
            match parsed {
                serde_json::Value::Array(items) => {
                    tracing::debug!("Loaded {} records from '{}'", items.len(), path.display());
                    records.extend(items);
                }
                _ => {
                    return Err(PipelineError::Input(format!(
                        "'{}' is not a JSON array of records",
                        path.display()
                    )));
                }
            }
        }

        tracing::info!("Loaded {} raw records from '{}'", records.len(), self.dir);
        Ok(records)
    }
}

/// Read a previously processed corpus back from disk for the
/// trainer. The file is the pipeline's processed_data.json.
pub fn load_processed(path: &Path) -> Result<Vec<crate::domain::record::FormattedRecord>> {
    let content = fs::read_to_string(path).map_err(|e| {
        PipelineError::Input(format!(
            "cannot read processed corpus '{}': {e}. Have you run 'process-data' first?",
            path.display()
        ))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        PipelineError::Input(format!("malformed processed corpus '{}': {e}", path.display()))
    })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_loads_and_concatenates_json_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.json"), r#"[{"text":"first"},{"text":"second"}]"#).unwrap();
        fs::write(dir.path().join("b.json"), r#"[{"text":"third"}]"#).unwrap();

        let loader = JsonLoader::new(dir.path().to_str().unwrap());
        let records = loader.load_all().unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_ignores_non_json_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.json"), r#"[{"text":"only"}]"#).unwrap();
        fs::write(dir.path().join("notes.txt"), "not json at all").unwrap();

        let loader = JsonLoader::new(dir.path().to_str().unwrap());
        let records = loader.load_all().unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_malformed_file_aborts_load() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("good.json"), r#"[{"text":"fine"}]"#).unwrap();
        fs::write(dir.path().join("bad.json"), "{ not json").unwrap();

        let loader = JsonLoader::new(dir.path().to_str().unwrap());
        assert!(matches!(loader.load_all(), Err(PipelineError::Input(_))));
    }

    #[test]
    fn test_non_array_file_aborts_load() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("obj.json"), r#"{"text":"not an array"}"#).unwrap();

        let loader = JsonLoader::new(dir.path().to_str().unwrap());
        assert!(matches!(loader.load_all(), Err(PipelineError::Input(_))));
    }

    #[test]
    fn test_missing_directory_is_an_input_error() {
        let loader = JsonLoader::new("/definitely/not/a/real/dir");
        assert!(matches!(loader.load_all(), Err(PipelineError::Input(_))));
    }

    #[test]
    fn test_extra_fields_survive_loading() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.json"), r#"[{"text":"hello","label":"greeting"}]"#).unwrap();

        let loader = JsonLoader::new(dir.path().to_str().unwrap());
        let records = loader.load_all().unwrap();
        assert_eq!(records[0]["label"], "greeting");
    }
}
