// ============================================================
// Data Pipeline
// ============================================================
// Everything from raw *.json record files to tensor batches.
//
// The preparation pipeline flows in this order:
//
//   *.json files
//       │
//       ▼
//   JsonLoader        → reads files, concatenates record arrays
//       │
//       ▼
//   cleaner           → validates and normalises record text
//       │
//       ▼
//   Augmenter         → adds generated paraphrase variants
//       │
//       ▼
//   balancer          → trims over-represented length buckets
//       │
//       ▼
//   formatter         → attaches token counts and metadata
//       │
//       ▼
//   DatasetWriter     → persists corpus + statistics to disk
//
// The trainer side consumes the persisted corpus through:
//
//   splitter          → deterministic train/validation split
//   dataset           → tokenised samples with next-token labels
//   batcher           → fixed-size batches of padded tensors
//
// Each module is one stage, communicating only via the sequence
// it returns, so every stage is independently testable.

/// Loads raw record arrays from a directory of *.json files
pub mod loader;

/// Validates and normalises raw records into clean text records
pub mod cleaner;

/// Adds generated paraphrase variants per record, best-effort
pub mod augmenter;

/// Drops records from over-populated text-length buckets
pub mod balancer;

/// Attaches token counts and processing metadata
pub mod formatter;

/// Persists the formatted corpus and derived statistics
pub mod writer;

/// Order-preserving train/validation split
pub mod splitter;

/// Tokenised training samples built from the processed corpus
pub mod dataset;

/// Groups samples into padded tensor batches
pub mod batcher;
