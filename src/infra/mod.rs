// ============================================================
// Infrastructure Layer
// ============================================================
// Cross-cutting collaborators that the pipeline and trainer use
// but that belong to no single stage:
//
//   generation.rs      — HTTP client for the text-generation
//                        service used by the augmenter
//
//   monitor.rs         — run-scoped training metrics sink with a
//                        network endpoint for dashboards
//
//   checkpoint.rs      — persistence of the trained model
//                        artifact and its run configuration
//
//   tokenizer_store.rs — tokenizer build/save/load so training
//                        and any later consumer share one
//                        vocabulary

/// Text-generation service client (chat-completions API)
pub mod generation;

/// Training metrics sink + network endpoint
pub mod monitor;

/// Model artifact and config persistence
pub mod checkpoint;

/// Tokenizer build, save, and load
pub mod tokenizer_store;
