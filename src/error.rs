// ============================================================
// Error Taxonomy
// ============================================================
// One error enum shared by the data pipeline and the trainer.
//
// Propagation policy:
//   - Input / Io / Model errors are fatal and abort the run
//   - Validation errors are item-level: the offending record is
//     dropped and the error never leaves the cleaning stage
//   - ExternalService errors are item-level in augmentation:
//     logged, the item keeps zero variants, the run continues
//
// There are no automatic retries anywhere. That is a known
// reliability gap of this pipeline, kept deliberate rather than
// papered over.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Malformed or missing raw input files — aborts the pipeline
    #[error("input error: {0}")]
    Input(String),

    /// A record with an invalid shape — recovered by dropping it
    #[error("validation error: {0}")]
    Validation(String),

    /// Text-generation service failure — recovered by skipping
    /// that item's augmentation
    #[error("external service error: {0}")]
    ExternalService(String),

    /// Model build/fit/save failure — aborts training
    #[error("model error: {0}")]
    Model(String),

    /// Filesystem failure writing or reading artifacts — fatal
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failure — fatal at stage level
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
