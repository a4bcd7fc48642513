// ============================================================
// Domain Layer
// ============================================================
// Plain structs and traits defining the core concepts of the
// system. No burn types, no file I/O, no network calls here —
// only the shapes records take as they move through the
// pipeline, and the abstractions other layers implement.

// Record shapes for each pipeline stage, dataset statistics,
// and per-epoch training metrics
pub mod record;

// Core abstractions (traits) that other layers implement
pub mod traits;
