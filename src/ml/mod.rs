// ============================================================
// ML Layer
// ============================================================
// Model architecture, the epoch training loop, and early
// stopping. Everything here is generic over the burn backend;
// the trainer pins the concrete Autodiff<NdArray> stack.

pub mod early_stopping;
pub mod model;
pub mod trainer;
