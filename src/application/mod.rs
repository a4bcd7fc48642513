// ============================================================
// Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish a
// specific goal (preparing the dataset or training the model).
//
// Rules for this layer:
//   - No ML math or model code here
//   - No UI or printing here (that's the CLI layer)
//   - No direct file access (that's data and infra)
//   - Only workflow coordination

// The dataset preparation workflow
pub mod process_data;

// The training workflow
pub mod train_use_case;
