// ============================================================
// Batcher
// ============================================================
// Groups samples into fixed-size batches of tensors. Batches are
// taken in order with chunks(batch_size), so the last batch of a
// split may be shorter — never dropped.
//
// Sequences inside a batch are LEFT-padded with the [PAD] id to
// the longest sequence in that batch. Left padding keeps every
// sample's final real token at the last position, which is where
// the model reads its prediction from.

use burn::prelude::*;

use crate::data::dataset::LmSample;

const PAD_ID: u32 = 0;

/// A batch of samples ready for a forward pass.
#[derive(Debug, Clone)]
pub struct LmBatch<B: Backend> {
    /// Token id sequences — shape: [batch_size, seq_len]
    pub input_ids: Tensor<B, 2, Int>,
    /// Next-token labels — shape: [batch_size]
    pub labels: Tensor<B, 1, Int>,
}

impl<B: Backend> LmBatch<B> {
    pub fn batch_size(&self) -> usize {
        self.labels.dims()[0]
    }
}

/// Builds batches on a fixed device.
#[derive(Clone, Debug)]
pub struct LmBatcher<B: Backend> {
    device: B::Device,
}

impl<B: Backend> LmBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }

    /// Chunk samples into batches of `batch_size` in order.
    pub fn batch_all(&self, samples: &[LmSample], batch_size: usize) -> Vec<LmBatch<B>> {
        samples.chunks(batch_size.max(1)).map(|chunk| self.batch(chunk)).collect()
    }

    /// Stack one chunk of samples into tensors.
    fn batch(&self, items: &[LmSample]) -> LmBatch<B> {
        let batch_size = items.len();
        let seq_len = items.iter().map(|s| s.input_ids.len()).max().unwrap_or(1).max(1);

        // Left-pad each sequence, then flatten row-major
        let mut input_flat: Vec<i32> = Vec::with_capacity(batch_size * seq_len);
        for sample in items {
            let pad = seq_len - sample.input_ids.len();
            input_flat.extend(std::iter::repeat(PAD_ID as i32).take(pad));
            input_flat.extend(sample.input_ids.iter().map(|&id| id as i32));
        }

        let labels: Vec<i32> = items.iter().map(|s| s.label as i32).collect();

        let input_ids = Tensor::<B, 1, Int>::from_ints(input_flat.as_slice(), &self.device)
            .reshape([batch_size, seq_len]);
        let labels = Tensor::<B, 1, Int>::from_ints(labels.as_slice(), &self.device);

        LmBatch { input_ids, labels }
    }
}
