// ============================================================
// Training Loop
// ============================================================
// Full train + validation loop over pre-built batches.
//
//   - Training uses MyBackend (Autodiff<NdArray>) for gradients
//   - model.valid() returns the model on MyInnerBackend (NdArray)
//   - Validation batches are built on MyInnerBackend by the caller
//   - argmax(1) returns [batch,1] so we flatten before .equal()
//
// Learning rate warms up linearly over the first warmup_steps
// optimiser steps, then holds at the configured value.

use burn::{
    module::AutodiffModule,
    optim::{decay::WeightDecayConfig, AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::config::TrainingConfig;
use crate::data::batcher::LmBatch;
use crate::domain::record::EpochRecord;
use crate::error::Result;
use crate::infra::monitor::TrainingMonitor;
use crate::ml::early_stopping::EarlyStopping;
use crate::ml::model::{LmModel, LmModelConfig};

pub type MyBackend      = burn::backend::Autodiff<burn::backend::NdArray>;
pub type MyInnerBackend = burn::backend::NdArray;

const EARLY_STOPPING_PATIENCE: usize = 3;

pub fn run_training(
    cfg:           &TrainingConfig,
    vocab_size:    usize,
    train_batches: Vec<LmBatch<MyBackend>>,
    val_batches:   Vec<LmBatch<MyInnerBackend>>,
    monitor:       &TrainingMonitor,
) -> Result<LmModel<MyBackend>> {
    let device = burn::backend::ndarray::NdArrayDevice::default();
    tracing::info!("Using ndarray device: {:?}", device);

    if cfg.use_amp {
        tracing::debug!("use_amp is set but mixed precision is not applied on this backend");
    }

    // ── Build model ───────────────────────────────────────────────────────────
    let model_cfg = LmModelConfig::small(vocab_size, cfg.max_seq_length);
    let mut model: LmModel<MyBackend> = model_cfg.init(&device);
    tracing::info!(
        "Model ready: {} layers, d_model={}, vocab_size={}",
        model_cfg.num_layers, model_cfg.d_model, vocab_size
    );

    // ── Adam optimiser ────────────────────────────────────────────────────────
    // m = β1*m + (1-β1)*g        (mean)
    // v = β2*v + (1-β2)*g²       (variance)
    // θ = θ - lr * m / (√v + ε)  (update)
    let optim_cfg = AdamConfig::new()
        .with_epsilon(1e-8)
        .with_weight_decay(Some(WeightDecayConfig::new(cfg.weight_decay.into())))
        .with_grad_clipping(Some(burn::grad_clipping::GradientClippingConfig::Norm(
            cfg.gradient_clip_norm,
        )));
    let mut optim = optim_cfg.init();

    let mut stopper     = EarlyStopping::new(EARLY_STOPPING_PATIENCE);
    let mut global_step = 0usize;

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {

        // ── Training phase ────────────────────────────────────────────────────
        let mut train_loss_sum  = 0.0f64;
        let mut train_correct   = 0usize;
        let mut train_samples   = 0usize;
        let train_batch_count   = train_batches.len();

        for batch in &train_batches {
            let lr = warmup_lr(cfg.learning_rate, global_step, cfg.warmup_steps);

            let (loss, logits) = model.forward_loss(
                batch.input_ids.clone(),
                batch.labels.clone(),
            );

            train_loss_sum += loss.clone().into_scalar().elem::<f64>();
            train_correct  += count_correct(logits, batch.labels.clone());
            train_samples  += batch.batch_size();

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(lr, model, grads);
            global_step += 1;
        }

        let avg_train_loss = if train_batch_count > 0 {
            train_loss_sum / train_batch_count as f64
        } else { f64::NAN };
        let train_acc = if train_samples > 0 {
            train_correct as f64 / train_samples as f64
        } else { 0.0 };

        // ── Validation phase ──────────────────────────────────────────────────
        // model.valid() drops the autodiff graph and disables dropout
        let model_valid = model.valid();

        let mut val_loss_sum = 0.0f64;
        let mut val_correct  = 0usize;
        let mut val_samples  = 0usize;
        let val_batch_count  = val_batches.len();

        for batch in &val_batches {
            let (loss, logits) = model_valid.forward_loss(
                batch.input_ids.clone(),
                batch.labels.clone(),
            );

            val_loss_sum += loss.into_scalar().elem::<f64>();
            val_correct  += count_correct(logits, batch.labels.clone());
            val_samples  += batch.batch_size();
        }

        let has_validation = val_batch_count > 0;
        let avg_val_loss = if has_validation {
            Some(val_loss_sum / val_batch_count as f64)
        } else { None };
        let val_acc = if val_samples > 0 {
            Some(val_correct as f64 / val_samples as f64)
        } else { None };

        tracing::info!(
            "Epoch {:>3}/{} | train_loss={:.4} | train_acc={:.1}% | val_loss={} | val_acc={}",
            epoch, cfg.epochs, avg_train_loss, train_acc * 100.0,
            avg_val_loss.map_or("n/a".to_string(), |v| format!("{v:.4}")),
            val_acc.map_or("n/a".to_string(), |v| format!("{:.1}%", v * 100.0)),
        );

        // The stopping epoch itself is still recorded
        monitor.record_epoch(epoch, &EpochRecord {
            loss:         avg_train_loss,
            accuracy:     train_acc,
            val_loss:     avg_val_loss,
            val_accuracy: val_acc,
        });

        if let Some(val_loss) = avg_val_loss {
            if stopper.should_stop(val_loss) {
                tracing::info!(
                    "Early stopping at epoch {} (best val_loss={:.4})",
                    epoch, stopper.best_loss()
                );
                break;
            }
        }
    }

    tracing::info!("Training complete!");
    Ok(model)
}

fn warmup_lr(base_lr: f64, step: usize, warmup_steps: usize) -> f64 {
    if warmup_steps == 0 {
        return base_lr;
    }
    base_lr * (((step + 1) as f64 / warmup_steps as f64).min(1.0))
}

/// Count label hits in a batch of next-token logits.
fn count_correct<B: Backend>(logits: Tensor<B, 2>, labels: Tensor<B, 1, Int>) -> usize {
    // argmax(1) returns [batch, 1] — flatten to [batch] before .equal()
    let predictions = logits.argmax(1).flatten::<1>(0, 1);
    let correct: i64 = predictions
        .equal(labels)
        .int()
        .sum()
        .into_scalar()
        .elem::<i64>();
    correct as usize
}
