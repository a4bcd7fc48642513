// ============================================================
// Early Stopping
// ============================================================
// Watches validation loss across epochs and signals the trainer
// to halt once it has gone `patience` consecutive epochs without
// improving on the best value seen so far.

/// Halt criterion over the per-epoch validation loss.
#[derive(Clone, Debug)]
pub struct EarlyStopping {
    /// Epochs to wait for improvement before stopping
    patience: usize,
    /// Best validation loss seen so far
    best_loss: f64,
    /// Consecutive epochs without improvement
    epochs_without_improvement: usize,
}

impl EarlyStopping {
    pub fn new(patience: usize) -> Self {
        Self {
            patience,
            best_loss: f64::INFINITY,
            epochs_without_improvement: 0,
        }
    }

    /// Record this epoch's validation loss. Returns true when
    /// training should stop.
    pub fn should_stop(&mut self, val_loss: f64) -> bool {
        if val_loss < self.best_loss {
            self.best_loss = val_loss;
            self.epochs_without_improvement = 0;
        } else {
            self.epochs_without_improvement += 1;
        }
        self.epochs_without_improvement >= self.patience
    }

    pub fn best_loss(&self) -> f64 {
        self.best_loss
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_improving_loss_never_stops() {
        let mut stopper = EarlyStopping::new(3);
        for loss in [1.0, 0.9, 0.8, 0.7, 0.6] {
            assert!(!stopper.should_stop(loss));
        }
        assert!((stopper.best_loss() - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stops_after_patience_exhausted() {
        let mut stopper = EarlyStopping::new(3);
        assert!(!stopper.should_stop(1.0));
        assert!(!stopper.should_stop(1.1));
        assert!(!stopper.should_stop(1.2));
        assert!(stopper.should_stop(1.3));
    }

    #[test]
    fn test_improvement_resets_patience() {
        let mut stopper = EarlyStopping::new(2);
        assert!(!stopper.should_stop(1.0));
        assert!(!stopper.should_stop(1.5));
        // New best resets the counter
        assert!(!stopper.should_stop(0.9));
        assert!(!stopper.should_stop(1.5));
        assert!(stopper.should_stop(1.5));
    }

    #[test]
    fn test_equal_loss_counts_as_no_improvement() {
        let mut stopper = EarlyStopping::new(2);
        assert!(!stopper.should_stop(1.0));
        assert!(!stopper.should_stop(1.0));
        assert!(stopper.should_stop(1.0));
    }
}
