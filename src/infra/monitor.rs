// ============================================================
// Training Monitor
// ============================================================
// Run-scoped metrics sink with a network endpoint for external
// dashboards. The trainer calls record_epoch() once per
// completed epoch; the endpoint serves whatever has been
// recorded so far.
//
// Monitoring is best-effort and never load-bearing: a failed
// bind is logged as a warning and training continues without the
// endpoint. stop() is idempotent — safe to call when start()
// failed or was never called.
//
// The four metric sequences grow in lockstep. A metric missing
// from an epoch record is stored as a NaN sentinel (serialised
// as null) so the sequences never drift out of alignment.
//
// Endpoint:
//   GET /metrics — the metric series recorded so far, as JSON
//   GET /health  — liveness check

use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tokio::sync::oneshot;

use crate::domain::record::EpochRecord;

/// Per-epoch metric sequences, appended in lockstep.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSeries {
    pub loss: Vec<f64>,
    pub accuracy: Vec<f64>,
    pub validation_loss: Vec<f64>,
    pub validation_accuracy: Vec<f64>,
}

type SharedSeries = Arc<Mutex<MetricSeries>>;

struct ServerHandle {
    shutdown_tx: oneshot::Sender<()>,
    thread: JoinHandle<()>,
}

pub struct TrainingMonitor {
    port: u16,
    metrics: SharedSeries,
    server: Option<ServerHandle>,
}

impl TrainingMonitor {
    pub fn new(port: u16) -> Self {
        Self { port, metrics: Arc::default(), server: None }
    }

    /// Open the listening endpoint on a background thread.
    /// Bind failure is logged, never propagated.
    pub fn start(&mut self) {
        if self.server.is_some() {
            return;
        }

        let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
            Ok(rt) => rt,
            Err(e) => {
                tracing::warn!("Failed to start training monitor: {e}");
                return;
            }
        };

        let listener =
            match runtime.block_on(tokio::net::TcpListener::bind(("0.0.0.0", self.port))) {
                Ok(listener) => listener,
                Err(e) => {
                    tracing::warn!("Failed to start training monitor on port {}: {e}", self.port);
                    return;
                }
            };

        let app = Router::new()
            .route("/metrics", get(metrics_handler))
            .route("/health", get(health_handler))
            .with_state(Arc::clone(&self.metrics));

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let thread = std::thread::spawn(move || {
            let serve = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            });
            if let Err(e) = runtime.block_on(std::future::IntoFuture::into_future(serve)) {
                tracing::warn!("Training monitor server error: {e}");
            }
        });

        tracing::info!("Training monitor started on port {}", self.port);
        self.server = Some(ServerHandle { shutdown_tx, thread });
    }

    /// Close the endpoint. Idempotent.
    pub fn stop(&mut self) {
        if let Some(handle) = self.server.take() {
            let _ = handle.shutdown_tx.send(());
            let _ = handle.thread.join();
            tracing::info!("Training monitor stopped");
        }
    }

    /// Append one epoch's metrics to all four sequences.
    pub fn record_epoch(&self, epoch: usize, record: &EpochRecord) {
        let mut metrics = self.metrics.lock().unwrap_or_else(PoisonError::into_inner);
        metrics.loss.push(record.loss);
        metrics.accuracy.push(record.accuracy);
        metrics.validation_loss.push(record.val_loss.unwrap_or(f64::NAN));
        metrics.validation_accuracy.push(record.val_accuracy.unwrap_or(f64::NAN));

        tracing::info!(
            "Epoch {} - loss: {:.4}, accuracy: {:.4}",
            epoch,
            record.loss,
            record.accuracy,
        );
    }

    /// Snapshot of the series recorded so far.
    pub fn metrics(&self) -> MetricSeries {
        self.metrics.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Drop for TrainingMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn metrics_handler(State(metrics): State<SharedSeries>) -> Json<MetricSeries> {
    Json(metrics.lock().unwrap_or_else(PoisonError::into_inner).clone())
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn full_record(loss: f64) -> EpochRecord {
        EpochRecord { loss, accuracy: 0.5, val_loss: Some(loss + 0.1), val_accuracy: Some(0.4) }
    }

    #[test]
    fn test_sequences_stay_aligned() {
        let monitor = TrainingMonitor::new(0);
        for epoch in 1..=5 {
            monitor.record_epoch(epoch, &full_record(1.0 / epoch as f64));
        }

        let m = monitor.metrics();
        assert_eq!(m.loss.len(), 5);
        assert_eq!(m.accuracy.len(), 5);
        assert_eq!(m.validation_loss.len(), 5);
        assert_eq!(m.validation_accuracy.len(), 5);
    }

    #[test]
    fn test_missing_fields_recorded_as_sentinels() {
        let monitor = TrainingMonitor::new(0);
        monitor.record_epoch(
            1,
            &EpochRecord { loss: 0.7, accuracy: 0.2, val_loss: None, val_accuracy: None },
        );

        let m = monitor.metrics();
        assert_eq!(m.validation_loss.len(), 1);
        assert!(m.validation_loss[0].is_nan());
        assert!(m.validation_accuracy[0].is_nan());
    }

    #[test]
    fn test_sentinels_serialize_as_null() {
        let monitor = TrainingMonitor::new(0);
        monitor.record_epoch(
            1,
            &EpochRecord { loss: 0.7, accuracy: 0.2, val_loss: None, val_accuracy: None },
        );

        let json = serde_json::to_value(monitor.metrics()).unwrap();
        assert_eq!(json["validationLoss"][0], serde_json::Value::Null);
        assert_eq!(json["loss"][0], 0.7);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut monitor = TrainingMonitor::new(0);
        // Never started — stop must be a no-op, twice
        monitor.stop();
        monitor.stop();
    }

    #[test]
    fn test_start_and_stop_round_trip() {
        // Port 0 lets the OS pick a free port; we only assert
        // the lifecycle doesn't hang or panic.
        let mut monitor = TrainingMonitor::new(0);
        monitor.start();
        monitor.record_epoch(1, &full_record(0.9));
        monitor.stop();
        monitor.stop();
    }
}
