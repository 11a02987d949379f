#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Background worker boundary for the enhancement pipeline.
//!
//! One [`EnhanceWorker`] exists per consuming view. Requests go in over a
//! channel, tagged replies come back over another; the caller never blocks
//! and no failure ever crosses the boundary as a raised fault. Overlapping
//! requests are legal and deliver no ordering guarantee beyond the monotonic
//! request ids, so callers apply last-id-wins when discarding stale replies.
//!
//! Tearing the worker down (explicitly or by drop) hard-terminates the task
//! and abandons in-flight work; the caller observes this as the reply
//! channel closing.

use thiserror::Error;
use tokio::sync::mpsc;

use justice_map_enhance_models::{EnhanceRequest, EnhanceResponse};
use justice_map_geography_models::CountyPopulations;

/// Bound on the request and reply channels. A consuming view only ever has a
/// handful of requests in flight, so a small buffer is plenty.
const CHANNEL_CAPACITY: usize = 16;

/// Errors surfaced to callers of the worker handle.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// The worker task is no longer running; the view should stop waiting
    /// and clear any loading state.
    #[error("Enhancement worker is no longer running")]
    Terminated,
}

/// A tagged reply from the worker.
///
/// `request_id` matches the id returned by [`EnhanceWorker::submit`] so the
/// caller can discard replies superseded by a newer request.
#[derive(Debug, Clone, PartialEq)]
pub struct EnhanceReply {
    /// Id of the request this reply answers.
    pub request_id: u64,
    /// The computed features, or a structured error.
    pub response: EnhanceResponse,
}

struct Envelope {
    request_id: u64,
    request: EnhanceRequest,
}

/// Handle to a dedicated background enhancement task.
pub struct EnhanceWorker {
    tx: mpsc::Sender<Envelope>,
    next_id: u64,
    handle: tokio::task::JoinHandle<()>,
}

impl EnhanceWorker {
    /// Spawns the worker task and returns the handle plus the reply channel.
    ///
    /// The population table is captured once at spawn; it is immutable for
    /// the worker's lifetime.
    #[must_use]
    pub fn spawn(populations: CountyPopulations) -> (Self, mpsc::Receiver<EnhanceReply>) {
        let (tx, mut rx) = mpsc::channel::<Envelope>(CHANNEL_CAPACITY);
        let (reply_tx, reply_rx) = mpsc::channel::<EnhanceReply>(CHANNEL_CAPACITY);

        let handle = tokio::spawn(async move {
            while let Some(Envelope {
                request_id,
                request,
            }) = rx.recv().await
            {
                log::debug!(
                    "Enhancement request {request_id}: {} features, {} rows, metric {}",
                    request.features.len(),
                    request.rows.len(),
                    request.selected_metric
                );

                let response = compute(&request, &populations);

                if reply_tx
                    .send(EnhanceReply {
                        request_id,
                        response,
                    })
                    .await
                    .is_err()
                {
                    // Reply receiver gone: the consuming view was torn down.
                    break;
                }
            }
            log::debug!("Enhancement worker loop exited");
        });

        (
            Self {
                tx,
                next_id: 0,
                handle,
            },
            reply_rx,
        )
    }

    /// Submits a request and returns its monotonically increasing id.
    ///
    /// Fire-and-forget: the result arrives on the reply channel, tagged with
    /// the returned id.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::Terminated`] if the worker task has stopped.
    pub async fn submit(&mut self, request: EnhanceRequest) -> Result<u64, WorkerError> {
        self.next_id += 1;
        let request_id = self.next_id;
        self.tx
            .send(Envelope {
                request_id,
                request,
            })
            .await
            .map_err(|_| WorkerError::Terminated)?;
        Ok(request_id)
    }

    /// Hard-terminates the worker, abandoning any in-flight computation.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for EnhanceWorker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Runs one computation, converting any panic into a structured error
/// payload instead of letting it tear across the boundary.
fn compute(request: &EnhanceRequest, populations: &CountyPopulations) -> EnhanceResponse {
    std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        justice_map_enhance::run(request, populations)
    }))
    .map_or_else(
        |panic| {
            let error = panic_message(panic.as_ref());
            log::error!("Enhancement computation failed: {error}");
            EnhanceResponse::Error { error }
        },
        EnhanceResponse::Features,
    )
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    panic.downcast_ref::<&str>().map_or_else(
        || {
            panic
                .downcast_ref::<String>()
                .cloned()
                .unwrap_or_else(|| "Enhancement computation panicked".to_string())
        },
        |s| (*s).to_string(),
    )
}

#[cfg(test)]
mod tests {
    use justice_map_stats_models::{DataSourceKind, Row};

    use super::*;

    fn feature_named(name: &str) -> geojson::Feature {
        let mut properties = geojson::JsonObject::new();
        properties.insert("name".to_string(), serde_json::json!(name));
        geojson::Feature {
            bbox: None,
            geometry: None,
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }

    fn populations() -> CountyPopulations {
        [("Kern".to_string(), 1000u64)].into_iter().collect()
    }

    fn arrest_request(value: i32) -> EnhanceRequest {
        EnhanceRequest {
            features: vec![feature_named("Kern")],
            rows: vec![Row::new("Kern", 2020).with_field("Total_Arrests", value)],
            selected_metric: "Total_Arrests".to_string(),
            data_source: DataSourceKind::Arrest,
            per_capita: false,
        }
    }

    #[tokio::test]
    async fn submits_and_receives_tagged_reply() {
        let (mut worker, mut replies) = EnhanceWorker::spawn(populations());

        let id = worker.submit(arrest_request(42)).await.unwrap();
        let reply = replies.recv().await.unwrap();

        assert_eq!(reply.request_id, id);
        let EnhanceResponse::Features(features) = reply.response else {
            panic!("expected features");
        };
        assert_eq!(features.len(), 1);
        assert!((features[0].raw_value - 42.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn request_ids_are_monotonic() {
        let (mut worker, mut replies) = EnhanceWorker::spawn(populations());

        let first = worker.submit(arrest_request(1)).await.unwrap();
        let second = worker.submit(arrest_request(2)).await.unwrap();
        assert!(second > first);

        let reply_a = replies.recv().await.unwrap();
        let reply_b = replies.recv().await.unwrap();
        assert_eq!(reply_a.request_id, first);
        assert_eq!(reply_b.request_id, second);
    }

    #[tokio::test]
    async fn caller_can_discard_stale_replies_by_id() {
        let (mut worker, mut replies) = EnhanceWorker::spawn(populations());

        worker.submit(arrest_request(1)).await.unwrap();
        let latest = worker.submit(arrest_request(2)).await.unwrap();

        // Last-id-wins: keep only the reply matching the latest submission.
        let mut kept = None;
        for _ in 0..2 {
            let reply = replies.recv().await.unwrap();
            if reply.request_id == latest {
                kept = Some(reply);
            }
        }

        let EnhanceResponse::Features(features) = kept.unwrap().response else {
            panic!("expected features");
        };
        assert!((features[0].raw_value - 2.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn shutdown_closes_reply_channel() {
        let (worker, mut replies) = EnhanceWorker::spawn(populations());

        worker.shutdown();

        assert!(replies.recv().await.is_none());
    }

    #[tokio::test]
    async fn submit_after_shutdown_reports_terminated() {
        let (mut worker, _replies) = EnhanceWorker::spawn(populations());

        worker.shutdown();
        // Let the abort land before submitting.
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        let result = worker.submit(arrest_request(1)).await;
        assert!(matches!(result, Err(WorkerError::Terminated)));
    }
}
