//! Best-effort outcome reporting.
//!
//! RULE: Nothing in this module may surface a failure to the wager
//! path. Reports are queued, posted by a small worker pool, and dropped
//! after logging on any error. There is no retry.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{unbounded, Sender};
use serde::Serialize;
use uuid::Uuid;

/// Payload posted to the outcome collector after each wipe bomb.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WipeBombReport {
    pub user_id:             String,
    pub contribution_amount: i64,
    pub reward_multiplier:   f64,
    pub reward_amount:       i64,
    pub profit:              i64,
    /// RFC 3339.
    pub timestamp:           String,
}

/// Delivery seam. Implementations are shared across the worker pool.
pub trait ReportSink: Send + Sync + 'static {
    fn deliver(&self, report: &WipeBombReport) -> anyhow::Result<()>;
}

/// Posts reports as JSON to an HTTP collector.
pub struct HttpSink {
    client:   reqwest::blocking::Client,
    endpoint: String,
}

impl HttpSink {
    pub fn new(endpoint: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client, endpoint })
    }
}

impl ReportSink for HttpSink {
    fn deliver(&self, report: &WipeBombReport) -> anyhow::Result<()> {
        let response = self.client.post(&self.endpoint).json(report).send()?;
        if !response.status().is_success() {
            anyhow::bail!("collector returned {}", response.status());
        }
        Ok(())
    }
}

/// Cap on concurrent outbound dispatches. A slow collector stalls at
/// most this many threads; excess reports queue.
const MAX_WORKERS: usize = 5;

/// Engine-owned dispatch pool. Created once with the engine, drained
/// and joined when the engine is dropped. Never a global.
pub struct OutcomeNotifier {
    tx:      Option<Sender<(Uuid, WipeBombReport)>>,
    workers: Vec<JoinHandle<()>>,
}

impl OutcomeNotifier {
    pub fn new(sink: impl ReportSink) -> Self {
        Self::with_workers(sink, MAX_WORKERS)
    }

    pub fn with_workers(sink: impl ReportSink, workers: usize) -> Self {
        let sink = Arc::new(sink);
        let (tx, rx) = unbounded::<(Uuid, WipeBombReport)>();
        let workers = (0..workers.clamp(1, MAX_WORKERS))
            .map(|_| {
                let rx = rx.clone();
                let sink = Arc::clone(&sink);
                thread::spawn(move || {
                    for (dispatch_id, report) in rx.iter() {
                        if let Err(e) = sink.deliver(&report) {
                            log::error!("outcome dispatch {dispatch_id} dropped: {e}");
                        }
                    }
                })
            })
            .collect();
        Self { tx: Some(tx), workers }
    }

    /// Queue a report. Never blocks the caller; delivery failures are
    /// logged by the workers and dropped.
    pub fn dispatch(&self, report: WipeBombReport) {
        let dispatch_id = Uuid::new_v4();
        if let Some(tx) = &self.tx {
            if tx.send((dispatch_id, report)).is_err() {
                log::warn!("outcome dispatch {dispatch_id} dropped: pool is shut down");
            }
        }
    }
}

impl Drop for OutcomeNotifier {
    fn drop(&mut self) {
        // Closing the channel lets each worker drain and exit.
        self.tx.take();
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}
