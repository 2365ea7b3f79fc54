//! Counters for provisioning runs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::RunReport;

/// Metrics collector shared by every run of an [`Orchestrator`](crate::Orchestrator).
#[derive(Debug, Clone, Default)]
pub struct RunMetrics {
    inner: Arc<RunMetricsInner>,
}

#[derive(Debug, Default)]
struct RunMetricsInner {
    runs_started: AtomicU64,
    runs_completed: AtomicU64,
    runs_failed: AtomicU64,
    entities_created: AtomicU64,
    entities_reused: AtomicU64,
    specs_skipped: AtomicU64,
    last_success: parking_lot::Mutex<Option<DateTime<Utc>>>,
    last_failure: parking_lot::Mutex<Option<String>>,
}

/// Point-in-time copy of [`RunMetrics`], served by the HTTP API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    /// Runs started.
    pub runs_started: u64,
    /// Runs that reached `completed`.
    pub runs_completed: u64,
    /// Runs that reached `failed`.
    pub runs_failed: u64,
    /// Roles, categories and channels created.
    pub entities_created: u64,
    /// Roles, categories and channels reused.
    pub entities_reused: u64,
    /// Declarations skipped.
    pub specs_skipped: u64,
    /// When the last run completed.
    pub last_success: Option<DateTime<Utc>>,
    /// Error text of the last failed run.
    pub last_failure: Option<String>,
}

impl RunMetrics {
    /// Creates a new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a run start.
    pub fn record_started(&self) {
        self.inner.runs_started.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a completed run and its outcomes.
    pub fn record_completed(&self, report: &RunReport) {
        self.inner.runs_completed.fetch_add(1, Ordering::Relaxed);
        self.inner
            .entities_created
            .fetch_add(report.created() as u64, Ordering::Relaxed);
        self.inner
            .entities_reused
            .fetch_add(report.reused() as u64, Ordering::Relaxed);
        self.inner
            .specs_skipped
            .fetch_add(report.skipped().len() as u64, Ordering::Relaxed);
        *self.inner.last_success.lock() = Some(Utc::now());
    }

    /// Records a failed run.
    pub fn record_failed(&self, reason: impl Into<String>) {
        self.inner.runs_failed.fetch_add(1, Ordering::Relaxed);
        *self.inner.last_failure.lock() = Some(reason.into());
    }

    /// Copy the current values.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            runs_started: self.inner.runs_started.load(Ordering::Relaxed),
            runs_completed: self.inner.runs_completed.load(Ordering::Relaxed),
            runs_failed: self.inner.runs_failed.load(Ordering::Relaxed),
            entities_created: self.inner.entities_created.load(Ordering::Relaxed),
            entities_reused: self.inner.entities_reused.load(Ordering::Relaxed),
            specs_skipped: self.inner.specs_skipped.load(Ordering::Relaxed),
            last_success: *self.inner.last_success.lock(),
            last_failure: self.inner.last_failure.lock().clone(),
        }
    }
}
