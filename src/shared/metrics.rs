use serde::Serialize;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

const UNSET_TS: u64 = 0;

#[derive(Debug)]
pub struct SyncMetric {
    success: AtomicU64,
    failure: AtomicU64,
    last_success_ms: AtomicU64,
    last_failure_ms: AtomicU64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SyncMetricSnapshot {
    pub successes: u64,
    pub failures: u64,
    pub last_success_ms: Option<u64>,
    pub last_failure_ms: Option<u64>,
}

impl SyncMetric {
    const fn new() -> Self {
        Self {
            success: AtomicU64::new(0),
            failure: AtomicU64::new(0),
            last_success_ms: AtomicU64::new(UNSET_TS),
            last_failure_ms: AtomicU64::new(UNSET_TS),
        }
    }

    pub fn record_success(&self) {
        self.success.fetch_add(1, Ordering::Relaxed);
        self.last_success_ms
            .store(current_unix_ms(), Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failure.fetch_add(1, Ordering::Relaxed);
        self.last_failure_ms
            .store(current_unix_ms(), Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> SyncMetricSnapshot {
        SyncMetricSnapshot {
            successes: self.success.load(Ordering::Relaxed),
            failures: self.failure.load(Ordering::Relaxed),
            last_success_ms: to_option(self.last_success_ms.load(Ordering::Relaxed)),
            last_failure_ms: to_option(self.last_failure_ms.load(Ordering::Relaxed)),
        }
    }
}

/// Counters for the two write paths of the core. Shared process-wide so the
/// application shell can surface them without plumbing handles around.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SyncMetricsSnapshot {
    pub reconcile: SyncMetricSnapshot,
    pub drain: SyncMetricSnapshot,
}

static RECONCILE_METRIC: LazyLock<SyncMetric> = LazyLock::new(SyncMetric::new);
static DRAIN_METRIC: LazyLock<SyncMetric> = LazyLock::new(SyncMetric::new);

pub fn reconcile_metric() -> &'static SyncMetric {
    &RECONCILE_METRIC
}

pub fn drain_metric() -> &'static SyncMetric {
    &DRAIN_METRIC
}

pub fn snapshot() -> SyncMetricsSnapshot {
    SyncMetricsSnapshot {
        reconcile: RECONCILE_METRIC.snapshot(),
        drain: DRAIN_METRIC.snapshot(),
    }
}

fn to_option(value: u64) -> Option<u64> {
    if value == UNSET_TS { None } else { Some(value) }
}

fn current_unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis() as u64)
        .unwrap_or(UNSET_TS)
}
