use std::sync::Mutex;

use serde::Serialize;

/// Counters kept by a loader over its lifetime. `fetches` counts transport
/// attempts; `failures` counts attempts that failed to fetch or decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoaderMetrics {
    pub fetches: usize,
    pub parses: usize,
    pub cache_hits: usize,
    pub failures: usize,
}

pub struct MetricsRecorder {
    inner: Mutex<LoaderMetrics>,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(LoaderMetrics::default()),
        }
    }

    fn update(&self, apply: impl FnOnce(&mut LoaderMetrics)) {
        if let Ok(mut metrics) = self.inner.lock() {
            apply(&mut metrics);
        }
    }

    pub fn record_fetch(&self) {
        self.update(|m| m.fetches += 1);
    }

    pub fn record_parse(&self) {
        self.update(|m| m.parses += 1);
    }

    pub fn record_cache_hit(&self) {
        self.update(|m| m.cache_hits += 1);
    }

    pub fn record_failure(&self) {
        self.update(|m| m.failures += 1);
    }

    pub fn snapshot(&self) -> LoaderMetrics {
        if let Ok(metrics) = self.inner.lock() {
            *metrics
        } else {
            LoaderMetrics::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
