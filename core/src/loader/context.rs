use std::sync::Arc;

use crate::loader::cache::SqmCache;
use crate::loader::transport::TextTransport;
use crate::prelude::{SqmError, SqmResult};
use crate::site::manifest::Manifest;
use crate::sqm::{ProcessedSqmResult, SqmSeriesProcessor};
use crate::telemetry::{LoaderMetrics, LogManager, MetricsRecorder};

/// Loading context for one session: transport, processor, cache and
/// counters. Build one and share it (usually behind `Arc`) with everything
/// that needs measurement data.
pub struct SqmLoader<T> {
    transport: T,
    processor: SqmSeriesProcessor,
    cache: SqmCache,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl<T: TextTransport> SqmLoader<T> {
    pub fn new(transport: T) -> Self {
        Self::with_processor(transport, SqmSeriesProcessor::default())
    }

    pub fn with_processor(transport: T, processor: SqmSeriesProcessor) -> Self {
        Self {
            transport,
            processor,
            cache: SqmCache::new(),
            metrics: MetricsRecorder::new(),
            logger: LogManager::new("loader"),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn cache(&self) -> &SqmCache {
        &self.cache
    }

    pub fn metrics(&self) -> LoaderMetrics {
        self.metrics.snapshot()
    }

    /// Processed series for `source`, fetching and parsing it on first use.
    ///
    /// A failed load leaves nothing behind in the cache and is counted in
    /// `failures`; `fetches` counts every transport attempt.
    pub async fn try_load(&self, source: &str) -> SqmResult<Arc<ProcessedSqmResult>> {
        let slot = self.cache.slot(source);
        if let Some(hit) = slot.get() {
            self.metrics.record_cache_hit();
            return Ok(hit.clone());
        }

        let loaded = slot
            .get_or_try_init(|| async {
                self.logger.trace_step(&format!("fetching {source}"));
                let text = self.fetch_text(source).await?;

                let parsed = self.processor.parse(&text);
                self.metrics.record_parse();
                self.logger.record(&format!(
                    "{source}: {} samples, {} polar, median {:?}",
                    parsed.all_magnitudes.len(),
                    parsed.polar_samples.len(),
                    parsed.median_magnitude
                ));
                Ok::<_, SqmError>(Arc::new(parsed))
            })
            .await;

        match loaded {
            Ok(result) => Ok(result.clone()),
            Err(err) => {
                self.cache.forget_if_empty(source, &slot);
                Err(err)
            }
        }
    }

    /// Like [`try_load`](Self::try_load) but substitutes the empty result on
    /// failure. The failure is not cached.
    pub async fn load(&self, source: &str) -> Arc<ProcessedSqmResult> {
        match self.try_load(source).await {
            Ok(result) => result,
            Err(err) => {
                self.logger.degraded(&format!("no data for {source}: {err}"));
                Arc::new(ProcessedSqmResult::default())
            }
        }
    }

    /// Fetch and parse a site manifest. Manifests are not cached.
    pub async fn fetch_manifest(&self, source: &str) -> SqmResult<Manifest> {
        let text = self.fetch_text(source).await?;
        let manifest =
            Manifest::from_json(&text).inspect_err(|_| self.metrics.record_failure())?;
        self.logger.record(&format!(
            "manifest {source}: {} locations",
            manifest.locations.len()
        ));
        Ok(manifest)
    }

    async fn fetch_text(&self, source: &str) -> SqmResult<String> {
        self.metrics.record_fetch();
        self.transport
            .fetch(source)
            .await
            .inspect_err(|_| self.metrics.record_failure())
    }
}
