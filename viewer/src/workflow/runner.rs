use anyhow::Context;
use sqmcore::loader::{SqmLoader, TextTransport};
use sqmcore::site::LocationSummary;
use sqmcore::sqm::SeriesSummary;
use sqmcore::BucketSpec;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Turns sources and manifests into the summaries the site displays.
pub struct Runner<T> {
    loader: Arc<SqmLoader<T>>,
    buckets: BucketSpec,
}

impl<T: TextTransport + 'static> Runner<T> {
    pub fn new(loader: Arc<SqmLoader<T>>, buckets: BucketSpec) -> Self {
        Self { loader, buckets }
    }

    pub fn loader(&self) -> &Arc<SqmLoader<T>> {
        &self.loader
    }

    /// Summary of one measurement file; an unreachable file yields the
    /// empty summary.
    pub async fn summarize(&self, source: &str) -> SeriesSummary {
        let result = self.loader.load(source).await;
        SeriesSummary::from_result(&result, &self.buckets)
    }

    /// Load a manifest and summarise every location concurrently, keeping
    /// manifest order.
    pub async fn site_report(&self, manifest_source: &str) -> anyhow::Result<Vec<LocationSummary>> {
        let manifest = self
            .loader
            .fetch_manifest(manifest_source)
            .await
            .with_context(|| format!("loading manifest {manifest_source}"))?;

        let mut tasks = JoinSet::new();
        for (index, (location, source)) in manifest.sources(manifest_source).enumerate() {
            let loader = self.loader.clone();
            let location = location.clone();
            let buckets = self.buckets;
            tasks.spawn(async move {
                let summary = match source.as_deref() {
                    Some(source) => SeriesSummary::from_result(&*loader.load(source).await, &buckets),
                    None => SeriesSummary::empty(&buckets),
                };
                (index, LocationSummary::new(&location, source, summary))
            });
        }

        let mut report = Vec::with_capacity(manifest.locations.len());
        while let Some(joined) = tasks.join_next().await {
            report.push(joined.context("summarising location")?);
        }
        report.sort_by_key(|(index, _)| *index);
        Ok(report.into_iter().map(|(_, summary)| summary).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqmcore::loader::MemoryTransport;
    use sqmcore::sqm::SqmClass;

    const DARK: &str = "# dark site\n\
        2024-03-09 23:00:00 22:00:00 4.0 1.0 21.80 900 80.0 0.0\n\
        2024-03-09 23:00:20 22:00:20 4.0 1.0 21.90 900 70.0 90.0\n";
    const BRIGHT: &str = "2024-03-09 23:00:00 22:00:00 4.0 1.0 17.50 900 60.0 0.0\n";

    fn runner() -> Runner<MemoryTransport> {
        let transport = MemoryTransport::new()
            .with_file("data/dark.dat", DARK)
            .with_file("data/bright.dat", BRIGHT)
            .with_file(
                "data/manifest.json",
                r#"{"locations":[
                    {"id":"dark","name":"Dark Valley","latitude":46.3,"longitude":13.8,"sqm_file":"dark.dat"},
                    {"id":"city","name":"City","latitude":46.05,"longitude":14.5,"sqm_file":"bright.dat"},
                    {"id":"gone","name":"Missing","latitude":45.5,"longitude":13.6,"sqm_file":"missing.dat"},
                    {"id":"plan","name":"Planned","latitude":45.9,"longitude":15.1}
                ]}"#,
            );
        Runner::new(Arc::new(SqmLoader::new(transport)), BucketSpec::default())
    }

    #[tokio::test]
    async fn summarize_formats_single_source() {
        let summary = runner().summarize("data/dark.dat").await;
        assert_eq!(summary.sample_count, 2);
        assert_eq!(summary.class, SqmClass::Class1);
        assert!((summary.median_magnitude.unwrap() - 21.85).abs() < 1e-9);
    }

    #[tokio::test]
    async fn site_report_keeps_manifest_order() {
        let runner = runner();
        let report = runner.site_report("data/manifest.json").await.unwrap();
        let ids: Vec<&str> = report.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["dark", "city", "gone", "plan"]);

        assert_eq!(report[0].summary.class, SqmClass::Class1);
        assert_eq!(report[1].summary.class, SqmClass::Class9);
        assert_eq!(report[2].summary.class, SqmClass::NoData);
        assert_eq!(report[3].source, None);
        assert_eq!(runner.loader().metrics().failures, 1);
    }

    #[tokio::test]
    async fn missing_manifest_is_an_error() {
        let err = runner().site_report("nope.json").await.unwrap_err();
        assert!(err.to_string().contains("loading manifest nope.json"));
    }
}
