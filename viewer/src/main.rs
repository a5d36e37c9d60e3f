use anyhow::Context;
use bridge::serve;
use clap::Parser;
use generator::sweep::{build_sweep, SweepConfig};
use log::info;
use sqmcore::loader::SqmLoader;
use sqmcore::site::LocationSummary;
use sqmcore::sqm::SeriesSummary;
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use transport::SiteTransport;
use workflow::config::{CliOverrides, ViewerConfig};
use workflow::runner::Runner;

mod bridge;
mod generator;
mod transport;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Loads SQM measurement data and serves site summaries")]
struct Args {
    /// Load viewer settings from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Measurement file to summarise (URL or path); repeatable
    #[arg(long = "source")]
    sources: Vec<String>,
    /// Site manifest (URL or path)
    #[arg(long)]
    manifest: Option<String>,
    #[arg(long)]
    bin_width: Option<f64>,
    #[arg(long)]
    min_range: Option<f64>,
    #[arg(long)]
    max_range: Option<f64>,
    /// Per-request timeout for HTTP fetches
    #[arg(long)]
    timeout_secs: Option<u64>,
    #[arg(long)]
    bind: Option<SocketAddr>,
    /// Print summaries as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Write a synthetic sweep file to this path and exit
    #[arg(long)]
    generate: Option<PathBuf>,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Keep serving the JSON bridge until Ctrl+C
    #[arg(long, default_value_t = false)]
    serve: bool,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            manifest: self.manifest.clone(),
            sources: self.sources.clone(),
            bin_width: self.bin_width,
            min_range: self.min_range,
            max_range: self.max_range,
            timeout_secs: self.timeout_secs,
            bind: self.bind,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(path) = &args.generate {
        let text = build_sweep(&SweepConfig {
            seed: args.seed,
            ..Default::default()
        })?;
        fs::write(path, text).with_context(|| format!("writing sweep {}", path.display()))?;
        println!("Synthetic sweep written to {}", path.display());
        return Ok(());
    }

    let config = if let Some(path) = &args.config {
        let mut config = ViewerConfig::load(path)?;
        config.apply(args.overrides());
        config
    } else {
        ViewerConfig::from_args(args.overrides())
    };

    let runtime = TokioBuilder::new_multi_thread()
        .enable_all()
        .build()
        .context("creating tokio runtime")?;
    runtime.block_on(run(config, args.json, args.serve))
}

async fn run(config: ViewerConfig, json: bool, serve_bridge: bool) -> anyhow::Result<()> {
    let transport = SiteTransport::new(config.timeout())?;
    let loader = Arc::new(SqmLoader::new(transport));
    let runner = Arc::new(Runner::new(loader, config.bucket_spec()));

    for source in &config.sources {
        let summary = runner.summarize(source).await;
        print_summary(source, &summary, json)?;
    }

    if let Some(manifest) = &config.manifest {
        let report = runner.site_report(manifest).await?;
        print_report(&report, json)?;
    }

    if serve_bridge {
        serve(runner.clone(), config.manifest.clone(), config.bind).await?;
    }

    let metrics = runner.loader().metrics();
    info!(
        "fetches={} parses={} cache_hits={} failures={}",
        metrics.fetches, metrics.parses, metrics.cache_hits, metrics.failures
    );
    Ok(())
}

fn format_median(median: Option<f64>) -> String {
    median.map_or_else(|| "n/a".to_string(), |m| format!("{m:.2}"))
}

fn print_summary(source: &str, summary: &SeriesSummary, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }
    println!(
        "{source}: median {} ({}), {} samples, {} polar",
        format_median(summary.median_magnitude),
        summary.class.label(),
        summary.sample_count,
        summary.polar_count
    );
    for bucket in summary.histogram.iter().filter(|b| b.count > 0) {
        println!("  {:>10} {}", bucket.label, bucket.count);
    }
    Ok(())
}

fn print_report(report: &[LocationSummary], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    for site in report {
        println!(
            "{} {} ({:.4}, {:.4}) -> median {} [{}]",
            site.id,
            site.name,
            site.latitude,
            site.longitude,
            format_median(site.summary.median_magnitude),
            site.summary.class.label()
        );
    }
    Ok(())
}
