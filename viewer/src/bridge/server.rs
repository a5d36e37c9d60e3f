use crate::workflow::runner::Runner;
use anyhow::Context;
use log::{info, warn};
use serde::Deserialize;
use serde_json::json;
use sqmcore::loader::TextTransport;
use std::{convert::Infallible, net::SocketAddr, sync::Arc};
use warp::{http::StatusCode, Filter, Rejection, Reply};

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub source: String,
}

/// JSON endpoints consumed by the site's map, chart and sky-plot views.
///
/// * `GET /summary?source=...` – summary of one measurement file
/// * `GET /sites` – summaries for every location in the configured manifest
/// * `GET /metrics` – loader counters
pub fn routes<T: TextTransport + 'static>(
    runner: Arc<Runner<T>>,
    manifest: Option<String>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let runner_filter = warp::any().map(move || runner.clone());
    let manifest_filter = warp::any().map(move || manifest.clone());

    let summary_route = warp::path("summary")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<SummaryQuery>())
        .and(runner_filter.clone())
        .and_then(summary_handler::<T>);

    let sites_route = warp::path("sites")
        .and(warp::path::end())
        .and(warp::get())
        .and(runner_filter.clone())
        .and(manifest_filter)
        .and_then(sites_handler::<T>);

    let metrics_route = warp::path("metrics")
        .and(warp::path::end())
        .and(warp::get())
        .and(runner_filter)
        .map(|runner: Arc<Runner<T>>| warp::reply::json(&runner.loader().metrics()));

    summary_route.or(sites_route).or(metrics_route)
}

async fn summary_handler<T: TextTransport + 'static>(
    query: SummaryQuery,
    runner: Arc<Runner<T>>,
) -> Result<impl Reply, Infallible> {
    let summary = runner.summarize(&query.source).await;
    Ok(warp::reply::json(&summary))
}

async fn sites_handler<T: TextTransport + 'static>(
    runner: Arc<Runner<T>>,
    manifest: Option<String>,
) -> Result<impl Reply, Infallible> {
    let Some(manifest) = manifest else {
        return Ok(warp::reply::with_status(
            warp::reply::json(&Vec::<()>::new()),
            StatusCode::OK,
        ));
    };
    match runner.site_report(&manifest).await {
        Ok(report) => Ok(warp::reply::with_status(
            warp::reply::json(&report),
            StatusCode::OK,
        )),
        Err(err) => {
            warn!("sites request failed: {err:#}");
            Ok(warp::reply::with_status(
                warp::reply::json(&json!({ "error": format!("{err:#}") })),
                StatusCode::BAD_GATEWAY,
            ))
        }
    }
}

/// Serve the bridge until Ctrl+C.
pub async fn serve<T: TextTransport + 'static>(
    runner: Arc<Runner<T>>,
    manifest: Option<String>,
    bind: SocketAddr,
) -> anyhow::Result<()> {
    let (addr, server) = warp::serve(routes(runner, manifest))
        .try_bind_with_graceful_shutdown(bind, async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!("could not listen for Ctrl+C: {err}");
            }
        })
        .with_context(|| format!("binding JSON bridge to {bind}"))?;
    info!("JSON bridge listening on http://{addr} (Ctrl+C to stop)");
    server.await;
    Ok(())
}
