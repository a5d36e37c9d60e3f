use anyhow::Context;
use sqmcore::loader::{FileTransport, TextTransport};
use sqmcore::{SqmError, SqmResult};
use std::time::Duration;

/// Fetches sources over HTTP(S). Non-2xx responses count as failures.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("building HTTP client")?;
        Ok(Self { client })
    }
}

impl TextTransport for HttpTransport {
    async fn fetch(&self, source: &str) -> SqmResult<String> {
        let response = self
            .client
            .get(source)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|err| SqmError::transport(source, err))?;
        response
            .text()
            .await
            .map_err(|err| SqmError::transport(source, err))
    }
}

/// Routes `http(s)://` sources to the network and everything else to disk.
#[derive(Clone)]
pub struct SiteTransport {
    http: HttpTransport,
    file: FileTransport,
}

impl SiteTransport {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            http: HttpTransport::new(timeout)?,
            file: FileTransport::new(),
        })
    }
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

impl TextTransport for SiteTransport {
    async fn fetch(&self, source: &str) -> SqmResult<String> {
        if is_remote(source) {
            self.http.fetch(source).await
        } else {
            self.file.fetch(source).await
        }
    }
}
