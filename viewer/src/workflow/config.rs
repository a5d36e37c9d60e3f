use anyhow::Context;
use serde::{Deserialize, Serialize};
use sqmcore::BucketSpec;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Site manifest (URL or path).
    pub manifest: Option<String>,
    /// Measurement files to summarise individually.
    pub sources: Vec<String>,
    pub bin_width: f64,
    pub min_range: f64,
    pub max_range: f64,
    pub timeout_secs: u64,
    pub bind: SocketAddr,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let buckets = BucketSpec::default();
        Self {
            manifest: None,
            sources: Vec::new(),
            bin_width: buckets.bin_width,
            min_range: buckets.min_range,
            max_range: buckets.max_range,
            timeout_secs: 10,
            bind: SocketAddr::from(([127, 0, 0, 1], 9000)),
        }
    }
}

/// Values given on the command line; each one replaces the config value.
#[derive(Clone, Debug, Default)]
pub struct CliOverrides {
    pub manifest: Option<String>,
    pub sources: Vec<String>,
    pub bin_width: Option<f64>,
    pub min_range: Option<f64>,
    pub max_range: Option<f64>,
    pub timeout_secs: Option<u64>,
    pub bind: Option<SocketAddr>,
}

impl ViewerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading viewer config {}", path_ref.display()))?;
        let config: ViewerConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing viewer config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(overrides: CliOverrides) -> Self {
        let mut config = Self::default();
        config.apply(overrides);
        config
    }

    /// CLI sources are appended to the configured ones; every other
    /// override replaces its field.
    pub fn apply(&mut self, overrides: CliOverrides) {
        self.sources.extend(overrides.sources);
        if let Some(manifest) = overrides.manifest {
            self.manifest = Some(manifest);
        }
        if let Some(bin_width) = overrides.bin_width {
            self.bin_width = bin_width;
        }
        if let Some(min_range) = overrides.min_range {
            self.min_range = min_range;
        }
        if let Some(max_range) = overrides.max_range {
            self.max_range = max_range;
        }
        if let Some(timeout_secs) = overrides.timeout_secs {
            self.timeout_secs = timeout_secs;
        }
        if let Some(bind) = overrides.bind {
            self.bind = bind;
        }
    }

    pub fn bucket_spec(&self) -> BucketSpec {
        BucketSpec::new(self.bin_width, self.min_range, self.max_range)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}
