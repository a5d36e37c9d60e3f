use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};

use crate::prelude::{SqmError, SqmResult};

/// Retrieves the raw text behind a source identifier (URL or path).
///
/// Implementations report any failure as [`SqmError::Transport`]; retries
/// are left to the caller.
pub trait TextTransport: Send + Sync {
    fn fetch(&self, source: &str) -> impl Future<Output = SqmResult<String>> + Send;
}

/// Reads sources from the local filesystem, optionally below a root
/// directory. A leading `file://` is accepted.
#[derive(Debug, Clone, Default)]
pub struct FileTransport {
    root: Option<PathBuf>,
}

impl FileTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, source: &str) -> PathBuf {
        let path = Path::new(source.strip_prefix("file://").unwrap_or(source));
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl TextTransport for FileTransport {
    async fn fetch(&self, source: &str) -> SqmResult<String> {
        let path = self.resolve(source);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|err| SqmError::transport(source, err))
    }
}

/// Serves sources from an in-memory table; unknown keys fail like a 404.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    files: HashMap<String, String>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, source: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(source, text);
        self
    }

    pub fn insert(&mut self, source: impl Into<String>, text: impl Into<String>) {
        self.files.insert(source.into(), text.into());
    }
}

impl TextTransport for MemoryTransport {
    async fn fetch(&self, source: &str) -> SqmResult<String> {
        self.files
            .get(source)
            .cloned()
            .ok_or_else(|| SqmError::transport(source, "not found"))
    }
}
