/// Common error type for loading and manifest handling.
///
/// Parsing measurement text never fails; only the surrounding I/O does.
#[derive(thiserror::Error, Debug)]
pub enum SqmError {
    #[error("transport failure for {source_id}: {reason}")]
    Transport { source_id: String, reason: String },
    #[error("invalid manifest: {0}")]
    Manifest(#[from] serde_json::Error),
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
}

impl SqmError {
    pub fn transport(source_id: impl Into<String>, reason: impl ToString) -> Self {
        SqmError::Transport {
            source_id: source_id.into(),
            reason: reason.to_string(),
        }
    }
}

pub type SqmResult<T> = Result<T, SqmError>;
