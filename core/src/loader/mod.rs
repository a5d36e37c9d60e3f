pub mod cache;
pub mod context;
pub mod transport;

pub use cache::SqmCache;
pub use context::SqmLoader;
pub use transport::{FileTransport, MemoryTransport, TextTransport};
