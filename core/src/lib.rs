//! Core data layer for the SQM light-pollution site.
//!
//! Parses Sky Quality Meter measurement files, derives the median and
//! histogram views the site charts, and loads files through a memoizing
//! context that fetches each source at most once per run.

pub mod loader;
pub mod math;
pub mod prelude;
pub mod site;
pub mod sqm;
pub mod telemetry;

pub use math::histogram::{bucketize, BucketSpec, HistogramBucket};
pub use math::stats::median;
pub use prelude::{SqmError, SqmResult};
pub use sqm::{parse, PolarSample, ProcessedSqmResult, SqmSample, SqmSeriesProcessor};
