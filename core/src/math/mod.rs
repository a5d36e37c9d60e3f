pub mod histogram;
pub mod polar;
pub mod stats;

pub use histogram::{bucketize, BucketSpec, HistogramBucket};
pub use polar::{project, PolarPoint};
pub use stats::{median, StatsHelper};
