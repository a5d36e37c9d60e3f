pub mod class;
pub mod parser;
pub mod sample;
pub mod schema;
pub mod summary;

pub use class::SqmClass;
pub use parser::{parse, SqmSeriesProcessor};
pub use sample::{PolarSample, ProcessedSqmResult, SqmSample};
pub use schema::SqmSchema;
pub use summary::SeriesSummary;
