pub mod manifest;

pub use manifest::{resolve_source, Location, LocationSummary, Manifest};
