/// Column layout of a whitespace-delimited SQM data line (0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqmSchema {
    pub time: usize,
    pub magnitude: usize,
    pub altitude: usize,
    pub azimuth: usize,
    /// Lines with fewer fields are dropped.
    pub min_fields: usize,
}

impl SqmSchema {
    /// Layout of the files the site publishes: magnitude in mag/arcsec²,
    /// altitude and azimuth in degrees.
    pub const STANDARD: SqmSchema = SqmSchema {
        time: 2,
        magnitude: 5,
        altitude: 7,
        azimuth: 8,
        min_fields: 9,
    };
}

impl Default for SqmSchema {
    fn default() -> Self {
        Self::STANDARD
    }
}
