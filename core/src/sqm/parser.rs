use crate::math::stats::StatsHelper;
use crate::sqm::sample::{ProcessedSqmResult, SqmSample};
use crate::sqm::schema::SqmSchema;

/// Samples strictly above this altitude feed the median.
pub const MEDIAN_MIN_ALTITUDE: f64 = 45.0;

/// Turns raw SQM measurement text into a [`ProcessedSqmResult`].
///
/// Stateless: the same input always yields the same result, and nothing
/// in the input can make it fail. Malformed lines are dropped silently.
#[derive(Debug, Clone, Copy)]
pub struct SqmSeriesProcessor {
    schema: SqmSchema,
    median_min_altitude: f64,
}

impl Default for SqmSeriesProcessor {
    fn default() -> Self {
        Self::new(SqmSchema::STANDARD)
    }
}

impl SqmSeriesProcessor {
    pub fn new(schema: SqmSchema) -> Self {
        Self {
            schema,
            median_min_altitude: MEDIAN_MIN_ALTITUDE,
        }
    }

    pub fn schema(&self) -> SqmSchema {
        self.schema
    }

    /// Every usable sample in file order. Comment (`#`) and blank lines are
    /// skipped wherever they appear, which also covers the header block.
    pub fn samples<'a>(&'a self, raw: &'a str) -> impl Iterator<Item = SqmSample> + 'a {
        raw.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(move |line| self.parse_line(line))
    }

    fn parse_line(&self, line: &str) -> Option<SqmSample> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < self.schema.min_fields {
            return None;
        }

        let magnitude = parse_number(fields[self.schema.magnitude]).filter(|m| m.is_finite())?;

        Some(SqmSample {
            time: fields[self.schema.time].to_string(),
            magnitude,
            altitude: parse_number(fields[self.schema.altitude]),
            azimuth: parse_number(fields[self.schema.azimuth]),
        })
    }

    pub fn parse(&self, raw: &str) -> ProcessedSqmResult {
        let mut result = ProcessedSqmResult::default();
        let mut high_altitude = Vec::new();

        for sample in self.samples(raw) {
            result.all_magnitudes.push(sample.magnitude);
            if let Some(polar) = sample.to_polar() {
                result.polar_samples.push(polar);
            }
            if sample
                .altitude
                .is_some_and(|alt| alt > self.median_min_altitude)
            {
                high_altitude.push(sample.magnitude);
            }
        }

        result.median_magnitude = StatsHelper::median(&high_altitude);
        result
    }
}

fn parse_number(field: &str) -> Option<f64> {
    field.parse::<f64>().ok()
}

/// Parse with the standard schema.
pub fn parse(raw: &str) -> ProcessedSqmResult {
    SqmSeriesProcessor::default().parse(raw)
}
