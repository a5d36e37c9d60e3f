use serde::{Deserialize, Serialize};

use crate::math::histogram::{BucketSpec, HistogramBucket};
use crate::sqm::class::SqmClass;
use crate::sqm::sample::{PolarSample, ProcessedSqmResult};

/// What the site shows for one measurement file: marker class, histogram
/// bars and sky-plot samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSummary {
    pub median_magnitude: Option<f64>,
    pub class: SqmClass,
    pub sample_count: usize,
    pub polar_count: usize,
    pub histogram: Vec<HistogramBucket>,
    pub polar_samples: Vec<PolarSample>,
}

impl SeriesSummary {
    pub fn from_result(result: &ProcessedSqmResult, buckets: &BucketSpec) -> Self {
        Self {
            median_magnitude: result.median_magnitude,
            class: SqmClass::from_median(result.median_magnitude),
            sample_count: result.all_magnitudes.len(),
            polar_count: result.polar_samples.len(),
            histogram: buckets.bucketize(&result.all_magnitudes),
            polar_samples: result.polar_samples.clone(),
        }
    }

    /// Summary for a source with no usable data.
    pub fn empty(buckets: &BucketSpec) -> Self {
        Self::from_result(&ProcessedSqmResult::default(), buckets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqm::parse;

    #[test]
    fn summary_combines_class_and_histogram() {
        let raw = "a b 01:00:00 c d 21.9 e 70 10\na b 01:01:00 c d 15.0 e 20 10\n";
        let summary = SeriesSummary::from_result(&parse(raw), &BucketSpec::default());
        assert_eq!(summary.class, SqmClass::Class1);
        assert_eq!(summary.sample_count, 2);
        assert_eq!(summary.polar_count, 2);
        assert_eq!(summary.histogram[0].count, 1);
        assert_eq!(summary.histogram[30].count, 1);
    }

    #[test]
    fn empty_summary_has_no_data_class() {
        let summary = SeriesSummary::empty(&BucketSpec::default());
        assert_eq!(summary.class, SqmClass::NoData);
        assert!(summary.histogram.iter().all(|b| b.count == 0));
    }
}
