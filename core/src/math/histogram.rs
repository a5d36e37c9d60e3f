use serde::{Deserialize, Serialize};

/// One bar of the magnitude histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBucket {
    pub label: String,
    pub count: usize,
}

/// Layouts needing more interior buckets than this are treated as degenerate.
pub const MAX_INTERIOR_BUCKETS: usize = 10_000;

/// Bucket layout: two open-ended outer buckets around equal-width interior
/// buckets covering `[min_range, max_range)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucketSpec {
    pub bin_width: f64,
    pub min_range: f64,
    pub max_range: f64,
}

impl Default for BucketSpec {
    fn default() -> Self {
        Self {
            bin_width: 0.2,
            min_range: 16.0,
            max_range: 22.0,
        }
    }
}

impl BucketSpec {
    pub fn new(bin_width: f64, min_range: f64, max_range: f64) -> Self {
        Self {
            bin_width,
            min_range,
            max_range,
        }
    }

    fn is_degenerate(&self) -> bool {
        if !(self.bin_width.is_finite() && self.bin_width > 0.0)
            || !(self.min_range.is_finite() && self.max_range.is_finite())
            || self.max_range <= self.min_range
        {
            return true;
        }
        let count = ((self.max_range - self.min_range) / self.bin_width).round();
        !count.is_finite() || count > MAX_INTERIOR_BUCKETS as f64
    }

    /// Interior bucket count and the width each interior bucket spans.
    /// A degenerate or oversized layout collapses to one bucket over the whole range.
    fn interior(&self) -> (usize, f64) {
        if self.is_degenerate() {
            return (1, self.max_range - self.min_range);
        }
        let count = ((self.max_range - self.min_range) / self.bin_width).round() as usize;
        (count.max(1), self.bin_width)
    }

    /// Count `values` into buckets. Interior buckets are half-open
    /// `[start, end)`; NaN values are skipped.
    pub fn bucketize(&self, values: &[f64]) -> Vec<HistogramBucket> {
        let (interior, width) = self.interior();

        let mut buckets = Vec::with_capacity(interior + 2);
        buckets.push(HistogramBucket {
            label: format!("<{}", self.min_range),
            count: 0,
        });
        for i in 0..interior {
            let start = self.min_range + i as f64 * width;
            let end = start + width;
            buckets.push(HistogramBucket {
                label: format!("{start:.1}-{end:.1}"),
                count: 0,
            });
        }
        buckets.push(HistogramBucket {
            label: format!(">{}", self.max_range),
            count: 0,
        });

        let last = interior + 1;
        for &value in values {
            if value.is_nan() {
                continue;
            }
            let index = if value < self.min_range {
                0
            } else if value >= self.max_range {
                last
            } else {
                // Rounding can push values just under max_range past the
                // last interior bucket.
                let offset = ((value - self.min_range) / width).floor() as usize;
                (offset + 1).clamp(1, interior)
            };
            buckets[index].count += 1;
        }

        buckets
    }
}

pub fn bucketize(
    values: &[f64],
    bin_width: f64,
    min_range: f64,
    max_range: f64,
) -> Vec<HistogramBucket> {
    BucketSpec::new(bin_width, min_range, max_range).bucketize(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(buckets: &[HistogramBucket]) -> Vec<usize> {
        buckets.iter().map(|b| b.count).collect()
    }

    #[test]
    fn default_layout_has_thirty_interior_buckets() {
        let buckets = BucketSpec::default().bucketize(&[]);
        assert_eq!(buckets.len(), 32);
        assert_eq!(buckets[0].label, "<16");
        assert_eq!(buckets[1].label, "16.0-16.2");
        assert_eq!(buckets[30].label, "21.8-22.0");
        assert_eq!(buckets[31].label, ">22");
    }

    #[test]
    fn edges_route_to_expected_buckets() {
        let buckets = bucketize(&[15.9, 16.0, 21.99, 22.0], 0.2, 16.0, 22.0);
        assert_eq!(buckets[0].count, 1);
        assert_eq!(buckets[1].count, 1);
        assert_eq!(buckets[30].count, 1);
        assert_eq!(buckets[31].count, 1);
        assert_eq!(counts(&buckets).iter().sum::<usize>(), 4);
    }

    #[test]
    fn nan_values_are_ignored() {
        let buckets = bucketize(&[f64::NAN, 18.05], 0.2, 16.0, 22.0);
        assert_eq!(counts(&buckets).iter().sum::<usize>(), 1);
        assert_eq!(buckets[11].count, 1);
    }

    #[test]
    fn degenerate_width_collapses_to_single_interior_bucket() {
        let buckets = bucketize(&[15.0, 18.0, 23.0], 0.0, 16.0, 22.0);
        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[1].label, "16.0-22.0");
        assert_eq!(counts(&buckets), vec![1, 1, 1]);
    }

    #[test]
    fn tiny_width_collapses_instead_of_overflowing() {
        let buckets = bucketize(&[15.0, 18.0, 22.5], 1e-300, 16.0, 22.0);
        assert_eq!(buckets.len(), 3);
        assert_eq!(counts(&buckets), vec![1, 1, 1]);

        let buckets = bucketize(&[18.0], 1e-9, 16.0, 22.0);
        assert_eq!(buckets.len(), 3);
    }

    #[test]
    fn layout_at_bucket_limit_is_kept() {
        let width = 6.0 / MAX_INTERIOR_BUCKETS as f64;
        let buckets = bucketize(&[], width, 16.0, 22.0);
        assert_eq!(buckets.len(), MAX_INTERIOR_BUCKETS + 2);
    }
}
