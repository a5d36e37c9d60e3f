pub struct StatsHelper;

impl StatsHelper {
    /// Median of `values`, or `None` when empty.
    ///
    /// Sorts a copy; the caller's slice keeps its order. Even counts average
    /// the two middle values.
    pub fn median(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            Some((sorted[mid - 1] + sorted[mid]) / 2.0)
        } else {
            Some(sorted[mid])
        }
    }
}

pub fn median(values: &[f64]) -> Option<f64> {
    StatsHelper::median(values)
}
