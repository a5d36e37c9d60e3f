use serde::{Deserialize, Serialize};

/// One measurement line whose magnitude parsed to a finite number.
#[derive(Debug, Clone, PartialEq)]
pub struct SqmSample {
    pub time: String,
    pub magnitude: f64,
    pub altitude: Option<f64>,
    pub azimuth: Option<f64>,
}

impl SqmSample {
    /// The sample as a sky-plot point, if its time and angles are usable.
    pub fn to_polar(&self) -> Option<PolarSample> {
        if self.time.is_empty() {
            return None;
        }
        let altitude = self.altitude.filter(|alt| (0.0..=90.0).contains(alt))?;
        let azimuth = self.azimuth.filter(|az| (0.0..=360.0).contains(az))?;
        Some(PolarSample {
            time: self.time.clone(),
            magnitude: self.magnitude,
            altitude,
            azimuth,
        })
    }
}

/// A sample with a timestamp and in-range altitude/azimuth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolarSample {
    pub time: String,
    pub magnitude: f64,
    pub altitude: f64,
    pub azimuth: f64,
}

/// Everything the site derives from one measurement file.
///
/// `median_magnitude` only covers samples above 45° altitude, while
/// `all_magnitudes` keeps every parsed magnitude in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedSqmResult {
    pub median_magnitude: Option<f64>,
    pub all_magnitudes: Vec<f64>,
    pub polar_samples: Vec<PolarSample>,
}

impl ProcessedSqmResult {
    pub fn is_empty(&self) -> bool {
        self.all_magnitudes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_serializes_with_site_field_names() {
        let result = ProcessedSqmResult {
            median_magnitude: Some(20.5),
            all_magnitudes: vec![20.5],
            polar_samples: vec![PolarSample {
                time: "12:00:00".into(),
                magnitude: 20.5,
                altitude: 46.0,
                azimuth: 10.0,
            }],
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["medianMagnitude"], 20.5);
        assert_eq!(value["allMagnitudes"][0], 20.5);
        assert_eq!(value["polarSamples"][0]["azimuth"], 10.0);
    }

    #[test]
    fn sample_without_time_or_angles_is_not_polar() {
        let sample = SqmSample {
            time: String::new(),
            magnitude: 20.0,
            altitude: Some(50.0),
            azimuth: Some(10.0),
        };
        assert!(sample.to_polar().is_none());
        let sample = SqmSample {
            time: "01:00:00".into(),
            azimuth: None,
            ..sample
        };
        assert!(sample.to_polar().is_none());
    }
}
