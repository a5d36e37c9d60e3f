use serde::{Deserialize, Serialize};

/// Sky-brightness class used to colour map markers, darkest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SqmClass {
    Class1,
    Class2,
    Class3,
    Class4,
    Class5,
    Class6,
    Class7,
    Class8,
    Class9,
    NoData,
}

/// Lower bound (inclusive) of each class from Class1 to Class8; anything
/// below the last bound is Class9.
const LOWER_BOUNDS: [(f64, SqmClass); 8] = [
    (21.76, SqmClass::Class1),
    (21.6, SqmClass::Class2),
    (21.3, SqmClass::Class3),
    (20.8, SqmClass::Class4),
    (20.3, SqmClass::Class5),
    (19.25, SqmClass::Class6),
    (18.5, SqmClass::Class7),
    (18.0, SqmClass::Class8),
];

impl SqmClass {
    pub fn from_median(median: Option<f64>) -> Self {
        match median {
            Some(value) if value.is_finite() => LOWER_BOUNDS
                .iter()
                .find(|(bound, _)| value >= *bound)
                .map(|(_, class)| *class)
                .unwrap_or(SqmClass::Class9),
            _ => SqmClass::NoData,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SqmClass::Class1 => ">= 21.76",
            SqmClass::Class2 => "21.60 - 21.76",
            SqmClass::Class3 => "21.30 - 21.60",
            SqmClass::Class4 => "20.80 - 21.30",
            SqmClass::Class5 => "20.30 - 20.80",
            SqmClass::Class6 => "19.25 - 20.30",
            SqmClass::Class7 => "18.50 - 19.25",
            SqmClass::Class8 => "18.00 - 18.50",
            SqmClass::Class9 => "< 18.00",
            SqmClass::NoData => "no data",
        }
    }

    /// Marker colour as a CSS hex string.
    pub fn color(&self) -> &'static str {
        match self {
            SqmClass::Class1 => "#000000",
            SqmClass::Class2 => "#1c1c4a",
            SqmClass::Class3 => "#1f3f8f",
            SqmClass::Class4 => "#2e7d32",
            SqmClass::Class5 => "#9ccc3c",
            SqmClass::Class6 => "#fdd835",
            SqmClass::Class7 => "#fb8c00",
            SqmClass::Class8 => "#e53935",
            SqmClass::Class9 => "#ffffff",
            SqmClass::NoData => "#9e9e9e",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive_on_lower_bound() {
        assert_eq!(SqmClass::from_median(Some(21.76)), SqmClass::Class1);
        assert_eq!(SqmClass::from_median(Some(21.759)), SqmClass::Class2);
        assert_eq!(SqmClass::from_median(Some(20.8)), SqmClass::Class4);
        assert_eq!(SqmClass::from_median(Some(18.0)), SqmClass::Class8);
        assert_eq!(SqmClass::from_median(Some(17.99)), SqmClass::Class9);
    }

    #[test]
    fn missing_or_invalid_median_is_no_data() {
        assert_eq!(SqmClass::from_median(None), SqmClass::NoData);
        assert_eq!(SqmClass::from_median(Some(f64::NAN)), SqmClass::NoData);
    }
}
