use serde::{Deserialize, Serialize};

use crate::sqm::PolarSample;

/// Cartesian position on the sky plot, north up (+y) and east right (+x).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarPoint {
    pub x: f64,
    pub y: f64,
}

/// Place a sample on a plot of the given radius: zenith at the centre,
/// horizon on the rim, azimuth clockwise from north.
pub fn project(sample: &PolarSample, radius: f64) -> PolarPoint {
    let r = (90.0 - sample.altitude) / 90.0 * radius;
    let theta = sample.azimuth.to_radians();
    PolarPoint {
        x: r * theta.sin(),
        y: r * theta.cos(),
    }
}
