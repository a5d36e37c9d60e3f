use anyhow::bail;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Configuration for a synthetic all-sky SQM sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub date: String,
    /// Sky brightness at the zenith, mag/arcsec².
    pub zenith_magnitude: f64,
    /// Brightening at the horizon relative to the zenith.
    pub horizon_loss: f64,
    pub altitude_step: f64,
    pub azimuth_step: f64,
    pub noise: f64,
    pub seed: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            date: "2024-03-09".into(),
            zenith_magnitude: 21.3,
            horizon_loss: 2.5,
            altitude_step: 15.0,
            azimuth_step: 30.0,
            noise: 0.05,
            seed: 0,
        }
    }
}

fn clock(seconds: u32) -> String {
    let seconds = seconds % 86_400;
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds / 60) % 60,
        seconds % 60
    )
}

/// Build the text of a measurement file: a `#` header followed by one line
/// per altitude/azimuth pointing, zenith last.
pub fn build_sweep(config: &SweepConfig) -> anyhow::Result<String> {
    if !(config.altitude_step > 0.0 && config.azimuth_step > 0.0) {
        bail!("sweep steps must be positive");
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut lines = vec![
        "# Synthetic SQM sweep".to_string(),
        format!("# Seed: {}", config.seed),
        "# Date Local UTC Temp Freq MSAS Counts Alt Az".to_string(),
    ];

    let start = 22 * 3600;
    let mut elapsed = 0u32;
    let mut altitude = 0.0;
    while altitude < 90.0 {
        let mut azimuth = 0.0;
        while azimuth < 360.0 {
            lines.push(sample_line(config, &mut rng, start, elapsed, altitude, azimuth));
            elapsed += 20;
            azimuth += config.azimuth_step;
        }
        altitude += config.altitude_step;
    }
    lines.push(sample_line(config, &mut rng, start, elapsed, 90.0, 0.0));

    Ok(lines.join("\n") + "\n")
}

fn sample_line(
    config: &SweepConfig,
    rng: &mut StdRng,
    start: u32,
    elapsed: u32,
    altitude: f64,
    azimuth: f64,
) -> String {
    let airmass_loss = config.horizon_loss * (1.0 - altitude.to_radians().sin());
    let jitter = if config.noise > 0.0 {
        rng.gen_range(-config.noise..config.noise)
    } else {
        0.0
    };
    let magnitude = config.zenith_magnitude - airmass_loss + jitter;
    let temperature = 4.0 + rng.gen_range(-0.5..0.5);
    format!(
        "{} {} {} {:.1} {:.2} {:.2} {} {:.1} {:.1}",
        config.date,
        clock(start + elapsed + 3600),
        clock(start + elapsed),
        temperature,
        10f64.powf((21.0 - magnitude) / 2.5) * 10.0,
        magnitude,
        rng.gen_range(100..5000),
        altitude,
        azimuth
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqmcore::parse;

    #[test]
    fn sweep_parses_into_full_polar_grid() {
        let text = build_sweep(&SweepConfig::default()).unwrap();
        let result = parse(&text);
        // 6 altitude rings of 12 azimuths plus the zenith.
        assert_eq!(result.all_magnitudes.len(), 73);
        assert_eq!(result.polar_samples.len(), 73);
        assert!(result.median_magnitude.unwrap() > 20.5);
    }

    #[test]
    fn sweep_is_reproducible_for_a_seed() {
        let config = SweepConfig {
            seed: 7,
            ..Default::default()
        };
        assert_eq!(build_sweep(&config).unwrap(), build_sweep(&config).unwrap());
    }

    #[test]
    fn zero_step_is_rejected() {
        let config = SweepConfig {
            azimuth_step: 0.0,
            ..Default::default()
        };
        assert!(build_sweep(&config).is_err());
    }

    #[test]
    fn clock_wraps_at_midnight() {
        assert_eq!(clock(23 * 3600 + 59 * 60 + 59), "23:59:59");
        assert_eq!(clock(86_400 + 61), "00:01:01");
    }
}
