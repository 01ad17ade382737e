//! Deterministic series generation.
#![expect(
    clippy::float_arithmetic,
    reason = "series values are computed in floating point"
)]

use std::f64::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::ProfileError;
use crate::profile::SeriesProfile;

/// Length of the oscillation cycle in days.
const CYCLE_DAYS: f64 = 7.0;

/// Samples are rounded to this many decimal places.
const ROUNDING_FACTOR: f64 = 100.0;

/// One generated daily sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntheticSample {
    /// Zero-based day index. Offset `0` is the oldest day in the series.
    pub day_offset: u32,
    /// Generated value, clamped into the profile bounds.
    pub value: f64,
}

/// Generate `days` samples for `profile`, seeded by `seed`.
///
/// Samples are returned oldest first. Identical inputs always yield identical
/// output.
///
/// # Errors
///
/// Returns [`ProfileError`] when the profile fails
/// [`SeriesProfile::validate`].
///
/// # Examples
///
/// ```
/// use synthetic_metrics::{SeriesProfile, generate_series};
///
/// let profile = SeriesProfile {
///     baseline: 50.0,
///     amplitude: 0.0,
///     noise: 0.0,
///     trend_per_day: 0.0,
///     floor: 0.0,
///     ceiling: 100.0,
/// };
/// let samples = generate_series(&profile, 7, 3).expect("valid profile");
/// assert!(samples.iter().all(|sample| sample.value == 50.0));
/// ```
pub fn generate_series(
    profile: &SeriesProfile,
    seed: u64,
    days: u32,
) -> Result<Vec<SyntheticSample>, ProfileError> {
    profile.validate()?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let phase = rng.random_range(0.0..TAU);

    Ok((0..days)
        .map(|day_offset| SyntheticSample {
            day_offset,
            value: sample_value(profile, &mut rng, phase, day_offset),
        })
        .collect())
}

fn sample_value(profile: &SeriesProfile, rng: &mut ChaCha8Rng, phase: f64, day: u32) -> f64 {
    let elapsed = f64::from(day);
    let wave = (TAU * elapsed / CYCLE_DAYS + phase).sin();
    let jitter = if profile.noise > 0.0 {
        rng.random_range(-1.0..=1.0)
    } else {
        0.0
    };
    let raw = profile.baseline
        + profile.trend_per_day * elapsed
        + profile.amplitude * wave
        + profile.noise * jitter;
    let rounded = (raw * ROUNDING_FACTOR).round() / ROUNDING_FACTOR;
    rounded.clamp(profile.floor, profile.ceiling)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn noisy() -> SeriesProfile {
        SeriesProfile {
            baseline: 100.0,
            amplitude: 20.0,
            noise: 10.0,
            trend_per_day: 0.5,
            floor: 60.0,
            ceiling: 140.0,
        }
    }

    #[rstest]
    fn offsets_are_sequential(noisy: SeriesProfile) {
        let samples = generate_series(&noisy, 1, 10).expect("valid profile");
        let offsets: Vec<u32> = samples.iter().map(|sample| sample.day_offset).collect();
        assert_eq!(offsets, (0..10).collect::<Vec<_>>());
    }

    #[rstest]
    fn values_respect_bounds(noisy: SeriesProfile) {
        let samples = generate_series(&noisy, 99, 365).expect("valid profile");
        assert!(
            samples
                .iter()
                .all(|sample| (60.0..=140.0).contains(&sample.value))
        );
    }

    #[rstest]
    fn different_seeds_diverge(noisy: SeriesProfile) {
        let first = generate_series(&noisy, 1, 30).expect("valid profile");
        let second = generate_series(&noisy, 2, 30).expect("valid profile");
        assert_ne!(first, second);
    }

    #[rstest]
    fn zero_days_yields_empty_series(noisy: SeriesProfile) {
        let samples = generate_series(&noisy, 1, 0).expect("valid profile");
        assert!(samples.is_empty());
    }

    #[rstest]
    fn invalid_profile_is_rejected(noisy: SeriesProfile) {
        let profile = SeriesProfile {
            floor: 200.0,
            ..noisy
        };
        assert!(generate_series(&profile, 1, 5).is_err());
    }
}
