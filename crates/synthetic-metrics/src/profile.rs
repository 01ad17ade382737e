//! Series shape parameters.

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

/// Shape of a synthetic daily series.
///
/// Each day's value is `baseline + trend_per_day * day + amplitude * wave +
/// noise * jitter`, where `wave` follows a weekly sine cycle and `jitter` is
/// drawn uniformly from `[-1, 1]`. The result is clamped into
/// `[floor, ceiling]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesProfile {
    /// Typical daily value.
    pub baseline: f64,
    /// Peak deviation of the weekly cycle.
    pub amplitude: f64,
    /// Peak deviation of the random jitter.
    pub noise: f64,
    /// Linear drift applied per elapsed day.
    pub trend_per_day: f64,
    /// Lowest value a sample may take.
    pub floor: f64,
    /// Highest value a sample may take.
    pub ceiling: f64,
}

impl SeriesProfile {
    /// Check the profile can drive generation.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError`] when a field is not finite, when amplitude or
    /// noise is negative, or when `floor > ceiling`.
    ///
    /// # Examples
    ///
    /// ```
    /// use synthetic_metrics::{ProfileError, SeriesProfile};
    ///
    /// let inverted = SeriesProfile {
    ///     baseline: 1.0,
    ///     amplitude: 0.0,
    ///     noise: 0.0,
    ///     trend_per_day: 0.0,
    ///     floor: 10.0,
    ///     ceiling: 5.0,
    /// };
    /// assert!(matches!(
    ///     inverted.validate(),
    ///     Err(ProfileError::InvertedBounds { .. })
    /// ));
    /// ```
    pub fn validate(&self) -> Result<(), ProfileError> {
        let fields = [
            ("baseline", self.baseline),
            ("amplitude", self.amplitude),
            ("noise", self.noise),
            ("trendPerDay", self.trend_per_day),
            ("floor", self.floor),
            ("ceiling", self.ceiling),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ProfileError::NonFinite { field });
        }
        for (field, value) in [("amplitude", self.amplitude), ("noise", self.noise)] {
            if value < 0.0 {
                return Err(ProfileError::Negative { field, value });
            }
        }
        if self.floor > self.ceiling {
            return Err(ProfileError::InvertedBounds {
                floor: self.floor,
                ceiling: self.ceiling,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn flat() -> SeriesProfile {
        SeriesProfile {
            baseline: 10.0,
            amplitude: 1.0,
            noise: 1.0,
            trend_per_day: 0.0,
            floor: 0.0,
            ceiling: 20.0,
        }
    }

    #[rstest]
    fn accepts_well_formed_profile() {
        assert_eq!(flat().validate(), Ok(()));
    }

    #[rstest]
    #[case::nan_baseline(SeriesProfile { baseline: f64::NAN, ..flat() }, "baseline")]
    #[case::infinite_ceiling(SeriesProfile { ceiling: f64::INFINITY, ..flat() }, "ceiling")]
    fn rejects_non_finite_fields(#[case] profile: SeriesProfile, #[case] expected: &str) {
        match profile.validate() {
            Err(ProfileError::NonFinite { field }) => assert_eq!(field, expected),
            other => panic!("expected NonFinite, got {other:?}"),
        }
    }

    #[rstest]
    fn rejects_negative_noise() {
        let profile = SeriesProfile {
            noise: -0.5,
            ..flat()
        };
        assert!(matches!(
            profile.validate(),
            Err(ProfileError::Negative { field: "noise", .. })
        ));
    }
}
