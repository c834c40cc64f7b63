//! Playback rate
//!
//! The speed menu offers a fixed set of rates; anything else is rejected
//! rather than clamped.

use crate::error::PlaybackError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported playback rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum PlaybackRate {
    /// 0.5x
    Half,
    /// 0.75x
    ThreeQuarters,
    /// 1.0x
    #[default]
    Normal,
    /// 1.25x
    OneAndQuarter,
    /// 1.5x
    OneAndHalf,
    /// 2.0x
    Double,
}

impl PlaybackRate {
    /// All rates in menu order
    pub const ALL: [PlaybackRate; 6] = [
        Self::Half,
        Self::ThreeQuarters,
        Self::Normal,
        Self::OneAndQuarter,
        Self::OneAndHalf,
        Self::Double,
    ];

    /// Rate multiplier
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Half => 0.5,
            Self::ThreeQuarters => 0.75,
            Self::Normal => 1.0,
            Self::OneAndQuarter => 1.25,
            Self::OneAndHalf => 1.5,
            Self::Double => 2.0,
        }
    }

    /// Look up a rate by multiplier
    ///
    /// All supported multipliers are exact binary fractions, so matching is
    /// exact up to a tiny tolerance for values that went through text.
    pub fn from_f64(value: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|rate| (rate.as_f64() - value).abs() < 1e-9)
    }
}

impl TryFrom<f64> for PlaybackRate {
    type Error = PlaybackError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_f64(value).ok_or(PlaybackError::InvalidRate(value))
    }
}

impl From<PlaybackRate> for f64 {
    fn from(rate: PlaybackRate) -> Self {
        rate.as_f64()
    }
}

impl fmt::Display for PlaybackRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.as_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_normal_speed() {
        assert_eq!(PlaybackRate::default(), PlaybackRate::Normal);
        assert_eq!(PlaybackRate::default().as_f64(), 1.0);
    }

    #[test]
    fn every_menu_rate_round_trips() {
        for rate in PlaybackRate::ALL {
            assert_eq!(PlaybackRate::try_from(rate.as_f64()).unwrap(), rate);
        }
    }

    #[test]
    fn unsupported_rates_are_rejected() {
        for value in [3.0, 0.0, -1.0, 1.1, f64::NAN, f64::INFINITY] {
            assert!(PlaybackRate::from_f64(value).is_none(), "value = {value}");
        }
        assert!(matches!(
            PlaybackRate::try_from(3.0),
            Err(PlaybackError::InvalidRate(v)) if v == 3.0
        ));
    }

    #[test]
    fn display_matches_menu_label() {
        assert_eq!(PlaybackRate::OneAndQuarter.to_string(), "1.25x");
        assert_eq!(PlaybackRate::Double.to_string(), "2x");
    }

    #[test]
    fn serializes_as_multiplier() {
        assert_eq!(serde_json::to_string(&PlaybackRate::Half).unwrap(), "0.5");
        let rate: PlaybackRate = serde_json::from_str("1.5").unwrap();
        assert_eq!(rate, PlaybackRate::OneAndHalf);
        assert!(serde_json::from_str::<PlaybackRate>("3.0").is_err());
    }
}
