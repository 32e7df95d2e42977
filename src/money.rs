use crate::constants::SETTLEMENT_TOLERANCE;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How balances and transfer amounts are rounded to cents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// 0.125 -> 0.13, -0.125 -> -0.13
    #[default]
    HalfAwayFromZero,
    /// Banker's rounding: 0.125 -> 0.12, 0.135 -> 0.14
    HalfEven,
}

impl RoundingMode {
    /// Rounds `value` to two decimal places.
    pub fn round2(self, value: f64) -> f64 {
        if !value.is_finite() {
            return value;
        }
        let scaled = value * 100.0;
        if !scaled.is_finite() {
            return value;
        }
        let rounded = match self {
            RoundingMode::HalfAwayFromZero => scaled.round(),
            RoundingMode::HalfEven => round_half_even(scaled),
        };
        // Normalise -0.0 so serialized output never shows "-0.0".
        let result = rounded / 100.0;
        if result == 0.0 { 0.0 } else { result }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RoundingMode::HalfAwayFromZero => "half_away_from_zero",
            RoundingMode::HalfEven => "half_even",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for RoundingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "half_away_from_zero" | "half-away-from-zero" | "half_up" => Ok(RoundingMode::HalfAwayFromZero),
            "half_even" | "half-even" | "bankers" => Ok(RoundingMode::HalfEven),
            other => Err(format!("unknown rounding mode `{}`", other)),
        }
    }
}

fn round_half_even(scaled: f64) -> f64 {
    let floor = scaled.floor();
    let diff = scaled - floor;
    // Values produced by `x * 100.0` carry representation noise, so "exactly half"
    // is checked with a small window.
    if (diff - 0.5).abs() < 1e-9 {
        if floor % 2.0 == 0.0 { floor } else { floor + 1.0 }
    } else {
        scaled.round()
    }
}

/// Rounds with the default mode.
pub fn round2(value: f64) -> f64 {
    RoundingMode::default().round2(value)
}

/// True when `value` is too small to be worth a transfer.
pub fn is_negligible(value: f64) -> bool {
    value.abs() <= SETTLEMENT_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_away_from_zero_rounds_both_signs_outward() {
        let mode = RoundingMode::HalfAwayFromZero;
        assert_eq!(mode.round2(33.333333), 33.33);
        assert_eq!(mode.round2(66.666666), 66.67);
        assert_eq!(mode.round2(-33.333333), -33.33);
        assert_eq!(mode.round2(2.5 / 100.0), 0.03);
        assert_eq!(mode.round2(-2.5 / 100.0), -0.03);
    }

    #[test]
    fn half_even_prefers_even_cent() {
        let mode = RoundingMode::HalfEven;
        assert_eq!(mode.round2(0.125), 0.12);
        assert_eq!(mode.round2(0.375), 0.38);
        assert_eq!(mode.round2(-0.125), -0.12);
        assert_eq!(mode.round2(1.004), 1.0);
    }

    #[test]
    fn negative_zero_is_normalised() {
        let r = round2(-0.001);
        assert_eq!(r, 0.0);
        assert!(r.is_sign_positive());
    }

    #[test]
    fn values_too_large_to_scale_are_kept() {
        assert_eq!(round2(1.7e308), 1.7e308);
        assert_eq!(RoundingMode::HalfEven.round2(-1.7e308), -1.7e308);
        assert!(round2(f64::INFINITY).is_infinite());
    }

    #[test]
    fn negligible_uses_settlement_tolerance() {
        assert!(is_negligible(0.009));
        assert!(is_negligible(-0.005));
        assert!(!is_negligible(0.01));
        assert!(!is_negligible(-0.0091));
    }

    #[test]
    fn parses_rounding_mode_names() {
        assert_eq!("half_even".parse::<RoundingMode>(), Ok(RoundingMode::HalfEven));
        assert_eq!(" Bankers ".parse::<RoundingMode>(), Ok(RoundingMode::HalfEven));
        assert_eq!(
            "half_away_from_zero".parse::<RoundingMode>(),
            Ok(RoundingMode::HalfAwayFromZero)
        );
        assert!("nearest".parse::<RoundingMode>().is_err());
        assert_eq!(RoundingMode::HalfEven.to_string(), "half_even");
    }
}
