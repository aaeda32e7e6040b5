use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Tuning for a two-outcome payout generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoutParams {
    pub target_rtp: f64,
    pub low_payout: f64,
    pub high_payout: f64,
    /// How strongly the running balance moves the win probability.
    /// Only the stateful generator reads it.
    pub sensitivity: f64,
}

impl PayoutParams {
    pub const DEFAULT_LOW: f64 = 0.0;
    pub const DEFAULT_HIGH: f64 = 100.0;
    pub const DEFAULT_SENSITIVITY: f64 = 0.0001;

    pub fn new(target_rtp: f64) -> Self {
        Self {
            target_rtp,
            low_payout: Self::DEFAULT_LOW,
            high_payout: Self::DEFAULT_HIGH,
            sensitivity: Self::DEFAULT_SENSITIVITY,
        }
    }

    pub fn with_payouts(mut self, low: f64, high: f64) -> Self {
        self.low_payout = low;
        self.high_payout = high;
        self
    }

    pub fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        // NaN fails both comparisons, so it is rejected here too
        if !(self.target_rtp > 0.0 && self.target_rtp <= 1.0) {
            return Err(ConfigError::InvalidRtp(self.target_rtp));
        }
        let (low, high) = (self.low_payout, self.high_payout);
        if !(low.is_finite() && high.is_finite() && low >= 0.0 && low < high) {
            return Err(ConfigError::InvalidPayouts { low, high });
        }
        if !(self.sensitivity.is_finite() && self.sensitivity >= 0.0) {
            return Err(ConfigError::InvalidSensitivity(self.sensitivity));
        }
        Ok(())
    }

    /// Solves `p * high + (1 - p) * low == target_rtp` for `p`, without clamping.
    ///
    /// Falls outside `[0, 1]` exactly when `target_rtp < low` or `target_rtp > high`.
    pub fn raw_win_probability(&self) -> f64 {
        (self.target_rtp - self.low_payout) / (self.high_payout - self.low_payout)
    }

    /// The derived win probability, clamped to `[0, 1]`.
    pub fn win_probability(&self) -> f64 {
        clamp_probability(self.raw_win_probability())
    }

    pub fn is_probability_clamped(&self) -> bool {
        let raw = self.raw_win_probability();
        !(0.0..=1.0).contains(&raw)
    }

    /// Bound on the magnitude of the stateful generator's balance.
    pub fn max_balance(&self) -> f64 {
        self.high_payout * 10.0
    }
}

pub(crate) fn clamp_probability(p: f64) -> f64 {
    p.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_rtp_outside_unit_interval() {
        for rtp in [0.0, -0.1, 1.5, f64::NAN] {
            let err = PayoutParams::new(rtp).validate().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidRtp(_)), "rtp {rtp}");
        }
        assert!(PayoutParams::new(1.0).validate().is_ok());
        assert!(PayoutParams::new(1e-9).validate().is_ok());
    }

    #[test]
    fn rejects_inverted_or_negative_payouts() {
        let p = PayoutParams::new(0.9).with_payouts(10.0, 10.0);
        assert!(matches!(p.validate(), Err(ConfigError::InvalidPayouts { .. })));
        let p = PayoutParams::new(0.9).with_payouts(-1.0, 10.0);
        assert!(matches!(p.validate(), Err(ConfigError::InvalidPayouts { .. })));
        let p = PayoutParams::new(0.9).with_payouts(0.0, f64::INFINITY);
        assert!(matches!(p.validate(), Err(ConfigError::InvalidPayouts { .. })));
    }

    #[test]
    fn rejects_bad_sensitivity() {
        let p = PayoutParams::new(0.9).with_sensitivity(-0.5);
        assert_eq!(p.validate(), Err(ConfigError::InvalidSensitivity(-0.5)));
    }

    #[test]
    fn zero_low_payout_reduces_to_rtp_over_high() {
        let p = PayoutParams::new(0.96).with_payouts(0.0, 100.0);
        assert!((p.win_probability() - 0.0096).abs() < 1e-12);
        assert!(!p.is_probability_clamped());
    }

    #[test]
    fn low_payout_above_rtp_clamps_to_zero() {
        let p = PayoutParams::new(0.5).with_payouts(1.0, 10_000.0);
        assert!(p.raw_win_probability() < 0.0);
        assert_eq!(p.win_probability(), 0.0);
        assert!(p.is_probability_clamped());
    }

    #[test]
    fn high_payout_below_rtp_clamps_to_one() {
        let p = PayoutParams::new(0.9).with_payouts(0.1, 0.5);
        assert!(p.raw_win_probability() > 1.0);
        assert_eq!(p.win_probability(), 1.0);
    }
}
