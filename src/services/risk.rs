//! Risk calculators: the 6:1 bouncer and fixed-percent position sizing.

use crate::error::{AppError, Result};
use crate::types::{PositionSizeResult, RiskCalcResult};

/// Minimum reward-to-risk ratio for an approved trade.
pub const MIN_RISK_REWARD: f64 = 6.0;

fn ensure_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AppError::InvalidInput(format!("{} must be a finite number", name)))
    }
}

/// Reject derived values that overflowed to infinity or NaN.
fn ensure_in_range(values: &[(&str, f64)]) -> Result<()> {
    match values.iter().find(|(_, v)| !v.is_finite()) {
        Some((name, _)) => Err(AppError::InvalidInput(format!("{} is out of range", name))),
        None => Ok(()),
    }
}

/// Check a setup against the 6:1 gate.
///
/// Without a target the setup is assumed to be exactly 6:1 in the direction implied by the
/// stop: `entry + (entry - stop) * 6`.
pub fn risk_reward(entry: f64, stop: f64, target: Option<f64>) -> Result<RiskCalcResult> {
    ensure_finite("entry", entry)?;
    ensure_finite("stop", stop)?;
    if let Some(t) = target {
        ensure_finite("target", t)?;
    }

    let risk = (entry - stop).abs();
    if risk == 0.0 {
        return Err(AppError::ZeroRiskDistance { entry, stop });
    }

    let target = target.unwrap_or(entry + (entry - stop) * MIN_RISK_REWARD);
    let reward = (target - entry).abs();
    let ratio = reward / risk;
    ensure_in_range(&[
        ("risk", risk),
        ("target", target),
        ("reward", reward),
        ("ratio", ratio),
    ])?;

    Ok(RiskCalcResult {
        entry,
        stop,
        target,
        risk,
        reward,
        ratio,
        approved: ratio >= MIN_RISK_REWARD,
    })
}

/// Size a position so that hitting `stop` loses `risk_percent` of `account_size`.
pub fn position_size(
    account_size: f64,
    risk_percent: f64,
    entry: f64,
    stop: f64,
) -> Result<PositionSizeResult> {
    ensure_finite("account size", account_size)?;
    ensure_finite("risk percent", risk_percent)?;
    ensure_finite("entry", entry)?;
    ensure_finite("stop", stop)?;

    if account_size <= 0.0 {
        return Err(AppError::InvalidInput("account size must be positive".to_string()));
    }
    if risk_percent <= 0.0 {
        return Err(AppError::InvalidInput("risk percent must be positive".to_string()));
    }

    let risk_per_unit = (entry - stop).abs();
    if risk_per_unit == 0.0 {
        return Err(AppError::ZeroRiskDistance { entry, stop });
    }

    let risk_amount = account_size * risk_percent / 100.0;
    let position_size = risk_amount / risk_per_unit;
    let notional_value = position_size * entry;
    ensure_in_range(&[
        ("risk per unit", risk_per_unit),
        ("risk amount", risk_amount),
        ("position size", position_size),
        ("notional value", notional_value),
    ])?;

    Ok(PositionSizeResult {
        risk_amount,
        risk_per_unit,
        position_size,
        notional_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_target_is_six_to_one() {
        let result = risk_reward(100.0, 90.0, None).unwrap();
        assert_eq!(result.target, 160.0);
        assert_eq!(result.risk, 10.0);
        assert_eq!(result.reward, 60.0);
        assert_eq!(result.ratio, 6.0);
        assert!(result.approved);
    }

    #[test]
    fn test_default_target_short_setup() {
        let result = risk_reward(100.0, 110.0, None).unwrap();
        assert_eq!(result.target, 40.0);
        assert!(result.approved);
    }

    #[test]
    fn test_explicit_target_rejected() {
        let result = risk_reward(100.0, 90.0, Some(101.0)).unwrap();
        assert!((result.ratio - 0.1).abs() < 1e-12);
        assert!(!result.approved);
    }

    #[test]
    fn test_zero_risk_is_error() {
        assert!(matches!(
            risk_reward(100.0, 100.0, None),
            Err(AppError::ZeroRiskDistance { .. })
        ));
    }

    #[test]
    fn test_non_finite_is_error() {
        assert!(matches!(
            risk_reward(f64::NAN, 90.0, None),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            risk_reward(100.0, 90.0, Some(f64::INFINITY)),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_overflowing_setup_is_error() {
        assert!(matches!(
            risk_reward(1e308, -1e308, None),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            risk_reward(1e308, 0.0, Some(-1e308)),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_overflowing_position_is_error() {
        assert!(matches!(
            position_size(1e308, 100.0, 1.0, 1.0 + f64::EPSILON),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            position_size(1e300, 1.0, 1e10, 1e10 - 1e-5),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_position_size() {
        let result = position_size(10_000.0, 1.0, 100.0, 95.0).unwrap();
        assert_eq!(result.risk_amount, 100.0);
        assert_eq!(result.risk_per_unit, 5.0);
        assert_eq!(result.position_size, 20.0);
        assert_eq!(result.notional_value, 2000.0);
    }

    #[test]
    fn test_position_size_zero_distance() {
        assert!(matches!(
            position_size(10_000.0, 1.0, 100.0, 100.0),
            Err(AppError::ZeroRiskDistance { .. })
        ));
    }

    #[test]
    fn test_position_size_invalid_account() {
        assert!(position_size(0.0, 1.0, 100.0, 95.0).is_err());
        assert!(position_size(10_000.0, -1.0, 100.0, 95.0).is_err());
    }
}
