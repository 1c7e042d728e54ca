use serde::{Deserialize, Serialize};

/// Result of the 6:1 risk/reward gate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskCalcResult {
    pub entry: f64,
    pub stop: f64,
    pub target: f64,
    pub risk: f64,
    pub reward: f64,
    pub ratio: f64,
    pub approved: bool,
}

/// Position size for a fixed-percent account risk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSizeResult {
    pub risk_amount: f64,
    pub risk_per_unit: f64,
    pub position_size: f64,
    pub notional_value: f64,
}
