//! Variance detector — compares a fresh breakdown against a
//! historical baseline. Baseline maintenance is the caller's concern;
//! a missing or malformed baseline simply means "no prior data" and
//! produces zero alerts.

use crate::{compliance::Severity, config::EvaluatorConfig, fee::FeeBreakdown, types::Cents};
use serde::{Deserialize, Serialize};

/// Historical reference values for one request shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeBaseline {
    pub total_fee_cents: Cents,
    pub effective_rate_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceKind {
    CostIncrease,
    UnusualPattern,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarianceAlert {
    pub kind: VarianceKind,
    pub severity: Severity,
    /// Which metric deviated ("effective_rate" or "total_fee").
    pub metric: String,
    pub current: f64,
    pub baseline: f64,
    /// Signed relative deviation from the baseline, in percent.
    pub variance_pct: f64,
}

/// Raise alerts when the current breakdown deviates upward from the
/// baseline by more than the configured thresholds.
pub fn detect_variance(
    config: &EvaluatorConfig,
    current: &FeeBreakdown,
    baseline: Option<&FeeBaseline>,
) -> Vec<VarianceAlert> {
    let Some(base) = baseline else {
        return Vec::new();
    };

    // A non-positive or non-finite baseline is no prior data.
    if base.total_fee_cents <= 0
        || base.effective_rate_pct <= 0.0
        || !base.effective_rate_pct.is_finite()
    {
        return Vec::new();
    }

    let mut alerts = Vec::new();

    let rate_variance_pct = (current.effective_rate_pct - base.effective_rate_pct)
        / base.effective_rate_pct
        * 100.0;
    if rate_variance_pct > config.variance_rate_threshold_pct {
        alerts.push(VarianceAlert {
            kind: VarianceKind::CostIncrease,
            severity: Severity::High,
            metric: "effective_rate".into(),
            current: current.effective_rate_pct,
            baseline: base.effective_rate_pct,
            variance_pct: rate_variance_pct,
        });
    }

    let total_variance_pct = (current.total_cents - base.total_fee_cents) as f64
        / base.total_fee_cents as f64
        * 100.0;
    if total_variance_pct > config.variance_total_threshold_pct {
        alerts.push(VarianceAlert {
            kind: VarianceKind::UnusualPattern,
            severity: Severity::Medium,
            metric: "total_fee".into(),
            current: current.total_cents as f64,
            baseline: base.total_fee_cents as f64,
            variance_pct: total_variance_pct,
        });
    }

    alerts
}
