//! Structural self-check of a fee breakdown, independent of which
//! compliance standards were requested. Errors mean the breakdown
//! itself is inconsistent; warnings flag numbers a human should look
//! at without failing the evaluation.

use crate::{
    config::EvaluatorConfig,
    fee::{FeeBreakdown, FeeComponentKind, FeeRequest},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

pub fn validate_breakdown(
    config: &EvaluatorConfig,
    breakdown: &FeeBreakdown,
    request: &FeeRequest,
) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // The ACH cap is a hard limit regardless of standard selection.
    let ach_fee = breakdown.component(FeeComponentKind::Ach);
    if ach_fee > config.ach_fee_cap_cents {
        errors.push(format!(
            "ACH fee component {ach_fee}c exceeds the hard cap of {}c",
            config.ach_fee_cap_cents
        ));
    }

    // Components must reconcile with the declared total. One cent of
    // tolerance absorbs independently rounded components, never more.
    let component_sum = breakdown.component_sum();
    let drift = (component_sum - breakdown.total_cents).abs();
    if drift > config.reconcile_tolerance_cents {
        errors.push(format!(
            "component sum {component_sum}c does not reconcile with declared total {}c",
            breakdown.total_cents
        ));
    }

    if request.amount_cents > 0 {
        let rate = breakdown.effective_rate_pct;
        if rate < config.rate_floor_pct {
            warnings.push(format!(
                "effective rate {rate:.4}% is below the sane band floor of {}%",
                config.rate_floor_pct
            ));
        } else if rate > config.rate_ceiling_pct {
            warnings.push(format!(
                "effective rate {rate:.4}% is above the sane band ceiling of {}%",
                config.rate_ceiling_pct
            ));
        }
    }

    ValidationReport { valid: errors.is_empty(), errors, warnings }
}
