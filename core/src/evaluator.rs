//! The evaluation facade — runs the four pure stages in a fixed
//! order and bundles their outputs into one report.
//!
//! STAGE ORDER (fixed, documented, never reordered):
//!   1. Fee calculator
//!   2. Compliance evaluator
//!   3. Variance detector
//!   4. Validator
//!
//! The evaluator holds only its config; it is stateless, Sync, and
//! safe to share across any number of callers without coordination.

use crate::{
    compliance::{self, ComplianceVerdict},
    config::EvaluatorConfig,
    error::EvalResult,
    fee::{self, FeeBreakdown, FeeRequest},
    validator::{self, ValidationReport},
    variance::{self, FeeBaseline, VarianceAlert},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Everything one evaluation produced, as the surrounding HTTP/RPC
/// layer consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub request: FeeRequest,
    pub breakdown: FeeBreakdown,
    pub verdict: ComplianceVerdict,
    pub variance_alerts: Vec<VarianceAlert>,
    pub validation: ValidationReport,
}

pub struct FeeEvaluator {
    config: EvaluatorConfig,
}

impl FeeEvaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Run a full evaluation. Fails only when the fee calculator
    /// rejects the request; unknown standards surface in the
    /// verdict's diagnostics instead.
    pub fn evaluate(
        &self,
        request: &FeeRequest,
        standards: &[String],
        baseline: Option<&FeeBaseline>,
        as_of: NaiveDate,
    ) -> EvalResult<EvaluationReport> {
        let breakdown = fee::compute_fees(&self.config, request)?;
        let verdict =
            compliance::evaluate_compliance(&self.config, request, &breakdown, standards, as_of);
        let variance_alerts = variance::detect_variance(&self.config, &breakdown, baseline);
        let validation = validator::validate_breakdown(&self.config, &breakdown, request);

        log::debug!(
            "evaluate: category={} amount={}c total={}c rate={:.4}% score={} compliant={} alerts={}",
            request.category.as_str(),
            request.amount_cents,
            breakdown.total_cents,
            breakdown.effective_rate_pct,
            verdict.score,
            verdict.compliant,
            variance_alerts.len(),
        );

        Ok(EvaluationReport {
            request: request.clone(),
            breakdown,
            verdict,
            variance_alerts,
            validation,
        })
    }
}
