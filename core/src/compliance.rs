//! Compliance evaluator — per-standard rule evaluation and scoring.
//!
//! Standards resolve through the config table, never a hardcoded
//! switch: each entry maps a name to a predicate plus violation or
//! warning templates. An unrecognized standard is skipped and reported
//! through the verdict's diagnostics list; it never aborts the
//! evaluation.

use crate::{
    config::{EvaluatorConfig, StandardRule},
    fee::{FeeBreakdown, FeeComponentKind, FeeRequest},
};
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub standard: String,
    pub severity: Severity,
    pub description: String,
    pub remediation: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceWarning {
    pub standard: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceVerdict {
    pub compliant: bool,
    /// 0–100. Starts at 100, reduced per violation and warning.
    pub score: u32,
    pub violations: Vec<Violation>,
    pub warnings: Vec<ComplianceWarning>,
    /// Derived from the shortest review cadence among the recognized
    /// standards; None when no requested standard was recognized.
    pub next_review: Option<NaiveDate>,
    /// One entry per skipped unknown standard.
    pub diagnostics: Vec<String>,
}

/// Evaluate the requested standards against a computed breakdown.
///
/// Pure function; `as_of` is passed in so no hidden clock leaks into
/// the result.
pub fn evaluate_compliance(
    config: &EvaluatorConfig,
    request: &FeeRequest,
    breakdown: &FeeBreakdown,
    standards: &[String],
    as_of: NaiveDate,
) -> ComplianceVerdict {
    let mut violations = Vec::new();
    let mut warnings = Vec::new();
    let mut diagnostics = Vec::new();
    let mut shortest_cadence_months: Option<u32> = None;

    for name in standards {
        let standard = match config.standards.get(name) {
            Some(s) => s,
            None => {
                log::warn!("compliance: unknown standard '{name}' skipped");
                diagnostics.push(format!("unknown standard '{name}' skipped"));
                continue;
            }
        };

        let months = standard.review_cadence.months();
        shortest_cadence_months = Some(match shortest_cadence_months {
            Some(m) => m.min(months),
            None => months,
        });

        match &standard.rule {
            StandardRule::AchFeeCap { cap_cents } => {
                let ach_fee = breakdown.component(FeeComponentKind::Ach);
                if ach_fee > *cap_cents {
                    violations.push(Violation {
                        standard: name.clone(),
                        severity: standard.severity,
                        description: format!(
                            "{} (fee {ach_fee}c, cap {cap_cents}c)",
                            standard.description
                        ),
                        remediation: standard.remediation.clone(),
                    });
                }
            }
            StandardRule::SecureCalculation => {
                if !request.secure_environment {
                    violations.push(Violation {
                        standard: name.clone(),
                        severity: standard.severity,
                        description: standard.description.clone(),
                        remediation: standard.remediation.clone(),
                    });
                }
            }
            StandardRule::Accuracy { min_pct } => {
                if let Some(accuracy) = request.accuracy_pct {
                    if accuracy < *min_pct {
                        violations.push(Violation {
                            standard: name.clone(),
                            severity: standard.severity,
                            description: format!(
                                "{} ({accuracy}% < {min_pct}%)",
                                standard.description
                            ),
                            remediation: standard.remediation.clone(),
                        });
                    }
                }
            }
            StandardRule::Transparency => {
                if !request.transparent_pricing {
                    warnings.push(ComplianceWarning {
                        standard: name.clone(),
                        description: standard.description.clone(),
                    });
                }
            }
        }
    }

    let mut score = 100i64;
    score -= violations.len() as i64 * config.violation_penalty as i64;
    score -= warnings.len() as i64 * config.warning_penalty as i64;
    let score = score.max(0) as u32;

    let next_review = shortest_cadence_months
        .and_then(|m| as_of.checked_add_months(Months::new(m)));

    ComplianceVerdict {
        compliant: score >= config.compliance_accept_score,
        score,
        violations,
        warnings,
        next_review,
        diagnostics,
    }
}
