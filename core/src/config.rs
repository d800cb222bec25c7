//! Evaluator configuration.
//!
//! Every rate, cap, penalty, and threshold the evaluator consults is a
//! field here, injectable at construction time. The JSON surface uses
//! camelCase keys and every field is defaulted, so a deployment file
//! only needs to name the knobs it tunes.

use crate::{compliance::Severity, types::Cents};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How often a standard requires the fee schedule to be re-reviewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewCadence {
    Monthly,
    Quarterly,
    Annual,
}

impl ReviewCadence {
    /// Interval length in months. Used to pick the shortest cadence
    /// among the requested standards.
    pub fn months(self) -> u32 {
        match self {
            Self::Monthly => 1,
            Self::Quarterly => 3,
            Self::Annual => 12,
        }
    }
}

/// The predicate a standard applies to an evaluation. New standards
/// are added to the config table, not to a switch in the evaluator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum StandardRule {
    /// Violation when the ACH fee component exceeds the cap.
    #[serde(rename_all = "camelCase")]
    AchFeeCap { cap_cents: Cents },
    /// Violation when the request was not computed in a secure,
    /// attested environment.
    SecureCalculation,
    /// Violation when the supplied accuracy metric falls below the
    /// floor. Requests that supply no metric are not penalised.
    #[serde(rename_all = "camelCase")]
    Accuracy { min_pct: f64 },
    /// Warning (never a violation) when pricing is not transparent.
    Transparency,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardConfig {
    pub label: String,
    #[serde(flatten)]
    pub rule: StandardRule,
    pub severity: Severity,
    pub description: String,
    pub remediation: Vec<String>,
    pub review_cadence: ReviewCadence,
}

/// Volume-tier discount multipliers for one clearing rail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TierDiscounts {
    pub enterprise: f64,
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl Default for TierDiscounts {
    fn default() -> Self {
        Self { enterprise: 1.0, high: 1.0, medium: 1.0, low: 1.0 }
    }
}

/// Per-rail tier discount tables. ACH and card discount differently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VolumeDiscounts {
    pub ach: TierDiscounts,
    pub card: TierDiscounts,
}

impl Default for VolumeDiscounts {
    fn default() -> Self {
        Self {
            ach: TierDiscounts { enterprise: 0.85, high: 0.85, medium: 0.92, low: 1.0 },
            card: TierDiscounts { enterprise: 0.90, high: 0.90, medium: 0.95, low: 1.0 },
        }
    }
}

/// High-risk surcharge multipliers, per rail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RiskSurcharges {
    pub ach: f64,
    pub card: f64,
}

impl Default for RiskSurcharges {
    fn default() -> Self {
        Self { ach: 1.25, card: 1.15 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EvaluatorConfig {
    // ── Fee schedule ───────────────────────────────────────────
    /// Inbound ACH base fee.
    pub ach_fee_cents: Cents,
    /// Hard ceiling on the ACH fee component.
    pub ach_fee_cap_cents: Cents,
    /// Outbound ACH base fee as a fraction of the inbound base.
    pub outbound_ach_ratio: f64,
    pub inbound_bank_fee_cents: Cents,
    pub outbound_bank_fee_cents: Cents,
    /// Card percentage rate applied to the transaction amount.
    pub card_rate: f64,
    pub card_fixed_fee_cents: Cents,
    pub card_bank_fee_cents: Cents,
    /// Discount applied to card fees for the debit subtype.
    pub debit_discount: f64,
    pub direct_obligation_base_fee_cents: Cents,
    /// Amount above which a direct obligation is a large transaction.
    pub large_transaction_threshold_cents: Cents,
    pub large_transaction_multiplier: f64,
    pub verification_fee_cents: Cents,
    pub direct_obligation_bank_fee_cents: Cents,
    pub volume_discount_by_tier: VolumeDiscounts,
    pub risk_surcharge_high: RiskSurcharges,

    // ── Compliance scoring ─────────────────────────────────────
    /// Points deducted per violation.
    pub violation_penalty: u32,
    /// Points deducted per warning.
    pub warning_penalty: u32,
    /// Minimum score that still counts as compliant.
    pub compliance_accept_score: u32,
    /// Standards table, keyed by standard name as callers supply it.
    pub standards: HashMap<String, StandardConfig>,

    // ── Variance thresholds ────────────────────────────────────
    /// Relative effective-rate increase (percent) that raises a
    /// cost-increase alert.
    pub variance_rate_threshold_pct: f64,
    /// Relative total-fee increase (percent) that raises an
    /// unusual-pattern alert.
    pub variance_total_threshold_pct: f64,

    // ── Validator band ─────────────────────────────────────────
    /// Allowed drift between the component sum and the declared
    /// total, in cents.
    pub reconcile_tolerance_cents: Cents,
    pub rate_floor_pct: f64,
    pub rate_ceiling_pct: f64,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            ach_fee_cents: 80,
            ach_fee_cap_cents: 500,
            outbound_ach_ratio: 0.60,
            inbound_bank_fee_cents: 25,
            outbound_bank_fee_cents: 20,
            card_rate: 0.029,
            card_fixed_fee_cents: 30,
            card_bank_fee_cents: 10,
            debit_discount: 0.85,
            direct_obligation_base_fee_cents: 100,
            large_transaction_threshold_cents: 1_000_000,
            large_transaction_multiplier: 1.5,
            verification_fee_cents: 50,
            direct_obligation_bank_fee_cents: 75,
            volume_discount_by_tier: VolumeDiscounts::default(),
            risk_surcharge_high: RiskSurcharges::default(),
            violation_penalty: 15,
            warning_penalty: 5,
            compliance_accept_score: 80,
            standards: default_standards(),
            variance_rate_threshold_pct: 15.0,
            variance_total_threshold_pct: 20.0,
            reconcile_tolerance_cents: 1,
            rate_floor_pct: 0.1,
            rate_ceiling_pct: 5.0,
        }
    }
}

impl EvaluatorConfig {
    /// Load from a JSON file. Missing keys fall back to defaults, so
    /// a deployment only states the knobs it changes.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: EvaluatorConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}

fn default_standards() -> HashMap<String, StandardConfig> {
    [
        (
            "NACHA".to_string(),
            StandardConfig {
                label: "NACHA per-transaction fee cap".into(),
                rule: StandardRule::AchFeeCap { cap_cents: 500 },
                severity: Severity::High,
                description: "ACH fee exceeds the network per-transaction cap".into(),
                remediation: vec![
                    "Reduce the ACH fee below the configured cap".into(),
                    "File a rate exception with the clearing partner".into(),
                ],
                review_cadence: ReviewCadence::Quarterly,
            },
        ),
        (
            "PCI_DSS".to_string(),
            StandardConfig {
                label: "Secure calculation environment".into(),
                rule: StandardRule::SecureCalculation,
                severity: Severity::Critical,
                description: "Fee calculation ran outside a secure, attested environment".into(),
                remediation: vec![
                    "Move fee computation into the attested enclave".into(),
                    "Rotate credentials used by the insecure host".into(),
                ],
                review_cadence: ReviewCadence::Annual,
            },
        ),
        (
            "SOX".to_string(),
            StandardConfig {
                label: "Calculation accuracy floor".into(),
                rule: StandardRule::Accuracy { min_pct: 99.9 },
                severity: Severity::High,
                description: "Reported calculation accuracy is below the required floor".into(),
                remediation: vec![
                    "Reconcile the fee ledger against settlement reports".into(),
                    "Escalate to the controls team for root-cause review".into(),
                ],
                review_cadence: ReviewCadence::Quarterly,
            },
        ),
        (
            "TILA".to_string(),
            StandardConfig {
                label: "Transparent pricing disclosure".into(),
                rule: StandardRule::Transparency,
                severity: Severity::Low,
                description: "Pricing was not disclosed to the customer before clearing".into(),
                remediation: vec!["Publish the fee schedule on the pricing page".into()],
                review_cadence: ReviewCadence::Annual,
            },
        ),
    ]
    .into()
}
