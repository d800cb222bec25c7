//! Fee calculator — deterministic tiered-rate computation with caps,
//! discounts, and surcharges.
//!
//! RULES:
//!   - Integer cents everywhere. Each multiplicative adjustment rounds
//!     to the nearest cent before the next step is applied. The step
//!     order (base → tier discount → risk surcharge → flat add-ons)
//!     is fixed; reordering changes results.
//!   - No I/O, no clock. The only failure is a non-positive amount.

use crate::{
    config::{EvaluatorConfig, TierDiscounts},
    error::{EvalError, EvalResult},
    types::Cents,
};
use serde::{Deserialize, Serialize};

/// The settlement channel for a transaction. This is the one
/// canonical field; callers carrying legacy aliases translate at
/// their own boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearingCategory {
    AchInbound,
    AchOutbound,
    Card,
    DirectObligation,
}

impl ClearingCategory {
    /// Stable string name, used for the category column in the store.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AchInbound => "ach_inbound",
            Self::AchOutbound => "ach_outbound",
            Self::Card => "card",
            Self::DirectObligation => "direct_obligation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeTier {
    Low,
    Medium,
    High,
    Enterprise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardSubtype {
    Debit,
    Credit,
    Prepaid,
}

/// Immutable input to one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeRequest {
    pub category: ClearingCategory,
    pub amount_cents: Cents,
    #[serde(default)]
    pub volume_tier: Option<VolumeTier>,
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,
    #[serde(default)]
    pub card_subtype: Option<CardSubtype>,
    /// Whether the calculation ran in a secure, attested environment.
    #[serde(default = "default_true")]
    pub secure_environment: bool,
    /// Whether pricing was disclosed to the customer up front.
    #[serde(default = "default_true")]
    pub transparent_pricing: bool,
    /// Reported calculation accuracy, as a percentage, if measured.
    #[serde(default)]
    pub accuracy_pct: Option<f64>,
}

fn default_true() -> bool {
    true
}

impl FeeRequest {
    /// A request with no modifiers and both compliance flags set.
    pub fn new(category: ClearingCategory, amount_cents: Cents) -> Self {
        Self {
            category,
            amount_cents,
            volume_tier: None,
            risk_level: None,
            card_subtype: None,
            secure_environment: true,
            transparent_pricing: true,
            accuracy_pct: None,
        }
    }
}

/// Named fee components a breakdown can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeComponentKind {
    Clearing,
    Ach,
    CardNetwork,
    Bank,
    Verification,
    Payout,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeComponent {
    pub kind: FeeComponentKind,
    pub amount_cents: Cents,
}

/// Output of one fee computation. `total_cents` is the exact integer
/// sum of the components; `effective_rate_pct` is total / amount as a
/// percentage, unrounded (rounding is a presentation concern).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub components: Vec<FeeComponent>,
    pub total_cents: Cents,
    pub effective_rate_pct: f64,
}

impl FeeBreakdown {
    /// Sum of all components of the given kind (zero if absent).
    pub fn component(&self, kind: FeeComponentKind) -> Cents {
        self.components
            .iter()
            .filter(|c| c.kind == kind)
            .map(|c| c.amount_cents)
            .sum()
    }

    /// Sum of every component, regardless of kind.
    pub fn component_sum(&self) -> Cents {
        self.components.iter().map(|c| c.amount_cents).sum()
    }
}

/// Apply a multiplier and round to the nearest cent.
fn scale(amount: Cents, factor: f64) -> Cents {
    (amount as f64 * factor).round() as Cents
}

fn tier_multiplier(table: &TierDiscounts, tier: Option<VolumeTier>) -> f64 {
    match tier {
        Some(VolumeTier::Enterprise) => table.enterprise,
        Some(VolumeTier::High) => table.high,
        Some(VolumeTier::Medium) => table.medium,
        Some(VolumeTier::Low) | None => table.low,
    }
}

/// Compute the fee breakdown for one request.
///
/// Deterministic and pure: identical input yields bit-identical
/// output. Fails only when the amount is not positive.
pub fn compute_fees(config: &EvaluatorConfig, request: &FeeRequest) -> EvalResult<FeeBreakdown> {
    if request.amount_cents <= 0 {
        return Err(EvalError::InvalidInput {
            reason: format!("amount must be positive, got {}", request.amount_cents),
        });
    }

    let high_risk = request.risk_level == Some(RiskLevel::High);
    let mut components = Vec::new();

    match request.category {
        ClearingCategory::AchInbound => {
            let base = config.ach_fee_cents.min(config.ach_fee_cap_cents);
            let discounted = scale(
                base,
                tier_multiplier(&config.volume_discount_by_tier.ach, request.volume_tier),
            );
            let fee = if high_risk {
                scale(discounted, config.risk_surcharge_high.ach)
            } else {
                discounted
            };
            components.push(FeeComponent { kind: FeeComponentKind::Ach, amount_cents: fee });
            components.push(FeeComponent {
                kind: FeeComponentKind::Bank,
                amount_cents: config.inbound_bank_fee_cents,
            });
        }
        ClearingCategory::AchOutbound => {
            // Outbound clears at a fraction of the inbound base, same
            // cap, and takes no tier or risk adjustment.
            let base = scale(config.ach_fee_cents, config.outbound_ach_ratio)
                .min(config.ach_fee_cap_cents);
            components.push(FeeComponent { kind: FeeComponentKind::Ach, amount_cents: base });
            components.push(FeeComponent {
                kind: FeeComponentKind::Bank,
                amount_cents: config.outbound_bank_fee_cents,
            });
        }
        ClearingCategory::Card => {
            let base =
                scale(request.amount_cents, config.card_rate) + config.card_fixed_fee_cents;
            let mut fee = scale(
                base,
                tier_multiplier(&config.volume_discount_by_tier.card, request.volume_tier),
            );
            if request.card_subtype == Some(CardSubtype::Debit) {
                fee = scale(fee, config.debit_discount);
            }
            if high_risk {
                fee = scale(fee, config.risk_surcharge_high.card);
            }
            components.push(FeeComponent {
                kind: FeeComponentKind::CardNetwork,
                amount_cents: fee,
            });
            components.push(FeeComponent {
                kind: FeeComponentKind::Bank,
                amount_cents: config.card_bank_fee_cents,
            });
        }
        ClearingCategory::DirectObligation => {
            let base = config.direct_obligation_base_fee_cents;
            let fee = if request.amount_cents > config.large_transaction_threshold_cents {
                scale(base, config.large_transaction_multiplier)
            } else {
                base
            };
            components.push(FeeComponent { kind: FeeComponentKind::Clearing, amount_cents: fee });
            components.push(FeeComponent {
                kind: FeeComponentKind::Verification,
                amount_cents: config.verification_fee_cents,
            });
            components.push(FeeComponent {
                kind: FeeComponentKind::Bank,
                amount_cents: config.direct_obligation_bank_fee_cents,
            });
        }
    }

    let total_cents: Cents = components.iter().map(|c| c.amount_cents).sum();
    let effective_rate_pct = total_cents as f64 / request.amount_cents as f64 * 100.0;

    Ok(FeeBreakdown { components, total_cents, effective_rate_pct })
}
