//! Deterministic scenario generation for batch runs and tests.
//!
//! RULE: Nothing here may call a platform RNG. All randomness flows
//! from the single master seed, so a seed fully reproduces a batch.

use crate::fee::{CardSubtype, ClearingCategory, FeeRequest, RiskLevel, VolumeTier};
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

pub struct ScenarioGenerator {
    rng: Pcg64Mcg,
}

impl ScenarioGenerator {
    pub fn new(master_seed: u64) -> Self {
        Self { rng: Pcg64Mcg::seed_from_u64(master_seed) }
    }

    /// Roll a float in [0.0, 1.0).
    fn next_f64(&mut self) -> f64 {
        let bits = self.rng.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    fn next_u64_below(&mut self, n: u64) -> u64 {
        self.rng.next_u64() % n
    }

    /// Bernoulli trial: returns true with probability p.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Generate one valid fee request.
    pub fn next_request(&mut self) -> FeeRequest {
        let category = match self.next_u64_below(4) {
            0 => ClearingCategory::AchInbound,
            1 => ClearingCategory::AchOutbound,
            2 => ClearingCategory::Card,
            _ => ClearingCategory::DirectObligation,
        };

        // Amounts from $1.00 up to roughly $20,000.
        let amount_cents = 100 + self.next_u64_below(2_000_000) as i64;

        let volume_tier = if self.chance(0.40) {
            None
        } else {
            Some(match self.next_u64_below(4) {
                0 => VolumeTier::Low,
                1 => VolumeTier::Medium,
                2 => VolumeTier::High,
                _ => VolumeTier::Enterprise,
            })
        };

        let risk_level = if self.chance(0.50) {
            None
        } else {
            Some(match self.next_u64_below(3) {
                0 => RiskLevel::Low,
                1 => RiskLevel::Medium,
                _ => RiskLevel::High,
            })
        };

        let card_subtype = if category == ClearingCategory::Card {
            Some(match self.next_u64_below(3) {
                0 => CardSubtype::Debit,
                1 => CardSubtype::Credit,
                _ => CardSubtype::Prepaid,
            })
        } else {
            None
        };

        let accuracy_pct = if self.chance(0.50) {
            Some(99.0 + self.next_f64() * 1.0)
        } else {
            None
        };

        FeeRequest {
            category,
            amount_cents,
            volume_tier,
            risk_level,
            card_subtype,
            secure_environment: self.chance(0.95),
            transparent_pricing: self.chance(0.90),
            accuracy_pct,
        }
    }
}
