use chrono::NaiveDate;
use feeops_core::{
    config::EvaluatorConfig,
    error::EvalError,
    evaluator::FeeEvaluator,
    fee::{ClearingCategory, FeeRequest},
    variance::FeeBaseline,
};

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
}

#[test]
fn facade_bundles_all_four_stages() {
    let evaluator = FeeEvaluator::new(EvaluatorConfig::default());
    let mut request = FeeRequest::new(ClearingCategory::Card, 100_000);
    request.transparent_pricing = false;
    let standards: Vec<String> = vec!["NACHA".into(), "TILA".into(), "ISO20022".into()];
    // Rate 2.94% vs 2.5% baseline: 17.6% up, above the 15% threshold.
    let baseline = FeeBaseline { total_fee_cents: 2_900, effective_rate_pct: 2.5 };

    let report = evaluator
        .evaluate(&request, &standards, Some(&baseline), as_of())
        .unwrap();

    assert_eq!(report.breakdown.total_cents, 2940);
    assert_eq!(report.verdict.warnings.len(), 1, "TILA warning expected");
    assert_eq!(report.verdict.diagnostics.len(), 1, "ISO20022 skip expected");
    assert_eq!(report.variance_alerts.len(), 1);
    assert!(report.validation.valid);
    assert_eq!(report.request, request);
}

#[test]
fn invalid_input_propagates_through_facade() {
    let evaluator = FeeEvaluator::new(EvaluatorConfig::default());
    let request = FeeRequest::new(ClearingCategory::AchInbound, 0);

    let err = evaluator.evaluate(&request, &[], None, as_of()).unwrap_err();
    assert!(matches!(err, EvalError::InvalidInput { .. }));
}

#[test]
fn partial_config_json_overrides_only_named_keys() {
    let config: EvaluatorConfig = serde_json::from_str(
        r#"{
            "achFeeCents": 120,
            "varianceRateThresholdPct": 10.0
        }"#,
    )
    .unwrap();

    assert_eq!(config.ach_fee_cents, 120);
    assert!((config.variance_rate_threshold_pct - 10.0).abs() < 1e-9);
    // Everything unnamed keeps its default.
    assert_eq!(config.ach_fee_cap_cents, 500);
    assert_eq!(config.violation_penalty, 15);
    assert!((config.card_rate - 0.029).abs() < 1e-12);
    assert!(config.standards.contains_key("NACHA"));
}

#[test]
fn standards_table_is_extensible_through_config() {
    let config: EvaluatorConfig = serde_json::from_str(
        r#"{
            "standards": {
                "STATE_CAP": {
                    "label": "State ACH fee cap",
                    "rule": "ach_fee_cap",
                    "capCents": 60,
                    "severity": "high",
                    "description": "ACH fee exceeds the state cap",
                    "remediation": ["Lower the ACH fee"],
                    "reviewCadence": "monthly"
                }
            }
        }"#,
    )
    .unwrap();

    let evaluator = FeeEvaluator::new(config);
    let request = FeeRequest::new(ClearingCategory::AchInbound, 10_000);
    let standards: Vec<String> = vec!["STATE_CAP".into()];

    // Default inbound ACH fee is 80c, above the 60c cap just configured.
    let report = evaluator.evaluate(&request, &standards, None, as_of()).unwrap();
    assert_eq!(report.verdict.violations.len(), 1);
    assert_eq!(report.verdict.violations[0].standard, "STATE_CAP");
    assert_eq!(
        report.verdict.next_review,
        NaiveDate::from_ymd_opt(2026, 2, 15),
        "monthly cadence advances one month"
    );
}

#[test]
fn volume_discount_tables_are_configurable() {
    let config: EvaluatorConfig = serde_json::from_str(
        r#"{
            "volumeDiscountByTier": {
                "ach": { "enterprise": 0.5, "high": 0.85, "medium": 0.92, "low": 1.0 }
            }
        }"#,
    )
    .unwrap();

    let evaluator = FeeEvaluator::new(config);
    let mut request = FeeRequest::new(ClearingCategory::AchInbound, 10_000);
    request.volume_tier = Some(feeops_core::fee::VolumeTier::Enterprise);

    let report = evaluator.evaluate(&request, &[], None, as_of()).unwrap();
    // 80 x 0.5 = 40, + bank fee 25.
    assert_eq!(report.breakdown.total_cents, 65);
}
