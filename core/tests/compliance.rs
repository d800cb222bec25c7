use chrono::NaiveDate;
use feeops_core::{
    compliance::{evaluate_compliance, Severity},
    config::{EvaluatorConfig, ReviewCadence, StandardConfig, StandardRule},
    fee::{ClearingCategory, FeeBreakdown, FeeComponent, FeeComponentKind, FeeRequest},
};

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
}

fn breakdown_with_ach(ach_cents: i64) -> FeeBreakdown {
    let total = ach_cents + 25;
    FeeBreakdown {
        components: vec![
            FeeComponent { kind: FeeComponentKind::Ach, amount_cents: ach_cents },
            FeeComponent { kind: FeeComponentKind::Bank, amount_cents: 25 },
        ],
        total_cents: total,
        effective_rate_pct: total as f64 / 10_000.0 * 100.0,
    }
}

fn standards(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn ach_cap_breach_scores_85_and_stays_compliant() {
    let config = EvaluatorConfig::default();
    let request = FeeRequest::new(ClearingCategory::AchInbound, 10_000);
    let breakdown = breakdown_with_ach(600); // cap is 500

    let verdict =
        evaluate_compliance(&config, &request, &breakdown, &standards(&["NACHA"]), as_of());

    assert_eq!(verdict.violations.len(), 1);
    assert_eq!(verdict.violations[0].severity, Severity::High);
    assert!(!verdict.violations[0].remediation.is_empty());
    // 100 - 15 = 85, exactly on the acceptance threshold's good side.
    assert_eq!(verdict.score, 85);
    assert!(verdict.compliant, "score 85 is >= the 80 threshold");
}

#[test]
fn ach_fee_at_cap_is_not_a_violation() {
    let config = EvaluatorConfig::default();
    let request = FeeRequest::new(ClearingCategory::AchInbound, 10_000);
    let breakdown = breakdown_with_ach(500);

    let verdict =
        evaluate_compliance(&config, &request, &breakdown, &standards(&["NACHA"]), as_of());

    assert!(verdict.violations.is_empty());
    assert_eq!(verdict.score, 100);
}

#[test]
fn insecure_environment_is_critical() {
    let config = EvaluatorConfig::default();
    let mut request = FeeRequest::new(ClearingCategory::Card, 10_000);
    request.secure_environment = false;
    let breakdown = breakdown_with_ach(80);

    let verdict =
        evaluate_compliance(&config, &request, &breakdown, &standards(&["PCI_DSS"]), as_of());

    assert_eq!(verdict.violations.len(), 1);
    assert_eq!(verdict.violations[0].severity, Severity::Critical);
    assert_eq!(verdict.score, 85);
}

#[test]
fn accuracy_below_floor_is_a_violation() {
    let config = EvaluatorConfig::default();
    let breakdown = breakdown_with_ach(80);

    let mut below = FeeRequest::new(ClearingCategory::AchInbound, 10_000);
    below.accuracy_pct = Some(99.5);
    let verdict =
        evaluate_compliance(&config, &below, &breakdown, &standards(&["SOX"]), as_of());
    assert_eq!(verdict.violations.len(), 1);

    let mut above = FeeRequest::new(ClearingCategory::AchInbound, 10_000);
    above.accuracy_pct = Some(99.95);
    let verdict =
        evaluate_compliance(&config, &above, &breakdown, &standards(&["SOX"]), as_of());
    assert!(verdict.violations.is_empty());

    // No metric supplied: nothing to judge.
    let unmeasured = FeeRequest::new(ClearingCategory::AchInbound, 10_000);
    let verdict =
        evaluate_compliance(&config, &unmeasured, &breakdown, &standards(&["SOX"]), as_of());
    assert!(verdict.violations.is_empty());
}

#[test]
fn opaque_pricing_is_a_warning_not_a_violation() {
    let config = EvaluatorConfig::default();
    let mut request = FeeRequest::new(ClearingCategory::Card, 10_000);
    request.transparent_pricing = false;
    let breakdown = breakdown_with_ach(80);

    let verdict =
        evaluate_compliance(&config, &request, &breakdown, &standards(&["TILA"]), as_of());

    assert!(verdict.violations.is_empty());
    assert_eq!(verdict.warnings.len(), 1);
    assert_eq!(verdict.score, 95);
    assert!(verdict.compliant);
}

#[test]
fn unknown_standard_is_skipped_not_fatal() {
    let config = EvaluatorConfig::default();
    let request = FeeRequest::new(ClearingCategory::AchInbound, 10_000);
    let breakdown = breakdown_with_ach(600);

    let verdict = evaluate_compliance(
        &config,
        &request,
        &breakdown,
        &standards(&["NACHA", "ISO20022"]),
        as_of(),
    );

    // The known standard still evaluated.
    assert_eq!(verdict.violations.len(), 1);
    assert_eq!(verdict.diagnostics.len(), 1);
    assert!(
        verdict.diagnostics[0].contains("ISO20022"),
        "diagnostics should name the skipped standard: {:?}",
        verdict.diagnostics
    );
}

#[test]
fn score_floors_at_zero() {
    let mut config = EvaluatorConfig::default();
    config.violation_penalty = 60;

    let mut request = FeeRequest::new(ClearingCategory::AchInbound, 10_000);
    request.secure_environment = false;
    let breakdown = breakdown_with_ach(600);

    let verdict = evaluate_compliance(
        &config,
        &request,
        &breakdown,
        &standards(&["NACHA", "PCI_DSS"]),
        as_of(),
    );

    assert_eq!(verdict.violations.len(), 2);
    assert_eq!(verdict.score, 0, "100 - 2x60 must floor at 0");
    assert!(!verdict.compliant);
}

#[test]
fn next_review_picks_the_shortest_cadence() {
    let mut config = EvaluatorConfig::default();
    config.standards.insert(
        "AUDIT".into(),
        StandardConfig {
            label: "Monthly internal audit".into(),
            rule: StandardRule::Transparency,
            severity: Severity::Low,
            description: "Internal audit disclosure".into(),
            remediation: vec![],
            review_cadence: ReviewCadence::Monthly,
        },
    );
    let request = FeeRequest::new(ClearingCategory::AchInbound, 10_000);
    let breakdown = breakdown_with_ach(80);

    // Annual alone.
    let verdict =
        evaluate_compliance(&config, &request, &breakdown, &standards(&["PCI_DSS"]), as_of());
    assert_eq!(verdict.next_review, NaiveDate::from_ymd_opt(2027, 1, 15));

    // Quarterly beats annual.
    let verdict = evaluate_compliance(
        &config,
        &request,
        &breakdown,
        &standards(&["PCI_DSS", "NACHA"]),
        as_of(),
    );
    assert_eq!(verdict.next_review, NaiveDate::from_ymd_opt(2026, 4, 15));

    // Monthly beats quarterly.
    let verdict = evaluate_compliance(
        &config,
        &request,
        &breakdown,
        &standards(&["PCI_DSS", "NACHA", "AUDIT"]),
        as_of(),
    );
    assert_eq!(verdict.next_review, NaiveDate::from_ymd_opt(2026, 2, 15));

    // Nothing recognized: no review date.
    let verdict = evaluate_compliance(
        &config,
        &request,
        &breakdown,
        &standards(&["ISO20022"]),
        as_of(),
    );
    assert_eq!(verdict.next_review, None);
}
