use refi_core::summary::{payoff_month_count, summarize, summarize_window};
use refi_core::{compute_schedule, LoanParameters, RateSegment, RefiError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Fixed-rate behaviour
// ===========================================================================

#[test]
fn test_zero_rate_pays_principal_over_term() {
    let params = LoanParameters::fixed_rate(dec!(240_000), 240, Decimal::ZERO);
    let result = compute_schedule(&params).unwrap();

    assert_eq!(result.rows.len(), 240);
    assert_eq!(result.total_interest, Decimal::ZERO);
    assert!(result.rows.iter().all(|r| r.scheduled_payment == dec!(1_000)));
    assert_eq!(result.total_payment, dec!(240_000));
    assert_eq!(result.final_balance, Decimal::ZERO);
}

#[test]
fn test_scenario_a_one_year_six_percent() {
    // 1.2M over 12 months at 6%: first month accrues 1.2M * 0.06 / 12
    let params = LoanParameters::fixed_rate(dec!(1_200_000), 12, dec!(6));
    let result = compute_schedule(&params).unwrap();

    assert_eq!(result.rows[0].interest_portion, dec!(6_000));
    assert_eq!(result.rows.last().unwrap().ending_balance, Decimal::ZERO);
    assert_eq!(payoff_month_count(&result.rows), 12);

    // Interest declines as the balance falls
    for pair in result.rows.windows(2) {
        assert!(pair[1].interest_portion < pair[0].interest_portion);
    }
}

#[test]
fn test_scenario_b_override_below_interest() {
    let params = LoanParameters {
        monthly_payment_override: Some(dec!(5_999)),
        ..LoanParameters::fixed_rate(dec!(1_200_000), 12, dec!(6))
    };
    let result = compute_schedule(&params).unwrap();

    let first = &result.rows[0];
    assert_eq!(first.base_principal_portion, Decimal::ZERO);
    assert_eq!(first.total_principal_portion, Decimal::ZERO);
    assert_eq!(first.ending_balance, dec!(1_200_000));
    // The balance is held, never grown
    assert!(result.rows.iter().all(|r| r.ending_balance <= dec!(1_200_000)));
}

// ===========================================================================
// Stepped rates with prepayment
// ===========================================================================

fn stepped(prepayment_percent: Decimal) -> LoanParameters {
    LoanParameters {
        principal: dec!(3_000_000),
        term_months: 240,
        rate_schedule: vec![
            RateSegment::new(12, dec!(2.5)),
            RateSegment::new(12, dec!(3.25)),
            RateSegment::new(12, dec!(4.0)),
            RateSegment::new(0, dec!(6.5)),
        ],
        monthly_payment_override: None,
        prepayment_percent,
    }
}

#[test]
fn test_scenario_c_prepayment_shortens_and_saves_interest() {
    let base = compute_schedule(&stepped(Decimal::ZERO)).unwrap();
    let prepaid = compute_schedule(&stepped(dec!(10))).unwrap();

    assert_eq!(base.rows.len(), 240);
    assert!(prepaid.rows.len() < 240);
    assert!(prepaid.total_interest < base.total_interest);
    assert_eq!(prepaid.final_balance, Decimal::ZERO);
    assert_eq!(prepaid.rows.last().unwrap().annual_rate_percent, dec!(6.5));
}

#[test]
fn test_completed_schedule_repays_principal() {
    let result = compute_schedule(&stepped(Decimal::ZERO)).unwrap();
    let repaid: Decimal = result.rows.iter().map(|r| r.total_principal_portion).sum();

    assert_eq!(result.final_balance, Decimal::ZERO);
    assert!((repaid - (dec!(3_000_000) - result.final_balance)).abs() < dec!(0.000001));
}

#[test]
fn test_three_year_window() {
    let result = compute_schedule(&stepped(Decimal::ZERO)).unwrap();
    let window = summarize_window(&result.rows, 36);
    let whole = summarize(&result.rows);

    let expected: Decimal = result.rows[..36].iter().map(|r| r.interest_portion).sum();
    assert_eq!(window.total_interest, expected);
    assert_eq!(window.payoff_month_count, 36);
    assert_eq!(whole.total_interest, result.total_interest);
    assert_eq!(whole.total_payment, result.total_payment);
}

#[test]
fn test_invalid_inputs_never_compute() {
    let mut params = stepped(Decimal::ZERO);
    params.principal = dec!(-1);
    let err = compute_schedule(&params).unwrap_err();
    assert!(matches!(err, RefiError::InvalidInput { ref field, .. } if field == "principal"));
}

#[test]
fn test_loan_parameters_json_shape() {
    let json = r#"{
        "principal": "1200000",
        "term_months": 12,
        "rate_schedule": [{ "duration_months": 12, "annual_rate_percent": "6" }]
    }"#;
    let params: LoanParameters = serde_json::from_str(json).unwrap();
    assert_eq!(params.monthly_payment_override, None);
    assert_eq!(params.prepayment_percent, Decimal::ZERO);
    assert_eq!(params, LoanParameters::fixed_rate(dec!(1_200_000), 12, dec!(6)));
}
