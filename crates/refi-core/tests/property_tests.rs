use proptest::prelude::*;
use refi_core::{compute_schedule, LoanParameters, RateSegment};
use rust_decimal::Decimal;

fn loan(principal: u32, term: u32, rates_bp: &[u32], override_pay: Option<u32>, prepay: u32) -> LoanParameters {
    LoanParameters {
        principal: Decimal::from(principal),
        term_months: term,
        rate_schedule: rates_bp
            .iter()
            .map(|bp| RateSegment::new(12, Decimal::new(i64::from(*bp), 2)))
            .collect(),
        monthly_payment_override: override_pay.map(Decimal::from),
        prepayment_percent: Decimal::from(prepay),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn balance_never_increases_nor_goes_negative(
        principal in 10_000u32..5_000_000,
        term in 1u32..=360,
        rates in prop::collection::vec(0u32..=1_500, 1..5),
        override_pay in prop::option::of(100u32..50_000),
        prepay in 0u32..=50,
    ) {
        let params = loan(principal, term, &rates, override_pay, prepay);
        let result = compute_schedule(&params).unwrap();

        prop_assert!(result.rows.len() <= term as usize);
        let mut previous = params.principal;
        for row in &result.rows {
            prop_assert!(row.ending_balance >= Decimal::ZERO);
            prop_assert!(row.ending_balance <= previous);
            prop_assert!(row.base_principal_portion >= Decimal::ZERO);
            previous = row.ending_balance;
        }
        prop_assert_eq!(result.final_balance, Decimal::ZERO);
    }

    #[test]
    fn more_prepayment_never_lengthens_payoff(
        principal in 10_000u32..5_000_000,
        term in 12u32..=360,
        rates in prop::collection::vec(0u32..=1_200, 1..5),
        low in 0u32..=20,
        extra in 0u32..=20,
    ) {
        let slower = compute_schedule(&loan(principal, term, &rates, None, low)).unwrap();
        let faster = compute_schedule(&loan(principal, term, &rates, None, low + extra)).unwrap();
        prop_assert!(faster.rows.len() <= slower.rows.len());
    }
}
