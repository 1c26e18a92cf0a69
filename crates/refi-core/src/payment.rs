use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use crate::error::RefiError;
use crate::types::{Money, Percent, Rate};
use crate::RefiResult;

/// Converts an annual percentage (6 = 6% p.a.) into the nominal monthly rate
/// used for interest accrual (0.005).
pub fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / dec!(12) / dec!(100)
}

/// Level payment that retires `balance` over `remaining_months` at `monthly_rate`.
///
/// `PMT = B * r * (1 + r)^n / ((1 + r)^n - 1)`, or `B / n` when the rate is zero.
///
/// # Errors
///
/// `RefiError::Arithmetic` when `remaining_months` is zero, or when the
/// growth factor or the payment itself exceeds the range of `Decimal`.
/// Schedule construction clamps every segment to the remaining term, so
/// the zero-month case is unreachable from `compute_schedule`; overflow
/// is reachable with extreme rates and balances.
pub fn payment(monthly_rate: Rate, remaining_months: u32, balance: Money) -> RefiResult<Money> {
    if remaining_months == 0 {
        return Err(RefiError::Arithmetic {
            context: "payment: remaining months must be at least 1".into(),
        });
    }

    let n = Decimal::from(remaining_months);
    if monthly_rate.is_zero() {
        return Ok(balance / n);
    }

    let factor = (Decimal::ONE + monthly_rate)
        .checked_powu(u64::from(remaining_months))
        .ok_or_else(|| RefiError::Arithmetic {
            context: format!("payment growth factor over {remaining_months} months"),
        })?;
    let denom = factor - Decimal::ONE;
    if denom.is_zero() {
        return Err(RefiError::Arithmetic {
            context: "payment annuity factor".into(),
        });
    }

    balance
        .checked_mul(monthly_rate)
        .and_then(|v| v.checked_mul(factor))
        .and_then(|v| v.checked_div(denom))
        .ok_or_else(|| RefiError::Arithmetic {
            context: format!("payment on {balance} over {remaining_months} months"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected ~{expected}, got {actual}"
        );
    }

    #[test]
    fn test_monthly_rate_from_percent() {
        assert_eq!(monthly_rate(dec!(6)), dec!(0.005));
        assert_eq!(monthly_rate(dec!(5.37)), dec!(0.004475));
        assert_eq!(monthly_rate(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        assert_eq!(payment(Decimal::ZERO, 12, dec!(120_000)).unwrap(), dec!(10_000));
    }

    #[test]
    fn test_annuity_known_answer() {
        // 200k over 30y at 6%: textbook 1,199.10
        let pmt = payment(dec!(0.005), 360, dec!(200_000)).unwrap();
        assert_close(pmt, dec!(1199.10), dec!(0.01));
    }

    #[test]
    fn test_single_month_repays_balance_plus_interest() {
        let pmt = payment(dec!(0.01), 1, dec!(1_000)).unwrap();
        assert_close(pmt, dec!(1_010), dec!(0.0000001));
    }

    #[test]
    fn test_zero_remaining_months_is_arithmetic_error() {
        let err = payment(dec!(0.005), 0, dec!(1_000)).unwrap_err();
        assert!(matches!(err, RefiError::Arithmetic { .. }));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_long_term_high_rate_is_stable() {
        // 30% p.a. over 600 months: payment converges to pure interest
        let pmt = payment(dec!(0.025), 600, dec!(1_000_000)).unwrap();
        assert_close(pmt, dec!(25_000), dec!(0.01));
    }

    #[test]
    fn test_payment_overflow_is_arithmetic_error() {
        // 100% p.a. over 50 years on 2bn: the factor fits, the product does not
        let err = payment(monthly_rate(dec!(100)), 600, dec!(2_000_000_000)).unwrap_err();
        assert!(matches!(err, RefiError::Arithmetic { .. }));
    }

    #[test]
    fn test_zero_balance_pays_nothing() {
        assert_eq!(payment(dec!(0.004), 24, Decimal::ZERO).unwrap(), Decimal::ZERO);
    }
}
