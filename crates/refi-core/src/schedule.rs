//! Month-by-month amortization under a piecewise-constant rate plan.
//!
//! The payment is re-derived at every rate change over the months left on
//! the original term, so the term stays fixed while the payment moves. A
//! fixed monthly override and a percentage-of-payment prepayment policy can
//! shorten the schedule. All math in `rust_decimal::Decimal`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::error::RefiError;
use crate::payment::{monthly_rate, payment};
use crate::summary::{summarize, ScheduleSummary};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::RefiResult;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// A contiguous span of months sharing one annual rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSegment {
    pub duration_months: u32,
    /// Annual rate in percent (5.37 = 5.37% p.a.).
    pub annual_rate_percent: Percent,
}

impl RateSegment {
    pub fn new(duration_months: u32, annual_rate_percent: Percent) -> Self {
        Self {
            duration_months,
            annual_rate_percent,
        }
    }
}

/// Ordered rate plan. The last segment carries forward to the end of the term.
pub type RateSchedule = Vec<RateSegment>;

/// Everything that determines a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    pub principal: Money,
    pub term_months: u32,
    pub rate_schedule: RateSchedule,
    /// Used verbatim every month when present; otherwise derived per segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_payment_override: Option<Money>,
    /// Extra principal as a percentage of each month's payment.
    #[serde(default)]
    pub prepayment_percent: Percent,
}

impl LoanParameters {
    /// Single-rate loan with a derived payment and no prepayment.
    pub fn fixed_rate(principal: Money, term_months: u32, annual_rate_percent: Percent) -> Self {
        Self {
            principal,
            term_months,
            rate_schedule: vec![RateSegment::new(term_months, annual_rate_percent)],
            monthly_payment_override: None,
            prepayment_percent: Decimal::ZERO,
        }
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One paid month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// 1-based month number.
    pub index: u32,
    pub annual_rate_percent: Percent,
    pub scheduled_payment: Money,
    pub interest_portion: Money,
    pub base_principal_portion: Money,
    pub prepayment_amount: Money,
    pub total_principal_portion: Money,
    pub ending_balance: Money,
}

/// A full computed schedule. Shorter than the term on early payoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub rows: Vec<ScheduleRow>,
    pub total_interest: Money,
    /// Scheduled payments plus prepayments.
    pub total_payment: Money,
    pub final_balance: Money,
}

/// Schedule plus its whole-life summary, as returned by [`analyze_schedule`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleAnalysis {
    pub schedule: ScheduleResult,
    pub summary: ScheduleSummary,
    pub early_payoff: bool,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Rejects parameters the schedule builder must never see.
///
/// A rate plan whose durations sum to less than the term is accepted (the
/// last rate carries forward), as is one that sums to more.
pub fn validate_loan_parameters(params: &LoanParameters) -> RefiResult<()> {
    if params.principal <= Decimal::ZERO {
        return Err(RefiError::invalid("principal", "Principal must be positive"));
    }
    if params.term_months == 0 {
        return Err(RefiError::invalid(
            "term_months",
            "Term must be at least one month",
        ));
    }
    if params.rate_schedule.is_empty() {
        return Err(RefiError::invalid(
            "rate_schedule",
            "At least one rate segment is required",
        ));
    }
    for (i, seg) in params.rate_schedule.iter().enumerate() {
        if seg.annual_rate_percent < Decimal::ZERO {
            return Err(RefiError::invalid(
                "rate_schedule",
                format!("Segment {i} has a negative annual rate"),
            ));
        }
    }
    if let Some(pay) = params.monthly_payment_override {
        if pay <= Decimal::ZERO {
            return Err(RefiError::invalid(
                "monthly_payment_override",
                "Payment override must be positive when present",
            ));
        }
    }
    if params.prepayment_percent < Decimal::ZERO {
        return Err(RefiError::invalid(
            "prepayment_percent",
            "Prepayment percent cannot be negative",
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Validates `params` and builds the schedule.
///
/// Pure: identical parameters always produce an identical result.
pub fn compute_schedule(params: &LoanParameters) -> RefiResult<ScheduleResult> {
    validate_loan_parameters(params)?;
    let result = build_schedule(params)?;
    debug!(
        term_months = params.term_months,
        segments = params.rate_schedule.len(),
        paid_months = result.rows.len(),
        "schedule computed"
    );
    Ok(result)
}

/// [`compute_schedule`] wrapped in the standard output envelope, with
/// warnings for the policies that shape the result.
pub fn analyze_schedule(
    params: &LoanParameters,
) -> RefiResult<ComputationOutput<ScheduleAnalysis>> {
    let start = Instant::now();

    let schedule = compute_schedule(params)?;
    let warnings = schedule_warnings(params, &schedule);
    let summary = summarize(&schedule.rows);
    let early_payoff = schedule.rows.len() < params.term_months as usize;

    let methodology = if params.monthly_payment_override.is_some() {
        "Fixed payment override, balance floored at zero"
    } else {
        "Annuity payment re-derived per rate segment over remaining term"
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        methodology,
        params,
        warnings,
        elapsed,
        ScheduleAnalysis {
            schedule,
            summary,
            early_payoff,
        },
    ))
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

fn build_schedule(params: &LoanParameters) -> RefiResult<ScheduleResult> {
    let prepay_fraction = params.prepayment_percent / dec!(100);
    let last_segment = params.rate_schedule.len() - 1;

    let mut balance = params.principal;
    let mut remaining = params.term_months;
    let mut rows: Vec<ScheduleRow> = Vec::with_capacity(params.term_months as usize);
    let mut total_interest = Decimal::ZERO;
    let mut total_payment = Decimal::ZERO;

    'segments: for (seg_idx, seg) in params.rate_schedule.iter().enumerate() {
        if remaining == 0 {
            break;
        }

        // The trailing segment runs to the end of the term whatever its length.
        let seg_len = if seg_idx == last_segment {
            remaining
        } else {
            seg.duration_months.min(remaining)
        };
        if seg_len == 0 {
            continue;
        }

        let rate = monthly_rate(seg.annual_rate_percent);
        let pay = match params.monthly_payment_override {
            Some(fixed) => fixed,
            None => payment(rate, remaining, balance)?,
        };

        for _ in 0..seg_len {
            let month = rows.len() + 1;
            let interest = checked(balance.checked_mul(rate), "interest", month)?;
            let base_principal = (pay - interest).max(Decimal::ZERO);
            let prepayment =
                checked(pay.checked_mul(prepay_fraction), "prepayment", month)?.max(Decimal::ZERO);

            let mut total_principal =
                checked(base_principal.checked_add(prepayment), "total principal", month)?;
            if total_principal > balance || remaining == 1 {
                total_principal = balance;
            }
            let ending_balance = (balance - total_principal).max(Decimal::ZERO);

            rows.push(ScheduleRow {
                index: rows.len() as u32 + 1,
                annual_rate_percent: seg.annual_rate_percent,
                scheduled_payment: pay,
                interest_portion: interest,
                base_principal_portion: base_principal,
                prepayment_amount: prepayment,
                total_principal_portion: total_principal,
                ending_balance,
            });
            total_interest = checked(total_interest.checked_add(interest), "total interest", month)?;
            total_payment = checked(
                pay.checked_add(prepayment)
                    .and_then(|paid| total_payment.checked_add(paid)),
                "total payment",
                month,
            )?;

            balance = ending_balance;
            remaining -= 1;

            if balance <= Decimal::ZERO {
                break 'segments;
            }
        }
    }

    Ok(ScheduleResult {
        rows,
        total_interest,
        total_payment,
        final_balance: balance,
    })
}

fn checked(value: Option<Decimal>, what: &str, month: usize) -> RefiResult<Decimal> {
    value.ok_or_else(|| RefiError::Arithmetic {
        context: format!("{what} overflows in month {month}"),
    })
}

fn schedule_warnings(params: &LoanParameters, schedule: &ScheduleResult) -> Vec<String> {
    let mut warnings = Vec::new();

    let planned: u64 = params
        .rate_schedule
        .iter()
        .map(|s| u64::from(s.duration_months))
        .sum();
    let term = u64::from(params.term_months);
    if planned < term {
        let carried = params
            .rate_schedule
            .last()
            .map(|s| s.annual_rate_percent)
            .unwrap_or_default();
        warnings.push(format!(
            "Rate plan covers {planned} of {term} months; {carried}% carried forward to the end of the term"
        ));
    }

    let mut covered = 0u64;
    let unreached = params
        .rate_schedule
        .iter()
        .filter(|s| {
            let starts_at = covered;
            covered += u64::from(s.duration_months);
            starts_at >= term
        })
        .count();
    if unreached > 0 {
        warnings.push(format!(
            "{unreached} rate segment(s) start after the term ends and are never applied"
        ));
    }

    if let Some(row) = schedule
        .rows
        .iter()
        .find(|r| r.scheduled_payment < r.interest_portion)
    {
        warnings.push(format!(
            "Payment does not cover interest from month {}; principal floored at zero and the balance is not reduced",
            row.index
        ));
    }

    if schedule.rows.len() < params.term_months as usize {
        warnings.push(format!(
            "Loan paid off after {} of {} months",
            schedule.rows.len(),
            params.term_months
        ));
    }

    warnings
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
