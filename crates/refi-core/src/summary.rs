//! Reductions over schedule rows, whole-life or over a leading window.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::schedule::ScheduleRow;
use crate::types::Money;

/// Window used by the offer comparison: the first three years.
pub const DEFAULT_WINDOW_MONTHS: usize = 36;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    /// Rows reduced; the payoff month count when taken over a whole schedule.
    pub payoff_month_count: usize,
    pub total_interest: Money,
    /// Scheduled payments plus prepayments.
    pub total_payment: Money,
    pub total_principal: Money,
    pub total_prepayment: Money,
}

pub fn summarize(rows: &[ScheduleRow]) -> ScheduleSummary {
    rows.iter().fold(
        ScheduleSummary {
            payoff_month_count: rows.len(),
            ..ScheduleSummary::default()
        },
        |mut acc, row| {
            acc.total_interest += row.interest_portion;
            acc.total_payment += row.scheduled_payment + row.prepayment_amount;
            acc.total_principal += row.total_principal_portion;
            acc.total_prepayment += row.prepayment_amount;
            acc
        },
    )
}

/// Summary over the first `months` rows (all rows when the schedule is shorter).
pub fn summarize_window(rows: &[ScheduleRow], months: usize) -> ScheduleSummary {
    summarize(&rows[..months.min(rows.len())])
}

pub fn total_interest(rows: &[ScheduleRow]) -> Money {
    rows.iter().map(|r| r.interest_portion).sum()
}

pub fn total_payment(rows: &[ScheduleRow]) -> Money {
    rows.iter()
        .map(|r| r.scheduled_payment + r.prepayment_amount)
        .sum()
}

pub fn payoff_month_count(rows: &[ScheduleRow]) -> usize {
    rows.len()
}

/// Scheduled payment of the first month, zero for an empty schedule.
pub fn first_payment(rows: &[ScheduleRow]) -> Money {
    rows.first()
        .map(|r| r.scheduled_payment)
        .unwrap_or(Decimal::ZERO)
}
