//! Row layout for schedule CSV downloads.
//!
//! Only the offset of each row is supplied here; turning an offset into a
//! calendar label belongs to the caller through [`MonthLabeler`].

use rust_decimal::{Decimal, RoundingStrategy};

use crate::schedule::ScheduleResult;

pub const SCHEDULE_CSV_HEADER: [&str; 9] = [
    "month",
    "installment",
    "annual_rate_pct",
    "payment",
    "extra_prepayment",
    "base_principal",
    "total_principal",
    "interest",
    "ending_balance",
];

/// Produces the label of the row at zero-based `offset` from the start month.
pub trait MonthLabeler {
    fn label(&self, offset: usize) -> String;
}

impl<F> MonthLabeler for F
where
    F: Fn(usize) -> String,
{
    fn label(&self, offset: usize) -> String {
        self(offset)
    }
}

fn fixed(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", dp as usize, rounded)
}

/// One record per row, in schedule order, matching [`SCHEDULE_CSV_HEADER`].
pub fn schedule_records(
    schedule: &ScheduleResult,
    labeler: &impl MonthLabeler,
) -> Vec<[String; 9]> {
    schedule
        .rows
        .iter()
        .enumerate()
        .map(|(offset, row)| {
            [
                labeler.label(offset),
                row.index.to_string(),
                fixed(row.annual_rate_percent, 3),
                fixed(row.scheduled_payment, 2),
                fixed(row.prepayment_amount, 2),
                fixed(row.base_principal_portion, 2),
                fixed(row.total_principal_portion, 2),
                fixed(row.interest_portion, 2),
                fixed(row.ending_balance, 2),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{compute_schedule, LoanParameters};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fixed_pads_and_rounds_half_up() {
        assert_eq!(fixed(dec!(5.37), 3), "5.370");
        assert_eq!(fixed(dec!(2), 2), "2.00");
        assert_eq!(fixed(dec!(1.005), 2), "1.01");
        assert_eq!(fixed(dec!(0.0000001), 2), "0.00");
    }

    #[test]
    fn test_records_follow_header_order() {
        let params = LoanParameters::fixed_rate(dec!(1_200_000), 12, dec!(6));
        let schedule = compute_schedule(&params).unwrap();
        let records = schedule_records(&schedule, &|offset: usize| format!("m{offset}"));

        assert_eq!(records.len(), 12);
        let first = &records[0];
        assert_eq!(first[0], "m0");
        assert_eq!(first[1], "1");
        assert_eq!(first[2], "6.000");
        assert_eq!(first[4], "0.00");
        assert_eq!(first[7], "6000.00");
        assert_eq!(records[11][0], "m11");
        assert_eq!(records[11][8], "0.00");
    }
}
