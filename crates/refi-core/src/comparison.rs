//! Side-by-side comparison of refinancing offers.
//!
//! Each offer is a promotional rate per year followed by a floating rate,
//! plus opaque one-off costs. Offers are ranked by interest paid over a
//! short window (three years by default) plus those costs, and measured
//! against the first offer in the list, which is the loan currently held.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::RefiError;
use crate::schedule::{compute_schedule, LoanParameters, RateSegment, ScheduleResult};
use crate::summary::{first_payment, summarize, summarize_window, ScheduleSummary};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::RefiResult;

/// Months covered by each promotional rate.
const PROMO_YEAR_MONTHS: u32 = 12;

// ---------------------------------------------------------------------------
// Offer model
// ---------------------------------------------------------------------------

/// A flat cost attached to an offer (insurance, appraisal, fees, penalties).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostItem {
    pub label: String,
    pub amount: Money,
}

impl CostItem {
    pub fn new(label: &str, amount: Money) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// A lender's refinancing offer as entered on the comparison form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub name: String,
    pub principal: Money,
    pub term_years: Decimal,
    /// One annual rate (percent) per promotional year.
    pub promo_rates: Vec<Percent>,
    /// Rate applied once the promotional years are over.
    pub rate_after: Percent,
    /// Actual installment quoted by the lender, if known. Zero means blank.
    #[serde(default)]
    pub monthly_override: Option<Money>,
    #[serde(default)]
    pub prepayment_percent: Percent,
    #[serde(default = "default_cost_items")]
    pub other_costs: Vec<CostItem>,
}

/// Cost lines every new offer starts with.
pub fn default_cost_items() -> Vec<CostItem> {
    ["MRTA", "Appraisal fee", "Mortgage registration", "Processing fee", "Early repayment penalty"]
        .iter()
        .map(|label| CostItem::new(label, Decimal::ZERO))
        .collect()
}

impl Offer {
    /// Whole months in the term; zero when the years do not fit a `u32`
    /// month count, which validation then rejects.
    pub fn term_months(&self) -> u32 {
        self.term_years
            .checked_mul(dec!(12))
            .and_then(|months| {
                months
                    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                    .to_u32()
            })
            .unwrap_or_default()
    }

    /// Translates the offer into engine inputs: 12 months per promotional
    /// rate, then `rate_after` for the rest of the term.
    pub fn loan_parameters(&self) -> LoanParameters {
        let term = self.term_months();
        let promo_months = PROMO_YEAR_MONTHS
            .saturating_mul(u32::try_from(self.promo_rates.len()).unwrap_or(u32::MAX));

        let mut rate_schedule: Vec<RateSegment> = self
            .promo_rates
            .iter()
            .map(|rate| RateSegment::new(PROMO_YEAR_MONTHS, *rate))
            .collect();
        rate_schedule.push(RateSegment::new(
            term.saturating_sub(promo_months),
            self.rate_after,
        ));

        LoanParameters {
            principal: self.principal,
            term_months: term,
            rate_schedule,
            monthly_payment_override: self.monthly_override.filter(|p| !p.is_zero()),
            prepayment_percent: self.prepayment_percent,
        }
    }

    pub fn other_costs_total(&self) -> RefiResult<Money> {
        self.other_costs
            .iter()
            .try_fold(Decimal::ZERO, |acc, c| acc.checked_add(c.amount))
            .ok_or_else(|| RefiError::Arithmetic {
                context: format!("{}: other costs total", self.name),
            })
    }

    pub fn schedule(&self) -> RefiResult<ScheduleResult> {
        compute_schedule(&self.loan_parameters()).map_err(|e| match e {
            RefiError::InvalidInput { field, reason } => RefiError::InvalidInput {
                field: format!("{}.{}", self.name, field),
                reason,
            },
            other => other,
        })
    }

    /// Blank option appended from the form, seeded from `template` when given.
    pub fn new_option(number: usize, template: Option<&Offer>) -> Self {
        Self {
            name: format!("New option #{number}"),
            principal: template.map(|t| t.principal).unwrap_or(dec!(2_000_000)),
            term_years: template.map(|t| t.term_years).unwrap_or(dec!(20)),
            promo_rates: vec![dec!(3.5), dec!(3.8), dec!(4.0)],
            rate_after: dec!(6.5),
            monthly_override: None,
            prepayment_percent: Decimal::ZERO,
            other_costs: default_cost_items(),
        }
    }
}

/// Offers shown before anything has been saved: the current loan and one
/// promotional refinance.
pub fn default_offers() -> Vec<Offer> {
    let mut refinance_costs = default_cost_items();
    if let Some(fee) = refinance_costs
        .iter_mut()
        .find(|c| c.label == "Processing fee")
    {
        fee.amount = dec!(1_000);
    }

    vec![
        Offer {
            name: "Krungsri (current)".into(),
            principal: dec!(2_623_000),
            term_years: dec!(20),
            promo_rates: vec![dec!(5.370), dec!(5.370), dec!(5.370)],
            rate_after: dec!(5.370),
            monthly_override: Some(dec!(15_700)),
            prepayment_percent: Decimal::ZERO,
            other_costs: default_cost_items(),
        },
        Offer {
            name: "GSB (Q3/2568 promotion)".into(),
            principal: dec!(2_623_000),
            term_years: dec!(20),
            promo_rates: vec![dec!(1.990), dec!(3.805), dec!(3.805)],
            rate_after: dec!(6.370),
            monthly_override: None,
            prepayment_percent: Decimal::ZERO,
            other_costs: refinance_costs,
        },
    ]
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// One loan's schedule plus its leading-window summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanComparison {
    pub result: ScheduleResult,
    pub window_summary: ScheduleSummary,
}

/// Computes every loan independently, preserving input order.
pub fn compare_loans(
    loans: &[LoanParameters],
    window_months: usize,
) -> RefiResult<Vec<LoanComparison>> {
    loans
        .iter()
        .map(|params| {
            let result = compute_schedule(params)?;
            let window_summary = summarize_window(&result.rows, window_months);
            Ok(LoanComparison {
                result,
                window_summary,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferComparisonRow {
    pub index: usize,
    pub name: String,
    /// First month's scheduled payment.
    pub monthly_payment: Money,
    pub window_interest: Money,
    pub other_costs: Money,
    /// Window interest plus other costs.
    pub window_total: Money,
    /// `window_total` minus the first offer's; positive means dearer.
    /// Absent for the first offer.
    pub delta_vs_current: Option<Money>,
    pub rate_after: Percent,
    pub payoff_months: usize,
    pub total_interest: Money,
    pub is_best: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferComparison {
    pub window_months: usize,
    pub rows: Vec<OfferComparisonRow>,
    /// First offer with the lowest window total.
    pub best_index: Option<usize>,
}

pub fn compare_offers(offers: &[Offer], window_months: usize) -> RefiResult<OfferComparison> {
    let mut rows = Vec::with_capacity(offers.len());

    for (index, offer) in offers.iter().enumerate() {
        let schedule = offer.schedule()?;
        let window = summarize_window(&schedule.rows, window_months);
        let whole = summarize(&schedule.rows);
        let other_costs = offer.other_costs_total()?;
        let window_total = window
            .total_interest
            .checked_add(other_costs)
            .ok_or_else(|| RefiError::Arithmetic {
                context: format!("{}: window total", offer.name),
            })?;

        rows.push(OfferComparisonRow {
            index,
            name: offer.name.clone(),
            monthly_payment: first_payment(&schedule.rows),
            window_interest: window.total_interest,
            other_costs,
            window_total,
            delta_vs_current: None,
            rate_after: offer.rate_after,
            payoff_months: whole.payoff_month_count,
            total_interest: whole.total_interest,
            is_best: false,
        });
    }

    if let Some(current) = rows.first().map(|r| r.window_total) {
        for row in rows.iter_mut().skip(1) {
            let delta = row.window_total.checked_sub(current).ok_or_else(|| {
                RefiError::Arithmetic {
                    context: format!("{}: difference from current loan", row.name),
                }
            })?;
            row.delta_vs_current = Some(delta);
        }
    }

    let best_total = rows.iter().map(|r| r.window_total).min();
    let mut best_index = None;
    if let Some(best) = best_total {
        for row in rows.iter_mut().filter(|r| r.window_total == best) {
            row.is_best = true;
            best_index.get_or_insert(row.index);
        }
    }

    Ok(OfferComparison {
        window_months,
        rows,
        best_index,
    })
}

/// [`compare_offers`] in the standard output envelope.
pub fn analyze_offers(
    offers: &[Offer],
    window_months: usize,
) -> RefiResult<ComputationOutput<OfferComparison>> {
    let start = Instant::now();
    let comparison = compare_offers(offers, window_months)?;

    let mut warnings = Vec::new();
    for (offer, row) in offers.iter().zip(&comparison.rows) {
        let term = offer.term_months() as usize;
        if row.payoff_months < term {
            warnings.push(format!(
                "{}: paid off after {} of {} months",
                offer.name, row.payoff_months, term
            ));
        }
        if row.payoff_months < window_months {
            warnings.push(format!(
                "{}: schedule ends before the {}-month window",
                offer.name, window_months
            ));
        }
    }

    let methodology = format!(
        "Interest over the first {window_months} months plus other costs, relative to the first offer"
    );
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        &methodology,
        &offers,
        warnings,
        elapsed,
        comparison,
    ))
}
