//! Refinancing comparison engine.
//!
//! Builds month-by-month amortization schedules for a loan whose annual
//! rate changes in steps, with an optional fixed installment and an
//! optional prepayment policy, and reduces them into the totals used to
//! compare lenders' offers.

pub mod error;
pub mod payment;
pub mod schedule;
pub mod summary;
pub mod types;

#[cfg(feature = "comparison")]
pub mod comparison;

#[cfg(feature = "export")]
pub mod export;

#[cfg(feature = "store")]
pub mod store;

pub use error::RefiError;
pub use schedule::{
    analyze_schedule, compute_schedule, validate_loan_parameters, LoanParameters, RateSchedule,
    RateSegment, ScheduleResult, ScheduleRow,
};
pub use summary::ScheduleSummary;
pub use types::*;

/// Standard result type for all refi operations
pub type RefiResult<T> = Result<T, RefiError>;
