//! Month labels for exported schedules.

use chrono::{Datelike, Months, NaiveDate, Utc};

use refi_core::export::MonthLabeler;
use refi_core::{RefiError, RefiResult};

/// First installment month; labels rows by offset from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartMonth(NaiveDate);

impl StartMonth {
    /// Parses `YYYY-MM`.
    pub fn parse(text: &str) -> RefiResult<Self> {
        let date = NaiveDate::parse_from_str(&format!("{}-01", text.trim()), "%Y-%m-%d")
            .map_err(|e| RefiError::DateError(format!("'{text}' is not a YYYY-MM month: {e}")))?;
        Ok(Self(date))
    }

    pub fn current() -> Self {
        let today = Utc::now().date_naive();
        Self(today.with_day(1).unwrap_or(today))
    }

    /// `text` when given, otherwise the current month.
    pub fn resolve(text: Option<&str>) -> RefiResult<Self> {
        text.map(Self::parse).unwrap_or_else(|| Ok(Self::current()))
    }
}

impl MonthLabeler for StartMonth {
    fn label(&self, offset: usize) -> String {
        u32::try_from(offset)
            .ok()
            .and_then(|n| self.0.checked_add_months(Months::new(n)))
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_else(|| format!("+{offset}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_roll_over_years() {
        let start = StartMonth::parse("2025-11").unwrap();
        assert_eq!(start.label(0), "Nov 2025");
        assert_eq!(start.label(2), "Jan 2026");
        assert_eq!(start.label(239), "Oct 2045");
    }

    #[test]
    fn test_rejects_malformed_month() {
        assert!(matches!(StartMonth::parse("2025-13"), Err(RefiError::DateError(_))));
        assert!(StartMonth::parse("November").is_err());
    }

    #[test]
    fn test_resolve_prefers_explicit_month() {
        assert_eq!(
            StartMonth::resolve(Some("2024-02")).unwrap(),
            StartMonth::parse("2024-02").unwrap()
        );
        assert!(StartMonth::resolve(None).is_ok());
    }
}
