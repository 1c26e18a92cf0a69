use napi::Result as NapiResult;
use napi_derive::napi;

use refi_core::comparison::{self, LoanComparison, Offer};
use refi_core::export::{self, SCHEDULE_CSV_HEADER};
use refi_core::schedule::{self, LoanParameters};
use refi_core::store::{KeyValueStore, MemoryStore, OfferBook};
use refi_core::summary::DEFAULT_WINDOW_MONTHS;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn window_or_default(window_months: Option<u32>) -> usize {
    window_months
        .map(|w| w as usize)
        .unwrap_or(DEFAULT_WINDOW_MONTHS)
}

// ---------------------------------------------------------------------------
// Schedules
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_schedule(input_json: String) -> NapiResult<String> {
    let input: LoanParameters = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = schedule::compute_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_schedule(input_json: String) -> NapiResult<String> {
    let input: LoanParameters = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = schedule::analyze_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// CSV text of a schedule. `labels_json` is an array of month labels
/// produced by the caller; rows past its end are labelled by offset.
#[napi]
pub fn schedule_csv(input_json: String, labels_json: String) -> NapiResult<String> {
    let input: LoanParameters = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let labels: Vec<String> = serde_json::from_str(&labels_json).map_err(to_napi_error)?;
    let result = schedule::compute_schedule(&input).map_err(to_napi_error)?;

    let labeler = |offset: usize| {
        labels
            .get(offset)
            .cloned()
            .unwrap_or_else(|| format!("+{offset}"))
    };
    let mut lines = vec![SCHEDULE_CSV_HEADER.join(",")];
    lines.extend(
        export::schedule_records(&result, &labeler)
            .iter()
            .map(|record| record.join(",")),
    );
    Ok(lines.join("\n"))
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

#[napi]
pub fn compare_loans(input_json: String, window_months: Option<u32>) -> NapiResult<String> {
    let input: Vec<LoanParameters> = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output: Vec<LoanComparison> =
        comparison::compare_loans(&input, window_or_default(window_months))
            .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_offers(input_json: String, window_months: Option<u32>) -> NapiResult<String> {
    let input: Vec<Offer> = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = comparison::analyze_offers(&input, window_or_default(window_months))
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Offer list
// ---------------------------------------------------------------------------

/// Decodes a stored offer list (the raw local-storage value, or null),
/// falling back to the defaults, and returns it as JSON.
#[napi]
pub fn load_offers(stored: Option<String>) -> NapiResult<String> {
    let mut store = MemoryStore::new();
    if let Some(raw) = stored {
        store
            .set(refi_core::store::OFFERS_KEY, &raw)
            .map_err(to_napi_error)?;
    }
    let book = OfferBook::load(&store).map_err(to_napi_error)?;
    serde_json::to_string(book.offers()).map_err(to_napi_error)
}

/// Appends a seeded "new option" to an offer list and returns the list.
#[napi]
pub fn add_offer_option(offers_json: String) -> NapiResult<String> {
    let offers: Vec<Offer> = serde_json::from_str(&offers_json).map_err(to_napi_error)?;
    let mut book = OfferBook::new(offers);
    book.add_option();
    serde_json::to_string(book.offers()).map_err(to_napi_error)
}
