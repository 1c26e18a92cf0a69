use refi_core::comparison::{compare_loans, compare_offers, default_offers, Offer};
use refi_core::export::{schedule_records, SCHEDULE_CSV_HEADER};
use refi_core::store::{KeyValueStore, MemoryStore, OfferBook, OFFERS_KEY};
use refi_core::summary::DEFAULT_WINDOW_MONTHS;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Default offers end to end
// ===========================================================================

#[test]
fn test_default_offers_compare() {
    let offers = default_offers();
    let cmp = compare_offers(&offers, DEFAULT_WINDOW_MONTHS).unwrap();

    // Current loan uses the quoted installment verbatim
    assert_eq!(cmp.rows[0].monthly_payment, dec!(15_700));
    assert_eq!(cmp.rows[0].delta_vs_current, None);

    // Promotional refinance: lower three-year interest even with its fee
    let promo = &cmp.rows[1];
    assert_eq!(promo.other_costs, dec!(1_000));
    assert!(promo.delta_vs_current.unwrap() < Decimal::ZERO);
    assert_eq!(cmp.best_index, Some(1));
    assert_eq!(promo.rate_after, dec!(6.370));
}

#[test]
fn test_current_loan_override_below_annuity_leaves_balloon() {
    // 15,700 a month at 5.37% is short of the ~17,850 annuity payment, so
    // the final contract month settles what is left
    let offers = default_offers();
    let cmp = compare_offers(&offers, 36).unwrap();
    assert_eq!(cmp.rows[0].payoff_months, 240);

    let schedule = offers[0].schedule().unwrap();
    let last = schedule.rows.last().unwrap();
    assert!(last.total_principal_portion > dec!(15_700));
    assert_eq!(last.ending_balance, Decimal::ZERO);
}

#[test]
fn test_compare_loans_matches_offer_rows() {
    let offers = default_offers();
    let loans: Vec<_> = offers.iter().map(Offer::loan_parameters).collect();
    let by_loan = compare_loans(&loans, 36).unwrap();
    let by_offer = compare_offers(&offers, 36).unwrap();

    for (loan, row) in by_loan.iter().zip(&by_offer.rows) {
        assert_eq!(loan.window_summary.total_interest, row.window_interest);
        assert_eq!(loan.result.total_interest, row.total_interest);
    }
}

#[test]
fn test_persisted_book_feeds_comparison() {
    let mut store = MemoryStore::new();
    let mut book = OfferBook::load(&store).unwrap();
    book.add_option();
    book.save(&mut store).unwrap();
    assert!(store.get(OFFERS_KEY).unwrap().is_some());

    let reloaded = OfferBook::load(&store).unwrap();
    let cmp = compare_offers(reloaded.offers(), 36).unwrap();
    assert_eq!(cmp.rows.len(), 3);
    assert_eq!(cmp.rows[2].name, "New option #3");
}

#[test]
fn test_export_one_record_per_row() {
    let offer = &default_offers()[1];
    let schedule = offer.schedule().unwrap();
    let records = schedule_records(&schedule, &|offset: usize| format!("+{offset}"));

    assert_eq!(SCHEDULE_CSV_HEADER.len(), 9);
    assert_eq!(records.len(), schedule.rows.len());
    assert_eq!(records[0][2], "1.990");
    assert_eq!(records[36][2], "6.370");
    assert_eq!(records[239][0], "+239");
    assert_eq!(records[239][1], "240");
}
