//! Shared test harness for cash card store backends
//!
//! Provides seed data matching the demo configuration and small helpers for
//! building cards and specs.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

pub mod cash_card_store_tests;

use cashcard::core::query::{PageSpec, SortDirection, SortField, SortSpec};
use cashcard::core::record::CashCard;
use rust_decimal::Decimal;

/// Build an amount from whole cents, e.g. `amount(12345)` is `123.45`
pub fn amount(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// An unsaved card
pub fn unsaved_card(cents: i64, owner: &str) -> CashCard {
    CashCard::new(amount(cents), owner)
}

/// The four cards of the demo configuration
///
/// - 99: 123.45 (sarah1)
/// - 100: 1.00 (sarah1)
/// - 101: 150.00 (sarah1)
/// - 102: 200.00 (kumar2)
pub fn seed_cards() -> Vec<CashCard> {
    vec![
        CashCard::with_id(99, amount(12345), "sarah1"),
        CashCard::with_id(100, amount(100), "sarah1"),
        CashCard::with_id(101, amount(15000), "sarah1"),
        CashCard::with_id(102, amount(20000), "kumar2"),
    ]
}

pub fn sort(field: SortField, direction: SortDirection) -> SortSpec {
    SortSpec::new(field, direction)
}

pub fn unpaged() -> PageSpec {
    PageSpec::unpaged()
}

/// Ids of a card list, in order
pub fn ids(cards: &[CashCard]) -> Vec<i64> {
    cards.iter().filter_map(|card| card.id).collect()
}
