//! The cash card record and its write payload

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A cash card owned by exactly one identity
///
/// `id` is `None` until the store assigns one on first save. `owner` is set
/// once from the caller's verified identity and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashCard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    pub owner: String,
}

impl CashCard {
    /// Build a card that has not been persisted yet
    pub fn new(amount: Decimal, owner: impl Into<String>) -> Self {
        Self {
            id: None,
            amount,
            owner: owner.into(),
        }
    }

    /// Build a card with a known id (seed data, updates)
    pub fn with_id(id: i64, amount: Decimal, owner: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            amount,
            owner: owner.into(),
        }
    }

    pub fn is_owned_by(&self, owner: &str) -> bool {
        self.owner == owner
    }
}

/// Body accepted by `POST /cashcards` and `PUT /cashcards/{id}`
///
/// Only `amount` is read. Client-supplied `id` and `owner` fields are
/// tolerated and dropped on the floor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CashCardRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl CashCardRequest {
    pub fn new(amount: Decimal) -> Self {
        Self { amount }
    }
}
