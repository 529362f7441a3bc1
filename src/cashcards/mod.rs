//! Cash card HTTP surface
//!
//! Handlers and the authentication middleware for `/cashcards`. Business
//! rules live in [`crate::core::service`]; this module only maps HTTP onto it.

pub mod handlers;
pub mod middleware;

pub use handlers::{
    AppState, CASHCARDS_PATH, card_location, create_cash_card, delete_cash_card, get_cash_card,
    list_cash_cards, update_cash_card,
};
pub use middleware::authenticate;
