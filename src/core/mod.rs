//! Core module containing the record model, access control and the record service

pub mod access;
pub mod auth;
pub mod error;
pub mod query;
pub mod record;
pub mod service;
pub mod store;

pub use access::{AccessGate, ResourceOperation, ResourcePolicy};
pub use auth::{BasicCredentials, CredentialVerifier, Identity, InMemoryCredentials};
pub use error::{CashCardError, CashCardResult, ConfigError, ValidationError};
pub use query::{ListParams, Page, PageSpec, SortDirection, SortField, SortSpec};
pub use record::{CashCard, CashCardRequest};
pub use service::CashCardService;
pub use store::{CardFilter, CashCardStore};
