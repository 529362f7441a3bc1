//! # Cash Card Service
//!
//! A small REST service managing cash cards, each owned by one user.
//!
//! ## Features
//!
//! - **Owner-Scoped Records**: every read and write is limited to the caller's own cards
//! - **HTTP Basic Authentication**: credentials checked against a pluggable verifier
//! - **Resource Policies**: optional whole-collection ban (by role or by ownership)
//! - **Paging and Sorting**: `page`, `size` and `sort` query parameters on listings
//! - **Pluggable Storage**: the record service only depends on [`CashCardStore`](core::CashCardStore)
//! - **Configuration-Based**: users, seed cards and policy defined in YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cashcard::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = AppConfig::default_config();
//!     ServerBuilder::from_config(&config)?
//!         .serve(&config.server.bind)
//!         .await
//! }
//! ```

pub mod cashcards;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        access::{AccessGate, ResourceOperation, ResourcePolicy},
        auth::{BasicCredentials, CredentialVerifier, Identity, InMemoryCredentials},
        error::{CashCardError, CashCardResult, ConfigError, ErrorResponse, ValidationError},
        query::{ListParams, Page, PageSpec, SortDirection, SortField, SortSpec},
        record::{CashCard, CashCardRequest},
        service::CashCardService,
        store::{CardFilter, CashCardStore},
    };

    // === Handlers ===
    pub use crate::cashcards::{AppState, authenticate, card_location};

    // === Storage ===
    pub use crate::storage::InMemoryCashCardStore;

    // === Config ===
    pub use crate::config::{AccessConfig, AppConfig, CardSeed, ServerConfig, UserConfig};

    // === Server ===
    pub use crate::server::{RestExposure, ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use rust_decimal::Decimal;
    pub use serde::{Deserialize, Serialize};

    // === Axum ===
    pub use axum::{
        Router,
        extract::{Path, State},
        http::HeaderMap,
        routing::{delete, get, post, put},
    };
}
