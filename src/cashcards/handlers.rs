//! HTTP handlers for the `/cashcards` collection
//!
//! Every handler runs behind [`authenticate`](super::middleware::authenticate),
//! which puts the caller's [`Identity`] into the request extensions.

use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;

use crate::core::access::ResourcePolicy;
use crate::core::auth::{CredentialVerifier, Identity};
use crate::core::error::{CashCardError, CashCardResult};
use crate::core::query::ListParams;
use crate::core::record::{CashCard, CashCardRequest};
use crate::core::service::CashCardService;

/// Base path of the collection
pub const CASHCARDS_PATH: &str = "/cashcards";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CashCardService>,
    pub credentials: Arc<dyn CredentialVerifier>,
    pub resource_policy: Arc<ResourcePolicy>,
}

/// Locator of a single card
pub fn card_location(id: i64) -> String {
    format!("{}/{}", CASHCARDS_PATH, id)
}

/// Path ids that are not integers cannot name a card
fn parse_card_id(raw: &str) -> CashCardResult<i64> {
    raw.parse::<i64>().map_err(|_| CashCardError::NotFound)
}

/// List the caller's cards
///
/// GET /cashcards?page=0&size=1&sort=amount,desc
pub async fn list_cash_cards(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> CashCardResult<Json<Vec<CashCard>>> {
    let Query(params) = params?;
    let cards = state.service.list(identity.name(), &params).await?;
    Ok(Json(cards))
}

/// GET /cashcards/{id}
pub async fn get_cash_card(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> CashCardResult<Json<CashCard>> {
    let id = parse_card_id(&id)?;
    let card = state.service.get_by_id(identity.name(), id).await?;
    Ok(Json(card))
}

/// POST /cashcards
///
/// Answers 201 with a `Location` header and no body.
pub async fn create_cash_card(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    payload: Result<Json<CashCardRequest>, JsonRejection>,
) -> CashCardResult<impl IntoResponse> {
    let Json(request) = payload?;
    let card = state.service.create(identity.name(), request).await?;

    let id = card
        .id
        .ok_or_else(|| anyhow::anyhow!("store returned a card without an id"))?;

    Ok((StatusCode::CREATED, [(header::LOCATION, card_location(id))]))
}

/// PUT /cashcards/{id}
pub async fn update_cash_card(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    payload: Result<Json<CashCardRequest>, JsonRejection>,
) -> CashCardResult<StatusCode> {
    let id = parse_card_id(&id)?;
    let Json(request) = payload?;

    state.service.update(identity.name(), id, request).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /cashcards/{id}
pub async fn delete_cash_card(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> CashCardResult<StatusCode> {
    let id = parse_card_id(&id)?;

    state.service.delete(identity.name(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
