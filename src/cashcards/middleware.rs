//! Authentication and resource-policy middleware for the `/cashcards` routes

use axum::{
    extract::{Request, State},
    http::{Method, header},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use super::handlers::AppState;
use crate::core::access::ResourceOperation;
use crate::core::auth::BasicCredentials;
use crate::core::error::CashCardError;

/// Resolve the caller from HTTP Basic credentials
///
/// On success the [`Identity`](crate::core::auth::Identity) is stored in the
/// request extensions. Missing or rejected credentials end the request
/// with 401; a configured resource policy that bars the caller ends it with
/// 403. Neither reaches the record service.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, CashCardError> {
    let credentials = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(BasicCredentials::from_header)
        .ok_or_else(|| {
            debug!("request without usable basic credentials");
            CashCardError::Unauthorized
        })?;

    let identity = state
        .credentials
        .verify(&credentials)
        .await?
        .ok_or_else(|| {
            warn!(username = %credentials.username, "rejected credentials");
            CashCardError::Unauthorized
        })?;

    let operation = operation_for(request.method());
    let admitted = state
        .resource_policy
        .admits(&identity, operation, state.service.store().as_ref())
        .await?;
    if !admitted {
        debug!(
            username = identity.name(),
            policy = ?state.resource_policy,
            "resource policy denied caller"
        );
        return Err(CashCardError::Forbidden);
    }

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

fn operation_for(method: &Method) -> ResourceOperation {
    if *method == Method::POST {
        ResourceOperation::Create
    } else {
        ResourceOperation::Access
    }
}
