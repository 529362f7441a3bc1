//! Router builder for the cash card routes

use crate::cashcards::{
    AppState, authenticate, create_cash_card, delete_cash_card, get_cash_card, list_cash_cards,
    update_cash_card,
};
use axum::{Router, middleware, routing::get};

/// Build the `/cashcards` routes
///
/// - GET    /cashcards       - List the caller's cards (page, size, sort)
/// - POST   /cashcards       - Create a card owned by the caller
/// - GET    /cashcards/{id}  - Get one of the caller's cards
/// - PUT    /cashcards/{id}  - Replace the amount of one of the caller's cards
/// - DELETE /cashcards/{id}  - Delete one of the caller's cards
///
/// All of them require HTTP Basic credentials.
pub fn build_cashcard_routes(state: AppState) -> Router {
    Router::new()
        .route("/cashcards", get(list_cash_cards).post(create_cash_card))
        .route(
            "/cashcards/{id}",
            get(get_cash_card)
                .put(update_cash_card)
                .delete(delete_cash_card),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::access::ResourcePolicy;
    use crate::core::auth::{BasicCredentials, InMemoryCredentials};
    use crate::core::record::CashCard;
    use crate::core::service::CashCardService;
    use crate::storage::InMemoryCashCardStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use rust_decimal::Decimal;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn routes(policy: ResourcePolicy) -> Router {
        let store = InMemoryCashCardStore::with_cards([CashCard::with_id(
            99,
            Decimal::new(12345, 2),
            "sarah1",
        )]);
        let credentials = InMemoryCredentials::new()
            .with_user("sarah1", "abc123", &["CARD-OWNER"])
            .with_user("hank-owns-no-cards", "qrs456", &["NON-OWNER"]);

        build_cashcard_routes(AppState {
            service: Arc::new(CashCardService::new(Arc::new(store))),
            credentials: Arc::new(credentials),
            resource_policy: Arc::new(policy),
        })
    }

    fn get_as(uri: &str, username: &str, password: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(
                header::AUTHORIZATION,
                BasicCredentials::new(username, password).to_header(),
            )
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_authenticated_read() {
        let response = routes(ResourcePolicy::Unrestricted)
            .oneshot(get_as("/cashcards/99", "sarah1", "abc123"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_credentials_rejected() {
        let request = Request::builder()
            .uri("/cashcards")
            .body(Body::empty())
            .unwrap();

        let response = routes(ResourcePolicy::Unrestricted)
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_policy_runs_before_handler() {
        let policy = ResourcePolicy::RequireRole {
            role: "CARD-OWNER".to_string(),
        };

        let response = routes(policy)
            .oneshot(get_as("/cashcards/99", "hank-owns-no-cards", "qrs456"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = routes(ResourcePolicy::Unrestricted)
            .oneshot(get_as("/cashcards/99/owner", "sarah1", "abc123"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
