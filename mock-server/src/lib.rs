//! In-memory mock of the Fabric API.
//!
//! # Design
//! Serves every endpoint the SDK calls, in the Fabric wire shape, from state
//! held behind a tokio `RwLock`. A middleware journals each request (before
//! auth is checked) and rejects requests without a bearer token, so tests
//! can assert exactly what the SDK dispatched, including that nothing was.

mod handlers;
mod state;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderName, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;

pub use handlers::ApiFailure;
pub use state::{Budget, Favorite, MockState, Provider, RecordedRequest, Store, Wallet};

/// Router over fresh seeded state.
pub fn app() -> Router {
    app_with_state(MockState::new())
}

/// Router over caller-supplied state, so tests can keep a handle to it.
pub fn app_with_state(state: MockState) -> Router {
    Router::new()
        .route("/v1/discover", get(handlers::discover))
        .route("/v1/route", post(handlers::route))
        .route("/v1/evaluate/{provider_id}", get(handlers::evaluate))
        .route("/v1/feedback", post(handlers::feedback))
        .route("/v1/budget", get(handlers::list_budgets).post(handlers::create_budget))
        .route("/v1/budget/{budget_id}/status", get(handlers::budget_status))
        .route("/v1/favorites", post(handlers::add_favorite))
        .route(
            "/v1/favorites/{id}",
            get(handlers::list_favorites).delete(handlers::remove_favorite),
        )
        .route("/v1/wallets", get(handlers::list_wallets).post(handlers::create_wallet))
        .route("/v1/wallets/{agent_id}/balance", get(handlers::wallet_balance))
        .route("/v1/chain/status", get(handlers::chain_status))
        .route("/mcp/tools", get(handlers::mcp_tools))
        .route("/mcp/execute", post(handlers::mcp_execute))
        .layer(middleware::from_fn_with_state(state.clone(), journal_and_authorize))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_state(listener, MockState::new()).await
}

pub async fn run_with_state(listener: TcpListener, state: MockState) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_state(state)).await
}

fn header_value(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn journal_and_authorize(State(state): State<MockState>, request: Request, next: Next) -> Response {
    let recorded = {
        let headers = request.headers();
        RecordedRequest {
            method: request.method().to_string(),
            path: request.uri().path().to_string(),
            query: request.uri().query().map(str::to_string),
            authorization: header_value(headers, header::AUTHORIZATION),
            content_type: header_value(headers, header::CONTENT_TYPE),
            user_agent: header_value(headers, header::USER_AGENT),
        }
    };
    let authorized = recorded
        .authorization
        .as_deref()
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|token| !token.trim().is_empty());
    tracing::debug!(method = %recorded.method, path = %recorded.path, authorized, "mock request");
    state.record(recorded);

    if !authorized {
        return ApiFailure::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "Missing or invalid API key")
            .into_response();
    }
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Store;

    #[test]
    fn provider_serializes_camel_case() {
        let store = Store::seeded();
        let json = serde_json::to_value(&store.providers[0]).unwrap();
        assert_eq!(json["id"], "deepl-translate");
        assert_eq!(json["registryId"], "reg_deepl-translate");
        assert_eq!(json["trustScore"], 92.0);
        assert!(json.get("trust_score").is_none());
    }

    #[test]
    fn catalog_lists_best_provider_first_per_category() {
        let store = Store::seeded();
        assert_eq!(store.matching("translation", None, None)[0].id, "deepl-translate");
        assert_eq!(store.matching("image", None, None)[0].id, "pixel-forge");
    }

    #[test]
    fn api_failure_uses_fabric_error_shape() {
        let failure = ApiFailure::new(StatusCode::NOT_FOUND, "NOT_FOUND", "Provider not found");
        let response = failure.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
