use axum::{
    routing::{get, post},
    Router,
};

use super::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        // Hosted payment page
        .route("/payments/purchase", post(handlers::payments::purchase))
        .route(
            "/payments/complete_purchase",
            post(handlers::payments::complete_purchase),
        )
        .route(
            "/payments/notification",
            post(handlers::payments::notification),
        )
        // Webservice API
        .route("/webservice/purchase", post(handlers::webservice::purchase))
        .route("/webservice/refund", post(handlers::webservice::refund))
        .route(
            "/webservice/transform",
            post(handlers::webservice::transform),
        )
        .with_state(state)
}
