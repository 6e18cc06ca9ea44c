pub mod health;
pub mod model;
pub mod visitors;

use axum::{
    routing::{get, post},
    Router,
};

use crate::prediction::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/model", get(model::model_handler))
        // Prediction API
        .route("/predict", post(handlers::handle_predict))
        .route("/predict/:backend", post(handlers::handle_predict_with))
        .route("/visitor-count", get(visitors::visitor_count_handler))
        .with_state(state)
}
