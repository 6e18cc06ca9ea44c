use axum::{extract::State, Json};
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct VisitorCountResponse {
    pub count: u64,
}

/// GET /visitor-count
/// Records a visit and returns the running total.
pub async fn visitor_count_handler(State(state): State<AppState>) -> Json<VisitorCountResponse> {
    let visit = state.visitors.record_visit().await;
    for e in &visit.errors {
        warn!("Visitor counter ({}): {e}", state.visitors.path().display());
    }
    Json(VisitorCountResponse { count: visit.count })
}
