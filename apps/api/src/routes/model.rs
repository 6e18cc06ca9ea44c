use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::prediction::PredictError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ModelStatus {
    pub loaded: bool,
    pub features: usize,
    pub source: String,
}

/// GET /model
/// Describes the loaded model; 503 when the model backend is unavailable.
pub async fn model_handler(State(state): State<AppState>) -> Result<Json<ModelStatus>, AppError> {
    let context = state
        .model
        .context()
        .ok_or_else(|| AppError::ServiceUnavailable(PredictError::ModelUnavailable.to_string()))?;

    Ok(Json(ModelStatus {
        loaded: true,
        features: context.schema().len(),
        source: context.source().display().to_string(),
    }))
}
