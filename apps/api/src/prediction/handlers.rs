//! Axum route handlers for the Prediction API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::prediction::{Backend, Prediction, Predictor, UnknownBackend};
use crate::state::AppState;
use crate::survey::{flatten, Survey};

/// Body of every predict response.
///
/// Failures are returned with HTTP 200 and an `error` key; existing clients
/// inspect the body rather than the status code.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PredictResponse {
    Predictions { predictions: Vec<Prediction> },
    Error { error: String },
}

/// POST /predict
///
/// Scores the survey with the configured default backend.
pub async fn handle_predict(
    State(state): State<AppState>,
    Json(survey): Json<Survey>,
) -> Json<PredictResponse> {
    Json(run_prediction(state.default_predictor(), &survey).await)
}

/// POST /predict/:backend
///
/// Same as `/predict`, with the backend (`model` or `rules`) picked by the caller.
pub async fn handle_predict_with(
    State(state): State<AppState>,
    Path(backend): Path<String>,
    Json(survey): Json<Survey>,
) -> Result<Json<PredictResponse>, AppError> {
    let backend: Backend = backend
        .parse()
        .map_err(|e: UnknownBackend| AppError::NotFound(e.to_string()))?;

    Ok(Json(run_prediction(state.predictor(backend), &survey).await))
}

async fn run_prediction(predictor: &dyn Predictor, survey: &Survey) -> PredictResponse {
    let attrs = flatten(survey);

    match predictor.predict(&attrs).await {
        Ok(predictions) => {
            debug!(
                backend = %predictor.backend(),
                top = ?predictions.first().map(|p| &p.career),
                "prediction served"
            );
            PredictResponse::Predictions { predictions }
        }
        Err(e) => {
            warn!(backend = %predictor.backend(), "Prediction failed: {e}");
            PredictResponse::Error {
                error: e.to_string(),
            }
        }
    }
}
