use std::sync::Arc;

use crate::config::Config;
use crate::inference::InferenceAdapter;
use crate::prediction::{Backend, Predictor};
use crate::rules::RuleEngine;
use crate::visitors::VisitorCounter;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is built once at startup and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Model-backed predictor; reports `ModelUnavailable` when loading failed.
    pub model: Arc<InferenceAdapter>,
    pub rules: Arc<RuleEngine>,
    pub visitors: Arc<VisitorCounter>,
}

impl AppState {
    pub fn predictor(&self, backend: Backend) -> &dyn Predictor {
        match backend {
            Backend::Model => self.model.as_ref(),
            Backend::Rules => self.rules.as_ref(),
        }
    }

    pub fn default_predictor(&self) -> &dyn Predictor {
        self.predictor(self.config.default_backend)
    }
}
