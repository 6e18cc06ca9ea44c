use std::path::PathBuf;

use thiserror::Error;

use crate::inference::vectorizer::FeatureVector;

/// What a classifier returns for a single row.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOutput {
    pub label: String,
    /// Class → probability, in the engine's class order.
    pub probabilities: Vec<(String, f32)>,
}

// Only the ONNX engine builds the load and output variants.
#[cfg_attr(not(feature = "onnx"), allow(dead_code))]
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to load model from {path}: {message}")]
    Load { path: PathBuf, message: String },

    #[error("{0}")]
    Run(String),

    #[error("unexpected model output: {0}")]
    Output(String),
}

/// The inference runtime, treated as a black box: a feature row in, a label
/// and per-class probabilities out.
///
/// Implementations must be safe to call from concurrent requests.
pub trait ScoringEngine: Send + Sync {
    /// Input width the model declares, when it declares a fixed one.
    fn input_width(&self) -> Option<usize>;

    fn run(&self, features: &FeatureVector) -> Result<EngineOutput, EngineError>;
}
