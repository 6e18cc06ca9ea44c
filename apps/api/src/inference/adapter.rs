use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, error};

use crate::inference::engine::{EngineError, ScoringEngine};
use crate::inference::schema::{FeatureSchema, SchemaError};
use crate::inference::vectorizer::{vectorize, FeatureVector};
use crate::prediction::{top_k, Backend, PredictError, Prediction, Predictor, TOP_K};
use crate::survey::RawAttributes;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("feature schema has {schema} features but the model expects {engine}")]
    SchemaMismatch { schema: usize, engine: usize },

    #[error("built without ONNX Runtime support (enable the `onnx` feature)")]
    Unsupported,
}

/// Feature schema and inference engine, loaded together once at startup.
///
/// The two artifacts are exported as a pair; `new` refuses a pair whose sizes
/// disagree so a mismatch surfaces at load time instead of per request.
#[derive(Clone)]
pub struct ModelContext {
    schema: Arc<FeatureSchema>,
    engine: Arc<dyn ScoringEngine>,
    source: PathBuf,
}

impl ModelContext {
    pub fn new(
        schema: FeatureSchema,
        engine: Arc<dyn ScoringEngine>,
        source: impl Into<PathBuf>,
    ) -> Result<Self, LoadError> {
        if let Some(width) = engine.input_width() {
            if width != schema.len() {
                return Err(LoadError::SchemaMismatch {
                    schema: schema.len(),
                    engine: width,
                });
            }
        }
        Ok(Self {
            schema: Arc::new(schema),
            engine,
            source: source.into(),
        })
    }

    /// Loads the feature list and the exported model from disk.
    pub async fn load(model_path: &Path, features_path: &Path) -> Result<Self, LoadError> {
        let schema = FeatureSchema::load(features_path).await?;
        let engine = open_engine(model_path)?;
        Self::new(schema, engine, model_path)
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn source(&self) -> &Path {
        &self.source
    }
}

#[cfg(feature = "onnx")]
fn open_engine(path: &Path) -> Result<Arc<dyn ScoringEngine>, LoadError> {
    Ok(Arc::new(crate::inference::onnx::OnnxEngine::open(path)?))
}

#[cfg(not(feature = "onnx"))]
fn open_engine(_path: &Path) -> Result<Arc<dyn ScoringEngine>, LoadError> {
    Err(LoadError::Unsupported)
}

/// Model-backed predictor. Holds no context when loading failed; every call
/// then reports `ModelUnavailable`.
#[derive(Clone)]
pub struct InferenceAdapter {
    context: Option<ModelContext>,
}

impl InferenceAdapter {
    pub fn new(context: ModelContext) -> Self {
        Self {
            context: Some(context),
        }
    }

    pub fn unavailable() -> Self {
        Self { context: None }
    }

    pub fn context(&self) -> Option<&ModelContext> {
        self.context.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.context.is_some()
    }

    /// Runs the engine on one row and keeps the top `TOP_K` classes.
    pub async fn infer(&self, vector: FeatureVector) -> Result<Vec<Prediction>, PredictError> {
        let context = self.context.as_ref().ok_or(PredictError::ModelUnavailable)?;
        let engine = Arc::clone(&context.engine);

        // CPU-bound: run on the blocking pool so async workers keep serving.
        // A panicking engine surfaces here as a JoinError.
        let output = tokio::task::spawn_blocking(move || engine.run(&vector))
            .await
            .map_err(|e| {
                error!("Inference task failed: {e}");
                PredictError::Inference(format!("inference task failed: {e}"))
            })?
            .map_err(|e| {
                error!("Inference error: {e}");
                PredictError::Inference(e.to_string())
            })?;

        debug!(label = %output.label, classes = output.probabilities.len(), "inference done");
        Ok(top_k(output.probabilities, TOP_K))
    }
}

#[async_trait]
impl Predictor for InferenceAdapter {
    fn backend(&self) -> Backend {
        Backend::Model
    }

    async fn predict(&self, attrs: &RawAttributes) -> Result<Vec<Prediction>, PredictError> {
        let context = self.context.as_ref().ok_or(PredictError::ModelUnavailable)?;
        self.infer(vectorize(attrs, &context.schema)).await
    }
}
