use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::prediction::Backend;

/// Application configuration loaded from environment variables.
/// Every setting has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub model_path: PathBuf,
    pub features_path: PathBuf,
    pub visitor_file: PathBuf,
    /// Backend answering `POST /predict`. Defaults to `model` only when the
    /// binary is built with an inference runtime (`--features onnx`).
    pub default_backend: Backend,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            port: var("PORT", "8000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG", "info"),
            model_path: var("MODEL_PATH", "models/rf_baseline.onnx").into(),
            features_path: var("FEATURES_PATH", "models/model_features.json").into(),
            visitor_file: var("VISITOR_FILE", "visitor_count.txt").into(),
            default_backend: var("PREDICTOR_BACKEND", default_backend().as_str())
                .parse()
                .context("PREDICTOR_BACKEND must be 'model' or 'rules'")?,
        })
    }
}

fn default_backend() -> Backend {
    if cfg!(feature = "onnx") {
        Backend::Model
    } else {
        Backend::Rules
    }
}
