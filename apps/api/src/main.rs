mod config;
mod errors;
mod inference;
mod prediction;
mod routes;
mod rules;
mod state;
mod survey;
mod visitors;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::inference::{InferenceAdapter, ModelContext};
use crate::prediction::Backend;
use crate::routes::build_router;
use crate::rules::{RuleEngine, CAREER_PROFILES};
use crate::state::AppState;
use crate::visitors::VisitorCounter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails only on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerGPS API v{}", env!("CARGO_PKG_VERSION"));

    // Load the model; a failure degrades the model backend instead of aborting
    let model = match ModelContext::load(&config.model_path, &config.features_path).await {
        Ok(context) => {
            info!(
                "Loaded model {} with {} features",
                context.source().display(),
                context.schema().len()
            );
            InferenceAdapter::new(context)
        }
        Err(e) => {
            warn!("Model unavailable, model backend will report errors: {e}");
            InferenceAdapter::unavailable()
        }
    };

    let rules = RuleEngine::new(CAREER_PROFILES)?;
    info!("Rule engine ready ({} careers)", rules.profiles().len());

    if config.default_backend == Backend::Model && !model.is_loaded() {
        warn!("PREDICTOR_BACKEND=model but no model is loaded; use /predict/rules meanwhile");
    }
    info!("Default predictor backend: {}", config.default_backend);

    let state = AppState {
        config: config.clone(),
        model: Arc::new(model),
        rules: Arc::new(rules),
        visitors: Arc::new(VisitorCounter::new(config.visitor_file.clone())),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
