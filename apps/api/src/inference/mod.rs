//! Model-backed scoring: feature schema, vectorizer and the adapter around the
//! inference runtime.
//!
//! Flow: `RawAttributes` → `vectorize` (schema-aligned row) → `ScoringEngine`
//! → top-3 `Prediction`s.

pub mod adapter;
pub mod engine;
#[cfg(feature = "onnx")]
pub mod onnx;
pub mod schema;
pub mod vectorizer;

pub use adapter::{InferenceAdapter, ModelContext};
