//! Prediction contract shared by every scoring backend.
//!
//! Two backends implement [`Predictor`]:
//! - `InferenceAdapter`: trained classifier behind the feature vectorizer.
//! - `RuleEngine`: deterministic keyword/bonus scorer.
//!
//! `AppState` holds one `Arc<dyn Predictor>` per backend; handlers never care
//! which one answers.

pub mod handlers;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::survey::RawAttributes;

/// Number of careers returned per prediction.
pub const TOP_K: usize = 3;

/// One ranked career with its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub career: String,
    pub prob: f32,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    #[error("Model not loaded")]
    ModelUnavailable,

    #[error("Inference failed: {0}")]
    Inference(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Model,
    Rules,
}

impl Backend {
    pub fn as_str(self) -> &'static str {
        match self {
            Backend::Model => "model",
            Backend::Rules => "rules",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown predictor backend '{0}' (expected 'model' or 'rules')")]
pub struct UnknownBackend(pub String);

impl FromStr for Backend {
    type Err = UnknownBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "model" => Ok(Backend::Model),
            "rules" => Ok(Backend::Rules),
            _ => Err(UnknownBackend(s.to_string())),
        }
    }
}

/// A scoring backend. Implement this to add a backend without touching the
/// handlers.
#[async_trait]
pub trait Predictor: Send + Sync {
    fn backend(&self) -> Backend;

    async fn predict(&self, attrs: &RawAttributes) -> Result<Vec<Prediction>, PredictError>;
}

/// Picks the `k` highest-probability entries.
///
/// The sort is stable, so exact ties keep the order the entries arrived in.
/// Probabilities are passed through untouched.
pub fn top_k(entries: impl IntoIterator<Item = (String, f32)>, k: usize) -> Vec<Prediction> {
    let mut ranked: Vec<(String, f32)> = entries.into_iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
        .into_iter()
        .take(k)
        .map(|(career, prob)| Prediction { career, prob })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(&str, f32)]) -> Vec<(String, f32)> {
        pairs.iter().map(|(c, p)| (c.to_string(), *p)).collect()
    }

    #[test]
    fn test_top_k_orders_descending() {
        let top = top_k(
            entries(&[
                ("UI/UX Designer", 0.05),
                ("Data Scientist", 0.8),
                ("Backend Developer", 0.15),
            ]),
            TOP_K,
        );
        let careers: Vec<&str> = top.iter().map(|p| p.career.as_str()).collect();
        assert_eq!(
            careers,
            vec!["Data Scientist", "Backend Developer", "UI/UX Designer"]
        );
        assert_eq!(top[0].prob, 0.8);
    }

    #[test]
    fn test_top_k_truncates() {
        let top = top_k(
            entries(&[("a", 0.1), ("b", 0.2), ("c", 0.3), ("d", 0.4)]),
            TOP_K,
        );
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].career, "d");
        assert_eq!(top[2].career, "b");
    }

    #[test]
    fn test_top_k_ties_keep_arrival_order() {
        let top = top_k(entries(&[("first", 0.25), ("second", 0.5), ("third", 0.25)]), 3);
        assert_eq!(top[1].career, "first");
        assert_eq!(top[2].career, "third");
    }

    #[test]
    fn test_top_k_with_fewer_entries_than_k() {
        let top = top_k(entries(&[("only", 1.0)]), TOP_K);
        assert_eq!(top.len(), 1);
    }

    #[test]
    fn test_backend_parses_case_insensitively() {
        assert_eq!("Model".parse::<Backend>().unwrap(), Backend::Model);
        assert_eq!(" rules ".parse::<Backend>().unwrap(), Backend::Rules);
        assert!("ensemble".parse::<Backend>().is_err());
    }

    #[test]
    fn test_backend_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Backend::Rules).unwrap(), r#""rules""#);
        assert_eq!(serde_json::to_string(&Backend::Model).unwrap(), r#""model""#);
    }

    #[test]
    fn test_prediction_serializes_to_contract_shape() {
        let p = Prediction {
            career: "Data Scientist".to_string(),
            prob: 0.8,
        };
        assert_eq!(
            serde_json::to_string(&p).unwrap(),
            r#"{"career":"Data Scientist","prob":0.8}"#
        );
    }
}
