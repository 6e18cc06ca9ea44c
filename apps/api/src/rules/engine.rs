//! Rule-based career scorer: deterministic keyword and bonus matching.
//!
//! Algorithm, per request:
//! 1. Every career starts at 0.0.
//! 2. Each interest answered true: +1.0 to careers listing that interest.
//! 3. Each confidence at level 6 or above: +0.5 to careers listing that topic.
//! 4. Intent `nature` equal to the career's: +1.0. Work-style `roleType`
//!    equal to the career's: +0.5. Both may apply.
//! 5. Stable sort by score, descending (catalog order breaks ties).
//! 6. prob = round(score / total, 2), with total treated as 1 when zero.
//!
//! The result is a score ratio, not a calibrated probability.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::prediction::{Backend, PredictError, Prediction, Predictor, TOP_K};
use crate::rules::profiles::{CareerProfile, CAREER_PROFILES};
use crate::survey::{
    RawAttributes, CONFIDENCE_PREFIX, INTENT_PREFIX, INTEREST_PREFIX, WORK_STYLE_PREFIX,
};

pub const INTEREST_WEIGHT: f64 = 1.0;
pub const CONFIDENCE_WEIGHT: f64 = 0.5;
pub const CONFIDENCE_THRESHOLD: f64 = 6.0;
pub const NATURE_BONUS: f64 = 1.0;
pub const ROLE_TYPE_BONUS: f64 = 0.5;

const NATURE_KEY: &str = "nature";
const ROLE_TYPE_KEY: &str = "roleType";

#[derive(Debug, Error)]
#[error("career catalog has {0} profiles, at least {min} are required", min = TOP_K)]
pub struct CatalogTooSmall(pub usize);

// ────────────────────────────────────────────────────────────────────────────
// Score table
// ────────────────────────────────────────────────────────────────────────────

/// Accumulated score per career, in catalog order. Lives for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreTable {
    scores: Vec<(&'static str, f64)>,
}

impl ScoreTable {
    fn zeroed(profiles: &[CareerProfile]) -> Self {
        Self {
            scores: profiles.iter().map(|p| (p.name, 0.0)).collect(),
        }
    }

    #[cfg(test)]
    pub fn get(&self, career: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|(name, _)| *name == career)
            .map(|(_, score)| *score)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn total(&self) -> f64 {
        self.scores.iter().map(|(_, s)| s).sum()
    }

    /// Careers by score, highest first; equal scores keep catalog order.
    pub fn ranked(&self) -> Vec<(&'static str, f64)> {
        let mut ranked = self.scores.clone();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct RuleEngine {
    profiles: &'static [CareerProfile],
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self {
            profiles: CAREER_PROFILES,
        }
    }
}

impl RuleEngine {
    pub fn new(profiles: &'static [CareerProfile]) -> Result<Self, CatalogTooSmall> {
        if profiles.len() < TOP_K {
            return Err(CatalogTooSmall(profiles.len()));
        }
        Ok(Self { profiles })
    }

    pub fn profiles(&self) -> &'static [CareerProfile] {
        self.profiles
    }

    /// Scores every career in the catalog against one flattened survey.
    pub fn score(&self, attrs: &RawAttributes) -> ScoreTable {
        let mut table = ScoreTable::zeroed(self.profiles);

        for (interest, value) in attrs.section(INTEREST_PREFIX) {
            if value.as_number().is_some_and(|v| v != 0.0) {
                self.award(&mut table, INTEREST_WEIGHT, |p| p.has_keyword(interest));
            }
        }

        for (topic, level) in attrs.section(CONFIDENCE_PREFIX) {
            if level.as_number().is_some_and(|v| v >= CONFIDENCE_THRESHOLD) {
                self.award(&mut table, CONFIDENCE_WEIGHT, |p| p.has_keyword(topic));
            }
        }

        if let Some(nature) = attrs.section_str(INTENT_PREFIX, NATURE_KEY) {
            self.award(&mut table, NATURE_BONUS, |p| p.nature == nature);
        }
        if let Some(role_type) = attrs.section_str(WORK_STYLE_PREFIX, ROLE_TYPE_KEY) {
            self.award(&mut table, ROLE_TYPE_BONUS, |p| p.role_type == role_type);
        }

        table
    }

    /// Top `TOP_K` careers with score-ratio probabilities rounded to 2 places.
    pub fn rank(&self, attrs: &RawAttributes) -> Vec<Prediction> {
        let table = self.score(attrs);
        let total = match table.total() {
            t if t == 0.0 => 1.0,
            t => t,
        };

        table
            .ranked()
            .into_iter()
            .take(TOP_K)
            .map(|(career, score)| Prediction {
                career: career.to_string(),
                prob: round2(score / total) as f32,
            })
            .collect()
    }

    fn award(
        &self,
        table: &mut ScoreTable,
        points: f64,
        matches: impl Fn(&CareerProfile) -> bool,
    ) {
        for (profile, entry) in self.profiles.iter().zip(table.scores.iter_mut()) {
            if matches(profile) {
                entry.1 += points;
            }
        }
    }
}

/// Two-place rounding, halves to even (0.625 → 0.62, 0.375 → 0.38).
fn round2(x: f64) -> f64 {
    (x * 100.0).round_ties_even() / 100.0
}

#[async_trait]
impl Predictor for RuleEngine {
    fn backend(&self) -> Backend {
        Backend::Rules
    }

    async fn predict(&self, attrs: &RawAttributes) -> Result<Vec<Prediction>, PredictError> {
        let predictions = self.rank(attrs);
        debug!(
            top = predictions.first().map(|p| p.career.as_str()).unwrap_or_default(),
            "rule engine ranked careers"
        );
        Ok(predictions)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
