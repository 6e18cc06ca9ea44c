//! Deterministic rule-based career scoring.

pub mod engine;
pub mod profiles;

pub use engine::RuleEngine;
pub use profiles::CAREER_PROFILES;
