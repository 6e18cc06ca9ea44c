//! Survey input and the flat attribute map both scoring backends consume.

pub mod flatten;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use flatten::flatten;

pub const INTEREST_PREFIX: &str = "int_";
pub const CONFIDENCE_PREFIX: &str = "conf_";
pub const WORK_STYLE_PREFIX: &str = "ws_";
pub const INTENT_PREFIX: &str = "intent_";

/// POST body for every predict route.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    pub interests: BTreeMap<String, bool>,
    pub work_style: BTreeMap<String, AttrValue>,
    pub intent: BTreeMap<String, AttrValue>,
    pub confidence: BTreeMap<String, i64>,
}

/// A single scalar survey answer.
///
/// Work-style and intent answers may be any JSON scalar; `null`, arrays and
/// objects are rejected at deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl AttrValue {
    /// Numeric reading of the value. Strings have none: they are categorical.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            AttrValue::Int(i) => Some(*i as f64),
            AttrValue::Float(f) => Some(*f),
            AttrValue::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Str(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Str(v)
    }
}

/// Prefixed key → scalar map built fresh for each request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawAttributes(BTreeMap<String, AttrValue>);

impl RawAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value; an existing key is overwritten (last write wins).
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.0.get(key)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Entries of one survey section with the section prefix stripped.
    pub fn section<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a AttrValue)> + 'a {
        self.iter()
            .filter_map(move |(k, v)| k.strip_prefix(prefix).map(|name| (name, v)))
    }

    /// String answer for `key` inside the section `prefix`, if it is a string.
    pub fn section_str(&self, prefix: &str, key: &str) -> Option<&str> {
        self.get(&format!("{prefix}{key}")).and_then(AttrValue::as_str)
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for RawAttributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = RawAttributes::new();
        for (k, v) in iter {
            attrs.insert(k, v);
        }
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_survey_deserializes_camel_case_sections() {
        let survey: Survey = serde_json::from_value(json!({
            "interests": {"numbers": true, "design": false},
            "workStyle": {"environment": "Solo", "hours": 40},
            "intent": {"nature": "applied", "remote": true},
            "confidence": {"math": 7}
        }))
        .unwrap();

        assert_eq!(survey.interests.get("numbers"), Some(&true));
        assert_eq!(
            survey.work_style.get("environment"),
            Some(&AttrValue::Str("Solo".to_string()))
        );
        assert_eq!(survey.work_style.get("hours"), Some(&AttrValue::Int(40)));
        assert_eq!(survey.intent.get("remote"), Some(&AttrValue::Bool(true)));
        assert_eq!(survey.confidence.get("math"), Some(&7));
    }

    #[test]
    fn test_float_answer_stays_float() {
        let v: AttrValue = serde_json::from_value(json!(2.5)).unwrap();
        assert_eq!(v, AttrValue::Float(2.5));
    }

    #[test]
    fn test_non_scalar_answer_is_rejected() {
        let result = serde_json::from_value::<Survey>(json!({
            "interests": {},
            "workStyle": {"tools": ["vim"]},
            "intent": {},
            "confidence": {}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_section_is_rejected() {
        let result = serde_json::from_value::<Survey>(json!({
            "interests": {},
            "workStyle": {},
            "intent": {}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_section_strips_prefix() {
        let attrs: RawAttributes = [
            ("int_numbers", AttrValue::Int(1)),
            ("conf_math", AttrValue::Int(7)),
            ("int_logic", AttrValue::Int(0)),
        ]
        .into_iter()
        .collect();

        let interests: Vec<&str> = attrs.section(INTEREST_PREFIX).map(|(k, _)| k).collect();
        assert_eq!(interests, vec!["logic", "numbers"]);
    }

    #[test]
    fn test_as_number_per_variant() {
        assert_eq!(AttrValue::Bool(true).as_number(), Some(1.0));
        assert_eq!(AttrValue::Int(6).as_number(), Some(6.0));
        assert_eq!(AttrValue::Float(0.5).as_number(), Some(0.5));
        assert_eq!(AttrValue::from("Solo").as_number(), None);
    }
}
