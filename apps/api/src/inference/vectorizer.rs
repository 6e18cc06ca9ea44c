use std::borrow::Cow;

use tracing::trace;

use crate::inference::schema::FeatureSchema;
use crate::survey::{AttrValue, RawAttributes};

/// One dense input row for the model, aligned to a [`FeatureSchema`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f32>);

impl FeatureVector {
    pub fn zeros(len: usize) -> Self {
        Self(vec![0.0; len])
    }

    #[cfg(any(test, feature = "onnx"))]
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    #[cfg(any(test, feature = "onnx"))]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Encodes a flat attribute map into the model's input layout.
///
/// - string value: one-hot, feature `"{key}={value}"` set to 1.0
/// - bool / int / float: feature `key` set to the numeric value
///
/// Features the schema does not know are dropped. Slots nobody writes stay 0.0.
pub fn vectorize(attrs: &RawAttributes, schema: &FeatureSchema) -> FeatureVector {
    let mut vector = FeatureVector::zeros(schema.len());

    for (key, value) in attrs.iter() {
        let (feature, x): (Cow<'_, str>, f32) = match value {
            AttrValue::Str(category) => (Cow::Owned(format!("{key}={category}")), 1.0),
            AttrValue::Bool(flag) => (Cow::Borrowed(key), if *flag { 1.0 } else { 0.0 }),
            AttrValue::Int(n) => (Cow::Borrowed(key), *n as f32),
            AttrValue::Float(f) => (Cow::Borrowed(key), *f as f32),
        };

        match schema.index_of(&feature) {
            Some(idx) => vector.0[idx] = x,
            None => trace!(%feature, "feature not in schema, dropped"),
        }
    }

    vector
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(names: &[&str]) -> FeatureSchema {
        FeatureSchema::new(names.iter().map(|n| n.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_numeric_features_land_at_schema_index() {
        let schema = schema(&["int_numbers", "int_building", "conf_math", "conf_coding"]);
        let attrs: RawAttributes = [
            ("int_numbers", 1_i64),
            ("int_building", 1),
            ("conf_math", 7),
            ("conf_coding", 6),
        ]
        .into_iter()
        .collect();

        assert_eq!(vectorize(&attrs, &schema).as_slice(), &[1.0, 1.0, 7.0, 6.0]);
    }

    #[test]
    fn test_empty_map_is_all_zero() {
        let schema = schema(&["int_numbers", "conf_math", "ws_environment=Solo"]);
        let vector = vectorize(&RawAttributes::new(), &schema);
        assert_eq!(vector.len(), 3);
        assert!(vector.as_slice().iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_string_value_is_one_hot() {
        let schema = schema(&["ws_environment=Team", "ws_environment=Solo", "conf_math"]);
        let mut attrs = RawAttributes::new();
        attrs.insert("ws_environment", "Solo");

        assert_eq!(vectorize(&attrs, &schema).as_slice(), &[0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_unseen_category_is_dropped() {
        let schema = schema(&["ws_environment=Solo", "conf_math"]);
        let mut attrs = RawAttributes::new();
        attrs.insert("ws_environment", "Remote");
        attrs.insert("conf_math", 5_i64);

        assert_eq!(vectorize(&attrs, &schema).as_slice(), &[0.0, 5.0]);
    }

    #[test]
    fn test_unknown_numeric_key_is_dropped() {
        let schema = schema(&["conf_math"]);
        let mut attrs = RawAttributes::new();
        attrs.insert("conf_juggling", 9_i64);

        assert_eq!(vectorize(&attrs, &schema).as_slice(), &[0.0]);
    }

    #[test]
    fn test_bool_and_float_are_cast() {
        let schema = schema(&["intent_remote", "ws_hours"]);
        let mut attrs = RawAttributes::new();
        attrs.insert("intent_remote", true);
        attrs.insert("ws_hours", 37.5);

        assert_eq!(vectorize(&attrs, &schema).as_slice(), &[1.0, 37.5]);
    }

    #[test]
    fn test_categorical_feature_name_is_not_written_by_raw_key() {
        // The raw key alone is never a feature for string answers.
        let schema = schema(&["ws_environment"]);
        let mut attrs = RawAttributes::new();
        attrs.insert("ws_environment", "Solo");

        assert_eq!(vectorize(&attrs, &schema).as_slice(), &[0.0]);
    }
}
