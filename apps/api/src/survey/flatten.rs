use crate::survey::{
    AttrValue, RawAttributes, Survey, CONFIDENCE_PREFIX, INTENT_PREFIX, INTEREST_PREFIX,
    WORK_STYLE_PREFIX,
};

/// Flattens the four survey sections into one prefixed attribute map.
///
/// Interests become 0/1 integers, confidences stay integers, work-style and
/// intent answers keep their native type. Unknown keys are carried through;
/// the backends decide what is relevant.
pub fn flatten(survey: &Survey) -> RawAttributes {
    let mut attrs = RawAttributes::new();

    for (name, flagged) in &survey.interests {
        attrs.insert(format!("{INTEREST_PREFIX}{name}"), AttrValue::Int(i64::from(*flagged)));
    }
    for (name, level) in &survey.confidence {
        attrs.insert(format!("{CONFIDENCE_PREFIX}{name}"), AttrValue::Int(*level));
    }
    for (name, value) in &survey.work_style {
        attrs.insert(format!("{WORK_STYLE_PREFIX}{name}"), value.clone());
    }
    for (name, value) in &survey.intent {
        attrs.insert(format!("{INTENT_PREFIX}{name}"), value.clone());
    }

    attrs
}
