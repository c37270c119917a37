//! Scale selection per axis.
//!
//! Every function here is total: malformed scale configuration is reported as
//! [`ScaleType::Invalid`] or falls through to inference from the data, never as an error.

use std::sync::Arc;

use crate::{
    config::model::{ChartConfig, ScaleValue},
    data::accessor::create_accessor,
    foundation::core::Axis,
    scale::kind::{ScaleName, ScaleType, classify_capabilities},
    scale::object::{DefaultScale, Scale},
};

/// Whether a scale is configured for `axis`, either shared or as a per-axis entry.
pub fn is_scale_defined(config: &ChartConfig, axis: Axis) -> bool {
    configured_scale(config, axis).is_some()
}

/// Whether a configured scale can be trusted.
///
/// Objects must expose `copy`, `domain` and `range`; names must be in the supported set.
/// Unrecognized values never are.
pub fn valid_scale(scale: &ScaleValue) -> bool {
    match scale {
        ScaleValue::Object(s) => s.capabilities().is_scale_like(),
        ScaleValue::Name(n) => ScaleName::parse(n).is_some(),
        ScaleValue::Unrecognized(_) => false,
    }
}

/// The configured scale for `axis` as a scale object.
///
/// Objects are returned as-is; names produce a fresh default instance. Undefined or invalid
/// configuration yields `None` so callers fall through to inference.
pub fn get_scale_from_props(config: &ChartConfig, axis: Axis) -> Option<Scale> {
    let value = configured_scale(config, axis)?;
    if !valid_scale(value) {
        tracing::debug!(%axis, ?value, "ignoring invalid scale configuration");
        return None;
    }
    match value {
        ScaleValue::Object(s) => Some(Arc::clone(s)),
        ScaleValue::Name(n) => ScaleName::parse(n).map(DefaultScale::shared),
        ScaleValue::Unrecognized(_) => None,
    }
}

/// `Time` when every value reached by the axis accessor is date-like, `Linear` otherwise.
///
/// Series are flattened. Absent or empty data is `Linear`.
pub fn get_scale_type_from_data(config: &ChartConfig, axis: Axis) -> ScaleType {
    let Some(data) = config.data.as_ref() else {
        return ScaleType::Linear;
    };
    let accessor = create_accessor(config.accessor_spec(axis), axis);
    let mut rows = data.rows().peekable();
    if rows.peek().is_none() {
        return ScaleType::Linear;
    }
    if rows.all(|d| accessor.value(d).is_date()) {
        ScaleType::Time
    } else {
        ScaleType::Linear
    }
}

/// The configured scale if valid, else a default scale of the data-inferred family.
pub fn get_base_scale(config: &ChartConfig, axis: Axis) -> Scale {
    if let Some(scale) = get_scale_from_props(config, axis) {
        return scale;
    }
    let name = match get_scale_type_from_data(config, axis) {
        ScaleType::Time => ScaleName::Time,
        _ => ScaleName::Linear,
    };
    DefaultScale::shared(name)
}

/// Classify the scale governing `axis`.
///
/// 1. nothing configured: infer from data;
/// 2. a name: its type when supported, else `Invalid`;
/// 3. an object missing `copy`/`domain`/`range`: `Invalid`;
/// 4. a valid object: first match in [`crate::SCALE_CLASSES`];
/// 5. a valid object matching no class: infer from data.
#[tracing::instrument(level = "trace", skip(config))]
pub fn get_scale_type(config: &ChartConfig, axis: Axis) -> ScaleType {
    let Some(value) = configured_scale(config, axis) else {
        return get_scale_type_from_data(config, axis);
    };
    match value {
        ScaleValue::Name(n) => match ScaleName::parse(n) {
            Some(name) => name.scale_type(),
            None => {
                tracing::debug!(%axis, name = %n, "unsupported scale name");
                ScaleType::Invalid
            }
        },
        ScaleValue::Object(s) => {
            let caps = s.capabilities();
            if !caps.is_scale_like() {
                tracing::debug!(%axis, ?caps, "scale object lacks copy/domain/range");
                return ScaleType::Invalid;
            }
            classify_capabilities(caps).unwrap_or_else(|| get_scale_type_from_data(config, axis))
        }
        ScaleValue::Unrecognized(v) => {
            tracing::debug!(%axis, value = %v, "scale is neither a name nor a scale object");
            ScaleType::Invalid
        }
    }
}

fn configured_scale(config: &ChartConfig, axis: Axis) -> Option<&ScaleValue> {
    config.scale.as_ref()?.for_axis(axis)
}

#[cfg(test)]
#[path = "../../tests/unit/scale/resolver.rs"]
mod tests;
