use crate::{
    config::model::ChartConfig,
    data::value::Datum,
    foundation::core::Axis,
    scale::{kind::ScaleName, resolver::get_base_scale},
};

/// Synthesize placeholder points along the identity diagonal of the x domain.
///
/// The domain is the explicit x domain when configured, else the base x scale's domain. Point `i`
/// of `samples` is `min + (max / samples) * i`; when the last point misses `max` exactly, a
/// terminal point at `max` is appended, so the upper bound appears exactly once.
#[tracing::instrument(level = "debug", skip(config))]
pub fn generate_data(config: &ChartConfig) -> Vec<Datum> {
    let domain = config
        .domain
        .as_ref()
        .and_then(|d| d.for_axis(Axis::X))
        .filter(|d| !d.is_empty())
        .map(<[f64]>::to_vec)
        .unwrap_or_else(|| get_base_scale(config, Axis::X).domain());

    let (mut min, mut max) = domain
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() || !max.is_finite() {
        tracing::debug!(?domain, "unusable domain, using linear default");
        [min, max] = ScaleName::Linear.natural_domain();
    }

    let samples = config.sample_count();
    let step = max / samples as f64;
    let mut values: Vec<f64> = (0..samples).map(|i| step * i as f64 + min).collect();
    if values.last() != Some(&max) {
        values.push(max);
    }

    values.into_iter().map(diagonal_point).collect()
}

fn diagonal_point(v: f64) -> Datum {
    let mut d = Datum::new();
    d.insert("x".to_string(), serde_json::Value::from(v));
    d.insert("y".to_string(), serde_json::Value::from(v));
    d
}

#[cfg(test)]
#[path = "../../tests/unit/data/generate.rs"]
mod tests;
