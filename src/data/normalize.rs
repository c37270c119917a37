use std::borrow::Cow;

use crate::{
    config::model::ChartConfig,
    data::{
        accessor::{Accessor, axis_accessor},
        generate::generate_data,
        string_map::{StringMap, create_string_maps, create_string_maps_for},
        value::{AxisValue, Datum},
    },
    foundation::core::{Axis, AxisMap},
    scale::{kind::ScaleType, resolver::get_scale_type},
};

/// A datum with numeric coordinates.
///
/// Serializes as one flat object: the original fields, then `x`/`y`, then `xName`/`yName` for
/// axes whose source value was a category label.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct NormalizedDatum {
    /// Original fields, minus those shadowed by the computed ones.
    #[serde(flatten)]
    pub fields: Datum,
    /// Numeric x: the label's code for categories, epoch milliseconds for dates on a time axis.
    /// NaN when the value cannot be read as a number.
    pub x: f64,
    /// Numeric y, as for `x`.
    pub y: f64,
    /// Original x label, present only when x was a category.
    #[serde(rename = "xName", skip_serializing_if = "Option::is_none")]
    pub x_name: Option<String>,
    /// Original y label, present only when y was a category.
    #[serde(rename = "yName", skip_serializing_if = "Option::is_none")]
    pub y_name: Option<String>,
}

impl NormalizedDatum {
    /// Numeric coordinate on `axis`.
    pub fn coordinate(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Original label on `axis`, when it was a category.
    pub fn label(&self, axis: Axis) -> Option<&str> {
        match axis {
            Axis::X => self.x_name.as_deref(),
            Axis::Y => self.y_name.as_deref(),
        }
    }

    /// Flat JSON object form.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Normalized data for a single-dataset chart.
///
/// Supplied data is formatted (series flattened); without data a placeholder dataset is
/// generated first.
#[tracing::instrument(level = "debug", skip(config))]
pub fn get_data(config: &ChartConfig) -> Vec<NormalizedDatum> {
    match config.data.as_ref() {
        Some(data) => format_data(&data.flattened(), config, None),
        None => format_data(&generate_data(config), config, None),
    }
}

/// Normalized data for a multi-series chart, one output per series.
///
/// One string map per axis is shared by all series. Series in `data` are formatted under this
/// configuration; child configurations are formatted under their own.
#[tracing::instrument(level = "debug", skip(config))]
pub fn get_series_data(config: &ChartConfig) -> Vec<Vec<NormalizedDatum>> {
    if let Some(data) = config.data.as_ref() {
        let maps = create_string_maps(config, true);
        return data
            .series()
            .into_iter()
            .map(|series| format_data(series, config, Some(&maps)))
            .collect();
    }
    if config.children.is_empty() {
        return vec![get_data(config)];
    }

    let maps = create_string_maps(config, false);
    config
        .children
        .iter()
        .map(|child| match child.data.as_ref() {
            Some(data) => format_data(&data.flattened(), child, Some(&maps)),
            None => format_data(&generate_data(child), child, Some(&maps)),
        })
        .collect()
}

/// Convert a dataset into numeric coordinates.
///
/// `string_map` is built from `config` and `dataset` when not supplied. Rows the resolved scales
/// cannot represent are removed first (see [`clean_data`]).
#[tracing::instrument(level = "debug", skip_all, fields(rows = dataset.len()))]
pub fn format_data(
    dataset: &[Datum],
    config: &ChartConfig,
    string_map: Option<&AxisMap<Option<StringMap>>>,
) -> Vec<NormalizedDatum> {
    let built;
    let maps = match string_map {
        Some(m) => m,
        None => {
            built = create_string_maps_for(config, dataset);
            &built
        }
    };
    let accessors = axis_accessors(config);

    clean_data(dataset, config)
        .iter()
        .map(|datum| normalize_datum(datum, &accessors, maps))
        .collect()
}

/// Remove rows incompatible with the resolved scales.
///
/// Only exact zeros on a `log` axis are removed. When neither axis is `log` the dataset is
/// borrowed back unchanged.
pub fn clean_data<'a>(dataset: &'a [Datum], config: &ChartConfig) -> Cow<'a, [Datum]> {
    let types = AxisMap::from_fn(|axis| get_scale_type(config, axis));
    if types.x != ScaleType::Log && types.y != ScaleType::Log {
        return Cow::Borrowed(dataset);
    }

    let accessors = axis_accessors(config);
    let keep = |datum: &Datum| {
        Axis::ALL.into_iter().all(|axis| {
            *types.get(axis) != ScaleType::Log
                || !matches!(accessors.get(axis).value(datum), AxisValue::Number(n) if n == 0.0)
        })
    };
    let cleaned: Vec<Datum> = dataset.iter().filter(|d| keep(d)).cloned().collect();
    if cleaned.len() != dataset.len() {
        tracing::debug!(
            dropped = dataset.len() - cleaned.len(),
            "removed zero values under log scale"
        );
    }
    Cow::Owned(cleaned)
}

fn axis_accessors(config: &ChartConfig) -> AxisMap<Accessor> {
    AxisMap::from_fn(|axis| axis_accessor(config, axis))
}

fn normalize_datum(
    datum: &Datum,
    accessors: &AxisMap<Accessor>,
    maps: &AxisMap<Option<StringMap>>,
) -> NormalizedDatum {
    let coord = |axis: Axis| -> (f64, Option<String>) {
        match accessors.get(axis).value(datum) {
            AxisValue::Number(n) | AxisValue::Date(n) => (n, None),
            AxisValue::Text(label) => {
                let code = maps.get(axis).as_ref().and_then(|m| m.code(&label));
                if code.is_none() {
                    tracing::debug!(%axis, %label, "category label has no code");
                }
                (code.map_or(f64::NAN, f64::from), Some(label))
            }
            AxisValue::Other => (f64::NAN, None),
        }
    };
    let (x, x_name) = coord(Axis::X);
    let (y, y_name) = coord(Axis::Y);

    let mut fields = datum.clone();
    fields.remove("x");
    fields.remove("y");
    for (axis, name) in [(Axis::X, &x_name), (Axis::Y, &y_name)] {
        if name.is_some() {
            fields.remove(axis.name_field());
        }
    }

    NormalizedDatum {
        fields,
        x,
        y,
        x_name,
        y_name,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/normalize.rs"]
mod tests;
