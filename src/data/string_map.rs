use std::collections::{HashMap, HashSet};

use crate::{
    config::model::ChartConfig,
    data::{
        accessor::axis_accessor,
        value::{AxisValue, Datum},
    },
    foundation::core::{Axis, AxisMap},
    scale::{kind::ScaleType, resolver::get_scale_type_from_data},
};

/// Per-axis table assigning 1-based integer codes to category labels in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StringMap {
    labels: Vec<String>,
    codes: HashMap<String, u32>,
}

impl StringMap {
    /// Build a map from labels in order, keeping the first occurrence of each.
    ///
    /// Returns `None` when there are no labels, so "no categorical data" stays distinct from an
    /// empty table.
    pub fn from_labels<I, S>(labels: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut map = Self::default();
        for label in labels {
            let label = label.into();
            if map.codes.contains_key(&label) {
                continue;
            }
            map.labels.push(label.clone());
            map.codes.insert(label, map.labels.len() as u32);
        }
        (!map.labels.is_empty()).then_some(map)
    }

    /// Code assigned to `label`.
    pub fn code(&self, label: &str) -> Option<u32> {
        self.codes.get(label).copied()
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false for maps built by [`StringMap::from_labels`].
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// `(label, code)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, l)| (l.as_str(), i as u32 + 1))
    }
}

impl serde::Serialize for StringMap {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_map(self.iter())
    }
}

/// Category strings among the tick values configured for `axis`.
pub fn get_strings_from_axes(config: &ChartConfig, axis: Axis) -> Vec<String> {
    config
        .tick_values
        .as_ref()
        .and_then(|t| t.for_axis(axis))
        .map(|values| text_values(config, axis, values))
        .unwrap_or_default()
}

/// Category list configured for `axis`: a direct list applies to both axes.
pub fn get_categories(config: &ChartConfig, axis: Axis) -> Option<&[serde_json::Value]> {
    config.categories.as_ref()?.for_axis(axis)
}

/// Category strings for `axis`, from this configuration or, failing that, from each child.
pub fn get_strings_from_categories(config: &ChartConfig, axis: Axis) -> Vec<String> {
    if config.categories.is_some() {
        return get_categories(config, axis)
            .map(|values| text_values(config, axis, values))
            .unwrap_or_default();
    }
    config
        .children
        .iter()
        .filter_map(|child| get_categories(child, axis).map(|values| (child, values)))
        .flat_map(|(child, values)| text_values(child, axis, values))
        .collect()
}

/// Distinct category strings observed in the data for `axis`.
///
/// Reads this configuration's data when present (series flattened), otherwise each child's data
/// under the child's own accessor.
pub fn get_strings_from_data(config: &ChartConfig, axis: Axis) -> Vec<String> {
    match config.data.as_ref() {
        Some(data) => strings_in(config, axis, data.rows()),
        None => config
            .children
            .iter()
            .filter_map(|child| {
                child
                    .data
                    .as_ref()
                    .map(|data| strings_in(child, axis, data.rows()))
            })
            .flatten()
            .collect(),
    }
}

/// Build the string map for `axis` from tick values, categories and data, in that order.
///
/// With `multi_dataset`, each series of this configuration's data is scanned under this
/// configuration's accessor.
pub fn create_string_map(
    config: &ChartConfig,
    axis: Axis,
    multi_dataset: bool,
) -> Option<StringMap> {
    let from_axes = get_strings_from_axes(config, axis);
    let from_categories = get_strings_from_categories(config, axis);
    let from_data = match config.data.as_ref() {
        Some(data) if multi_dataset => data
            .series()
            .into_iter()
            .flat_map(|series| strings_in(config, axis, series.iter()))
            .collect(),
        _ => get_strings_from_data(config, axis),
    };

    StringMap::from_labels(from_axes.into_iter().chain(from_categories).chain(from_data))
}

/// String maps for both axes.
pub fn create_string_maps(config: &ChartConfig, multi_dataset: bool) -> AxisMap<Option<StringMap>> {
    AxisMap::from_fn(|axis| create_string_map(config, axis, multi_dataset))
}

/// String maps for formatting `dataset` under `config`.
///
/// The configuration's sources come first; labels only `dataset` contains are appended after
/// them, so formatting rows that are not part of `config.data` still yields codes.
pub fn create_string_maps_for(config: &ChartConfig, dataset: &[Datum]) -> AxisMap<Option<StringMap>> {
    AxisMap::from_fn(|axis| {
        let configured = create_string_map(config, axis, false);
        let labels = configured
            .into_iter()
            .flat_map(|m| m.labels)
            .chain(strings_in(config, axis, dataset.iter()));
        StringMap::from_labels(labels)
    })
}

fn text_values(config: &ChartConfig, axis: Axis, values: &[serde_json::Value]) -> Vec<String> {
    let dates = get_scale_type_from_data(config, axis) == ScaleType::Time;
    values
        .iter()
        .filter_map(|v| match AxisValue::read(v, dates) {
            AxisValue::Text(s) => Some(s),
            _ => None,
        })
        .collect()
}

fn strings_in<'a>(
    config: &ChartConfig,
    axis: Axis,
    rows: impl Iterator<Item = &'a Datum>,
) -> Vec<String> {
    let accessor = axis_accessor(config, axis);
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for d in rows {
        if let AxisValue::Text(s) = accessor.value(d)
            && seen.insert(s.clone())
        {
            out.push(s);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/data/string_map.rs"]
mod tests;
