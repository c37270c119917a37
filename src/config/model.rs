use std::{borrow::Cow, fs::File, io::BufReader, path::Path, sync::Arc};

use serde::Deserialize as _;

use crate::{
    data::{accessor::AccessorSpec, value::Datum},
    foundation::core::{Axis, AxisMap},
    foundation::error::{ChartwiseError, ChartwiseResult},
    scale::object::{DescribedScale, Scale},
};

/// Chart configuration consumed by the normalizer and the scale resolver.
///
/// Every option is optional; absence selects the documented fallback. A configuration can be
/// built in code or deserialized from JSON (`tickValues` is accepted in camelCase).
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    /// Raw data, either one dataset or a list of series.
    pub data: Option<DataInput>,
    /// Accessor for the x coordinate (defaults to the `"x"` field).
    pub x: Option<AccessorSpec>,
    /// Accessor for the y coordinate (defaults to the `"y"` field).
    pub y: Option<AccessorSpec>,
    /// Explicit domain used when synthesizing placeholder data.
    pub domain: Option<DomainSpec>,
    /// Number of placeholder samples (default 1).
    pub samples: Option<usize>,
    /// Category labels, shared or per axis.
    pub categories: Option<AxisValues>,
    /// Explicit tick values, shared or per axis.
    pub tick_values: Option<AxisValues>,
    /// Scale selection, shared or per axis.
    pub scale: Option<ScaleSpec>,
    /// Child series configurations for multi-series charts.
    #[serde(default)]
    pub children: Vec<ChartConfig>,
}

impl ChartConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ChartwiseResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ChartwiseError::validation(format!("parse chart config JSON: {e}")))
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json_str(s: &str) -> ChartwiseResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| ChartwiseError::validation(format!("parse chart config JSON: {e}")))
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ChartwiseResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ChartwiseError::validation(format!("open chart config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Configuration holding a single dataset.
    pub fn with_data(data: Vec<Datum>) -> Self {
        Self {
            data: Some(DataInput::Single(data)),
            ..Self::default()
        }
    }

    /// Accessor spec configured for `axis`, if any.
    pub fn accessor_spec(&self, axis: Axis) -> Option<&AccessorSpec> {
        match axis {
            Axis::X => self.x.as_ref(),
            Axis::Y => self.y.as_ref(),
        }
    }

    /// Number of placeholder samples; zero and absence both mean one.
    pub fn sample_count(&self) -> usize {
        self.samples.filter(|&n| n > 0).unwrap_or(1)
    }
}

/// Raw chart data.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(untagged)]
pub enum DataInput {
    /// One dataset.
    Single(Vec<Datum>),
    /// Several series normalized one at a time under the same accessors.
    Series(Vec<Vec<Datum>>),
}

impl DataInput {
    /// Every row, series flattened in order.
    pub fn rows(&self) -> Box<dyn Iterator<Item = &Datum> + '_> {
        match self {
            Self::Single(rows) => Box::new(rows.iter()),
            Self::Series(series) => Box::new(series.iter().flatten()),
        }
    }

    /// The data as a list of series; a single dataset is one series.
    pub fn series(&self) -> Vec<&[Datum]> {
        match self {
            Self::Single(rows) => vec![rows.as_slice()],
            Self::Series(series) => series.iter().map(Vec::as_slice).collect(),
        }
    }

    /// Every row as one contiguous dataset; borrows when there is a single dataset.
    pub fn flattened(&self) -> Cow<'_, [Datum]> {
        match self {
            Self::Single(rows) => Cow::Borrowed(rows),
            Self::Series(_) => Cow::Owned(self.rows().cloned().collect()),
        }
    }

    /// Whether there are no rows at all.
    pub fn is_empty(&self) -> bool {
        self.rows().next().is_none()
    }
}

/// A list of values applying to both axes, or one list per axis.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(untagged)]
pub enum AxisValues {
    /// Same list for x and y.
    Shared(Vec<serde_json::Value>),
    /// Separate lists; a missing axis has none.
    PerAxis(AxisMap<Option<Vec<serde_json::Value>>>),
}

impl AxisValues {
    /// Values applying to `axis`.
    pub fn for_axis(&self, axis: Axis) -> Option<&[serde_json::Value]> {
        match self {
            Self::Shared(v) => Some(v),
            Self::PerAxis(m) => m.get(axis).as_deref(),
        }
    }
}

/// Explicit domain bounds, shared or per axis.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(untagged)]
pub enum DomainSpec {
    /// Same bounds for x and y.
    Shared(Vec<f64>),
    /// Separate bounds per axis.
    PerAxis(AxisMap<Option<Vec<f64>>>),
}

impl DomainSpec {
    /// Bounds applying to `axis`.
    pub fn for_axis(&self, axis: Axis) -> Option<&[f64]> {
        match self {
            Self::Shared(v) => Some(v),
            Self::PerAxis(m) => m.get(axis).as_deref(),
        }
    }
}

/// A configured scale: a family name or an opaque scale object.
#[derive(Clone, Debug)]
pub enum ScaleValue {
    /// Scale family name, kept verbatim so unsupported names can be reported.
    Name(String),
    /// Caller-supplied scale object.
    Object(Scale),
    /// A configured value that is neither a name nor a readable scale object. Always invalid.
    Unrecognized(serde_json::Value),
}

impl ScaleValue {
    /// Name a scale family.
    pub fn name(s: impl Into<String>) -> Self {
        Self::Name(s.into())
    }

    /// Wrap a scale object.
    pub fn object(scale: impl crate::scale::object::ScaleObject + 'static) -> Self {
        Self::Object(Arc::new(scale))
    }

    fn from_json(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::String(s) => Self::Name(s),
            serde_json::Value::Object(_) => match DescribedScale::deserialize(&v) {
                Ok(s) => Self::Object(Arc::new(s)),
                Err(e) => {
                    tracing::debug!(error = %e, "unreadable scale object");
                    Self::Unrecognized(v)
                }
            },
            other => Self::Unrecognized(other),
        }
    }
}

/// Scale selection for a chart.
#[derive(Clone, Debug)]
pub enum ScaleSpec {
    /// One scale for both axes.
    Shared(ScaleValue),
    /// One entry per axis; a missing axis has no configured scale.
    PerAxis(AxisMap<Option<ScaleValue>>),
}

impl ScaleSpec {
    /// Scale applying to `axis`, if configured.
    pub fn for_axis(&self, axis: Axis) -> Option<&ScaleValue> {
        match self {
            Self::Shared(v) => Some(v),
            Self::PerAxis(m) => m.get(axis).as_ref(),
        }
    }
}

impl<'de> serde::Deserialize<'de> for ScaleSpec {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        // An object whose keys are all axis names is a per-axis mapping; any other object
        // describes a scale. Malformed entries load as `Unrecognized` and classify as invalid.
        Ok(match serde_json::Value::deserialize(d)? {
            serde_json::Value::Object(mut m)
                if !m.is_empty() && m.keys().all(|k| k == "x" || k == "y") =>
            {
                let mut take = |key: &str| match m.remove(key) {
                    None | Some(serde_json::Value::Null) => None,
                    Some(v) => Some(ScaleValue::from_json(v)),
                };
                let x = take("x");
                let y = take("y");
                Self::PerAxis(AxisMap { x, y })
            }
            other => Self::Shared(ScaleValue::from_json(other)),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
