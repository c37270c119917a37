use std::{fmt, sync::Arc};

use serde::Deserialize as _;

use crate::{
    config::model::ChartConfig,
    data::value::{AxisValue, Datum},
    foundation::core::Axis,
    scale::{kind::ScaleType, resolver::get_scale_type_from_data},
};

/// User-supplied accessor function.
pub type AccessorFn = Arc<dyn Fn(&Datum) -> serde_json::Value + Send + Sync>;

/// How an axis value is extracted from a datum.
///
/// In JSON configuration a string is a property path and any other value is a constant.
#[derive(Clone)]
pub enum AccessorSpec {
    /// Property path such as `"x"`, `"stats.mean"` or `"points[0].y"`.
    Path(String),
    /// The same value for every datum.
    Constant(serde_json::Value),
    /// Arbitrary extraction function.
    Function(AccessorFn),
}

impl AccessorSpec {
    /// Wrap a closure as an accessor spec.
    pub fn function(f: impl Fn(&Datum) -> serde_json::Value + Send + Sync + 'static) -> Self {
        Self::Function(Arc::new(f))
    }
}

impl fmt::Debug for AccessorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => f.debug_tuple("Path").field(p).finish(),
            Self::Constant(v) => f.debug_tuple("Constant").field(v).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl From<&str> for AccessorSpec {
    fn from(path: &str) -> Self {
        Self::Path(path.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for AccessorSpec {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Ok(match serde_json::Value::deserialize(d)? {
            serde_json::Value::String(s) => Self::Path(s),
            other => Self::Constant(other),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum PathSegment {
    Key(String),
    Index(usize),
}

#[derive(Clone)]
enum AccessorKind {
    Path {
        raw: String,
        segments: Vec<PathSegment>,
    },
    Constant(serde_json::Value),
    Function(AccessorFn),
}

/// Compiled accessor, reusable across all data points of one axis.
#[derive(Clone)]
pub struct Accessor {
    kind: AccessorKind,
    parse_dates: bool,
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            AccessorKind::Path { raw, .. } => write!(f, "Accessor(path {raw:?})"),
            AccessorKind::Constant(v) => write!(f, "Accessor(constant {v})"),
            AccessorKind::Function(_) => f.write_str("Accessor(fn)"),
        }?;
        if !self.parse_dates {
            f.write_str(" [labels]")?;
        }
        Ok(())
    }
}

impl Accessor {
    /// Whether date-like strings are read as dates (the default) or as labels.
    pub fn parse_dates(mut self, on: bool) -> Self {
        self.parse_dates = on;
        self
    }

    /// Extract and classify the axis value of `datum`.
    pub fn value(&self, datum: &Datum) -> AxisValue {
        let read = |v: &serde_json::Value| AxisValue::read(v, self.parse_dates);
        match &self.kind {
            AccessorKind::Path { raw, segments } => {
                // A literal key wins over path interpretation ("a.b" as a single field name).
                if let Some(v) = datum.get(raw) {
                    return read(v);
                }
                lookup(datum, segments).map_or(AxisValue::Other, read)
            }
            AccessorKind::Constant(v) => read(v),
            AccessorKind::Function(f) => read(&f(datum)),
        }
    }
}

/// Build the accessor for `axis`. An absent spec reads the field named after the axis.
pub fn create_accessor(spec: Option<&AccessorSpec>, axis: Axis) -> Accessor {
    let kind = match spec {
        None => path_kind(axis.as_str()),
        Some(AccessorSpec::Path(p)) => path_kind(p),
        Some(AccessorSpec::Constant(v)) => AccessorKind::Constant(v.clone()),
        Some(AccessorSpec::Function(f)) => AccessorKind::Function(Arc::clone(f)),
    };
    Accessor {
        kind,
        parse_dates: true,
    }
}

/// Accessor used when coding and normalizing `axis` of `config`.
///
/// Strings are read as dates only when the whole axis infers as `time`; on any other axis a
/// date-like string is a category label like the rest.
pub(crate) fn axis_accessor(config: &ChartConfig, axis: Axis) -> Accessor {
    let dates = get_scale_type_from_data(config, axis) == ScaleType::Time;
    create_accessor(config.accessor_spec(axis), axis).parse_dates(dates)
}

fn path_kind(raw: &str) -> AccessorKind {
    AccessorKind::Path {
        raw: raw.to_string(),
        segments: parse_path(raw),
    }
}

fn parse_path(raw: &str) -> Vec<PathSegment> {
    let mut out = Vec::new();
    let mut key = String::new();
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '.' => {
                if !key.is_empty() {
                    out.push(PathSegment::Key(std::mem::take(&mut key)));
                }
            }
            '[' => {
                if !key.is_empty() {
                    out.push(PathSegment::Key(std::mem::take(&mut key)));
                }
                let mut inner = String::new();
                for c in chars.by_ref() {
                    if c == ']' {
                        break;
                    }
                    inner.push(c);
                }
                let inner = inner.trim().trim_matches(|c| c == '"' || c == '\'');
                match inner.parse::<usize>() {
                    Ok(i) => out.push(PathSegment::Index(i)),
                    Err(_) => out.push(PathSegment::Key(inner.to_string())),
                }
            }
            c => key.push(c),
        }
    }
    if !key.is_empty() {
        out.push(PathSegment::Key(key));
    }
    out
}

fn lookup<'a>(datum: &'a Datum, segments: &[PathSegment]) -> Option<&'a serde_json::Value> {
    let (first, rest) = segments.split_first()?;
    let mut cur = match first {
        PathSegment::Key(k) => datum.get(k)?,
        PathSegment::Index(i) => datum.get(&i.to_string())?,
    };
    for seg in rest {
        cur = match (seg, cur) {
            (PathSegment::Key(k), serde_json::Value::Object(m)) => m.get(k)?,
            (PathSegment::Index(i), serde_json::Value::Array(a)) => a.get(*i)?,
            (PathSegment::Index(i), serde_json::Value::Object(m)) => m.get(&i.to_string())?,
            (PathSegment::Key(k), serde_json::Value::Array(a)) => a.get(k.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(cur)
}

#[cfg(test)]
#[path = "../../tests/unit/data/accessor.rs"]
mod tests;
