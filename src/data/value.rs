use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// A raw datum record. Only the values reached by the axis accessors matter to the engine.
pub type Datum = serde_json::Map<String, serde_json::Value>;

/// Classified result of applying an accessor to a datum.
#[derive(Clone, Debug, PartialEq)]
pub enum AxisValue {
    /// A plain number.
    Number(f64),
    /// A categorical label.
    Text(String),
    /// A date-like value, as milliseconds since the Unix epoch (UTC).
    Date(f64),
    /// Anything else: null, booleans, objects, arrays, or a missing field.
    Other,
}

impl AxisValue {
    /// Classify a JSON value. Strings that parse as ISO-8601 dates classify as [`AxisValue::Date`].
    pub fn classify(v: &serde_json::Value) -> Self {
        match v {
            serde_json::Value::Number(n) => n.as_f64().map_or(Self::Other, Self::Number),
            serde_json::Value::String(s) => match parse_date_millis(s) {
                Some(ms) => Self::Date(ms),
                None => Self::Text(s.clone()),
            },
            _ => Self::Other,
        }
    }

    /// Classify a JSON value, reading strings as labels unless `parse_dates` is set.
    pub fn read(v: &serde_json::Value, parse_dates: bool) -> Self {
        match v {
            serde_json::Value::String(s) if !parse_dates => Self::Text(s.clone()),
            _ => Self::classify(v),
        }
    }

    /// Whether this value is date-like.
    pub fn is_date(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    /// The categorical label, when this value is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric reading of the value; dates read as epoch milliseconds.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) | Self::Date(n) => Some(*n),
            _ => None,
        }
    }
}

/// Parse an ISO-8601 date or datetime string to epoch milliseconds (UTC when no offset is given).
pub fn parse_date_millis(s: &str) -> Option<f64> {
    let s = s.trim();
    // Cheap shape check before trying formats: "YYYY-MM-DD..."
    let b = s.as_bytes();
    if b.len() < 10 || b[4] != b'-' || b[7] != b'-' {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis() as f64);
    }
    for fmt in &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc().timestamp_millis() as f64);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis() as f64)
}

#[cfg(test)]
#[path = "../../tests/unit/data/value.rs"]
mod tests;
