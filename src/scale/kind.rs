use std::fmt;

use crate::scale::object::{Capabilities, Capability};

/// Scale families that can be requested by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleName {
    /// Continuous linear scale.
    Linear,
    /// Continuous time scale over epoch milliseconds.
    Time,
    /// Logarithmic scale.
    Log,
    /// Square-root power scale.
    Sqrt,
}

impl ScaleName {
    /// The supported name set, in lookup order.
    pub const ALL: [ScaleName; 4] = [
        ScaleName::Linear,
        ScaleName::Time,
        ScaleName::Log,
        ScaleName::Sqrt,
    ];

    /// Configuration spelling of the name.
    pub fn as_str(self) -> &'static str {
        match self {
            ScaleName::Linear => "linear",
            ScaleName::Time => "time",
            ScaleName::Log => "log",
            ScaleName::Sqrt => "sqrt",
        }
    }

    /// Exact lookup; anything outside the supported set is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.as_str() == s)
    }

    /// Domain of a freshly constructed scale of this family.
    pub fn natural_domain(self) -> [f64; 2] {
        match self {
            ScaleName::Linear | ScaleName::Sqrt => [0.0, 1.0],
            ScaleName::Log => [1.0, 10.0],
            // 2000-01-01T00:00:00Z .. 2000-01-02T00:00:00Z
            ScaleName::Time => [946_684_800_000.0, 946_771_200_000.0],
        }
    }

    /// Scale type tag of this family.
    pub fn scale_type(self) -> ScaleType {
        match self {
            ScaleName::Linear => ScaleType::Linear,
            ScaleName::Time => ScaleType::Time,
            ScaleName::Log => ScaleType::Log,
            ScaleName::Sqrt => ScaleType::PowSqrt,
        }
    }
}

impl fmt::Display for ScaleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inferred classification of the scale governing an axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScaleType {
    /// Continuous linear.
    Linear,
    /// Continuous time.
    Time,
    /// Logarithmic.
    Log,
    /// Ordinal (categorical).
    Ordinal,
    /// Power or square root.
    PowSqrt,
    /// Quantile.
    Quantile,
    /// Quantize or threshold.
    QuantizeThreshold,
    /// Configured scale could not be trusted.
    Invalid,
}

impl ScaleType {
    /// Tag spelling (`"pow-sqrt"`, `"quantize-threshold"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            ScaleType::Linear => "linear",
            ScaleType::Time => "time",
            ScaleType::Log => "log",
            ScaleType::Ordinal => "ordinal",
            ScaleType::PowSqrt => "pow-sqrt",
            ScaleType::Quantile => "quantile",
            ScaleType::QuantizeThreshold => "quantize-threshold",
            ScaleType::Invalid => "invalid",
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discriminating capability per scale family, in priority order.
///
/// Some objects expose more than one of these; the first matching row wins, so the order is part
/// of the contract.
pub const SCALE_CLASSES: [(ScaleType, Capability); 5] = [
    (ScaleType::Log, Capability::Base),
    (ScaleType::Ordinal, Capability::Unknown),
    (ScaleType::PowSqrt, Capability::Exponent),
    (ScaleType::Quantile, Capability::Quantiles),
    (ScaleType::QuantizeThreshold, Capability::InvertExtent),
];

/// Classify a capability set against [`SCALE_CLASSES`].
pub fn classify_capabilities(caps: Capabilities) -> Option<ScaleType> {
    SCALE_CLASSES
        .iter()
        .find(|(_, cap)| caps.contains(*cap))
        .map(|(ty, _)| *ty)
}

#[cfg(test)]
#[path = "../../tests/unit/scale/kind.rs"]
mod tests;
