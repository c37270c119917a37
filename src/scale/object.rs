use std::{fmt, sync::Arc};

use serde::Deserialize as _;

use crate::scale::kind::ScaleName;

/// A method a scale object may expose. Scale families are told apart by which of these they have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    /// Produces an independent copy of the scale.
    Copy,
    /// Input extent accessor.
    Domain,
    /// Output extent accessor.
    Range,
    /// Logarithm base accessor (log scales).
    Base,
    /// Fallback output accessor (ordinal scales).
    Unknown,
    /// Exponent accessor (power and sqrt scales).
    Exponent,
    /// Quantile thresholds accessor (quantile scales).
    Quantiles,
    /// Output-to-input extent inversion (quantize and threshold scales).
    InvertExtent,
    /// Output-to-input inversion (continuous scales).
    Invert,
    /// Tick generation.
    Ticks,
    /// Domain rounding.
    Nice,
    /// Output clamping.
    Clamp,
}

impl Capability {
    const ALL: [Capability; 12] = [
        Capability::Copy,
        Capability::Domain,
        Capability::Range,
        Capability::Base,
        Capability::Unknown,
        Capability::Exponent,
        Capability::Quantiles,
        Capability::InvertExtent,
        Capability::Invert,
        Capability::Ticks,
        Capability::Nice,
        Capability::Clamp,
    ];

    fn bit(self) -> u16 {
        1 << (self as u16)
    }

    /// Method name as exposed by scale objects (`"invertExtent"`, `"base"`, ...).
    pub fn method_name(self) -> &'static str {
        match self {
            Capability::Copy => "copy",
            Capability::Domain => "domain",
            Capability::Range => "range",
            Capability::Base => "base",
            Capability::Unknown => "unknown",
            Capability::Exponent => "exponent",
            Capability::Quantiles => "quantiles",
            Capability::InvertExtent => "invertExtent",
            Capability::Invert => "invert",
            Capability::Ticks => "ticks",
            Capability::Nice => "nice",
            Capability::Clamp => "clamp",
        }
    }

    /// Look a capability up by method name. Unknown names yield `None`.
    pub fn from_method_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.method_name() == name)
    }
}

/// Set of [`Capability`] values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Capabilities(u16);

impl Capabilities {
    /// The capabilities every valid scale object must expose.
    pub const REQUIRED: [Capability; 3] = [Capability::Copy, Capability::Domain, Capability::Range];

    /// No capabilities.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Return a copy of the set with `cap` added.
    pub fn with(self, cap: Capability) -> Self {
        Self(self.0 | cap.bit())
    }

    /// Whether `cap` is in the set.
    pub fn contains(self, cap: Capability) -> bool {
        self.0 & cap.bit() != 0
    }

    /// Whether the set exposes `copy`, `domain` and `range`.
    pub fn is_scale_like(self) -> bool {
        Self::REQUIRED.into_iter().all(|c| self.contains(c))
    }

    /// Members in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Capability> {
        Capability::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl FromIterator<Capability> for Capabilities {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

/// An opaque scale object handed to the renderer.
///
/// The engine never maps values through a scale; it only inspects capabilities and domains.
pub trait ScaleObject: fmt::Debug + Send + Sync {
    /// Methods this object exposes.
    fn capabilities(&self) -> Capabilities;
    /// Current input extent.
    fn domain(&self) -> Vec<f64>;
    /// Current output extent.
    fn range(&self) -> Vec<f64>;
    /// Independent copy of this scale.
    fn copy(&self) -> Scale;
}

/// Shared handle to a scale object.
pub type Scale = Arc<dyn ScaleObject>;

/// Freshly constructed scale of a named family with its conventional defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct DefaultScale {
    name: ScaleName,
    domain: Vec<f64>,
    range: Vec<f64>,
}

impl DefaultScale {
    /// Default instance of the `name` family.
    pub fn new(name: ScaleName) -> Self {
        Self {
            name,
            domain: name.natural_domain().to_vec(),
            range: vec![0.0, 1.0],
        }
    }

    /// Default instance as a shared [`Scale`] handle.
    pub fn shared(name: ScaleName) -> Scale {
        Arc::new(Self::new(name))
    }
}

impl ScaleObject for DefaultScale {
    fn capabilities(&self) -> Capabilities {
        let base: Capabilities = [
            Capability::Copy,
            Capability::Domain,
            Capability::Range,
            Capability::Invert,
            Capability::Ticks,
            Capability::Nice,
            Capability::Clamp,
        ]
        .into_iter()
        .collect();
        match self.name {
            ScaleName::Linear | ScaleName::Time => base,
            ScaleName::Log => base.with(Capability::Base),
            ScaleName::Sqrt => base.with(Capability::Exponent),
        }
    }

    fn domain(&self) -> Vec<f64> {
        self.domain.clone()
    }

    fn range(&self) -> Vec<f64> {
        self.range.clone()
    }

    fn copy(&self) -> Scale {
        Arc::new(self.clone())
    }
}

#[derive(serde::Deserialize)]
struct DescribedScaleDef {
    #[serde(default)]
    capabilities: Vec<String>,
    #[serde(default)]
    domain: Vec<f64>,
    #[serde(default)]
    range: Vec<f64>,
}

/// A scale object described by data: the methods it exposes plus its extents.
///
/// This is how JSON configuration supplies third-party scale objects. Unrecognized method names
/// are ignored.
#[derive(Clone, Debug, PartialEq)]
pub struct DescribedScale {
    capabilities: Capabilities,
    domain: Vec<f64>,
    range: Vec<f64>,
}

impl DescribedScale {
    /// Describe a scale by its capabilities and extents.
    pub fn new(
        capabilities: impl IntoIterator<Item = Capability>,
        domain: Vec<f64>,
        range: Vec<f64>,
    ) -> Self {
        Self {
            capabilities: capabilities.into_iter().collect(),
            domain,
            range,
        }
    }
}

impl<'de> serde::Deserialize<'de> for DescribedScale {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let def = DescribedScaleDef::deserialize(d)?;
        Ok(Self {
            capabilities: def
                .capabilities
                .iter()
                .filter_map(|m| Capability::from_method_name(m))
                .collect(),
            domain: def.domain,
            range: def.range,
        })
    }
}

impl ScaleObject for DescribedScale {
    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn domain(&self) -> Vec<f64> {
        self.domain.clone()
    }

    fn range(&self) -> Vec<f64> {
        self.range.clone()
    }

    fn copy(&self) -> Scale {
        Arc::new(self.clone())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scale/object.rs"]
mod tests;
