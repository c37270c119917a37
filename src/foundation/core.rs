use std::fmt;

/// One of the two coordinate dimensions of a chart.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

impl Axis {
    /// Both axes in canonical order.
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];

    /// Lowercase axis name, also the default accessor path for the axis.
    pub fn as_str(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
        }
    }

    /// Field name carrying the original label of a string-valued coordinate.
    pub fn name_field(self) -> &'static str {
        match self {
            Axis::X => "xName",
            Axis::Y => "yName",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value per axis.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AxisMap<T> {
    /// Value for the x axis.
    pub x: T,
    /// Value for the y axis.
    pub y: T,
}

impl<T> AxisMap<T> {
    /// Build a map by evaluating `f` once per axis, x first.
    pub fn from_fn(mut f: impl FnMut(Axis) -> T) -> Self {
        let x = f(Axis::X);
        let y = f(Axis::Y);
        Self { x, y }
    }

    /// Borrow the value for `axis`.
    pub fn get(&self, axis: Axis) -> &T {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }
}
