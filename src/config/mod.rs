//! Typed chart configuration.
//!
//! Each option is an explicit optional field; shared-vs-per-axis options are enums rather than
//! loosely shaped objects.

pub(crate) mod model;
