//! Data normalization.
//!
//! Builds category code tables, turns raw records into numeric coordinates, removes rows the
//! resolved scales cannot represent, and synthesizes placeholder data when none is supplied.

pub(crate) mod accessor;
pub(crate) mod generate;
pub(crate) mod normalize;
pub(crate) mod string_map;
pub(crate) mod value;
