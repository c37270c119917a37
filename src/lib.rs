//! chartwise turns loosely shaped chart input into uniform numeric coordinates and picks the
//! scale that governs each axis.
//!
//! # Pipeline overview
//!
//! 1. **Resolve scales**: for each axis, classify the configured scale (a name or an opaque scale
//!    object identified by its capabilities), or infer `linear`/`time` from the data.
//! 2. **Code categories**: assign stable 1-based codes to category labels drawn from tick values,
//!    category lists and the data itself.
//! 3. **Normalize**: read each datum through the axis accessors, substitute codes for labels, and
//!    drop rows a `log` axis cannot represent.
//!
//! Without data, a placeholder dataset spanning the configured or inferred x domain is generated.
//!
//! Nothing here fails on bad configuration: unknown scales classify as
//! [`ScaleType::Invalid`] and normalization falls back to data inference. Only configuration
//! loading returns errors.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod data;
mod foundation;
mod scale;

pub use config::model::{AxisValues, ChartConfig, DataInput, DomainSpec, ScaleSpec, ScaleValue};
pub use data::accessor::{Accessor, AccessorFn, AccessorSpec, create_accessor};
pub use data::generate::generate_data;
pub use data::normalize::{NormalizedDatum, clean_data, format_data, get_data, get_series_data};
pub use data::string_map::{
    StringMap, create_string_map, create_string_maps, create_string_maps_for, get_categories,
    get_strings_from_axes, get_strings_from_categories, get_strings_from_data,
};
pub use data::value::{AxisValue, Datum, parse_date_millis};
pub use foundation::core::{Axis, AxisMap};
pub use foundation::error::{ChartwiseError, ChartwiseResult};
pub use scale::kind::{SCALE_CLASSES, ScaleName, ScaleType, classify_capabilities};
pub use scale::object::{
    Capabilities, Capability, DefaultScale, DescribedScale, Scale, ScaleObject,
};
pub use scale::resolver::{
    get_base_scale, get_scale_from_props, get_scale_type, get_scale_type_from_data,
    is_scale_defined, valid_scale,
};
