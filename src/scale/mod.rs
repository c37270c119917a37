//! Scale selection and classification.

pub(crate) mod kind;
pub(crate) mod object;
pub(crate) mod resolver;
