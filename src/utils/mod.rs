//! Query construction and JSON field-shape helpers.

pub mod query;
pub mod serde;
