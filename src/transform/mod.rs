//! Derived views computed from raw label fields.

pub mod drug;
