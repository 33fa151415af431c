//! Text rendering of derived views.

pub mod json;
