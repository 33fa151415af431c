//! Drug records, the shelf that stores them, and batch construction.

pub mod batch;
pub mod drug;
pub mod shelf;
