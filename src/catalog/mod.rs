//! Catalog reconstruction - joining buffered rows into the document tree
//!
//! The scan phase leaves behind flat per-table row buffers; this module
//! rebuilds the nested shape the source site stored relationally: courses
//! embedding their scheduled lessons, orders embedding their line items,
//! and a derived instructor list.

pub mod builder;
pub mod index;

pub use builder::{rebuild, Catalog};
pub use index::EntityIndex;
