//! Aria Catalog
//!
//! Loads the generated track index and derives filtered views from it.
//!
//! The catalog is loaded once per process and is read-only afterwards. Views
//! are recomputed on demand from the full track list; they are never patched
//! incrementally.

#![forbid(unsafe_code)]

mod catalog;
pub mod view;

pub use catalog::Catalog;
pub use view::{build_view, SortOrder};
