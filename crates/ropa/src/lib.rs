#![forbid(unsafe_code)]

//! `ropa` is the headless core of a record-of-processing (GDPR/ROPA) flow
//! mapping tool: a typed flow-record model, a deterministic diagram
//! generator, and an edit session that reconciles generated layout with
//! user-owned edits.
//!
//! The crate performs no I/O itself. Persistence and rasterization are
//! collaborator seams:
//! - [`store`]: the record source / diagram sink the hosting application
//!   implements, plus session open/save helpers with the degrade-gracefully
//!   fallback path
//! - [`export`]: the core-side obligations toward an image-export
//!   collaborator (empty-diagram guard, bounds, safe filenames)

pub use ropa_core::*;
pub use ropa_diagram::*;

pub mod export;
pub mod store;
