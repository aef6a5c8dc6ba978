#![forbid(unsafe_code)]

//! Flow-diagram engine (headless).
//!
//! Derives a node-and-edge diagram from a [`ropa_core::FlowRecord`] and owns
//! the editable-graph state for one open editing session. The generator is a
//! pure function; the session reconciles generator output, a previously
//! persisted layout, and incremental user edits without losing or duplicating
//! information.
//!
//! Design goals:
//! - deterministic generation (same record, same matrix order, same diagram)
//! - referential integrity after every mutation (no dangling edges)
//! - forgiving edits: stale references are dropped and logged, never fatal

pub mod generate;
pub mod model;
pub mod session;
pub mod variants;

pub use generate::generate;
pub use model::{Diagram, GraphEdge, GraphNode, NodeData, NodeVariant, Position};
pub use session::{EdgeChange, EditSession, LayoutMode, NodeChange, NodeDataPatch};
pub use variants::ListField;

#[cfg(test)]
mod tests;
