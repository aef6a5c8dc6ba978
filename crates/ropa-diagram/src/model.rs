//! Graph entities and the persisted diagram shape.
//!
//! These are intentionally lightweight and `Clone`-friendly; the serialized
//! form is the contract every collaborator (persistence, report tooling)
//! reads back, so wire names stay camelCase and unknown keys from older
//! payloads are ignored on read.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Closed set of node presentations. Every variant has a card; see
/// [`crate::variants`] for the exhaustive presentation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeVariant {
    Entity,
    Process,
    Storage,
    Transfer,
    Security,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeData {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(rename = "type")]
    pub variant: NodeVariant,
    pub position: Position,
    pub data: NodeData,
    #[serde(default, skip_serializing_if = "is_false")]
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub selected: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// The persisted unit: `{ "nodes": [...], "edges": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Diagram {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl Diagram {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|node| node.id == id)
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut GraphNode> {
        self.nodes.iter_mut().find(|node| node.id == id)
    }

    pub fn edge_mut(&mut self, id: &str) -> Option<&mut GraphEdge> {
        self.edges.iter_mut().find(|edge| edge.id == id)
    }

    /// Accepts a persisted payload only if it carries both a `nodes` array and
    /// an `edges` array; anything else (including an undecodable body) is
    /// treated as "no saved diagram".
    pub fn from_persisted(value: &serde_json::Value) -> Option<Self> {
        let map = value.as_object()?;
        if !map.get("nodes")?.is_array() || !map.get("edges")?.is_array() {
            return None;
        }
        match serde_json::from_value(value.clone()) {
            Ok(diagram) => Some(diagram),
            Err(err) => {
                tracing::warn!(%err, "ignoring undecodable saved diagram");
                None
            }
        }
    }

    /// Drops every edge whose source or target no longer exists. Returns the
    /// count of edges dropped; each drop is logged for diagnostics.
    pub fn prune_dangling_edges(&mut self) -> usize {
        let Self { nodes, edges } = self;
        let ids: FxHashSet<&str> = nodes.iter().map(|node| node.id.as_str()).collect();
        let before = edges.len();
        edges.retain(|edge| {
            let keep = ids.contains(edge.source.as_str()) && ids.contains(edge.target.as_str());
            if !keep {
                tracing::debug!(
                    edge = %edge.id,
                    source = %edge.source,
                    target = %edge.target,
                    "dropping edge with missing endpoint"
                );
            }
            keep
        });
        before - edges.len()
    }
}
