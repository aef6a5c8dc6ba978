//! The edit session: owns the live diagram for one open flow editor.
//!
//! The session decides between freshly generated layout, a previously
//! persisted manual layout, and incremental user edits behind an explicit
//! two-state machine. Invalid mutations (a stale node id from an event batch
//! that also removed the node, an edge to nowhere) are skipped and logged
//! rather than failing the session: the diagram is a visualization aid, the
//! record stays the source of truth.

use ropa_core::record::FlowRecord;
use uuid::Uuid;

use crate::generate::generate;
use crate::model::{Diagram, GraphEdge, GraphNode, NodeData, NodeVariant, Position};

/// Label given to nodes the user adds by hand.
const NEW_NODE_LABEL: &str = "New Node";

/// Layout ownership.
///
/// `Auto`: the diagram mirrors the record and may be regenerated from it.
/// `Manual`: the user owns the layout; only an explicit [`EditSession::regenerate`]
/// returns to `Auto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    Auto,
    Manual,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeChange {
    Position { id: String, position: Position },
    Select { id: String, selected: bool },
    Remove { id: String },
    Add(GraphNode),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EdgeChange {
    Select { id: String, selected: bool },
    Remove { id: String },
    Add(GraphEdge),
}

/// Partial update for a node's data; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeDataPatch {
    pub label: Option<String>,
    pub sub_label: Option<String>,
    pub items: Option<Vec<String>>,
    pub lines: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct EditSession {
    diagram: Diagram,
    mode: LayoutMode,
}

impl EditSession {
    /// Opens a session: adopt the persisted diagram verbatim when one exists
    /// (manual mode), otherwise generate from the record (auto mode).
    pub fn load(persisted: Option<Diagram>, record: &FlowRecord) -> Self {
        match persisted {
            Some(diagram) => Self {
                diagram,
                mode: LayoutMode::Manual,
            },
            None => Self {
                diagram: generate(record),
                mode: LayoutMode::Auto,
            },
        }
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    /// Applies a batch of node mutations. Edges whose endpoint was removed in
    /// the batch are pruned afterwards so referential integrity holds.
    pub fn apply_node_changes(&mut self, changes: Vec<NodeChange>) -> &Diagram {
        for change in changes {
            match change {
                NodeChange::Position { id, position } => match self.diagram.node_mut(&id) {
                    Some(node) => node.position = position,
                    None => tracing::debug!(node = %id, "position change for missing node"),
                },
                NodeChange::Select { id, selected } => match self.diagram.node_mut(&id) {
                    Some(node) => node.selected = selected,
                    None => tracing::debug!(node = %id, "selection change for missing node"),
                },
                NodeChange::Remove { id } => {
                    let before = self.diagram.nodes.len();
                    self.diagram.nodes.retain(|node| node.id != id);
                    if self.diagram.nodes.len() == before {
                        tracing::debug!(node = %id, "remove change for missing node");
                    }
                }
                NodeChange::Add(node) => {
                    if self.diagram.has_node(&node.id) {
                        tracing::warn!(node = %node.id, "ignoring added node with duplicate id");
                    } else {
                        self.diagram.nodes.push(node);
                    }
                }
            }
        }
        self.diagram.prune_dangling_edges();
        self.touch()
    }

    /// Applies a batch of edge mutations. An added edge whose endpoints are
    /// not both present is rejected (and logged).
    pub fn apply_edge_changes(&mut self, changes: Vec<EdgeChange>) -> &Diagram {
        for change in changes {
            match change {
                EdgeChange::Select { id, selected } => match self.diagram.edge_mut(&id) {
                    Some(edge) => edge.selected = selected,
                    None => tracing::debug!(edge = %id, "selection change for missing edge"),
                },
                EdgeChange::Remove { id } => {
                    let before = self.diagram.edges.len();
                    self.diagram.edges.retain(|edge| edge.id != id);
                    if self.diagram.edges.len() == before {
                        tracing::debug!(edge = %id, "remove change for missing edge");
                    }
                }
                EdgeChange::Add(edge) => {
                    if !self.diagram.has_node(&edge.source) || !self.diagram.has_node(&edge.target)
                    {
                        tracing::warn!(
                            edge = %edge.id,
                            source = %edge.source,
                            target = %edge.target,
                            "rejecting edge with missing endpoint"
                        );
                    } else if self.diagram.edges.iter().any(|e| e.id == edge.id) {
                        tracing::warn!(edge = %edge.id, "ignoring added edge with duplicate id");
                    } else {
                        self.diagram.edges.push(edge);
                    }
                }
            }
        }
        self.touch()
    }

    /// Appends one user-drawn connection with a fresh id. A connection to a
    /// missing endpoint is a logged no-op. Parallel edges between the same
    /// ordered pair are allowed; each gets its own id.
    pub fn connect(&mut self, source: &str, target: &str) -> &Diagram {
        if !self.diagram.has_node(source) || !self.diagram.has_node(target) {
            tracing::warn!(source, target, "ignoring connection with missing endpoint");
        } else {
            self.diagram.edges.push(GraphEdge {
                id: format!("edge-{}", Uuid::new_v4()),
                source: source.to_string(),
                target: target.to_string(),
                label: None,
                selected: false,
            });
        }
        self.touch()
    }

    /// Appends a new node with a fresh id and the default label.
    pub fn add_node(&mut self, variant: NodeVariant, position: Position) -> &Diagram {
        self.diagram.nodes.push(GraphNode {
            id: format!("node-{}", Uuid::new_v4()),
            variant,
            position,
            data: NodeData {
                label: NEW_NODE_LABEL.to_string(),
                ..Default::default()
            },
            selected: false,
        });
        self.touch()
    }

    /// Merges a patch into a node's data; a patch for a missing node is a
    /// logged no-op.
    pub fn update_node_data(&mut self, id: &str, patch: NodeDataPatch) -> &Diagram {
        match self.diagram.node_mut(id) {
            Some(node) => {
                if let Some(label) = patch.label {
                    node.data.label = label;
                }
                if let Some(sub_label) = patch.sub_label {
                    node.data.sub_label = Some(sub_label);
                }
                if let Some(items) = patch.items {
                    node.data.items = Some(items);
                }
                if let Some(lines) = patch.lines {
                    node.data.lines = Some(lines);
                }
            }
            None => tracing::debug!(node = %id, "data patch for missing node"),
        }
        self.touch()
    }

    /// Discards the live diagram and rebuilds it from the record. The only
    /// operation that replaces the node id namespace wholesale, and the only
    /// way back to auto mode.
    pub fn regenerate(&mut self, record: &FlowRecord) -> &Diagram {
        self.diagram = generate(record);
        self.mode = LayoutMode::Auto;
        &self.diagram
    }

    /// Snapshot for persistence: the exact structure a future
    /// [`EditSession::load`] accepts back.
    pub fn export_snapshot(&self) -> Diagram {
        self.diagram.clone()
    }

    fn touch(&mut self) -> &Diagram {
        self.mode = LayoutMode::Manual;
        &self.diagram
    }
}
