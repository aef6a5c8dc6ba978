//! Deterministic diagram generation from a flow record.
//!
//! Column-based layered layout: each non-empty record section claims one
//! column, headed by a category node with its item nodes stacked underneath
//! and a "Contains" edge to each. Sections are independent; an empty section
//! contributes nothing and does not advance the column cursor.
//!
//! The function is pure: identical record input (including matrix
//! key-enumeration order) yields an identical diagram. This is what makes the
//! auto layout a safe fallback whenever no manually edited diagram is saved.

use indexmap::IndexMap;
use ropa_core::record::{FlowRecord, MatrixRow};
use ropa_core::sanitize::sanitize_label;

use crate::model::{Diagram, GraphEdge, GraphNode, NodeData, NodeVariant, Position};
use crate::variants::ListField;

pub const ORIGIN_X: f64 = 50.0;
pub const ORIGIN_Y: f64 = 50.0;
pub const COLUMN_WIDTH: f64 = 250.0;
pub const ROW_HEIGHT: f64 = 120.0;

/// Fallback bullet for an entry whose attributes are all empty; presence in
/// the matrix is enough to stay visible.
const EMPTY_ENTRY_BULLET: &str = "Selected item";

const CONTAINS_LABEL: &str = "Contains";

pub const SECTION_INTERNAL_FLOW: &str = "Flux intern / Internal flow";
pub const SECTION_EXTERNAL_SEE: &str = "Transferuri SEE / EEA transfers";
pub const SECTION_THIRD_COUNTRIES: &str = "Țări terțe / Third countries";
pub const SECTION_SPECIAL_CATEGORIES: &str = "Categorii speciale / Special categories";
pub const SECTION_DATA_CATEGORIES: &str = "Categorii date / Data categories";
pub const SECTION_STORAGE: &str = "Stocare date / Data storage";
pub const SECTION_SECURITY: &str = "Măsuri de securitate / Security measures";

/// Derives the auto-layout diagram for a flow record.
pub fn generate(record: &FlowRecord) -> Diagram {
    let mut builder = Builder::new();
    builder.section(
        SECTION_INTERNAL_FLOW,
        NodeVariant::Entity,
        &record.general_data.internal_flow,
    );
    builder.section(
        SECTION_EXTERNAL_SEE,
        NodeVariant::Transfer,
        &record.people_data.external_see,
    );
    builder.section(
        SECTION_THIRD_COUNTRIES,
        NodeVariant::Transfer,
        &record.legal_data.third_countries,
    );
    builder.section(
        SECTION_SPECIAL_CATEGORIES,
        NodeVariant::Process,
        &record.processing_data.special_categories,
    );
    builder.section(
        SECTION_DATA_CATEGORIES,
        NodeVariant::Data,
        &record.category_matrix,
    );
    builder.section(
        SECTION_STORAGE,
        NodeVariant::Storage,
        &record.storage_data.matrix,
    );
    builder.section(
        SECTION_SECURITY,
        NodeVariant::Security,
        &record.security_data.matrix,
    );
    builder.finish()
}

/// Accumulates nodes/edges with ids scoped to one generation call.
struct Builder {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    next_node: usize,
    next_edge: usize,
    x: f64,
}

impl Builder {
    fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            next_node: 0,
            next_edge: 0,
            x: ORIGIN_X,
        }
    }

    fn push_node(&mut self, variant: NodeVariant, position: Position, data: NodeData) -> String {
        let id = format!("node-{}", self.next_node);
        self.next_node += 1;
        self.nodes.push(GraphNode {
            id: id.clone(),
            variant,
            position,
            data,
            selected: false,
        });
        id
    }

    fn push_edge(&mut self, source: &str, target: &str, label: &str) {
        let id = format!("edge-{}", self.next_edge);
        self.next_edge += 1;
        self.edges.push(GraphEdge {
            id,
            source: source.to_string(),
            target: target.to_string(),
            label: Some(label.to_string()),
            selected: false,
        });
    }

    fn section<R: MatrixRow>(
        &mut self,
        title: &str,
        variant: NodeVariant,
        rows: &IndexMap<String, R>,
    ) {
        if rows.is_empty() {
            return;
        }

        let count = rows.len();
        let sub_label = if count == 1 {
            "1 entry".to_string()
        } else {
            format!("{count} entries")
        };
        let category = self.push_node(
            variant,
            Position {
                x: self.x,
                y: ORIGIN_Y,
            },
            NodeData {
                label: title.to_string(),
                sub_label: Some(sub_label),
                ..Default::default()
            },
        );

        for (index, row) in rows.values().enumerate() {
            let label = match row.label() {
                Some(raw) if !raw.trim().is_empty() => sanitize_label(raw),
                _ => format!("Item {}", index + 1),
            };

            let mut bullets: Vec<String> = row
                .fields()
                .iter()
                .filter(|(_, value)| !value.trim().is_empty())
                .map(|(name, value)| format!("{name}: {}", sanitize_label(value)))
                .collect();
            if bullets.is_empty() {
                bullets.push(EMPTY_ENTRY_BULLET.to_string());
            }

            let mut data = NodeData {
                label,
                ..Default::default()
            };
            match variant.list_field() {
                ListField::Items => data.items = Some(bullets),
                ListField::Lines => data.lines = Some(bullets),
            }

            let item = self.push_node(
                variant,
                Position {
                    x: self.x,
                    y: ORIGIN_Y + ROW_HEIGHT * (index as f64 + 1.0),
                },
                data,
            );
            self.push_edge(&category, &item, CONTAINS_LABEL);
        }

        self.x += COLUMN_WIDTH;
    }

    fn finish(self) -> Diagram {
        Diagram {
            nodes: self.nodes,
            edges: self.edges,
        }
    }
}
