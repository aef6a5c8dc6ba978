//! Presentation table for the closed [`NodeVariant`] set.
//!
//! Rendering itself lives in the host UI; this module fixes the facts every
//! renderer needs so that adding a variant without a presentation fails to
//! compile instead of falling through an open string registry.

use crate::model::NodeVariant;

/// Which node-data list a variant's card renders as its bullet list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListField {
    Items,
    Lines,
}

impl NodeVariant {
    pub const ALL: [NodeVariant; 6] = [
        NodeVariant::Entity,
        NodeVariant::Process,
        NodeVariant::Storage,
        NodeVariant::Transfer,
        NodeVariant::Security,
        NodeVariant::Data,
    ];

    /// Accent color used for card borders and the minimap.
    pub fn accent_color(self) -> &'static str {
        match self {
            NodeVariant::Entity => "#6366f1",
            NodeVariant::Process => "#10b981",
            NodeVariant::Storage => "#3b82f6",
            NodeVariant::Transfer => "#f97316",
            NodeVariant::Security => "#ef4444",
            NodeVariant::Data => "#a855f7",
        }
    }

    /// Variant name shown in the add-node picker.
    pub fn display_name(self) -> &'static str {
        match self {
            NodeVariant::Entity => "Entity",
            NodeVariant::Process => "Process",
            NodeVariant::Storage => "Storage",
            NodeVariant::Transfer => "Transfer",
            NodeVariant::Security => "Security",
            NodeVariant::Data => "Data categories",
        }
    }

    pub fn list_field(self) -> ListField {
        match self {
            NodeVariant::Data => ListField::Items,
            NodeVariant::Entity
            | NodeVariant::Process
            | NodeVariant::Storage
            | NodeVariant::Transfer
            | NodeVariant::Security => ListField::Lines,
        }
    }
}
