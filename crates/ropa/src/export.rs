//! Core-side contract for the image-export collaborator.
//!
//! Rasterization itself (DOM capture, PNG/PDF encoding) lives outside this
//! crate. The core's obligations are to refuse an empty diagram before the
//! collaborator is ever invoked, to size the output from the current node
//! positions, and to derive a filename that is safe to hand to a download
//! path.

use std::str::FromStr;

use ropa_diagram::Diagram;

/// Nominal card extent used for bounds; node cards are measured by the host
/// DOM, so the core sizes conservatively from positions alone.
pub const NODE_WIDTH: f64 = 260.0;
pub const NODE_HEIGHT: f64 = 120.0;

/// Extra margin around the content, split evenly on each side.
pub const EXPORT_MARGIN: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Png,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Pdf => "pdf",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "pdf" => Ok(Self::Pdf),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Everything the collaborator needs to size and name its output.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub bounds: Bounds,
    pub file_name: String,
    pub format: ExportFormat,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExportError {
    /// Guard condition, not a crash: there is nothing to rasterize.
    #[error("nothing to export: the diagram has no nodes")]
    EmptyDiagram,

    #[error("rasterizer failed: {0}")]
    Rasterize(String),
}

/// The collaborator seam. Implementations capture the rendered diagram
/// region and encode it per the request's format.
pub trait Rasterizer {
    type Error: std::fmt::Display;

    fn rasterize(
        &mut self,
        diagram: &Diagram,
        request: &ExportRequest,
    ) -> std::result::Result<Vec<u8>, Self::Error>;
}

/// Conservative download filename: `flowchart_<id>.<ext>` with every
/// non-alphanumeric character of the flow id replaced by `_`. An empty id
/// falls back to `diagram`.
pub fn export_file_name(flow_id: &str, format: ExportFormat) -> String {
    let safe: String = flow_id
        .trim()
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
        .collect();
    let stem = if safe.is_empty() { "diagram" } else { safe.as_str() };
    format!("flowchart_{stem}.{}", format.extension())
}

/// Bounding box of the current node positions plus the export margin.
/// `None` for an empty node set.
pub fn diagram_bounds(diagram: &Diagram) -> Option<Bounds> {
    let mut nodes = diagram.nodes.iter();
    let first = nodes.next()?;
    let (mut min_x, mut min_y) = (first.position.x, first.position.y);
    let (mut max_x, mut max_y) = (first.position.x, first.position.y);
    for node in nodes {
        min_x = min_x.min(node.position.x);
        min_y = min_y.min(node.position.y);
        max_x = max_x.max(node.position.x);
        max_y = max_y.max(node.position.y);
    }
    Some(Bounds {
        x: min_x - EXPORT_MARGIN / 2.0,
        y: min_y - EXPORT_MARGIN / 2.0,
        width: max_x - min_x + NODE_WIDTH + EXPORT_MARGIN,
        height: max_y - min_y + NODE_HEIGHT + EXPORT_MARGIN,
    })
}

/// Builds the request the collaborator will be handed, or rejects an empty
/// diagram before any collaborator work happens.
pub fn export_request(
    diagram: &Diagram,
    flow_id: &str,
    format: ExportFormat,
) -> std::result::Result<ExportRequest, ExportError> {
    let bounds = diagram_bounds(diagram).ok_or(ExportError::EmptyDiagram)?;
    Ok(ExportRequest {
        bounds,
        file_name: export_file_name(flow_id, format),
        format,
    })
}

/// Guards, then drives the collaborator once. The encoded image bytes come
/// back unchanged; a collaborator failure is surfaced as a recoverable error.
pub fn export_image<R: Rasterizer>(
    diagram: &Diagram,
    flow_id: &str,
    format: ExportFormat,
    rasterizer: &mut R,
) -> std::result::Result<Vec<u8>, ExportError> {
    let request = export_request(diagram, flow_id, format)?;
    rasterizer
        .rasterize(diagram, &request)
        .map_err(|err| ExportError::Rasterize(err.to_string()))
}
