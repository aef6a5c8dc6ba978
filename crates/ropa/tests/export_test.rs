use ropa::export::{
    EXPORT_MARGIN, ExportError, ExportFormat, ExportRequest, NODE_HEIGHT, NODE_WIDTH, Rasterizer,
    diagram_bounds, export_file_name, export_image, export_request,
};
use ropa::record::FlowRecord;
use ropa::{Diagram, generate};
use serde_json::json;

fn two_node_diagram() -> Diagram {
    let record: FlowRecord = serde_json::from_value(json!({
        "generalData": {
            "internalFlow": {
                "r1": { "departmentName": "Human Resources" }
            }
        }
    }))
    .expect("valid record payload");
    generate(&record)
}

struct RecordingRasterizer {
    calls: usize,
    requests: Vec<ExportRequest>,
    fail: bool,
}

impl RecordingRasterizer {
    fn new(fail: bool) -> Self {
        Self {
            calls: 0,
            requests: Vec::new(),
            fail,
        }
    }
}

impl Rasterizer for RecordingRasterizer {
    type Error = String;

    fn rasterize(
        &mut self,
        _diagram: &Diagram,
        request: &ExportRequest,
    ) -> Result<Vec<u8>, Self::Error> {
        self.calls += 1;
        self.requests.push(request.clone());
        if self.fail {
            Err("canvas capture failed".to_string())
        } else {
            Ok(vec![0x89, b'P', b'N', b'G'])
        }
    }
}

#[test]
fn empty_diagram_is_rejected_before_the_rasterizer_runs() {
    let empty = generate(&FlowRecord::default());
    assert!(empty.is_empty());

    let mut rasterizer = RecordingRasterizer::new(false);
    let err = export_image(&empty, "flow-1", ExportFormat::Png, &mut rasterizer).unwrap_err();

    assert_eq!(err, ExportError::EmptyDiagram);
    assert_eq!(rasterizer.calls, 0);
}

#[test]
fn export_hands_the_collaborator_a_sized_named_request() {
    let diagram = two_node_diagram();
    let mut rasterizer = RecordingRasterizer::new(false);

    let bytes =
        export_image(&diagram, "flow 1/v2", ExportFormat::Png, &mut rasterizer).expect("exports");
    assert_eq!(bytes, vec![0x89, b'P', b'N', b'G']);
    assert_eq!(rasterizer.calls, 1);

    let request = &rasterizer.requests[0];
    assert_eq!(request.file_name, "flowchart_flow_1_v2.png");
    assert_eq!(request.format, ExportFormat::Png);
    assert!(request.bounds.width > 0.0);
    assert!(request.bounds.height > 0.0);
}

#[test]
fn rasterizer_failure_is_surfaced_as_a_recoverable_error() {
    let diagram = two_node_diagram();
    let mut rasterizer = RecordingRasterizer::new(true);

    let err = export_image(&diagram, "flow-1", ExportFormat::Png, &mut rasterizer).unwrap_err();
    assert_eq!(
        err,
        ExportError::Rasterize("canvas capture failed".to_string())
    );
}

#[test]
fn file_names_contain_no_unsafe_characters() {
    let name = export_file_name("../etc/<evil>", ExportFormat::Png);
    assert_eq!(name, "flowchart____etc__evil_.png");

    let stem = name.strip_suffix(".png").unwrap();
    assert!(stem.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_'));

    assert_eq!(export_file_name("", ExportFormat::Png), "flowchart_diagram.png");
    assert_eq!(export_file_name("audit-2026", ExportFormat::Pdf), "flowchart_audit_2026.pdf");
}

#[test]
fn bounds_cover_all_node_positions_plus_margin() {
    // Category node at (50, 50), item node at (50, 170).
    let diagram = two_node_diagram();
    let bounds = diagram_bounds(&diagram).expect("non-empty");

    assert_eq!(bounds.x, 50.0 - EXPORT_MARGIN / 2.0);
    assert_eq!(bounds.y, 50.0 - EXPORT_MARGIN / 2.0);
    assert_eq!(bounds.width, NODE_WIDTH + EXPORT_MARGIN);
    assert_eq!(bounds.height, 120.0 + NODE_HEIGHT + EXPORT_MARGIN);
}

#[test]
fn export_request_builds_without_a_rasterizer() {
    let diagram = two_node_diagram();
    let request = export_request(&diagram, "flow-1", ExportFormat::Pdf).expect("non-empty");
    assert_eq!(request.file_name, "flowchart_flow_1.pdf");

    let empty = Diagram::default();
    assert_eq!(
        export_request(&empty, "flow-1", ExportFormat::Pdf).unwrap_err(),
        ExportError::EmptyDiagram
    );
}
