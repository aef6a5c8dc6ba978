use std::cell::RefCell;

use futures::executor::block_on;
use ropa::record::FlowRecord;
use ropa::store::{FlowStore, Result, StoreError, open_session, save_session};
use ropa::{Diagram, LayoutMode, NodeVariant, Position, generate};
use serde_json::json;

fn sample_record() -> FlowRecord {
    serde_json::from_value(json!({
        "generalData": {
            "internalFlow": {
                "r1": {
                    "__label": "HR",
                    "departmentName": "Human Resources",
                    "accessMode": "Read/Write"
                }
            }
        },
        "securityData": {
            "matrix": {
                "physical": { "enumerare": "locked cabinets" }
            }
        }
    }))
    .expect("valid record payload")
}

#[derive(Default)]
struct FakeStore {
    record: Option<FlowRecord>,
    saved: RefCell<Option<Diagram>>,
    record_error: Option<fn() -> StoreError>,
    diagram_error: Option<fn() -> StoreError>,
    save_error: Option<fn() -> StoreError>,
}

impl FlowStore for FakeStore {
    async fn fetch_record(&self, _flow_id: &str) -> Result<FlowRecord> {
        if let Some(make) = self.record_error {
            return Err(make());
        }
        self.record.clone().ok_or(StoreError::NotFound)
    }

    async fn fetch_saved_diagram(&self, _flow_id: &str) -> Result<Option<Diagram>> {
        if let Some(make) = self.diagram_error {
            return Err(make());
        }
        Ok(self.saved.borrow().clone())
    }

    async fn save_diagram(&self, _flow_id: &str, diagram: &Diagram) -> Result<()> {
        if let Some(make) = self.save_error {
            return Err(make());
        }
        *self.saved.borrow_mut() = Some(diagram.clone());
        Ok(())
    }
}

#[test]
fn open_session_generates_when_nothing_is_saved() {
    let store = FakeStore {
        record: Some(sample_record()),
        ..Default::default()
    };

    let session = block_on(open_session(&store, "flow-1"));
    assert_eq!(session.mode(), LayoutMode::Auto);
    assert_eq!(*session.diagram(), generate(&sample_record()));
}

#[test]
fn open_session_adopts_a_saved_diagram() {
    let saved = generate(&sample_record());
    let store = FakeStore {
        record: Some(sample_record()),
        saved: RefCell::new(Some(saved.clone())),
        ..Default::default()
    };

    let session = block_on(open_session(&store, "flow-1"));
    assert_eq!(session.mode(), LayoutMode::Manual);
    assert_eq!(*session.diagram(), saved);
}

#[test]
fn open_session_survives_a_failing_store() {
    let store = FakeStore {
        record_error: Some(|| StoreError::NotFound),
        diagram_error: Some(|| StoreError::Transport("connection reset".to_string())),
        ..Default::default()
    };

    let session = block_on(open_session(&store, "flow-1"));
    assert_eq!(session.mode(), LayoutMode::Auto);
    assert_eq!(*session.diagram(), generate(&FlowRecord::default()));
    assert!(session.diagram().is_empty());
}

#[test]
fn open_session_falls_back_to_auto_layout_when_only_the_diagram_fetch_fails() {
    let store = FakeStore {
        record: Some(sample_record()),
        diagram_error: Some(|| StoreError::Transport("timeout".to_string())),
        ..Default::default()
    };

    let session = block_on(open_session(&store, "flow-1"));
    assert_eq!(session.mode(), LayoutMode::Auto);
    assert_eq!(*session.diagram(), generate(&sample_record()));
}

#[test]
fn save_session_writes_the_current_snapshot() {
    let store = FakeStore {
        record: Some(sample_record()),
        ..Default::default()
    };

    let mut session = block_on(open_session(&store, "flow-1"));
    session.add_node(NodeVariant::Storage, Position { x: 500.0, y: 60.0 });

    block_on(save_session(&store, "flow-1", &session)).expect("save succeeds");
    assert_eq!(store.saved.borrow().as_ref(), Some(&session.export_snapshot()));
}

#[test]
fn a_failed_save_leaves_the_session_editable() {
    let store = FakeStore {
        record: Some(sample_record()),
        save_error: Some(|| StoreError::Transport("quota exceeded".to_string())),
        ..Default::default()
    };

    let mut session = block_on(open_session(&store, "flow-1"));
    let err = block_on(save_session(&store, "flow-1", &session)).unwrap_err();
    assert!(matches!(err, StoreError::Transport(_)));

    // Editing continues against the in-memory diagram.
    session.add_node(NodeVariant::Entity, Position { x: 0.0, y: 0.0 });
    assert_eq!(session.mode(), LayoutMode::Manual);
}

#[test]
fn snapshot_round_trips_through_persisted_json() {
    let record = sample_record();
    let store = FakeStore {
        record: Some(record.clone()),
        ..Default::default()
    };

    let mut session = block_on(open_session(&store, "flow-1"));
    session.add_node(NodeVariant::Security, Position { x: 700.0, y: 50.0 });
    let snapshot = session.export_snapshot();

    let wire = serde_json::to_value(&snapshot).expect("serializes");
    let restored = Diagram::from_persisted(&wire).expect("persisted shape accepted");
    let reopened = ropa::EditSession::load(Some(restored), &record);

    assert_eq!(reopened.mode(), LayoutMode::Manual);
    assert_eq!(*reopened.diagram(), snapshot);
}

#[test]
fn a_malformed_record_section_still_yields_the_other_sections() {
    let record = FlowRecord::from_value(&json!({
        "generalData": 42,
        "securityData": {
            "matrix": {
                "physical": { "enumerare": "locked cabinets" }
            }
        }
    }));

    let diagram = generate(&record);
    // Security is the only populated section: one category and one item node.
    assert_eq!(diagram.nodes.len(), 2);
    assert_eq!(diagram.nodes[0].variant, NodeVariant::Security);
}
