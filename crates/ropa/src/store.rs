//! Persistence boundary: the record source and diagram sink.
//!
//! The engine only touches the store at two well-defined points (opening a
//! session, saving a snapshot), so the trait stays small and runtime-agnostic.
//! No executor is required by this crate; drive the futures with whatever the
//! host uses.

use ropa_core::record::FlowRecord;
use ropa_diagram::{Diagram, EditSession};

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("transport error: {0}")]
    Transport(String),
}

/// Implemented by the hosting application's persistence layer.
pub trait FlowStore {
    async fn fetch_record(&self, flow_id: &str) -> Result<FlowRecord>;

    /// `Ok(None)` means "no diagram was ever saved for this flow".
    async fn fetch_saved_diagram(&self, flow_id: &str) -> Result<Option<Diagram>>;

    async fn save_diagram(&self, flow_id: &str, diagram: &Diagram) -> Result<()>;
}

/// Opens an edit session for a flow.
///
/// Fetch failures never block the editor: a failed record fetch falls back to
/// an empty record, a failed diagram fetch falls back to auto-generation.
/// Either fallback is logged.
pub async fn open_session<S: FlowStore>(store: &S, flow_id: &str) -> EditSession {
    let record = match store.fetch_record(flow_id).await {
        Ok(record) => record,
        Err(err) => {
            tracing::warn!(flow_id, %err, "record fetch failed; generating from an empty record");
            FlowRecord::default()
        }
    };

    let saved = match store.fetch_saved_diagram(flow_id).await {
        Ok(saved) => saved,
        Err(err) => {
            tracing::warn!(flow_id, %err, "saved-diagram fetch failed; falling back to auto layout");
            None
        }
    };

    EditSession::load(saved, &record)
}

/// Persists the session's current snapshot. No retry: a failed save is
/// surfaced to the caller and the in-memory session stays editable.
pub async fn save_session<S: FlowStore>(
    store: &S,
    flow_id: &str,
    session: &EditSession,
) -> Result<()> {
    store.save_diagram(flow_id, &session.export_snapshot()).await
}
