
use ropa_core::record::{
    CategoryEntry, FlowRecord, InternalFlowEntry, MeasureEntry, TransferEntry,
};

/// A record touching several sections, in a fixed insertion order.
pub(crate) fn sample_record() -> FlowRecord {
    FlowRecord::default()
        .with_internal_flow_entry(
            "r1",
            InternalFlowEntry {
                label: Some("HR".to_string()),
                department_name: "Human Resources".to_string(),
                access_mode: "Read/Write".to_string(),
            },
        )
        .with_third_country_entry(
            "t1",
            TransferEntry {
                label: None,
                recipient: "Cloud host".to_string(),
                category: String::new(),
                dest_state: "US".to_string(),
                legal_basis: "SCC".to_string(),
                transfer_type: String::new(),
            },
        )
        .with_category_entry(
            "identity",
            CategoryEntry {
                label: Some("Date de identificare".to_string()),
                enumerare: "nume, prenume, CNP".to_string(),
                method: "electronic".to_string(),
                period: String::new(),
                storage_only: String::new(),
                legal_basis: String::new(),
            },
        )
        .with_category_entry("untouched", CategoryEntry::default())
        .with_security_measure(
            "physical",
            MeasureEntry {
                label: Some("Măsuri fizice / Physical measures".to_string()),
                enumerare: "locked cabinets".to_string(),
                relevant_docs: String::new(),
            },
        )
}

pub(crate) fn internal_flow_only() -> FlowRecord {
    FlowRecord::default().with_internal_flow_entry(
        "r1",
        InternalFlowEntry {
            label: Some("HR".to_string()),
            department_name: "Human Resources".to_string(),
            access_mode: "Read/Write".to_string(),
        },
    )
}
