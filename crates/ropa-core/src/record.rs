//! The flow record: one business-process data-handling document.
//!
//! Every multi-row section is a "matrix": a mapping from a stable row key to a
//! flat record of string attributes, plus an optional user-supplied row label.
//! Matrices use [`IndexMap`] so iteration follows key-enumeration order, which
//! downstream diagram generation relies on for stable layout.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Read-only contract between a record section and the diagram generator.
///
/// `fields` yields the row's attributes as `(wire name, value)` pairs in the
/// fixed bullet-priority order; empty values are included so callers decide
/// how to render sparseness.
pub trait MatrixRow {
    fn label(&self) -> Option<&str>;
    fn fields(&self) -> Vec<(&'static str, &str)>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlowRecord {
    pub general_data: GeneralData,
    pub people_data: PeopleData,
    pub legal_data: LegalData,
    pub processing_data: ProcessingData,
    pub category_matrix: IndexMap<String, CategoryEntry>,
    pub storage_data: StorageData,
    pub security_data: SecurityData,
}

impl FlowRecord {
    /// Lenient load from an untyped persisted payload.
    ///
    /// A section that is missing or fails to deserialize (e.g. present but not
    /// an object) falls back to its empty default; the remaining sections
    /// still load. A non-object payload yields an empty record.
    pub fn from_value(value: &serde_json::Value) -> Self {
        let Some(map) = value.as_object() else {
            tracing::warn!("record payload is not an object; using an empty record");
            return Self::default();
        };

        Self {
            general_data: section(map, "generalData"),
            people_data: section(map, "peopleData"),
            legal_data: section(map, "legalData"),
            processing_data: section(map, "processingData"),
            category_matrix: section(map, "categoryMatrix"),
            storage_data: section(map, "storageData"),
            security_data: section(map, "securityData"),
        }
    }
}

/// Section-scoped functional updates. Editors hold one immutable record
/// snapshot and produce a new value per change; nothing downstream ever sees
/// a half-updated record.
impl FlowRecord {
    pub fn with_internal_flow_entry(
        mut self,
        key: impl Into<String>,
        entry: InternalFlowEntry,
    ) -> Self {
        self.general_data.internal_flow.insert(key.into(), entry);
        self
    }

    pub fn with_external_see_entry(mut self, key: impl Into<String>, entry: TransferEntry) -> Self {
        self.people_data.external_see.insert(key.into(), entry);
        self
    }

    pub fn with_third_country_entry(
        mut self,
        key: impl Into<String>,
        entry: TransferEntry,
    ) -> Self {
        self.legal_data.third_countries.insert(key.into(), entry);
        self
    }

    pub fn with_special_category_entry(
        mut self,
        key: impl Into<String>,
        entry: CategoryEntry,
    ) -> Self {
        self.processing_data
            .special_categories
            .insert(key.into(), entry);
        self
    }

    pub fn with_category_entry(mut self, key: impl Into<String>, entry: CategoryEntry) -> Self {
        self.category_matrix.insert(key.into(), entry);
        self
    }

    pub fn with_storage_measure(mut self, key: impl Into<String>, entry: MeasureEntry) -> Self {
        self.storage_data.matrix.insert(key.into(), entry);
        self
    }

    pub fn with_security_measure(mut self, key: impl Into<String>, entry: MeasureEntry) -> Self {
        self.security_data.matrix.insert(key.into(), entry);
        self
    }
}

fn section<T>(map: &serde_json::Map<String, serde_json::Value>, key: &str) -> T
where
    T: serde::de::DeserializeOwned + Default,
{
    let Some(raw) = map.get(key) else {
        return T::default();
    };
    match serde_json::from_value(raw.clone()) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(section = key, %err, "skipping malformed record section");
            T::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneralData {
    pub internal_flow: IndexMap<String, InternalFlowEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeopleData {
    #[serde(rename = "externalSEE")]
    pub external_see: IndexMap<String, TransferEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LegalData {
    pub third_countries: IndexMap<String, TransferEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProcessingData {
    pub special_categories: IndexMap<String, CategoryEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageData {
    pub matrix: IndexMap<String, MeasureEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityData {
    pub matrix: IndexMap<String, MeasureEntry>,
}

/// One internal handling point (department + access mode).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InternalFlowEntry {
    /// Optional row rename. Persisted under the legacy `__label` key.
    #[serde(rename = "__label", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub department_name: String,
    pub access_mode: String,
}

impl MatrixRow for InternalFlowEntry {
    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("departmentName", &self.department_name),
            ("accessMode", &self.access_mode),
        ]
    }
}

/// One transfer row, shared by the EEA and third-country sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransferEntry {
    #[serde(rename = "__label", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub recipient: String,
    pub category: String,
    pub dest_state: String,
    pub legal_basis: String,
    pub transfer_type: String,
}

impl MatrixRow for TransferEntry {
    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("legalBasis", &self.legal_basis),
            ("recipient", &self.recipient),
            ("category", &self.category),
            ("destState", &self.dest_state),
            ("transferType", &self.transfer_type),
        ]
    }
}

/// One processing-matrix row (general or special categories of personal data).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CategoryEntry {
    #[serde(rename = "__label", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub enumerare: String,
    pub method: String,
    pub period: String,
    pub storage_only: String,
    pub legal_basis: String,
}

impl MatrixRow for CategoryEntry {
    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("enumerare", &self.enumerare),
            ("method", &self.method),
            ("period", &self.period),
            ("storageOnly", &self.storage_only),
            ("legalBasis", &self.legal_basis),
        ]
    }
}

/// One measure row (storage and security matrices).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MeasureEntry {
    #[serde(rename = "__label", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub enumerare: String,
    pub relevant_docs: String,
}

impl MatrixRow for MeasureEntry {
    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("enumerare", &self.enumerare),
            ("relevantDocs", &self.relevant_docs),
        ]
    }
}
