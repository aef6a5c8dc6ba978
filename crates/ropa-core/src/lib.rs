#![forbid(unsafe_code)]

//! ROPA flow-record model (headless).
//!
//! Design goals:
//! - a single immutable `FlowRecord` snapshot per editing session (no shared
//!   mutable form state threaded through consumers)
//! - deterministic section iteration (matrices keep their key-enumeration
//!   order, so downstream layout is stable across reloads)
//! - lenient loading: a malformed section degrades to its empty default
//!   instead of failing the whole record

pub mod record;
pub mod sanitize;

pub use record::{
    CategoryEntry, FlowRecord, GeneralData, InternalFlowEntry, LegalData, MatrixRow, MeasureEntry,
    PeopleData, ProcessingData, SecurityData, StorageData, TransferEntry,
};
