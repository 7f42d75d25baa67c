//! patient-core: Patient record, store contract and shared types
//!
//! This crate provides the types shared by every patient store and the HTTP
//! layer: the opaque `Patient` record, the `PatientStore` trait, the
//! `StoreError` taxonomy, the in-memory `MemoryStore` and the `Outcome`
//! error body.

pub mod error;
pub mod memory;
pub mod outcome;
pub mod patient;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use outcome::{IssueCode, IssueSeverity, Outcome};
pub use patient::Patient;
pub use store::{PatientStore, SharedStore};
