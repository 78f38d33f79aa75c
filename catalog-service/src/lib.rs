//! Catalog lookup for LabFlow Engine
//!
//! Read-only reference data consumed by the lifecycle engine: test services
//! with price/cost/lab/turnaround, insurers, specialists, and laboratories.
//! The engine only ever reads from the catalog; maintenance of the data is a
//! collaborator concern outside the core.

pub mod models;
pub mod service;

pub use models::*;
pub use service::*;
