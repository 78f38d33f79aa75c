//! Storage layer for LabFlow Engine
//!
//! The engine persists every record through a generic key-value contract:
//! `get`, `set`, `delete`, `list_keys_with_prefix`, plus `compare_and_set`
//! for the one place a pseudo-lock is required (the VT submission guard).
//! The real backing store lives outside the core; this crate provides the
//! trait, an in-process implementation used by tests and embedders, and the
//! JSON record helpers the per-entity repositories are built on.
//!
//! Key layout (per request id `R`, VT folio `V`, adjustment id `X`):
//!
//! - `request:{R}` / `patient:{R}` / `service:{R}` / `insurance:{R}` / `vt:{R}`
//! - `admin-case:{V}`
//! - `credit-adjustment:{X}`
//!
//! Attachments (authorization letters, lab invoices) go through the opaque
//! [`BlobStore`] contract; the engine only ever holds [`AttachmentRef`]
//! values and never inspects attachment contents.

pub mod blobs;
pub mod error;
pub mod memory;
pub mod records;
pub mod store;

pub use blobs::*;
pub use error::*;
pub use memory::*;
pub use records::*;
pub use store::*;
