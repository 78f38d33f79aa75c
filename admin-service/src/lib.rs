//! Admin case management for LabFlow Engine
//!
//! The handoff point from sales to administration:
//! - The VT gate validates that a request is authorized-enough to proceed,
//!   assigns the durable VT folio, and materializes an admin case
//!   snapshotting patient, service, and insurer data by value
//! - The fulfillment tracker drives the case's independent status tracks
//!   (approval, purchasing, logistics, results) and the lab payment list
//!
//! This crate also owns the [`AdminCase`] document model, including the
//! embedded invoice record and payment history that the billing and
//! accounting services operate on.

pub mod fulfillment;
pub mod gate;
pub mod models;
pub mod repository;

pub use fulfillment::*;
pub use gate::*;
pub use models::*;
pub use repository::*;
