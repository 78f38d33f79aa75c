//! Insurance case tracking for LabFlow Engine
//!
//! State machine over the submission of a request's file to an insurer and
//! the recorded authorization outcome:
//!
//! ```text
//! pending ──▶ submitted ──▶ approved
//!                   └─────▶ rejected
//! ```
//!
//! Approved and rejected may be re-set to pending or to each other manually;
//! this models a human correcting a recorded outcome, not an automated
//! workflow. The absence of an insurance case reads as pending and means "no
//! insurer gating required" downstream.

pub mod models;
pub mod repository;
pub mod service;

pub use models::*;
pub use repository::*;
pub use service::*;
