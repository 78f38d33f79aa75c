//! Invoicing engine for LabFlow Engine
//!
//! Issues the one active invoice of an admin case: computes the tax
//! breakdown (2-decimal half-away-from-zero rounding), stamps the case,
//! freezes the amounts, and initializes the outstanding balance the
//! collections ledger draws down. Also assembles the printable invoice data
//! consumed by the external document renderer.

pub mod documents;
pub mod models;
pub mod service;
pub mod tax;

pub use documents::*;
pub use models::*;
pub use service::*;
pub use tax::*;
