//! Collections ledger for LabFlow Engine
//!
//! Applies payments against a stamped invoice's outstanding balance, flips
//! the case to paid when the balance reaches zero, and keeps the standalone
//! credit adjustment records (credit notes, discounts, commissions) that
//! never touch the invoice they reference.

pub mod adjustments;
pub mod models;
pub mod repository;
pub mod service;

pub use adjustments::*;
pub use models::*;
pub use repository::*;
pub use service::*;
