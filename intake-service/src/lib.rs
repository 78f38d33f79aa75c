//! Request intake and service selection for LabFlow Engine
//!
//! Entry point of the request lifecycle:
//! - Service request creation from sales-entered data, with a patient
//!   profile pre-seeded from the display name
//! - Patient profile editing (lazy create, wholesale overwrite)
//! - Service selection against the catalog: service, quantity, payment
//!   method (self-pay vs. insurer-billed), and insurer reference
//! - The request-scoped VT record (notes, quoted amount) edited by sales
//!   while it is still pending
//!
//! Everything downstream (insurance gating, admin case spawning, invoicing)
//! reads the records this crate owns but never mutates them.

pub mod models;
pub mod repository;
pub mod selection;
pub mod service;

pub use models::*;
pub use repository::*;
pub use selection::*;
pub use service::*;
