//! Common error handling utilities for LabFlow Engine
//!
//! This module provides the standardized error taxonomy used across all
//! LabFlow Engine crates. It ensures consistent error handling, proper
//! error context, and a clean separation between hard failures and
//! non-blocking warnings.
//!
//! # Error Categories
//!
//! - **Validation**: a required field is missing or malformed; rejected
//!   before any state mutation
//! - **Precondition**: the operation is not allowed in the record's current
//!   state (e.g. invoicing an unapproved case, resubmitting a VT request)
//! - **NotFound**: a referenced identifier has no stored record
//! - **Storage**: the key-value store failed the operation
//! - **Serialization**: a stored record could not be encoded or decoded
//!
//! Nothing in the engine is fatal to the process: every failure is local to
//! one operation and leaves prior state untouched.

pub mod types;
pub mod warnings;

pub use types::*;
pub use warnings::*;
