//! DCDT Domain Module
//!
//! Shared domain layer of the DCDT token standard: token records in both
//! stored wire formats, special roles, the singleton contract
//! configuration, and the error taxonomy returned to the host.

pub mod constants;
pub mod error;
pub mod roles;
pub mod types;

pub use constants::*;
pub use error::*;
pub use roles::*;
pub use types::*;
