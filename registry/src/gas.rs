//! Gas Schedule
//!
//! Fixed per-operation costs supplied by the host at construction and
//! replaceable at runtime through [`crate::TokenRegistry::set_gas_schedule`].
//! Gas is the only resource budget; exhaustion yields OutOfGas, never a
//! timeout.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasSchedule {
    /// Cost of every issuance/registration entry point
    pub issue: u64,
    /// Cost of every other DCDT operation
    pub dcdt_operation: u64,
}

impl Default for GasSchedule {
    fn default() -> Self {
        Self {
            issue: 50_000_000,
            dcdt_operation: 500_000,
        }
    }
}
