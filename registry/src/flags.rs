//! Feature Flags
//!
//! Epoch-activated behaviour toggles fixed at construction time. Every
//! validator in every shard must run with identical flag values for a
//! given block range, so flags are plain data, not runtime switches.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnableFlags {
    /// Global enable switch checked by the dispatcher before routing.
    /// While off, every call fails with FunctionNotFound.
    pub registry_enabled: bool,
    /// Legacy global mint/DCDTBurn entry points. Retired in favour of
    /// local per-address roles; off means FunctionNotFound.
    pub global_mint_burn: bool,
    /// Attach and broadcast burn-role-for-all on issuance
    pub burn_role_for_all: bool,
    /// Transfer role and the NFT metadata roles
    pub transfer_role: bool,
    /// Multi-shard NFT creation (one creator per shard-selector byte)
    pub multi_shard_create: bool,
    /// Meta token registration and the SFT-to-meta conversion
    pub meta_registration: bool,
    /// Write token records in the current format (V2). Legacy records
    /// stay readable either way.
    pub current_token_format: bool,
}

impl Default for EnableFlags {
    fn default() -> Self {
        Self {
            registry_enabled: true,
            global_mint_burn: false,
            burn_role_for_all: true,
            transfer_role: true,
            multi_shard_create: true,
            meta_registration: true,
            current_token_format: true,
        }
    }
}
