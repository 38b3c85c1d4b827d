//! DCDT Constants
//!
//! Limits, key prefixes and on-wire builtin function names shared by the
//! registry contract and the per-shard enforcement layer.

use crate::address::Address;

// ===== Identifier Limits =====

/// Minimum ticker length (bytes)
pub const MIN_TICKER_LENGTH: usize = 3;

/// Maximum ticker length (bytes)
pub const MAX_TICKER_LENGTH: usize = 10;

/// Hex characters in the pseudo-random identifier suffix
pub const IDENTIFIER_SUFFIX_LENGTH: usize = 6;

/// Bounded retries when an identifier is already taken
pub const MAX_IDENTIFIER_ATTEMPTS: u32 = 50;

// ===== Token Limits =====

/// Maximum decimals for a token
pub const MAX_NUM_DECIMALS: u32 = 18;

/// Maximum byte length of a big-integer value argument
pub const MAX_VALUE_BYTES: usize = 32;

/// Default minimum token name length, overridable through configChange
pub const DEFAULT_MIN_TOKEN_NAME_LENGTH: u32 = 3;

/// Default maximum token name length, overridable through configChange
pub const DEFAULT_MAX_TOKEN_NAME_LENGTH: u32 = 20;

// ===== Storage Keys =====

/// Key of the singleton configuration record. Token identifiers always
/// contain a `-` and are at most MAX_TICKER_LENGTH + 7 bytes, so this
/// longer dash-free literal can never collide with one.
pub const CONFIG_KEY: &[u8] = b"dcdtConfigurationRecordKey";

// ===== Well-Known Addresses =====

/// Address of the registry contract itself. Burn-role-for-all entries are
/// recorded under it inside the token record.
pub const REGISTRY_ADDRESS: Address = {
    let mut bytes = [0u8; 32];
    bytes[30] = 0x02;
    bytes[31] = 0xff;
    Address::new(bytes)
};

/// Hard-coded caller allowed to perform configChange at end of epoch
pub const END_OF_EPOCH_ADDRESS: Address = {
    let mut bytes = [0u8; 32];
    bytes[30] = 0x01;
    bytes[31] = 0xff;
    Address::new(bytes)
};

// ===== Builtin Function Names =====
//
// Consumed by the per-shard transfer layer; the registry only ever emits
// them inside outbound messages.

pub const BUILTIN_TRANSFER: &str = "DCDTTransfer";
pub const BUILTIN_FREEZE: &str = "DCDTFreeze";
pub const BUILTIN_UNFREEZE: &str = "DCDTUnFreeze";
pub const BUILTIN_WIPE: &str = "DCDTWipe";
pub const BUILTIN_PAUSE: &str = "DCDTPause";
pub const BUILTIN_UNPAUSE: &str = "DCDTUnPause";
pub const BUILTIN_SET_ROLE: &str = "DCDTSetRole";
pub const BUILTIN_UNSET_ROLE: &str = "DCDTUnSetRole";
pub const BUILTIN_SET_BURN_ROLE_FOR_ALL: &str = "DCDTSetBurnRoleForAll";
pub const BUILTIN_UNSET_BURN_ROLE_FOR_ALL: &str = "DCDTUnSetBurnRoleForAll";
pub const BUILTIN_SET_LIMITED_TRANSFER: &str = "DCDTSetLimitedTransfer";
pub const BUILTIN_UNSET_LIMITED_TRANSFER: &str = "DCDTUnSetLimitedTransfer";
pub const BUILTIN_TRANSFER_ROLE_ADD_ADDRESS: &str = "DCDTTransferRoleAddAddress";
pub const BUILTIN_TRANSFER_ROLE_DELETE_ADDRESS: &str = "DCDTTransferRoleDeleteAddress";

/// Wire role name sent instead of NFT-create when multi-shard creation is
/// active for the token
pub const MULTI_SHARD_CREATE_ROLE_NAME: &str = "DCDTRoleNFTCreateMultiShard";

// ===== Property Names (ABI spellings) =====

pub const PROPERTY_CAN_FREEZE: &str = "canFreeze";
pub const PROPERTY_CAN_WIPE: &str = "canWipe";
pub const PROPERTY_CAN_PAUSE: &str = "canPause";
pub const PROPERTY_CAN_MINT: &str = "canMint";
pub const PROPERTY_CAN_BURN: &str = "canBurn";
pub const PROPERTY_CAN_CHANGE_OWNER: &str = "canChangeOwner";
pub const PROPERTY_CAN_UPGRADE: &str = "canUpgrade";
pub const PROPERTY_CAN_ADD_SPECIAL_ROLES: &str = "canAddSpecialRoles";
pub const PROPERTY_CAN_TRANSFER_NFT_CREATE_ROLE: &str = "canTransferNFTCreateRole";
pub const PROPERTY_CAN_CREATE_MULTI_SHARD: &str = "canCreateMultiShard";
