//! Registry Error Codes
//!
//! Every failure is non-fatal and block-committable: the host charges the
//! call and commits the block regardless of the outcome. The wire-level
//! taxonomy is the small [`ReturnCode`] set; [`RegistryError`] keeps the
//! precise reason and renders the diagnostic return message.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::serializer::ReaderError;

/// Result code returned to the host for every executed call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReturnCode {
    #[default]
    Ok,
    FunctionNotFound,
    FunctionWrongSignature,
    UserError,
    OutOfFunds,
    OutOfGas,
}

impl ReturnCode {
    pub fn is_ok(&self) -> bool {
        matches!(self, ReturnCode::Ok)
    }
}

/// Registry operation result type
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Precise failure reasons of registry operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    // ===== Call shape =====
    #[error("callValue must be 0")]
    CallValueMustBeZero,

    #[error("callValue not equal to base issuing cost")]
    IssuingCostMismatch,

    #[error("not enough gas")]
    NotEnoughGas,

    #[error("invalid number of arguments")]
    InvalidNumberOfArguments,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("built-in function not found or disabled")]
    FunctionNotFound,

    // ===== Validation =====
    #[error("ticker name is not valid")]
    TickerNameNotValid,

    #[error("token name is not valid")]
    TokenNameNotValid,

    #[error("number of decimals is out of range")]
    InvalidNumberOfDecimals,

    #[error("invalid address")]
    InvalidAddress,

    #[error("could not create new token identifier")]
    CouldNotCreateNewTokenIdentifier,

    // ===== Token state =====
    #[error("no token with given identifier")]
    TokenNotFound,

    #[error("can be called by token owner only")]
    CallerNotOwner,

    #[error("token is not upgradable")]
    TokenNotUpgradable,

    #[error("token is not mintable")]
    TokenNotMintable,

    #[error("token cannot be paused")]
    TokenNotPausable,

    #[error("token cannot be frozen")]
    TokenNotFreezable,

    #[error("token cannot be wiped")]
    TokenNotWipeable,

    #[error("token owner cannot be changed")]
    OwnerNotChangeable,

    #[error("NFT create role cannot be transferred")]
    NftCreateRoleNotTransferable,

    #[error("token is already paused")]
    TokenAlreadyPaused,

    #[error("token is not paused")]
    TokenNotPaused,

    #[error("invalid token type for this operation")]
    InvalidTokenType,

    // ===== Roles =====
    #[error("cannot add special roles to this token")]
    CannotAddSpecialRoles,

    #[error("special role already exists for address")]
    SpecialRoleAlreadyExists,

    #[error("special role does not exist for address")]
    SpecialRoleNotFound,

    #[error("role is not allowed for this token type")]
    RoleNotAllowedForTokenType,

    #[error("NFT creation was stopped forever")]
    NftCreateStopped,

    #[error("NFT create role already exists for another address")]
    NftCreateRoleAlreadyExists,

    #[error("NFT create role cannot be unset through this call")]
    CannotUnsetNftCreateRole,

    #[error("no transfer role address is set for token")]
    NoTransferRoleAddresses,

    // ===== Config =====
    #[error("can be called by config owner only")]
    ConfigOwnerRequired,

    #[error("min length must not exceed max length")]
    InvalidNameLengthBounds,

    // ===== Storage =====
    #[error("stored record could not be decoded: {0}")]
    StorageCorrupted(#[from] ReaderError),
}

impl RegistryError {
    /// Map the precise reason onto the wire-level taxonomy
    pub fn return_code(&self) -> ReturnCode {
        match self {
            Self::CallValueMustBeZero | Self::IssuingCostMismatch => ReturnCode::OutOfFunds,
            Self::NotEnoughGas => ReturnCode::OutOfGas,
            Self::InvalidNumberOfArguments => ReturnCode::FunctionWrongSignature,
            Self::FunctionNotFound => ReturnCode::FunctionNotFound,
            _ => ReturnCode::UserError,
        }
    }
}

/// Fatal construction-time failures. Unlike [`RegistryError`], these
/// prevent the contract from being instantiated at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryInitError {
    #[error("base issuing cost is not a valid value")]
    InvalidBaseIssuingCost,

    #[error("min token name length exceeds max token name length")]
    InvalidNameLengthBounds,

    #[error("at least one shard is required")]
    NoShards,

    #[error("multi-shard NFT create requires the current token storage format")]
    IncompatibleFlags,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_code_mapping() {
        assert_eq!(
            RegistryError::CallValueMustBeZero.return_code(),
            ReturnCode::OutOfFunds
        );
        assert_eq!(
            RegistryError::IssuingCostMismatch.return_code(),
            ReturnCode::OutOfFunds
        );
        assert_eq!(
            RegistryError::NotEnoughGas.return_code(),
            ReturnCode::OutOfGas
        );
        assert_eq!(
            RegistryError::InvalidNumberOfArguments.return_code(),
            ReturnCode::FunctionWrongSignature
        );
        assert_eq!(
            RegistryError::FunctionNotFound.return_code(),
            ReturnCode::FunctionNotFound
        );
        // Address and identifier failures stay distinguishable as variants
        // but travel as UserError on the wire
        assert_eq!(
            RegistryError::InvalidAddress.return_code(),
            ReturnCode::UserError
        );
        assert_eq!(
            RegistryError::CouldNotCreateNewTokenIdentifier.return_code(),
            ReturnCode::UserError
        );
    }

    #[test]
    fn test_messages_are_human_readable() {
        assert_eq!(
            RegistryError::TokenNotFound.to_string(),
            "no token with given identifier"
        );
        assert_eq!(
            RegistryError::SpecialRoleAlreadyExists.to_string(),
            "special role already exists for address"
        );
    }
}
