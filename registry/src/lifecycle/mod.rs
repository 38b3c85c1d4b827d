//! Lifecycle Operations
//!
//! The state-changing entry points of the registry. Every operation
//! loads an owned token record, threads it through the engines by value
//! and persists it once at the end, so partial mutation is never
//! observable. Failure semantics are uniform: a non-Ok result discards
//! the whole overlay.

pub mod admin;
pub mod freeze_wipe;
pub mod issue;
pub mod ownership;
pub mod pause;
pub mod queries;
pub mod roles;
pub mod supply;

use std::str::FromStr;

use primitive_types::U256;

use dcdt_common::address::Address;
use dcdt_common::dcdt::{DcdtRole, RegistryError, RegistryResult, MAX_VALUE_BYTES};

/// Big-endian big-integer argument, bounded to the maximum encoding
pub(crate) fn parse_value(bytes: &[u8]) -> RegistryResult<U256> {
    if bytes.len() > MAX_VALUE_BYTES {
        return Err(RegistryError::InvalidArgument(
            "value encoding too long".into(),
        ));
    }
    Ok(U256::from_big_endian(bytes))
}

/// Minimal big-endian encoding used in finish values and builtin args
pub(crate) fn value_to_bytes(value: &U256) -> Vec<u8> {
    let bytes = value.to_big_endian();
    let skip = bytes.iter().take_while(|b| **b == 0).count();
    bytes[skip..].to_vec()
}

/// Big-endian unsigned integer argument of at most 8 bytes
pub(crate) fn parse_u64(bytes: &[u8]) -> RegistryResult<u64> {
    if bytes.len() > 8 {
        return Err(RegistryError::InvalidArgument(
            "integer encoding too long".into(),
        ));
    }
    let mut buf = [0u8; 8];
    buf[8 - bytes.len()..].copy_from_slice(bytes);
    Ok(u64::from_be_bytes(buf))
}

/// Decimal count argument (fits in a u32)
pub(crate) fn parse_decimals(bytes: &[u8]) -> RegistryResult<u32> {
    let value = parse_u64(bytes)?;
    u32::try_from(value).map_err(|_| RegistryError::InvalidNumberOfDecimals)
}

/// Structurally valid address argument
pub(crate) fn parse_address(bytes: &[u8]) -> RegistryResult<Address> {
    Address::from_slice(bytes).map_err(|_| RegistryError::InvalidAddress)
}

/// Role-name arguments, parsed by their exact wire spellings
pub(crate) fn parse_roles(args: &[Vec<u8>]) -> RegistryResult<Vec<DcdtRole>> {
    args.iter()
        .map(|arg| {
            let name = std::str::from_utf8(arg)
                .map_err(|_| RegistryError::InvalidArgument("invalid role name".into()))?;
            DcdtRole::from_str(name)
                .map_err(|_| RegistryError::InvalidArgument(format!("unknown role {}", name)))
        })
        .collect()
}
