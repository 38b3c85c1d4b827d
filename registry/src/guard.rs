//! Validation & Ownership Guard
//!
//! Shared preconditions of nearly every entry point: zero call value,
//! affordable fixed gas cost, argument presence, token existence and
//! caller-is-owner. The issuance variant checks value against the
//! configured issuing cost and the token name against the configured
//! length bounds instead.

use dcdt_common::dcdt::{ConfigRecord, RegistryError, RegistryResult, TokenRecord};

use crate::identifier::is_valid_token_name;
use crate::vm::{ExecutionContext, Host, RegistryStorage};

/// Common precondition set. On success returns the token identifier and
/// the loaded record, untouched.
pub fn basic_ownership_checks<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
) -> RegistryResult<(Vec<u8>, TokenRecord)> {
    if !ctx.input.call_value.is_zero() {
        return Err(RegistryError::CallValueMustBeZero);
    }
    ctx.use_gas(ctx.gas.dcdt_operation)?;
    let token_id = ctx
        .input
        .args
        .first()
        .cloned()
        .ok_or_else(|| RegistryError::InvalidArgument("token identifier is missing".into()))?;

    let token = ctx.load_token(&token_id)?;
    if token.owner != ctx.input.caller {
        return Err(RegistryError::CallerNotOwner);
    }
    Ok((token_id, token))
}

/// Lighter variant for issuance entry points: charges the issue cost,
/// requires the call value to match the configured issuing cost and the
/// token name to fit the configured bounds. Returns the loaded config.
pub fn issuance_checks<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
    min_args: usize,
    name: &[u8],
) -> RegistryResult<ConfigRecord> {
    ctx.use_gas(ctx.gas.issue)?;
    if ctx.input.args.len() < min_args {
        return Err(RegistryError::InvalidNumberOfArguments);
    }
    let config = ctx.load_config()?;
    if ctx.input.call_value != config.base_issuing_cost {
        return Err(RegistryError::IssuingCostMismatch);
    }
    if !is_valid_token_name(
        name,
        config.min_token_name_length,
        config.max_token_name_length,
    ) {
        return Err(RegistryError::TokenNameNotValid);
    }
    Ok(config)
}
