//! Administrative Operations
//!
//! Contract-level management: draining the accumulated issuing fees,
//! rewriting the configuration record and the owner-driven property
//! upgrade entry point.

use dcdt_common::dcdt::{
    ConfigRecord, RegistryError, RegistryResult, END_OF_EPOCH_ADDRESS,
};

use crate::guard::basic_ownership_checks;
use crate::lifecycle::{parse_address, parse_u64, parse_value};
use crate::properties::upgrade_properties;
use crate::vm::{ExecutionContext, Host, RegistryStorage};

/// Send the contract's accumulated balance to the configuration owner.
/// No args.
pub fn claim<S: RegistryStorage, H: Host>(ctx: &mut ExecutionContext<S, H>) -> RegistryResult<()> {
    if !ctx.input.call_value.is_zero() {
        return Err(RegistryError::CallValueMustBeZero);
    }
    ctx.use_gas(ctx.gas.dcdt_operation)?;
    if !ctx.input.args.is_empty() {
        return Err(RegistryError::InvalidNumberOfArguments);
    }
    let config = ctx.load_config()?;
    if ctx.input.caller != config.owner {
        return Err(RegistryError::ConfigOwnerRequired);
    }

    let balance = ctx.host.balance(&ctx.input.recipient);
    ctx.send_value(ctx.input.caller.clone(), balance);
    Ok(())
}

/// Replace the configuration record.
/// Args: new owner, base issuing cost, min name length, max name length
///
/// Accepted from the configuration owner, or from the end-of-epoch
/// system address applying scheduled governance changes.
pub fn config_change<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
) -> RegistryResult<()> {
    if !ctx.input.call_value.is_zero() {
        return Err(RegistryError::CallValueMustBeZero);
    }
    ctx.use_gas(ctx.gas.dcdt_operation)?;
    let config = ctx.load_config()?;
    if ctx.input.caller != config.owner && ctx.input.caller != END_OF_EPOCH_ADDRESS {
        return Err(RegistryError::ConfigOwnerRequired);
    }
    if ctx.input.args.len() != 4 {
        return Err(RegistryError::InvalidNumberOfArguments);
    }

    let owner = parse_address(&ctx.input.args[0])?;
    let base_issuing_cost = parse_value(&ctx.input.args[1])?;
    let min_token_name_length = name_length(&ctx.input.args[2])?;
    let max_token_name_length = name_length(&ctx.input.args[3])?;
    if min_token_name_length > max_token_name_length {
        return Err(RegistryError::InvalidNameLengthBounds);
    }

    ctx.save_config(ConfigRecord {
        owner,
        base_issuing_cost,
        min_token_name_length,
        max_token_name_length,
    });
    Ok(())
}

/// Owner-driven property upgrade of one token.
/// Args: token identifier, then property pairs
pub fn control_changes<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
) -> RegistryResult<()> {
    let input = ctx.input;
    let (token_id, mut token) = basic_ownership_checks(ctx)?;
    if !token.upgradable {
        return Err(RegistryError::TokenNotUpgradable);
    }
    upgrade_properties(ctx, &token_id, &mut token, &input.args[1..], false)?;
    ctx.save_token(&token_id, token);
    Ok(())
}

fn name_length(bytes: &[u8]) -> RegistryResult<u32> {
    let value = parse_u64(bytes)?;
    u32::try_from(value).map_err(|_| RegistryError::InvalidNameLengthBounds)
}
