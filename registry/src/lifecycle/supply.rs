//! Global Supply Operations
//!
//! Contract-mediated mint and burn of fungible supply. Both entry points
//! exist only while the global mint/burn flag is active; once local
//! mint/burn roles took over, calls land on FunctionNotFound exactly as
//! if the functions had been removed from the contract.

use dcdt_common::dcdt::{RegistryError, RegistryResult, TokenType, BUILTIN_TRANSFER};

use crate::guard::basic_ownership_checks;
use crate::lifecycle::{parse_address, parse_value, value_to_bytes};
use crate::vm::{ExecutionContext, Host, RegistryStorage};

/// Mint additional fungible supply and deliver it to a destination.
/// Args: token identifier, value, optional destination address
pub fn mint<S: RegistryStorage, H: Host>(ctx: &mut ExecutionContext<S, H>) -> RegistryResult<()> {
    if !ctx.flags.global_mint_burn {
        return Err(RegistryError::FunctionNotFound);
    }
    let (token_id, mut token) = basic_ownership_checks(ctx)?;
    if ctx.input.args.len() < 2 || ctx.input.args.len() > 3 {
        return Err(RegistryError::InvalidNumberOfArguments);
    }
    if token.token_type != TokenType::Fungible {
        return Err(RegistryError::InvalidTokenType);
    }
    if !token.mintable {
        return Err(RegistryError::TokenNotMintable);
    }

    let value = parse_value(&ctx.input.args[1])?;
    let destination = match ctx.input.args.get(2) {
        Some(arg) => parse_address(arg)?,
        None => ctx.input.caller.clone(),
    };

    token.minted_value = token.minted_value.saturating_add(value);
    ctx.save_token(&token_id, token);
    ctx.send_builtin_call(
        destination,
        BUILTIN_TRANSFER,
        &[token_id.as_slice(), value_to_bytes(&value).as_slice()],
    );
    Ok(())
}

/// Burn fungible supply previously sent to the contract.
/// Args: token identifier, value
///
/// Callable by anyone, not just the owner. A burn against a non-burnable
/// token is not an error: the value is refunded to the caller and the
/// call succeeds without touching the record.
pub fn burn<S: RegistryStorage, H: Host>(ctx: &mut ExecutionContext<S, H>) -> RegistryResult<()> {
    if !ctx.flags.global_mint_burn {
        return Err(RegistryError::FunctionNotFound);
    }
    if !ctx.input.call_value.is_zero() {
        return Err(RegistryError::CallValueMustBeZero);
    }
    ctx.use_gas(ctx.gas.dcdt_operation)?;
    if ctx.input.args.len() != 2 {
        return Err(RegistryError::InvalidNumberOfArguments);
    }
    let token_id = ctx.input.args[0].clone();
    let value = parse_value(&ctx.input.args[1])?;
    let mut token = ctx.load_token(&token_id)?;

    if !token.burnable {
        ctx.send_builtin_call(
            ctx.input.caller.clone(),
            BUILTIN_TRANSFER,
            &[token_id.as_slice(), value_to_bytes(&value).as_slice()],
        );
        return Ok(());
    }

    // No cross-check against minted_value: local burn roles count burns
    // this contract never saw, so burnt may legitimately run ahead
    token.burnt_value = token.burnt_value.saturating_add(value);
    ctx.save_token(&token_id, token);
    Ok(())
}
