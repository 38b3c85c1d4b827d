//! Issuance Operations
//!
//! Creation of new token records: fungible issue, NFT/SFT/meta
//! registration, the one-call register-and-set-all-roles variant and the
//! SFT-to-meta conversion. All of them pay the configured issuing cost
//! and receive a freshly generated identifier back as a finish value.

use dcdt_common::dcdt::{
    DcdtRole, RegistryError, RegistryResult, RolesRecord, TokenRecord, TokenType,
    BUILTIN_SET_ROLE, BUILTIN_TRANSFER, MAX_NUM_DECIMALS, REGISTRY_ADDRESS,
};

use crate::broadcast::{send_global_setting_to_all, GlobalSetting};
use crate::guard::{basic_ownership_checks, issuance_checks};
use crate::identifier::generate_token_identifier;
use crate::lifecycle::roles::send_role_notification;
use crate::lifecycle::{parse_decimals, parse_value, value_to_bytes};
use crate::properties::upgrade_properties;
use crate::roles_engine;
use crate::vm::{ExecutionContext, Host, RegistryStorage};

/// Issue a new fungible token.
/// Args: name, ticker, initial supply, decimals, property pairs...
pub fn issue<S: RegistryStorage, H: Host>(ctx: &mut ExecutionContext<S, H>) -> RegistryResult<()> {
    let input = ctx.input;
    let name = input.args.first().map(Vec::as_slice).unwrap_or_default();
    issuance_checks(ctx, 4, name)?;

    let token_id = generate_token_identifier(ctx, &input.args[1])?;
    let supply = parse_value(&input.args[2])?;
    let decimals = parse_decimals(&input.args[3])?;
    if decimals > MAX_NUM_DECIMALS {
        return Err(RegistryError::InvalidNumberOfDecimals);
    }

    let mut record = new_record(ctx, name, &input.args[1], TokenType::Fungible);
    record.num_decimals = decimals;
    record.minted_value = supply;

    upgrade_properties(ctx, &token_id, &mut record, &input.args[4..], true)?;
    attach_burn_role_for_all(ctx, &token_id, &mut record);
    ctx.save_token(&token_id, record);

    ctx.finish(token_id.clone());
    if !supply.is_zero() {
        // The initial supply reaches the issuer through the transfer layer
        ctx.send_builtin_call(
            input.caller.clone(),
            BUILTIN_TRANSFER,
            &[token_id.as_slice(), value_to_bytes(&supply).as_slice()],
        );
    }
    Ok(())
}

/// Register a new non-fungible token.
/// Args: name, ticker, property pairs...
pub fn issue_non_fungible<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
) -> RegistryResult<()> {
    register_non_fungible(ctx, TokenType::NonFungible)
}

/// Register a new semi-fungible token.
/// Args: name, ticker, property pairs...
pub fn issue_semi_fungible<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
) -> RegistryResult<()> {
    register_non_fungible(ctx, TokenType::SemiFungible)
}

fn register_non_fungible<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
    token_type: TokenType,
) -> RegistryResult<()> {
    let input = ctx.input;
    let name = input.args.first().map(Vec::as_slice).unwrap_or_default();
    issuance_checks(ctx, 2, name)?;

    let token_id = generate_token_identifier(ctx, &input.args[1])?;
    let mut record = new_record(ctx, name, &input.args[1], token_type);

    upgrade_properties(ctx, &token_id, &mut record, &input.args[2..], true)?;
    attach_burn_role_for_all(ctx, &token_id, &mut record);
    ctx.save_token(&token_id, record);

    ctx.finish(token_id);
    Ok(())
}

/// Register a new meta token, an SFT with fungible-style decimals.
/// Args: name, ticker, decimals, property pairs...
pub fn register_meta_dcdt<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
) -> RegistryResult<()> {
    if !ctx.flags.meta_registration {
        return Err(RegistryError::FunctionNotFound);
    }
    let input = ctx.input;
    let name = input.args.first().map(Vec::as_slice).unwrap_or_default();
    issuance_checks(ctx, 3, name)?;

    let token_id = generate_token_identifier(ctx, &input.args[1])?;
    let decimals = parse_decimals(&input.args[2])?;
    if decimals > MAX_NUM_DECIMALS {
        return Err(RegistryError::InvalidNumberOfDecimals);
    }

    let mut record = new_record(ctx, name, &input.args[1], TokenType::Meta);
    record.num_decimals = decimals;

    upgrade_properties(ctx, &token_id, &mut record, &input.args[3..], true)?;
    attach_burn_role_for_all(ctx, &token_id, &mut record);
    ctx.save_token(&token_id, record);

    ctx.finish(token_id);
    Ok(())
}

/// Register a token of any type and grant the issuer the full role set of
/// that type in the same call.
/// Args: name, ticker, type code (FNG/NFT/SFT/META), decimals
pub fn register_and_set_all_roles<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
) -> RegistryResult<()> {
    let input = ctx.input;
    let name = input.args.first().map(Vec::as_slice).unwrap_or_default();
    issuance_checks(ctx, 4, name)?;

    let token_type = TokenType::from_type_code(&input.args[2])
        .ok_or(RegistryError::InvalidTokenType)?;
    let decimals = parse_decimals(&input.args[3])?;
    if decimals > MAX_NUM_DECIMALS {
        return Err(RegistryError::InvalidNumberOfDecimals);
    }

    let token_id = generate_token_identifier(ctx, &input.args[1])?;
    let mut record = new_record(ctx, name, &input.args[1], token_type);
    record.num_decimals = decimals;

    upgrade_properties(ctx, &token_id, &mut record, &[], true)?;
    let roles = token_type.all_roles();
    let effects = roles_engine::set_roles(&mut record, &input.caller, &roles)?;
    attach_burn_role_for_all(ctx, &token_id, &mut record);
    ctx.save_token(&token_id, record);

    send_role_notification(
        ctx,
        &token_id,
        &input.caller,
        BUILTIN_SET_ROLE,
        &roles,
        effects.multi_shard_create_grant,
    );
    ctx.finish(token_id);
    Ok(())
}

/// Convert an existing SFT into a meta token.
/// Args: token identifier, decimals
pub fn change_sft_to_meta<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
) -> RegistryResult<()> {
    if !ctx.flags.meta_registration {
        return Err(RegistryError::FunctionNotFound);
    }
    let (token_id, mut token) = basic_ownership_checks(ctx)?;
    if ctx.input.args.len() != 2 {
        return Err(RegistryError::InvalidNumberOfArguments);
    }
    if token.token_type != TokenType::SemiFungible {
        return Err(RegistryError::InvalidTokenType);
    }
    let decimals = parse_decimals(&ctx.input.args[1])?;
    if decimals > MAX_NUM_DECIMALS {
        return Err(RegistryError::InvalidNumberOfDecimals);
    }

    token.token_type = TokenType::Meta;
    token.num_decimals = decimals;
    ctx.save_token(&token_id, token);
    Ok(())
}

fn new_record<S: RegistryStorage, H: Host>(
    ctx: &ExecutionContext<S, H>,
    name: &[u8],
    ticker: &[u8],
    token_type: TokenType,
) -> TokenRecord {
    // Name and ticker passed validation, both are plain ASCII here
    TokenRecord::new(
        ctx.input.caller.clone(),
        String::from_utf8_lossy(name).into_owned(),
        String::from_utf8_lossy(ticker).into_owned(),
        token_type,
    )
}

/// Record the token-wide burn grant and mirror it to every shard
fn attach_burn_role_for_all<S: RegistryStorage, H: Host>(
    ctx: &mut ExecutionContext<S, H>,
    token_id: &[u8],
    record: &mut TokenRecord,
) {
    if !ctx.flags.burn_role_for_all {
        return;
    }
    let mut entry = RolesRecord::new(REGISTRY_ADDRESS);
    entry.roles.push(DcdtRole::BurnForAll);
    record.special_roles.push(entry);
    send_global_setting_to_all(ctx, token_id, &GlobalSetting::SetBurnRoleForAll);
}
